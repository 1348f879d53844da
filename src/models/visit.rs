use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Visit {
    pub id: String,
    pub user_id: String,
    pub hotel_id: i64,
    pub visit_date: String,
}

impl Visit {
    pub fn new(user_id: String, hotel_id: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            hotel_id,
            visit_date: Utc::now().to_rfc3339(),
        }
    }
}
