use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DraftBooking {
    pub id: String,
    pub user_id: String,
    pub hotel_id: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub price: f64,
    pub created_at: String,
}

impl DraftBooking {
    pub fn new(
        user_id: String,
        hotel_id: i64,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        price: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            hotel_id,
            check_in_date: check_in_date.to_string(),
            check_out_date: check_out_date.to_string(),
            price,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompletedBooking {
    pub id: String,
    pub draft_booking_id: String,
    pub user_id: String,
    pub hotel_id: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub price: f64,
    pub completed_at: String,
}

impl CompletedBooking {
    /// Copy a draft's booking fields verbatim into a new completed record.
    pub fn from_draft(draft: DraftBooking) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            draft_booking_id: draft.id,
            user_id: draft.user_id,
            hotel_id: draft.hotel_id,
            check_in_date: draft.check_in_date,
            check_out_date: draft.check_out_date,
            price: draft.price,
            completed_at: Utc::now().to_rfc3339(),
        }
    }
}
