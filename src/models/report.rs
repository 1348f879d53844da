use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-hotel activity counts across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub total_visits: i64,
    pub draft_bookings: i64,
    pub completed_bookings: i64,
}

/// A hotel and the number of times a user interacted with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recommendation {
    pub hotel_id: i64,
    pub score: i64,
}
