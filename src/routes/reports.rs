use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{ActivityReport, Recommendation};
use crate::AppState;

pub const RECOMMENDATION_LIMIT: i64 = 5;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    hotel_id: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities", get(activities))
        .route("/recommendations", get(recommendations))
}

async fn activities(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityReport>, AppError> {
    let hotel_id = query
        .hotel_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Hotel ID is required.".to_string()))?;
    let hotel_id: i64 = hotel_id
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput("Hotel ID must be an integer.".to_string()))?;

    Ok(Json(hotel_activity(&state.db, hotel_id).await?))
}

async fn recommendations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    Ok(Json(recommend_hotels(&state.db, &user.id).await?))
}

/// Count visits, draft bookings, and completed bookings for one hotel across all users.
pub async fn hotel_activity(db: &SqlitePool, hotel_id: i64) -> Result<ActivityReport, AppError> {
    let report: ActivityReport = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM visits WHERE hotel_id = ?) AS total_visits,
            (SELECT COUNT(*) FROM draft_bookings WHERE hotel_id = ?) AS draft_bookings,
            (SELECT COUNT(*) FROM completed_bookings WHERE hotel_id = ?) AS completed_bookings
        "#,
    )
    .bind(hotel_id)
    .bind(hotel_id)
    .bind(hotel_id)
    .fetch_one(db)
    .await?;

    Ok(report)
}

/// Rank the hotels a user has interacted with.
///
/// Every visit, draft booking, and completed booking adds one to its hotel's
/// score. Highest score first, ties broken by ascending hotel id, at most
/// [`RECOMMENDATION_LIMIT`] entries.
pub async fn recommend_hotels(
    db: &SqlitePool,
    user_id: &str,
) -> Result<Vec<Recommendation>, AppError> {
    let ranked: Vec<Recommendation> = sqlx::query_as(
        r#"
        SELECT hotel_id, COUNT(*) AS score
        FROM (
            SELECT hotel_id FROM visits WHERE user_id = ?
            UNION ALL
            SELECT hotel_id FROM draft_bookings WHERE user_id = ?
            UNION ALL
            SELECT hotel_id FROM completed_bookings WHERE user_id = ?
        ) AS user_activities
        GROUP BY hotel_id
        ORDER BY score DESC, hotel_id ASC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(user_id)
    .bind(RECOMMENDATION_LIMIT)
    .fetch_all(db)
    .await?;

    Ok(ranked)
}
