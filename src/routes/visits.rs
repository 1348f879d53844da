use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::models::Visit;
use crate::AppState;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VisitRequest {
    #[validate(
        required(message = "Hotel ID is required."),
        range(min = 1, message = "Hotel ID must be a positive integer.")
    )]
    hotel_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VisitResponse {
    visit_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/visits", post(track_visit))
}

async fn track_visit(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(form): ValidatedJson<VisitRequest>,
) -> Result<(StatusCode, Json<VisitResponse>), AppError> {
    let hotel_id = form
        .hotel_id
        .ok_or_else(|| AppError::InvalidInput("Hotel ID is required.".to_string()))?;

    let visit = Visit::new(user.id, hotel_id);
    sqlx::query("INSERT INTO visits (id, user_id, hotel_id, visit_date) VALUES (?, ?, ?, ?)")
        .bind(&visit.id)
        .bind(&visit.user_id)
        .bind(visit.hotel_id)
        .bind(&visit.visit_date)
        .execute(&state.db)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VisitResponse { visit_id: visit.id }),
    ))
}
