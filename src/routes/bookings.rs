use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::models::{CompletedBooking, DraftBooking};
use crate::AppState;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DraftBookingRequest {
    #[validate(
        required(message = "Hotel ID is required."),
        range(min = 1, message = "Hotel ID must be a positive integer.")
    )]
    hotel_id: Option<i64>,
    #[validate(required(message = "Check-in date is required."))]
    check_in_date: Option<NaiveDate>,
    #[validate(required(message = "Check-out date is required."))]
    check_out_date: Option<NaiveDate>,
    #[validate(required(message = "Price is required."))]
    price: Option<f64>,
}

impl DraftBookingRequest {
    fn into_draft(self, user_id: String) -> Result<DraftBooking, AppError> {
        let (Some(hotel_id), Some(check_in), Some(check_out), Some(price)) =
            (self.hotel_id, self.check_in_date, self.check_out_date, self.price)
        else {
            return Err(AppError::InvalidInput("All fields are required.".to_string()));
        };

        if price <= 0.0 {
            return Err(AppError::InvalidInput("Price must be greater than zero.".to_string()));
        }
        if check_out <= check_in {
            return Err(AppError::InvalidInput(
                "Check-out date must be after check-in date.".to_string(),
            ));
        }

        Ok(DraftBooking::new(user_id, hotel_id, check_in, check_out, price))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftBookingResponse {
    draft_booking_id: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBookingRequest {
    #[validate(
        required(message = "Draft booking ID is required."),
        length(min = 1, message = "Draft booking ID is required.")
    )]
    draft_booking_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteBookingResponse {
    completed_booking_id: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/draft-bookings", post(create_draft_booking))
        .route("/completed-bookings", post(complete_booking))
}

async fn create_draft_booking(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(form): ValidatedJson<DraftBookingRequest>,
) -> Result<(StatusCode, Json<DraftBookingResponse>), AppError> {
    let draft = form.into_draft(user.id)?;

    sqlx::query(
        r#"
        INSERT INTO draft_bookings (id, user_id, hotel_id, check_in_date, check_out_date, price, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.id)
    .bind(&draft.user_id)
    .bind(draft.hotel_id)
    .bind(&draft.check_in_date)
    .bind(&draft.check_out_date)
    .bind(draft.price)
    .bind(&draft.created_at)
    .execute(&state.db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DraftBookingResponse {
            draft_booking_id: draft.id,
        }),
    ))
}

async fn complete_booking(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(form): ValidatedJson<CompleteBookingRequest>,
) -> Result<(StatusCode, Json<CompleteBookingResponse>), AppError> {
    let draft_booking_id = form
        .draft_booking_id
        .ok_or_else(|| AppError::InvalidInput("Draft booking ID is required.".to_string()))?;

    let completed = finalize_draft_booking(&state.db, &user.id, &draft_booking_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CompleteBookingResponse {
            completed_booking_id: completed.id,
        }),
    ))
}

/// Turn one of `user_id`'s draft bookings into a completed booking.
///
/// The draft is deleted and its copy inserted in a single transaction, so a
/// draft is consumed at most once and a failure leaves both tables untouched.
/// Returns `NotFound` when the draft does not exist, was already completed, or
/// belongs to another user.
pub async fn finalize_draft_booking(
    db: &SqlitePool,
    user_id: &str,
    draft_booking_id: &str,
) -> Result<CompletedBooking, AppError> {
    let mut tx = db.begin().await?;

    // Deleting first takes the write lock before the draft is read.
    let draft: Option<DraftBooking> = sqlx::query_as(
        "DELETE FROM draft_bookings WHERE id = ? AND user_id = ? RETURNING *",
    )
    .bind(draft_booking_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(draft) = draft else {
        return Err(AppError::NotFound);
    };

    let completed = CompletedBooking::from_draft(draft);
    sqlx::query(
        r#"
        INSERT INTO completed_bookings (id, draft_booking_id, user_id, hotel_id, check_in_date, check_out_date, price, completed_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&completed.id)
    .bind(&completed.draft_booking_id)
    .bind(&completed.user_id)
    .bind(completed.hotel_id)
    .bind(&completed.check_in_date)
    .bind(&completed.check_out_date)
    .bind(completed.price)
    .bind(&completed.completed_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        completed_booking_id = %completed.id,
        draft_booking_id = %completed.draft_booking_id,
        hotel_id = completed.hotel_id,
        "booking completed"
    );

    Ok(completed)
}
