use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::auth::issue_token;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::models::User;
use crate::password::Password;
use crate::AppState;

// Surrounding whitespace is dropped before validation, so a blank value counts as empty.
fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Name is required."))]
    name: String,
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(email(message = "Email must be a valid email address."))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long."))]
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    user_id: String,
    message: &'static str,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "Email is required."))]
    email: String,
    #[validate(length(min = 1, message = "Password is required."))]
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    message: &'static str,
    token: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    // users.email is COLLATE NOCASE, so this lookup and the UNIQUE index ignore case.
    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
        .bind(&form.email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(email_taken());
    }

    let password = Password::hash(&form.password, state.config.password_cost)?;
    let user = User::new(form.name, form.email, password.as_str().to_string());

    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.created_at)
    .execute(&state.db)
    .await
    .map_err(|e| {
        // Another registration for the same email won the race past the check above.
        let err = AppError::from(e);
        if err.is_unique_violation() { email_taken() } else { err }
    })?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            message: "User registered successfully.",
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = ?")
        .bind(&form.email)
        .fetch_optional(&state.db)
        .await?;

    let Some(user) = user else {
        return Err(AppError::InvalidCredentials);
    };

    if !Password::from_hash(user.password_hash).verify(&form.password) {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(&state.config, &user.id)?;
    Ok(Json(LoginResponse {
        message: "Login successful.",
        token,
    }))
}

fn email_taken() -> AppError {
    AppError::Conflict("Email already exists.".to_string())
}
