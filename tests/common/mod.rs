#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use hotel_booking::config::{Config, PasswordCost};
use hotel_booking::models::{CompletedBooking, DraftBooking, User, Visit};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
    pub config: Config,
}

pub fn test_config() -> Config {
    let mut config = Config::new("sqlite::memory:", TEST_SECRET);
    config.password_cost = PasswordCost {
        iterations: 1,
        memory_kib: 8,
    };
    config
}

impl TestApp {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        hotel_booking::db::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let config = test_config();
        let router = hotel_booking::build_app(pool.clone(), config.clone());

        Self {
            router,
            db: pool,
            config,
        }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    /// Insert a user directly and return (user_id, bearer token).
    pub async fn create_user(&self, name: &str) -> (String, String) {
        let email = format!("{}@example.com", uuid::Uuid::new_v4());
        let user = User::new(name.to_string(), email, "unused-hash".to_string());

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.created_at)
        .execute(&self.db)
        .await
        .expect("Failed to create test user");

        let token = hotel_booking::auth::issue_token(&self.config, &user.id).unwrap();
        (user.id, token)
    }

    /// Register through the API.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Response {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        self.post_json("/register", &body, None).await
    }

    /// Log in through the API and return the issued token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self.post_json("/login", &body, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        json["token"]
            .as_str()
            .expect("Login should return a token")
            .to_string()
    }

    /// Send a GET request with an optional bearer token.
    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let req = builder.body(Body::empty()).unwrap();
        self.request(req).await
    }

    /// Send a POST JSON request with an optional bearer token.
    pub async fn post_json(&self, uri: &str, body: &Value, token: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        self.request(req).await
    }

    pub async fn insert_visit(&self, user_id: &str, hotel_id: i64) {
        let visit = Visit::new(user_id.to_string(), hotel_id);
        sqlx::query("INSERT INTO visits (id, user_id, hotel_id, visit_date) VALUES (?, ?, ?, ?)")
            .bind(&visit.id)
            .bind(&visit.user_id)
            .bind(visit.hotel_id)
            .bind(&visit.visit_date)
            .execute(&self.db)
            .await
            .expect("Failed to insert visit");
    }

    pub async fn insert_draft(&self, user_id: &str, hotel_id: i64) -> DraftBooking {
        let draft = DraftBooking::new(
            user_id.to_string(),
            hotel_id,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            480.5,
        );
        sqlx::query(
            "INSERT INTO draft_bookings (id, user_id, hotel_id, check_in_date, check_out_date, price, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.id)
        .bind(&draft.user_id)
        .bind(draft.hotel_id)
        .bind(&draft.check_in_date)
        .bind(&draft.check_out_date)
        .bind(draft.price)
        .bind(&draft.created_at)
        .execute(&self.db)
        .await
        .expect("Failed to insert draft booking");
        draft
    }

    pub async fn insert_completed(&self, user_id: &str, hotel_id: i64) {
        let draft = DraftBooking::new(
            user_id.to_string(),
            hotel_id,
            chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            200.0,
        );
        let completed = CompletedBooking::from_draft(draft);
        sqlx::query(
            "INSERT INTO completed_bookings (id, draft_booking_id, user_id, hotel_id, check_in_date, check_out_date, price, completed_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&completed.id)
        .bind(&completed.draft_booking_id)
        .bind(&completed.user_id)
        .bind(completed.hotel_id)
        .bind(&completed.check_in_date)
        .bind(&completed.check_out_date)
        .bind(completed.price)
        .bind(&completed.completed_at)
        .execute(&self.db)
        .await
        .expect("Failed to insert completed booking");
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(&self.db).await.unwrap()
    }
}

/// Read the full response body as JSON.
pub async fn body_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the response is a JSON error with the given status and return its message.
pub async fn assert_error(resp: Response, expected: StatusCode) -> String {
    assert_eq!(resp.status(), expected);
    let json = body_json(resp).await;
    json["error"]
        .as_str()
        .expect("Error responses should carry an error message")
        .to_string()
}
