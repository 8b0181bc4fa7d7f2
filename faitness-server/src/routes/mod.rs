//! HTTP surface.
//!
//! The router is composed once in [`router`] and never touched afterwards.
//! Collection paths answer with and without a trailing slash.

mod exercises;
mod ingredients;
mod meal_days;
mod meals;
mod sets;
mod users;
mod workouts;

use axum::extract::State;
use axum::routing::{MethodRouter, get};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;

use crate::fallback::{panic_response, unknown_route, unsupported_method};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(users::routes())
        .merge(workouts::routes())
        .merge(exercises::routes())
        .merge(sets::routes())
        .merge(meals::routes())
        .merge(ingredients::routes())
        .merge(meal_days::routes())
        .method_not_allowed_fallback(unsupported_method)
        .fallback(unknown_route)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Registers `methods` on `/api/v1/{name}` and `/api/v1/{name}/`.
fn collection(name: &str, methods: MethodRouter<AppState>) -> Router<AppState> {
    let path = format!("{}/{}", API_PREFIX, name);
    Router::new()
        .route(&format!("{}/", path), methods.clone())
        .route(&path, methods)
}

fn member(name: &str, methods: MethodRouter<AppState>) -> Router<AppState> {
    Router::new().route(&format!("{}/{}/{{id}}", API_PREFIX, name), methods)
}

#[derive(Serialize)]
struct Banner {
    message: &'static str,
}

async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Faitness API is running!",
    })
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    timestamp: String,
    database: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    let connected = state
        .unit_of_work(|db| Ok(db.ping()))
        .await
        .unwrap_or(false);
    Json(Health {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        database: if connected {
            "Connected"
        } else {
            "Disconnected"
        },
    })
}
