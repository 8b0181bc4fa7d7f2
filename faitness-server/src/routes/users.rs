use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use faitness::db::models::{Acknowledgement, NewUser, Updated, User, UserChanges};
use faitness::db::operations;
use faitness::error::ApiError;
use log::debug;

use super::{collection, member};
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    collection("users", get(list).post(create))
        .merge(member("users", get(fetch).put(update).delete(remove)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    state.unit_of_work(operations::get_all_users).await.map(Json)
}

async fn fetch(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
) -> Result<Json<User>, ApiError> {
    state
        .unit_of_work(move |db| operations::get_user(db, user_id))
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    ValidJson(new_user): ValidJson<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .unit_of_work(move |db| operations::create_user(db, &new_user))
        .await?;
    debug!("Created user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
    ValidJson(changes): ValidJson<UserChanges>,
) -> Result<Json<Updated<UserChanges>>, ApiError> {
    state
        .unit_of_work(move |db| operations::update_user(db, user_id, &changes))
        .await
        .map(Json)
}

async fn remove(
    State(state): State<AppState>,
    EntityId(user_id): EntityId,
) -> Result<Json<Acknowledgement>, ApiError> {
    state
        .unit_of_work(move |db| operations::delete_user(db, user_id))
        .await
        .map(Json)
}
