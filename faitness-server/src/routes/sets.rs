use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use faitness::db::models::{NewSet, Set};
use faitness::db::operations;
use faitness::error::ApiError;

use super::{collection, member};
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    collection("sets", get(list).post(create)).merge(member("sets", get(fetch)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Set>>, ApiError> {
    state.unit_of_work(operations::get_all_sets).await.map(Json)
}

async fn fetch(
    State(state): State<AppState>,
    EntityId(set_id): EntityId,
) -> Result<Json<Set>, ApiError> {
    state
        .unit_of_work(move |db| operations::get_set(db, set_id))
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    ValidJson(new_set): ValidJson<NewSet>,
) -> Result<(StatusCode, Json<Set>), ApiError> {
    let set = state
        .unit_of_work(move |db| operations::create_set(db, &new_set))
        .await?;
    Ok((StatusCode::CREATED, Json(set)))
}
