use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use faitness::db::models::{Meal, NewMeal};
use faitness::db::operations;
use faitness::error::ApiError;

use super::{collection, member};
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    collection("meals", get(list).post(create)).merge(member("meals", get(fetch)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Meal>>, ApiError> {
    state.unit_of_work(operations::get_all_meals).await.map(Json)
}

async fn fetch(
    State(state): State<AppState>,
    EntityId(meal_id): EntityId,
) -> Result<Json<Meal>, ApiError> {
    state
        .unit_of_work(move |db| operations::get_meal(db, meal_id))
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    ValidJson(new_meal): ValidJson<NewMeal>,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    let meal = state
        .unit_of_work(move |db| operations::create_meal(db, &new_meal))
        .await?;
    Ok((StatusCode::CREATED, Json(meal)))
}
