use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use faitness::db::models::{MealDay, NewMealDay};
use faitness::db::operations;
use faitness::error::ApiError;

use super::{collection, member};
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    collection("meal-days", get(list).post(create)).merge(member("meal-days", get(fetch)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<MealDay>>, ApiError> {
    state
        .unit_of_work(operations::get_all_meal_days)
        .await
        .map(Json)
}

async fn fetch(
    State(state): State<AppState>,
    EntityId(meal_day_id): EntityId,
) -> Result<Json<MealDay>, ApiError> {
    state
        .unit_of_work(move |db| operations::get_meal_day(db, meal_day_id))
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    ValidJson(new_meal_day): ValidJson<NewMealDay>,
) -> Result<(StatusCode, Json<MealDay>), ApiError> {
    let meal_day = state
        .unit_of_work(move |db| operations::create_meal_day(db, &new_meal_day))
        .await?;
    Ok((StatusCode::CREATED, Json(meal_day)))
}
