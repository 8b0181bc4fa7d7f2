use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use faitness::db::models::{NewWorkout, Workout};
use faitness::db::operations;
use faitness::error::ApiError;

use super::{collection, member};
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    collection("workouts", get(list).post(create)).merge(member("workouts", get(fetch)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Workout>>, ApiError> {
    state
        .unit_of_work(operations::get_all_workouts)
        .await
        .map(Json)
}

async fn fetch(
    State(state): State<AppState>,
    EntityId(workout_id): EntityId,
) -> Result<Json<Workout>, ApiError> {
    state
        .unit_of_work(move |db| operations::get_workout(db, workout_id))
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    ValidJson(new_workout): ValidJson<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let workout = state
        .unit_of_work(move |db| operations::create_workout(db, &new_workout))
        .await?;
    Ok((StatusCode::CREATED, Json(workout)))
}
