use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use faitness::db::models::{Acknowledgement, Exercise, ExerciseChanges, NewExercise, Updated};
use faitness::db::operations;
use faitness::error::ApiError;
use log::debug;

use super::{collection, member};
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    collection("exercises", get(list).post(create))
        .merge(member("exercises", get(fetch).put(update).delete(remove)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Exercise>>, ApiError> {
    state
        .unit_of_work(operations::get_all_exercises)
        .await
        .map(Json)
}

async fn fetch(
    State(state): State<AppState>,
    EntityId(exercise_id): EntityId,
) -> Result<Json<Exercise>, ApiError> {
    state
        .unit_of_work(move |db| operations::get_exercise(db, exercise_id))
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    ValidJson(new_exercise): ValidJson<NewExercise>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    let exercise = state
        .unit_of_work(move |db| operations::create_exercise(db, &new_exercise))
        .await?;
    debug!("Created exercise {} in workout {}", exercise.id, exercise.workout_id);
    Ok((StatusCode::CREATED, Json(exercise)))
}

async fn update(
    State(state): State<AppState>,
    EntityId(exercise_id): EntityId,
    ValidJson(changes): ValidJson<ExerciseChanges>,
) -> Result<Json<Updated<ExerciseChanges>>, ApiError> {
    state
        .unit_of_work(move |db| operations::update_exercise(db, exercise_id, &changes))
        .await
        .map(Json)
}

async fn remove(
    State(state): State<AppState>,
    EntityId(exercise_id): EntityId,
) -> Result<Json<Acknowledgement>, ApiError> {
    state
        .unit_of_work(move |db| operations::delete_exercise(db, exercise_id))
        .await
        .map(Json)
}
