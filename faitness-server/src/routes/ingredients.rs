use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use faitness::db::models::{Ingredient, NewIngredient};
use faitness::db::operations;
use faitness::error::ApiError;

use super::{collection, member};
use crate::extract::{EntityId, ValidJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    collection("ingredients", get(list).post(create)).merge(member("ingredients", get(fetch)))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Ingredient>>, ApiError> {
    state
        .unit_of_work(operations::get_all_ingredients)
        .await
        .map(Json)
}

async fn fetch(
    State(state): State<AppState>,
    EntityId(ingredient_id): EntityId,
) -> Result<Json<Ingredient>, ApiError> {
    state
        .unit_of_work(move |db| operations::get_ingredient(db, ingredient_id))
        .await
        .map(Json)
}

async fn create(
    State(state): State<AppState>,
    ValidJson(new_ingredient): ValidJson<NewIngredient>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let ingredient = state
        .unit_of_work(move |db| operations::create_ingredient(db, &new_ingredient))
        .await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}
