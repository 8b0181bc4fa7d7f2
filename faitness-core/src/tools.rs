//! HTTP client exposing every API endpoint as one async call.
//!
//! Calls never fail: transport errors, non-2xx statuses and undecodable
//! bodies all come back as [`ToolResponse::Failed`], so a calling agent can
//! keep going after a single bad call. Nothing is retried.

use std::fmt;

use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::db::models::{
    Acknowledgement, Exercise, ExerciseChanges, Ingredient, Meal, MealDay, NewExercise,
    NewIngredient, NewMeal, NewMealDay, NewSet, NewUser, NewWorkout, Set, Updated, User,
    UserChanges, Workout,
};
use crate::error::ErrorBody;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> ToolResponse<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ToolResponse::Ok(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ToolResponse::Ok(value) => Some(value),
            ToolResponse::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ToolResponse::Ok(_) => None,
            ToolResponse::Failed { error } => Some(error),
        }
    }
}

#[derive(Debug, Error)]
enum CallError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("{status}: {detail}")]
    Status { status: StatusCode, detail: String },
}

#[derive(Clone)]
pub struct FitnessTools {
    base_url: String,
    http: Client,
}

impl FitnessTools {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: fmt::Arguments<'_>) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: String,
    ) -> ToolResponse<T> {
        match Self::send(request).await {
            Ok(value) => ToolResponse::Ok(value),
            Err(e) => {
                warn!("Failed to {}: {}", action, e);
                ToolResponse::Failed {
                    error: format!("Failed to {}: {}", action, e),
                }
            }
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, CallError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} {}", status, response.url());
        if !status.is_success() {
            let detail = match response.json::<ErrorBody>().await {
                Ok(body) => body.detail,
                Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            return Err(CallError::Status { status, detail });
        }
        Ok(response.json::<T>().await?)
    }

    // Users
    pub async fn get_users(&self) -> ToolResponse<Vec<User>> {
        let request = self.http.get(self.url(format_args!("users/")));
        self.call(request, "fetch users".to_string()).await
    }

    pub async fn get_user_by_id(&self, user_id: i32) -> ToolResponse<User> {
        let request = self.http.get(self.url(format_args!("users/{}", user_id)));
        self.call(request, format!("fetch user {}", user_id)).await
    }

    pub async fn create_user(&self, user: &NewUser) -> ToolResponse<User> {
        let request = self.http.post(self.url(format_args!("users/"))).json(user);
        self.call(request, "create user".to_string()).await
    }

    pub async fn update_user(
        &self,
        user_id: i32,
        changes: &UserChanges,
    ) -> ToolResponse<Updated<UserChanges>> {
        let request = self
            .http
            .put(self.url(format_args!("users/{}", user_id)))
            .json(changes);
        self.call(request, format!("update user {}", user_id)).await
    }

    pub async fn delete_user(&self, user_id: i32) -> ToolResponse<Acknowledgement> {
        let request = self.http.delete(self.url(format_args!("users/{}", user_id)));
        self.call(request, format!("delete user {}", user_id)).await
    }

    // Workouts
    pub async fn get_workouts(&self) -> ToolResponse<Vec<Workout>> {
        let request = self.http.get(self.url(format_args!("workouts/")));
        self.call(request, "fetch workouts".to_string()).await
    }

    pub async fn get_workout_by_id(&self, workout_id: i32) -> ToolResponse<Workout> {
        let request = self
            .http
            .get(self.url(format_args!("workouts/{}", workout_id)));
        self.call(request, format!("fetch workout {}", workout_id))
            .await
    }

    pub async fn create_workout(&self, workout: &NewWorkout) -> ToolResponse<Workout> {
        let request = self
            .http
            .post(self.url(format_args!("workouts/")))
            .json(workout);
        self.call(request, "create workout".to_string()).await
    }

    // Exercises
    pub async fn get_exercises(&self) -> ToolResponse<Vec<Exercise>> {
        let request = self.http.get(self.url(format_args!("exercises/")));
        self.call(request, "fetch exercises".to_string()).await
    }

    pub async fn get_exercise_by_id(&self, exercise_id: i32) -> ToolResponse<Exercise> {
        let request = self
            .http
            .get(self.url(format_args!("exercises/{}", exercise_id)));
        self.call(request, format!("fetch exercise {}", exercise_id))
            .await
    }

    pub async fn create_exercise(&self, exercise: &NewExercise) -> ToolResponse<Exercise> {
        let request = self
            .http
            .post(self.url(format_args!("exercises/")))
            .json(exercise);
        self.call(request, "create exercise".to_string()).await
    }

    pub async fn update_exercise(
        &self,
        exercise_id: i32,
        changes: &ExerciseChanges,
    ) -> ToolResponse<Updated<ExerciseChanges>> {
        let request = self
            .http
            .put(self.url(format_args!("exercises/{}", exercise_id)))
            .json(changes);
        self.call(request, format!("update exercise {}", exercise_id))
            .await
    }

    pub async fn delete_exercise(&self, exercise_id: i32) -> ToolResponse<Acknowledgement> {
        let request = self
            .http
            .delete(self.url(format_args!("exercises/{}", exercise_id)));
        self.call(request, format!("delete exercise {}", exercise_id))
            .await
    }

    // Sets
    pub async fn get_sets(&self) -> ToolResponse<Vec<Set>> {
        let request = self.http.get(self.url(format_args!("sets/")));
        self.call(request, "fetch sets".to_string()).await
    }

    pub async fn get_set_by_id(&self, set_id: i32) -> ToolResponse<Set> {
        let request = self.http.get(self.url(format_args!("sets/{}", set_id)));
        self.call(request, format!("fetch set {}", set_id)).await
    }

    pub async fn create_set(&self, set: &NewSet) -> ToolResponse<Set> {
        let request = self.http.post(self.url(format_args!("sets/"))).json(set);
        self.call(request, "create set".to_string()).await
    }

    // Meals
    pub async fn get_meals(&self) -> ToolResponse<Vec<Meal>> {
        let request = self.http.get(self.url(format_args!("meals/")));
        self.call(request, "fetch meals".to_string()).await
    }

    pub async fn get_meal_by_id(&self, meal_id: i32) -> ToolResponse<Meal> {
        let request = self.http.get(self.url(format_args!("meals/{}", meal_id)));
        self.call(request, format!("fetch meal {}", meal_id)).await
    }

    pub async fn create_meal(&self, meal: &NewMeal) -> ToolResponse<Meal> {
        let request = self.http.post(self.url(format_args!("meals/"))).json(meal);
        self.call(request, "create meal".to_string()).await
    }

    // Ingredients
    pub async fn get_ingredients(&self) -> ToolResponse<Vec<Ingredient>> {
        let request = self.http.get(self.url(format_args!("ingredients/")));
        self.call(request, "fetch ingredients".to_string()).await
    }

    pub async fn get_ingredient_by_id(&self, ingredient_id: i32) -> ToolResponse<Ingredient> {
        let request = self
            .http
            .get(self.url(format_args!("ingredients/{}", ingredient_id)));
        self.call(request, format!("fetch ingredient {}", ingredient_id))
            .await
    }

    pub async fn create_ingredient(&self, ingredient: &NewIngredient) -> ToolResponse<Ingredient> {
        let request = self
            .http
            .post(self.url(format_args!("ingredients/")))
            .json(ingredient);
        self.call(request, "create ingredient".to_string()).await
    }

    // Meal days
    pub async fn get_meal_days(&self) -> ToolResponse<Vec<MealDay>> {
        let request = self.http.get(self.url(format_args!("meal-days/")));
        self.call(request, "fetch meal days".to_string()).await
    }

    pub async fn get_meal_day_by_id(&self, meal_day_id: i32) -> ToolResponse<MealDay> {
        let request = self
            .http
            .get(self.url(format_args!("meal-days/{}", meal_day_id)));
        self.call(request, format!("fetch meal day {}", meal_day_id))
            .await
    }

    pub async fn create_meal_day(&self, meal_day: &NewMealDay) -> ToolResponse<MealDay> {
        let request = self
            .http
            .post(self.url(format_args!("meal-days/")))
            .json(meal_day);
        self.call(request, "create meal day".to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_user_decodes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "name": "Ann", "email": "a@x.com"
            })))
            .mount(&server)
            .await;

        let tools = FitnessTools::new(server.uri());
        let user = tools.get_user_by_id(1).await;
        assert_eq!(
            user,
            ToolResponse::Ok(User {
                id: 1,
                name: "Ann".to_string(),
                email: "a@x.com".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_create_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/meal-days/"))
            .and(body_json(json!({ "meal_id": 4, "day_of_week": "friday" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 9, "meal_id": 4, "day_of_week": "friday"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tools = FitnessTools::new(format!("{}/", server.uri()));
        let created = tools
            .create_meal_day(&NewMealDay {
                meal_id: 4,
                day_of_week: "friday".to_string(),
            })
            .await;
        assert_eq!(created.ok().map(|day| day.id), Some(9));
    }

    #[tokio::test]
    async fn test_error_status_becomes_error_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/users/999"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "User not found" })),
            )
            .mount(&server)
            .await;

        let tools = FitnessTools::new(server.uri());
        let response = tools.get_user_by_id(999).await;
        assert_eq!(
            response.error(),
            Some("Failed to fetch user 999: 404 Not Found: User not found")
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "error": "Failed to fetch user 999: 404 Not Found: User not found" })
        );
    }

    #[tokio::test]
    async fn test_conflict_without_json_body_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/exercises/"))
            .respond_with(ResponseTemplate::new(409).set_body_string("nope"))
            .mount(&server)
            .await;

        let tools = FitnessTools::new(server.uri());
        let response = tools
            .create_exercise(&NewExercise {
                name: "Squat".to_string(),
                description: "Leg day".to_string(),
                workout_id: 1,
            })
            .await;
        assert_eq!(
            response.error(),
            Some("Failed to create exercise: 409 Conflict: Conflict")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_error_shape() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let tools = FitnessTools::new(uri);
        let response = tools.get_workouts().await;
        assert!(!response.is_ok());
        assert!(
            response
                .error()
                .is_some_and(|e| e.starts_with("Failed to fetch workouts: "))
        );
    }

    #[tokio::test]
    async fn test_update_echo_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/users/3"))
            .and(body_json(json!({ "email": "new@x.com" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "id": 3, "email": "new@x.com" })),
            )
            .mount(&server)
            .await;

        let tools = FitnessTools::new(server.uri());
        let changes = UserChanges {
            name: None,
            email: Some("new@x.com".to_string()),
        };
        let echo = tools.update_user(3, &changes).await.ok().unwrap();
        assert_eq!(echo, Updated { id: 3, changes });
    }
}
