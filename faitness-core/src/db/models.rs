use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::db::schema;

// User models
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(AsChangeset, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = schema::users)]
pub struct UserChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

// Workout models
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::workouts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Workout {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::workouts)]
pub struct NewWorkout {
    pub name: String,
    pub user_id: i32,
}

// Exercise models
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::exercises)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Exercise {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub workout_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::exercises)]
pub struct NewExercise {
    pub name: String,
    pub description: String,
    pub workout_id: i32,
}

#[derive(AsChangeset, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = schema::exercises)]
pub struct ExerciseChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<i32>,
}

impl ExerciseChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.workout_id.is_none()
    }
}

// Set models
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Set {
    pub id: i32,
    pub exercise_id: i32,
    pub reps: i32,
    pub weight: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::sets)]
pub struct NewSet {
    pub exercise_id: i32,
    pub reps: i32,
    pub weight: i32,
}

// Meal models
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::meals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Meal {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::meals)]
pub struct NewMeal {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: i32,
}

// Ingredient models
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub meal_id: i32,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::ingredients)]
pub struct NewIngredient {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub meal_id: i32,
}

// Meal day models
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::meal_days)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MealDay {
    pub id: i32,
    pub meal_id: i32,
    pub day_of_week: String,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = schema::meal_days)]
pub struct NewMealDay {
    pub meal_id: i32,
    pub day_of_week: String,
}

/// Echo of an accepted update: the path id plus the fields as submitted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Updated<C> {
    pub id: i32,
    #[serde(flatten)]
    pub changes: C,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn deleted(resource: &str) -> Self {
        Self {
            message: format!("{} deleted successfully", resource),
        }
    }
}
