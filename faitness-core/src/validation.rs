use crate::db::models::{
    ExerciseChanges, NewExercise, NewIngredient, NewMeal, NewMealDay, NewSet, NewUser,
    NewWorkout, UserChanges,
};
use crate::error::ApiError;

pub const MAX_TEXT_LEN: usize = 255;

pub const DAYS_OF_WEEK: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Field-level checks run on request bodies before they reach the database.
///
/// Only shape is checked here. Whether a referenced parent exists is left to
/// the database and reported as a conflict.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

fn required_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ApiError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

fn email(value: &str) -> Result<(), ApiError> {
    required_text("email", value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::validation("Invalid email format"))
    }
}

fn positive(field: &str, value: i32) -> Result<(), ApiError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "{} must be a positive number",
            field
        )))
    }
}

fn non_negative(field: &str, value: i32) -> Result<(), ApiError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "{} must be a non-negative number",
            field
        )))
    }
}

fn day_of_week(value: &str) -> Result<(), ApiError> {
    if DAYS_OF_WEEK.contains(&value) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "day_of_week must be one of {}",
            DAYS_OF_WEEK.join(", ")
        )))
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ApiError> {
        required_text("name", &self.name)?;
        email(&self.email)
    }
}

impl Validate for UserChanges {
    fn validate(&self) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation("No fields to update"));
        }
        if let Some(name) = &self.name {
            required_text("name", name)?;
        }
        if let Some(value) = &self.email {
            email(value)?;
        }
        Ok(())
    }
}

impl Validate for NewWorkout {
    fn validate(&self) -> Result<(), ApiError> {
        required_text("name", &self.name)?;
        positive("user_id", self.user_id)
    }
}

impl Validate for NewExercise {
    fn validate(&self) -> Result<(), ApiError> {
        required_text("name", &self.name)?;
        positive("workout_id", self.workout_id)
    }
}

impl Validate for ExerciseChanges {
    fn validate(&self) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation("No fields to update"));
        }
        if let Some(name) = &self.name {
            required_text("name", name)?;
        }
        if let Some(workout_id) = self.workout_id {
            positive("workout_id", workout_id)?;
        }
        Ok(())
    }
}

impl Validate for NewSet {
    fn validate(&self) -> Result<(), ApiError> {
        positive("exercise_id", self.exercise_id)?;
        positive("reps", self.reps)?;
        positive("weight", self.weight)
    }
}

impl Validate for NewMeal {
    fn validate(&self) -> Result<(), ApiError> {
        required_text("name", &self.name)?;
        positive("user_id", self.user_id)
    }
}

impl Validate for NewIngredient {
    fn validate(&self) -> Result<(), ApiError> {
        required_text("name", &self.name)?;
        non_negative("calories", self.calories)?;
        non_negative("protein", self.protein)?;
        non_negative("carbs", self.carbs)?;
        non_negative("fat", self.fat)?;
        positive("meal_id", self.meal_id)
    }
}

impl Validate for NewMealDay {
    fn validate(&self) -> Result<(), ApiError> {
        positive("meal_id", self.meal_id)?;
        day_of_week(&self.day_of_week)
    }
}
