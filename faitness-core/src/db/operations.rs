use diesel::prelude::*;
use log::debug;

use crate::{
    db::Database,
    db::models::{
        Acknowledgement, Exercise, ExerciseChanges, Ingredient, Meal, MealDay, NewExercise,
        NewIngredient, NewMeal, NewMealDay, NewSet, NewUser, NewWorkout, Set, Updated, User,
        UserChanges, Workout,
    },
    db::schema::{exercises, ingredients, meal_days, meals, sets, users, workouts},
    error::ApiError,
};

type Result<T> = std::result::Result<T, ApiError>;

pub const USER: &str = "User";
pub const WORKOUT: &str = "Workout";
pub const EXERCISE: &str = "Exercise";
pub const SET: &str = "Set";
pub const MEAL: &str = "Meal";
pub const INGREDIENT: &str = "Ingredient";
pub const MEAL_DAY: &str = "Meal day";

const NO_CHANGES: &str = "No fields to update";

// Users
pub fn get_all_users(db: &Database) -> Result<Vec<User>> {
    db.read("get_users", |conn| {
        users::table
            .order(users::id)
            .select(User::as_select())
            .load(conn)
    })
}

pub fn get_user(db: &Database, user_id: i32) -> Result<User> {
    db.lookup("get_user", USER, |conn| {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
    })
}

pub fn create_user(db: &Database, new_user: &NewUser) -> Result<User> {
    db.write("create_user", |conn| {
        diesel::insert_into(users::table)
            .values(new_user)
            .returning(User::as_returning())
            .get_result(conn)
    })
}

/// Nonexistent ids are a silent no-op; the submitted fields are echoed back.
pub fn update_user(
    db: &Database,
    user_id: i32,
    changes: &UserChanges,
) -> Result<Updated<UserChanges>> {
    if changes.is_empty() {
        return Err(ApiError::validation(NO_CHANGES));
    }
    let updated = db.write("update_user", |conn| {
        diesel::update(users::table.find(user_id))
            .set(changes)
            .execute(conn)
    })?;
    debug!("update_user({}) touched {} rows", user_id, updated);
    Ok(Updated {
        id: user_id,
        changes: changes.clone(),
    })
}

pub fn delete_user(db: &Database, user_id: i32) -> Result<Acknowledgement> {
    let removed = db.write("delete_user", |conn| {
        diesel::delete(users::table.find(user_id)).execute(conn)
    })?;
    debug!("delete_user({}) removed {} rows", user_id, removed);
    Ok(Acknowledgement::deleted(USER))
}

// Workouts
pub fn get_all_workouts(db: &Database) -> Result<Vec<Workout>> {
    db.read("get_workouts", |conn| {
        workouts::table
            .order(workouts::id)
            .select(Workout::as_select())
            .load(conn)
    })
}

pub fn get_workout(db: &Database, workout_id: i32) -> Result<Workout> {
    db.lookup("get_workout", WORKOUT, |conn| {
        workouts::table
            .find(workout_id)
            .select(Workout::as_select())
            .first(conn)
            .optional()
    })
}

pub fn create_workout(db: &Database, new_workout: &NewWorkout) -> Result<Workout> {
    db.write("create_workout", |conn| {
        diesel::insert_into(workouts::table)
            .values(new_workout)
            .returning(Workout::as_returning())
            .get_result(conn)
    })
}

// Exercises
pub fn get_all_exercises(db: &Database) -> Result<Vec<Exercise>> {
    db.read("get_exercises", |conn| {
        exercises::table
            .order(exercises::id)
            .select(Exercise::as_select())
            .load(conn)
    })
}

pub fn get_exercise(db: &Database, exercise_id: i32) -> Result<Exercise> {
    db.lookup("get_exercise", EXERCISE, |conn| {
        exercises::table
            .find(exercise_id)
            .select(Exercise::as_select())
            .first(conn)
            .optional()
    })
}

pub fn create_exercise(db: &Database, new_exercise: &NewExercise) -> Result<Exercise> {
    db.write("create_exercise", |conn| {
        diesel::insert_into(exercises::table)
            .values(new_exercise)
            .returning(Exercise::as_returning())
            .get_result(conn)
    })
}

pub fn update_exercise(
    db: &Database,
    exercise_id: i32,
    changes: &ExerciseChanges,
) -> Result<Updated<ExerciseChanges>> {
    if changes.is_empty() {
        return Err(ApiError::validation(NO_CHANGES));
    }
    let updated = db.write("update_exercise", |conn| {
        diesel::update(exercises::table.find(exercise_id))
            .set(changes)
            .execute(conn)
    })?;
    debug!("update_exercise({}) touched {} rows", exercise_id, updated);
    Ok(Updated {
        id: exercise_id,
        changes: changes.clone(),
    })
}

pub fn delete_exercise(db: &Database, exercise_id: i32) -> Result<Acknowledgement> {
    let removed = db.write("delete_exercise", |conn| {
        diesel::delete(exercises::table.find(exercise_id)).execute(conn)
    })?;
    debug!("delete_exercise({}) removed {} rows", exercise_id, removed);
    Ok(Acknowledgement::deleted(EXERCISE))
}

// Sets
pub fn get_all_sets(db: &Database) -> Result<Vec<Set>> {
    db.read("get_sets", |conn| {
        sets::table
            .order(sets::id)
            .select(Set::as_select())
            .load(conn)
    })
}

pub fn get_set(db: &Database, set_id: i32) -> Result<Set> {
    db.lookup("get_set", SET, |conn| {
        sets::table
            .find(set_id)
            .select(Set::as_select())
            .first(conn)
            .optional()
    })
}

pub fn create_set(db: &Database, new_set: &NewSet) -> Result<Set> {
    db.write("create_set", |conn| {
        diesel::insert_into(sets::table)
            .values(new_set)
            .returning(Set::as_returning())
            .get_result(conn)
    })
}

// Meals
pub fn get_all_meals(db: &Database) -> Result<Vec<Meal>> {
    db.read("get_meals", |conn| {
        meals::table
            .order(meals::id)
            .select(Meal::as_select())
            .load(conn)
    })
}

pub fn get_meal(db: &Database, meal_id: i32) -> Result<Meal> {
    db.lookup("get_meal", MEAL, |conn| {
        meals::table
            .find(meal_id)
            .select(Meal::as_select())
            .first(conn)
            .optional()
    })
}

pub fn create_meal(db: &Database, new_meal: &NewMeal) -> Result<Meal> {
    db.write("create_meal", |conn| {
        diesel::insert_into(meals::table)
            .values(new_meal)
            .returning(Meal::as_returning())
            .get_result(conn)
    })
}

// Ingredients
pub fn get_all_ingredients(db: &Database) -> Result<Vec<Ingredient>> {
    db.read("get_ingredients", |conn| {
        ingredients::table
            .order(ingredients::id)
            .select(Ingredient::as_select())
            .load(conn)
    })
}

pub fn get_ingredient(db: &Database, ingredient_id: i32) -> Result<Ingredient> {
    db.lookup("get_ingredient", INGREDIENT, |conn| {
        ingredients::table
            .find(ingredient_id)
            .select(Ingredient::as_select())
            .first(conn)
            .optional()
    })
}

pub fn create_ingredient(db: &Database, new_ingredient: &NewIngredient) -> Result<Ingredient> {
    db.write("create_ingredient", |conn| {
        diesel::insert_into(ingredients::table)
            .values(new_ingredient)
            .returning(Ingredient::as_returning())
            .get_result(conn)
    })
}

// Meal days
pub fn get_all_meal_days(db: &Database) -> Result<Vec<MealDay>> {
    db.read("get_meal_days", |conn| {
        meal_days::table
            .order(meal_days::id)
            .select(MealDay::as_select())
            .load(conn)
    })
}

pub fn get_meal_day(db: &Database, meal_day_id: i32) -> Result<MealDay> {
    db.lookup("get_meal_day", MEAL_DAY, |conn| {
        meal_days::table
            .find(meal_day_id)
            .select(MealDay::as_select())
            .first(conn)
            .optional()
    })
}

pub fn create_meal_day(db: &Database, new_meal_day: &NewMealDay) -> Result<MealDay> {
    db.write("create_meal_day", |conn| {
        diesel::insert_into(meal_days::table)
            .values(new_meal_day)
            .returning(MealDay::as_returning())
            .get_result(conn)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::guard::{INVALID_DATA, REFERENCED_RESOURCE_MISSING, RESOURCE_EXISTS};
    use crate::db::test_support;
    use pretty_assertions::assert_eq;

    fn ann() -> NewUser {
        NewUser {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_user_lifecycle() {
        let (db, _dir) = test_support::database();
        assert!(get_all_users(&db).unwrap().is_empty());

        let user = create_user(&db, &ann()).unwrap();
        assert_eq!(
            user,
            User {
                id: 1,
                name: "Ann".to_string(),
                email: "a@x.com".to_string(),
            }
        );
        assert_eq!(get_user(&db, user.id).unwrap(), user);
        assert_eq!(get_all_users(&db).unwrap(), vec![user.clone()]);

        let changes = UserChanges {
            name: Some("Annie".to_string()),
            email: None,
        };
        let echo = update_user(&db, user.id, &changes).unwrap();
        assert_eq!(echo.id, user.id);
        assert_eq!(echo.changes, changes);
        assert_eq!(get_user(&db, user.id).unwrap().name, "Annie");

        let ack = delete_user(&db, user.id).unwrap();
        assert_eq!(ack.message, "User deleted successfully");
        assert_eq!(get_user(&db, user.id), Err(ApiError::NotFound(USER)));
    }

    #[test]
    fn test_missing_rows_are_not_found() {
        let (db, _dir) = test_support::database();
        assert_eq!(get_user(&db, 999), Err(ApiError::NotFound(USER)));
        assert_eq!(get_workout(&db, 999), Err(ApiError::NotFound(WORKOUT)));
        assert_eq!(get_exercise(&db, 999), Err(ApiError::NotFound(EXERCISE)));
        assert_eq!(get_set(&db, 999), Err(ApiError::NotFound(SET)));
        assert_eq!(get_meal(&db, 999), Err(ApiError::NotFound(MEAL)));
        assert_eq!(get_ingredient(&db, 999), Err(ApiError::NotFound(INGREDIENT)));
        assert_eq!(get_meal_day(&db, 999), Err(ApiError::NotFound(MEAL_DAY)));
    }

    #[test]
    fn test_update_and_delete_of_missing_rows_are_silent() {
        let (db, _dir) = test_support::database();
        let changes = UserChanges {
            name: Some("Ghost".to_string()),
            email: None,
        };
        assert_eq!(update_user(&db, 42, &changes).unwrap().id, 42);
        assert!(delete_user(&db, 42).is_ok());
        assert!(delete_exercise(&db, 42).is_ok());
        assert!(get_all_users(&db).unwrap().is_empty());
    }

    #[test]
    fn test_empty_changes_are_rejected() {
        let (db, _dir) = test_support::database();
        assert_eq!(
            update_user(&db, 1, &UserChanges::default()),
            Err(ApiError::validation(NO_CHANGES))
        );
        assert_eq!(
            update_exercise(&db, 1, &ExerciseChanges::default()),
            Err(ApiError::validation(NO_CHANGES))
        );
    }

    #[test]
    fn test_missing_parent_is_a_conflict() {
        let (db, _dir) = test_support::database();
        let result = create_exercise(
            &db,
            &NewExercise {
                name: "Squat".to_string(),
                description: "Leg day".to_string(),
                workout_id: 1,
            },
        );
        assert_eq!(result, Err(ApiError::conflict(REFERENCED_RESOURCE_MISSING)));
        assert!(get_all_exercises(&db).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_email_is_a_conflict() {
        let (db, _dir) = test_support::database();
        create_user(&db, &ann()).unwrap();
        assert_eq!(
            create_user(&db, &ann()),
            Err(ApiError::conflict(RESOURCE_EXISTS))
        );
        assert_eq!(get_all_users(&db).unwrap().len(), 1);
    }

    #[test]
    fn test_check_constraint_is_a_conflict() {
        let (db, _dir) = test_support::database();
        let user = create_user(&db, &ann()).unwrap();
        let meal = create_meal(
            &db,
            &NewMeal {
                name: "Oats".to_string(),
                description: None,
                user_id: user.id,
            },
        )
        .unwrap();
        let result = create_meal_day(
            &db,
            &NewMealDay {
                meal_id: meal.id,
                day_of_week: "someday".to_string(),
            },
        );
        assert_eq!(result, Err(ApiError::conflict(INVALID_DATA)));
    }

    #[test]
    fn test_full_hierarchy_round_trips() {
        let (db, _dir) = test_support::database();
        let user = create_user(&db, &ann()).unwrap();

        let workout = create_workout(
            &db,
            &NewWorkout {
                name: "Push".to_string(),
                user_id: user.id,
            },
        )
        .unwrap();
        assert_eq!(get_workout(&db, workout.id).unwrap(), workout);

        let exercise = create_exercise(
            &db,
            &NewExercise {
                name: "Bench".to_string(),
                description: "Flat bench press".to_string(),
                workout_id: workout.id,
            },
        )
        .unwrap();
        assert_eq!(get_exercise(&db, exercise.id).unwrap(), exercise);

        let set = create_set(
            &db,
            &NewSet {
                exercise_id: exercise.id,
                reps: 5,
                weight: 100,
            },
        )
        .unwrap();
        assert_eq!(get_set(&db, set.id).unwrap(), set);

        let meal = create_meal(
            &db,
            &NewMeal {
                name: "Breakfast".to_string(),
                description: Some("Eggs and toast".to_string()),
                user_id: user.id,
            },
        )
        .unwrap();
        assert_eq!(get_meal(&db, meal.id).unwrap(), meal);

        let ingredient = create_ingredient(
            &db,
            &NewIngredient {
                name: "Egg".to_string(),
                description: None,
                calories: 78,
                protein: 6,
                carbs: 1,
                fat: 5,
                meal_id: meal.id,
            },
        )
        .unwrap();
        assert_eq!(ingredient.description, None);
        assert_eq!(get_ingredient(&db, ingredient.id).unwrap(), ingredient);

        let meal_day = create_meal_day(
            &db,
            &NewMealDay {
                meal_id: meal.id,
                day_of_week: "monday".to_string(),
            },
        )
        .unwrap();
        assert_eq!(get_meal_day(&db, meal_day.id).unwrap(), meal_day);

        // Children go with their parent.
        delete_user(&db, user.id).unwrap();
        assert!(get_all_workouts(&db).unwrap().is_empty());
        assert!(get_all_sets(&db).unwrap().is_empty());
        assert!(get_all_ingredients(&db).unwrap().is_empty());
        assert!(get_all_meal_days(&db).unwrap().is_empty());
    }

    #[test]
    fn test_update_exercise_moves_to_existing_workout_only() {
        let (db, _dir) = test_support::database();
        let user = create_user(&db, &ann()).unwrap();
        let workout = create_workout(
            &db,
            &NewWorkout {
                name: "Legs".to_string(),
                user_id: user.id,
            },
        )
        .unwrap();
        let exercise = create_exercise(
            &db,
            &NewExercise {
                name: "Squat".to_string(),
                description: "Back squat".to_string(),
                workout_id: workout.id,
            },
        )
        .unwrap();

        let bad_move = ExerciseChanges {
            workout_id: Some(999),
            ..ExerciseChanges::default()
        };
        assert_eq!(
            update_exercise(&db, exercise.id, &bad_move),
            Err(ApiError::conflict(REFERENCED_RESOURCE_MISSING))
        );
        assert_eq!(get_exercise(&db, exercise.id).unwrap(), exercise);

        let rename = ExerciseChanges {
            name: Some("Front squat".to_string()),
            ..ExerciseChanges::default()
        };
        update_exercise(&db, exercise.id, &rename).unwrap();
        assert_eq!(get_exercise(&db, exercise.id).unwrap().name, "Front squat");
    }
}
