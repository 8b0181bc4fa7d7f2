use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use faitness::db::models::{
    ExerciseChanges, NewExercise, NewIngredient, NewMeal, NewMealDay, NewSet, NewUser, NewWorkout,
    UserChanges,
};
use faitness::logging::{init_logger, parse_level};
use faitness::tools::{FitnessTools, ToolResponse};
use log::{LevelFilter, debug};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about = "Faitness - workout and meal tracker client", long_about = None)]
struct Cli {
    /// Base URL of a running faitness-server
    #[arg(long, env = "FAITNESS_API_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[arg(long, env = "FAITNESS_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage workouts
    Workouts {
        #[command(subcommand)]
        action: WorkoutAction,
    },
    /// Manage exercises within a workout
    Exercises {
        #[command(subcommand)]
        action: ExerciseAction,
    },
    /// Manage logged sets
    Sets {
        #[command(subcommand)]
        action: SetAction,
    },
    /// Manage meals
    Meals {
        #[command(subcommand)]
        action: MealAction,
    },
    /// Manage meal ingredients
    Ingredients {
        #[command(subcommand)]
        action: IngredientAction,
    },
    /// Schedule meals on days of the week
    MealDays {
        #[command(subcommand)]
        action: MealDayAction,
    },
}

#[derive(Args, Debug)]
struct Id {
    id: i32,
}

#[derive(Subcommand, Debug)]
enum UserAction {
    List,
    Get(Id),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Change some fields of a user
    Update {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete(Id),
}

#[derive(Subcommand, Debug)]
enum WorkoutAction {
    List,
    Get(Id),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        user_id: i32,
    },
}

#[derive(Subcommand, Debug)]
enum ExerciseAction {
    List,
    Get(Id),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        workout_id: i32,
    },
    /// Change some fields of an exercise
    Update {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        workout_id: Option<i32>,
    },
    Delete(Id),
}

#[derive(Subcommand, Debug)]
enum SetAction {
    List,
    Get(Id),
    Create {
        #[arg(long)]
        exercise_id: i32,
        #[arg(long)]
        reps: i32,
        #[arg(long)]
        weight: i32,
    },
}

#[derive(Subcommand, Debug)]
enum MealAction {
    List,
    Get(Id),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        user_id: i32,
    },
}

#[derive(Subcommand, Debug)]
enum IngredientAction {
    List,
    Get(Id),
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        calories: i32,
        #[arg(long)]
        protein: i32,
        #[arg(long)]
        carbs: i32,
        #[arg(long)]
        fat: i32,
        #[arg(long)]
        meal_id: i32,
    },
}

#[derive(Subcommand, Debug)]
enum MealDayAction {
    List,
    Get(Id),
    Create {
        #[arg(long)]
        meal_id: i32,
        /// monday .. sunday
        #[arg(long)]
        day_of_week: String,
    },
}

/// Prints the response as pretty JSON. A failed call still prints its
/// `{"error": ..}` body but exits non-zero.
fn report<T: Serialize>(response: ToolResponse<T>) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(if response.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_users(tools: &FitnessTools, action: UserAction) -> Result<ExitCode> {
    match action {
        UserAction::List => report(tools.get_users().await),
        UserAction::Get(Id { id }) => report(tools.get_user_by_id(id).await),
        UserAction::Create { name, email } => {
            report(tools.create_user(&NewUser { name, email }).await)
        }
        UserAction::Update { id, name, email } => {
            report(tools.update_user(id, &UserChanges { name, email }).await)
        }
        UserAction::Delete(Id { id }) => report(tools.delete_user(id).await),
    }
}

async fn run_workouts(tools: &FitnessTools, action: WorkoutAction) -> Result<ExitCode> {
    match action {
        WorkoutAction::List => report(tools.get_workouts().await),
        WorkoutAction::Get(Id { id }) => report(tools.get_workout_by_id(id).await),
        WorkoutAction::Create { name, user_id } => {
            report(tools.create_workout(&NewWorkout { name, user_id }).await)
        }
    }
}

async fn run_exercises(tools: &FitnessTools, action: ExerciseAction) -> Result<ExitCode> {
    match action {
        ExerciseAction::List => report(tools.get_exercises().await),
        ExerciseAction::Get(Id { id }) => report(tools.get_exercise_by_id(id).await),
        ExerciseAction::Create {
            name,
            description,
            workout_id,
        } => {
            let exercise = NewExercise {
                name,
                description,
                workout_id,
            };
            report(tools.create_exercise(&exercise).await)
        }
        ExerciseAction::Update {
            id,
            name,
            description,
            workout_id,
        } => {
            let changes = ExerciseChanges {
                name,
                description,
                workout_id,
            };
            report(tools.update_exercise(id, &changes).await)
        }
        ExerciseAction::Delete(Id { id }) => report(tools.delete_exercise(id).await),
    }
}

async fn run_sets(tools: &FitnessTools, action: SetAction) -> Result<ExitCode> {
    match action {
        SetAction::List => report(tools.get_sets().await),
        SetAction::Get(Id { id }) => report(tools.get_set_by_id(id).await),
        SetAction::Create {
            exercise_id,
            reps,
            weight,
        } => {
            let set = NewSet {
                exercise_id,
                reps,
                weight,
            };
            report(tools.create_set(&set).await)
        }
    }
}

async fn run_meals(tools: &FitnessTools, action: MealAction) -> Result<ExitCode> {
    match action {
        MealAction::List => report(tools.get_meals().await),
        MealAction::Get(Id { id }) => report(tools.get_meal_by_id(id).await),
        MealAction::Create {
            name,
            description,
            user_id,
        } => {
            let meal = NewMeal {
                name,
                description,
                user_id,
            };
            report(tools.create_meal(&meal).await)
        }
    }
}

async fn run_ingredients(tools: &FitnessTools, action: IngredientAction) -> Result<ExitCode> {
    match action {
        IngredientAction::List => report(tools.get_ingredients().await),
        IngredientAction::Get(Id { id }) => report(tools.get_ingredient_by_id(id).await),
        IngredientAction::Create {
            name,
            description,
            calories,
            protein,
            carbs,
            fat,
            meal_id,
        } => {
            let ingredient = NewIngredient {
                name,
                description,
                calories,
                protein,
                carbs,
                fat,
                meal_id,
            };
            report(tools.create_ingredient(&ingredient).await)
        }
    }
}

async fn run_meal_days(tools: &FitnessTools, action: MealDayAction) -> Result<ExitCode> {
    match action {
        MealDayAction::List => report(tools.get_meal_days().await),
        MealDayAction::Get(Id { id }) => report(tools.get_meal_day_by_id(id).await),
        MealDayAction::Create {
            meal_id,
            day_of_week,
        } => report(
            tools
                .create_meal_day(&NewMealDay {
                    meal_id,
                    day_of_week,
                })
                .await,
        ),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();
    init_logger(parse_level(&cli.log_level).unwrap_or(LevelFilter::Warn));

    let tools = FitnessTools::new(cli.base_url);
    debug!("Using API at {}", tools.base_url());

    match cli.command {
        Commands::Users { action } => run_users(&tools, action).await,
        Commands::Workouts { action } => run_workouts(&tools, action).await,
        Commands::Exercises { action } => run_exercises(&tools, action).await,
        Commands::Sets { action } => run_sets(&tools, action).await,
        Commands::Meals { action } => run_meals(&tools, action).await,
        Commands::Ingredients { action } => run_ingredients(&tools, action).await,
        Commands::MealDays { action } => run_meal_days(&tools, action).await,
    }
}
