//! Meal calorie estimation
//!
//! Turns a free-text meal description into an intake estimate by asking a
//! generative-language backend and reading the first integer out of its reply.

pub mod error;
pub mod estimator;
pub mod parse;
pub mod prompt;

pub use error::{EstimationError, FailureKind};
pub use estimator::{MealCalorieEstimator, DEFAULT_MODELS};
pub use parse::{first_digit_run, parse_calories, ParsedCalories, MAX_MEAL_CALORIES};
pub use prompt::build_prompt;
