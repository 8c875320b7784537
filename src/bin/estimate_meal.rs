//! Estimate meal calories from the command line
//! Usage: cargo run --bin estimate_meal -- <meal description>

use tracing_subscriber::EnvFilter;

use run_calories::config::CalorieConfig;
use run_calories::meal::MealCalorieEstimator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("run_calories=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let meal = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if meal.trim().is_empty() {
        eprintln!("Usage: estimate_meal <meal description>");
        std::process::exit(2);
    }

    let config = CalorieConfig::from_env()?;
    let estimator = MealCalorieEstimator::from_config(&config);

    let result = match config.timeout {
        Some(timeout) => estimator.estimate_with_timeout(&meal, timeout).await,
        None => estimator.estimate_meal_calories(&meal).await,
    };

    match result {
        Ok(kcal) => {
            println!("{} kcal", kcal);
            Ok(())
        }
        Err(e) => {
            println!("{}", e.user_message());
            eprintln!("Reason: {}", e);
            if let Some(raw) = e.raw_response() {
                eprintln!("Raw response: {}", raw);
            }
            std::process::exit(1);
        }
    }
}
