//! Calculate calories burned on a run
//! Usage: cargo run --bin burned_calories -- <distance_km> <duration_minutes> <weight_kg> [gender]

use run_calories::tools::calories::calculate_burned_calories;

fn parse_arg(args: &[String], index: usize, name: &str) -> Result<Option<f64>, String> {
    match args.get(index) {
        None => Ok(None),
        Some(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|e| format!("Invalid {}: '{}' ({})", name, s, e)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("Usage: burned_calories <distance_km> <duration_minutes> <weight_kg> [gender]");
        std::process::exit(2);
    }

    let distance = parse_arg(&args, 0, "distance_km")?;
    let duration = parse_arg(&args, 1, "duration_minutes")?;
    let weight = parse_arg(&args, 2, "weight_kg")?;
    let gender = args.get(3).map(|s| s.as_str());

    let result = calculate_burned_calories(distance, duration, weight, gender)?;

    if !result.can_estimate {
        println!("Not enough data: distance, duration and weight must all be positive");
        return Ok(());
    }

    println!("Distance: {:.2} km in {:.1} min", distance.unwrap_or(0.0), duration.unwrap_or(0.0));
    if let (Some(speed), Some(pace)) = (result.speed_kmh, result.pace_min_per_km) {
        println!("Speed: {:.2} km/h ({:.2} min/km)", speed, pace);
    }
    if let (Some(met), Some(intensity)) = (result.met, result.intensity) {
        println!("MET: {:.1} ({})", met, intensity);
    }
    println!("Burned: {} kcal", result.burned_calories);

    Ok(())
}
