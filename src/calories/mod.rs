//! Burned-calorie calculation module
//!
//! MET speed banding and the energy-expenditure formula for completed runs.

pub mod burned;
pub mod met;

pub use burned::{
    burned_calories, can_estimate, pace_min_per_km, speed_kmh, BurnedCalorieInput, Gender,
};
pub use met::{met_for_speed, MetBand, MET_BANDS};
