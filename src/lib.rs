//! Run Calories Library
//!
//! Meal intake estimation and burned-calorie calculation for running records.

pub mod build_info;
pub mod calories;
pub mod config;
pub mod llm;
pub mod mcp;
pub mod meal;
pub mod tools;
