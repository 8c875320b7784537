//! Run Calories Tools module
//!
//! MCP tool implementations for calorie estimation.

pub mod calories;
pub mod status;
