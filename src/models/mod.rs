//! Data models
//!
//! Rust structs representing database entities.

mod calculation;
mod day;

pub use calculation::{Calculation, CalculationCreate};
pub use day::{Day, DayCreate};
