//! WaterLog tools module
//!
//! MCP tool implementations for the water footprint estimator and journal.

pub mod estimate;
pub mod journal;
pub mod status;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_support;
