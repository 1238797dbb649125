//! WaterLog Library
//!
//! Core functionality for water footprint estimation and journaling.

pub mod build_info;
pub mod catalog;
pub mod db;
pub mod extract;
pub mod mcp;
pub mod models;
pub mod tools;
