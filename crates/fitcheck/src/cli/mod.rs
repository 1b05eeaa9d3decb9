//! Command implementations for the fitcheck CLI.

pub mod config;
pub mod models;
pub mod serve;
