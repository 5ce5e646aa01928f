//! Core domain types and logic.

pub mod ohlcv;
pub mod rolling;
pub mod params;
pub mod indicator;
pub mod signal;
pub mod ticker_data;
pub mod portfolio;
pub mod runner;
pub mod error;
