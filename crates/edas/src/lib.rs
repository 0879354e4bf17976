pub mod config;
pub mod decisions;
pub mod error;
pub mod telemetry;
