pub mod client;
pub mod commands;
pub mod configuration;
pub mod models;
pub mod telemetry;
