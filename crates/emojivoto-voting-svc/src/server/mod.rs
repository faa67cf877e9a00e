pub mod config;
pub mod duration;
pub mod service;
pub mod telemetry;
