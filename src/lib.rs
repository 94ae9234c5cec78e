pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod request;
pub mod scoring;
pub mod telemetry;
