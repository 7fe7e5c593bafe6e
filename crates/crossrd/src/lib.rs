pub mod catalog;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod family;
pub mod financial;
pub mod pipeline;
pub mod scoring;
pub mod stress;
pub mod subject;
pub mod telemetry;
