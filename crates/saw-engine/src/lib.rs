pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod report;
pub mod saw;
pub mod telemetry;
pub mod validation;
