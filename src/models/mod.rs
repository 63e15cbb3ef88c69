// src/models/mod.rs

//! Domain models for the notifier.
//!
//! Configuration, credentials and the typed homework status live here.

mod config;
mod homework;

// Re-export all public types
pub use config::{ApiConfig, Config, Credentials, LoggingConfig, PollerConfig, TelegramConfig};
pub use homework::{Homework, HomeworkStatus};
