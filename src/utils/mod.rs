// Utilities
pub mod config;
pub mod error;
pub mod formatter;
pub mod logger;
