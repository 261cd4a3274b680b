pub mod config;
pub mod error;

// Recommendation backend
pub mod backend;

pub mod api;
pub mod web;
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
