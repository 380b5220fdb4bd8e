//! Core types and shared functionality for searchkit.
//!
//! This crate provides:
//! - Layered application configuration
//! - Credential resolution shared by every search client
//! - Token usage accounting

pub mod config;
pub mod usage;

pub use config::{AppConfig, ConfigError, DEFAULT_NUM_RESULTS, OPENAI_API_KEY_VAR, SERPAPI_KEY_VAR, resolve_api_key, resolve_api_key_with};
pub use usage::Usage;
