//! Client code for searchkit.
//!
//! This crate provides the two search clients and the HTTP plumbing they
//! share:
//! - [`WebSearchClient`]: LLM completions augmented with web search
//! - [`SerpClient`] / [`search_serp`]: organic results from a search engine

pub mod error;
mod http;
pub mod openai;
pub mod serp;

pub use error::{ErrorKind, SearchError};
pub use openai::{WebSearchClient, WebSearchConfig};
pub use serp::{SearchResult, SerpClient, SerpConfig, search_serp, search_serp_with};

pub use searchkit_core::Usage;
