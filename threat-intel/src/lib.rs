//! Threat Intel - FalconFeeds threat intelligence query core
//!
//! This crate turns typed queries into validated, authenticated requests against
//! the FalconFeeds API, walks cursor and page-numbered listings, classifies every
//! failure into a closed set of error codes, and renders report prompts from
//! mustache-style templates.

// Core modules
pub mod config;
pub mod endpoints;
pub mod error;
pub mod traits;
pub mod types;

// Query construction and validation
pub mod query;
pub mod url_builder;
pub mod validation;

// Request execution
pub mod analysis;
pub mod http;
pub mod pagination;

// Surfaces built on the executor
pub mod service;
pub mod template;
pub mod tools;

#[cfg(test)]
pub mod testing;

// Re-export main types for convenience
pub use config::{IntelConfig, DEFAULT_CONFIG_FILE};
pub use error::{ErrorCode, ErrorRecord, IntelError, QueryResult, Result};
pub use http::IntelClient;
pub use pagination::{Cursor, CursorPaginator, PageNumber, PageNumberPaginator};
pub use query::QueryDescriptor;
pub use service::ThreatIntelService;
pub use template::{render, PromptRegistry, TemplateContext};
pub use tools::{ToolDefinition, ToolOutput, ToolRegistry};
pub use traits::{ParameterValidator, QueryExecutor};
pub use types::{Envelope, MessageEnvelope, QueryResponse};

use std::sync::Arc;

/// Build a tool registry backed by the HTTP client for the given configuration
pub fn build_registry(config: IntelConfig) -> Result<ToolRegistry<IntelClient>> {
    let client = IntelClient::new(&config)?;
    let service = ThreatIntelService::new(client, Arc::new(config));
    Ok(ToolRegistry::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_registry_requires_api_key() {
        let result = build_registry(IntelConfig::default());
        assert!(matches!(result, Err(IntelError::MissingApiKey)));
    }

    #[test]
    fn test_build_registry() {
        let registry = build_registry(IntelConfig::with_api_key("test")).unwrap();
        assert_eq!(
            registry.service().executor().base_url().as_str(),
            "https://api.falconfeeds.io/merlin"
        );
        assert!(!registry.definitions().is_empty());
    }

    #[test]
    fn test_error_types() {
        let error = IntelError::invalid_config("test error");
        assert!(error.to_string().contains("Invalid configuration"));

        let record = ErrorRecord::invalid_parameter("bad");
        assert_eq!(record.code, ErrorCode::InvalidParameter);
    }
}
