use crate::error::{QueryResult, Result};
use crate::query::QueryDescriptor;
use crate::types::QueryResponse;
use std::future::Future;

/// Trait for anything that turns a logical query into one response or classified error
pub trait QueryExecutor: Send + Sync {
    /// Validate, issue exactly one request, and parse its envelope
    fn execute(
        &self,
        query: &QueryDescriptor,
    ) -> impl Future<Output = QueryResult<QueryResponse>> + Send;
}

/// Trait for pre-flight query validation
pub trait ParameterValidator: Send + Sync {
    /// First violated rule, if any
    fn validate(&self, query: &QueryDescriptor) -> QueryResult<()>;
}

/// Trait for configuration validation
pub trait ConfigValidator {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> Result<()>;
}
