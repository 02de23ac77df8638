use crate::analysis::describe;
use crate::config::IntelConfig;
use crate::endpoints::Endpoint;
use crate::error::{ErrorCode, ErrorRecord, QueryResult, Result};
use crate::http::response_converter::transport_error;
use crate::http::{RequestBuilderImpl, ResponseConverterImpl};
use crate::query::QueryDescriptor;
use crate::traits::{ParameterValidator, QueryExecutor};
use crate::types::QueryResponse;
use crate::url_builder::UrlBuilder;
use crate::validation::QueryValidator;
use reqwest::{Client, Request};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Request coordinator: validates a query, issues one GET, and classifies the outcome
#[derive(Clone)]
pub struct IntelClient<V = QueryValidator> {
    client: Client,
    base_url: Url,
    timeout: Duration,
    validator: V,
    request_builder: RequestBuilderImpl,
    response_converter: ResponseConverterImpl,
}

impl IntelClient<QueryValidator> {
    /// Create a new client with the default validation rules
    pub fn new(config: &IntelConfig) -> Result<Self> {
        Self::with_validator(config, QueryValidator::new())
    }
}

impl<V: ParameterValidator> IntelClient<V> {
    /// Create a new client with custom validation rules
    pub fn with_validator(config: &IntelConfig, validator: V) -> Result<Self> {
        let api_key = config.api.api_key()?;
        let base_url = Url::parse(&config.api.base_url)?;
        let client = Client::builder().build()?;

        if config.api.max_retries > 0 {
            warn!(
                max_retries = config.api.max_retries,
                "api.max_retries is advertised only; requests are not retried"
            );
        }

        Ok(Self {
            request_builder: RequestBuilderImpl::new(client.clone(), api_key)?,
            response_converter: ResponseConverterImpl::new(),
            client,
            base_url,
            timeout: config.api.timeout(),
            validator,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send and read the body; the caller applies the deadline
    async fn send(&self, request: Request, endpoint: Endpoint) -> QueryResult<QueryResponse> {
        let response = self.client.execute(request).await.map_err(transport_error)?;
        self.response_converter
            .convert_response(response, endpoint)
            .await
    }
}

impl<V: ParameterValidator> QueryExecutor for IntelClient<V> {
    async fn execute(&self, query: &QueryDescriptor) -> QueryResult<QueryResponse> {
        if let Err(error) = self.validator.validate(query) {
            debug!(kind = query.kind(), code = %error.code, "query rejected before sending");
            return Err(error);
        }

        let endpoint = query.endpoint();
        let url = UrlBuilder::new(&self.base_url, query).build();
        let request = self.request_builder.build_request(url).map_err(|e| {
            ErrorRecord::new(
                format!("Failed to build request: {}", e),
                None,
                ErrorCode::UnknownError,
            )
        })?;

        debug!(kind = query.kind(), path = endpoint.path(), "sending request");
        let started = Instant::now();

        let result = match tokio::time::timeout(self.timeout, self.send(request, endpoint)).await {
            Ok(result) => result,
            Err(_) => Err(ErrorRecord::timeout()),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(response) => info!(
                kind = query.kind(),
                items = response.data().len(),
                has_next = response.next_token().is_some(),
                elapsed_ms,
                "request completed"
            ),
            Err(error) => warn!(
                kind = query.kind(),
                code = %error.code,
                status = ?error.status,
                hint = describe(error.code),
                elapsed_ms,
                "request failed: {}",
                error.message
            ),
        }

        result
    }
}
