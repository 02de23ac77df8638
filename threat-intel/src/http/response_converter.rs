use crate::analysis::{ErrorClassifier, StatusClassifier};
use crate::endpoints::Endpoint;
use crate::error::{ErrorRecord, QueryResult};
use crate::types::QueryResponse;
use reqwest::Response;

/// Turns a completed response into an envelope or a classified error
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseConverterImpl<C = StatusClassifier> {
    classifier: C,
}

impl ResponseConverterImpl<StatusClassifier> {
    pub fn new() -> Self {
        Self::with_classifier(StatusClassifier::new())
    }
}

impl<C: ErrorClassifier> ResponseConverterImpl<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    pub async fn convert_response(
        &self,
        response: Response,
        endpoint: Endpoint,
    ) -> QueryResult<QueryResponse> {
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            return Err(ErrorRecord::new(
                format!("API request failed: {}", reason),
                Some(status.as_u16()),
                self.classifier.classify(status.as_u16()),
            ));
        }

        let body = response.text().await.map_err(transport_error)?;
        QueryResponse::parse(endpoint, status.as_u16(), &body)
    }
}

/// Classify a failure below HTTP
pub fn transport_error(error: reqwest::Error) -> ErrorRecord {
    if error.is_timeout() {
        ErrorRecord::timeout()
    } else {
        ErrorRecord::network(error.to_string())
    }
}
