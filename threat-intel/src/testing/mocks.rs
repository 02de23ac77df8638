use crate::error::{ErrorCode, ErrorRecord, QueryResult};
use crate::query::QueryDescriptor;
use crate::traits::QueryExecutor;
use crate::types::{Envelope, ImageData, ImageEnvelope, MessageEnvelope, QueryResponse};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock executor replaying scripted responses in order and recording every query it receives.
///
/// Queries are validated first, like the real coordinator. Rejected queries are neither
/// recorded nor consume a scripted response.
#[derive(Default)]
pub struct MockExecutor {
    responses: Mutex<VecDeque<QueryResult<QueryResponse>>>,
    queries: Mutex<Vec<QueryDescriptor>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: QueryResult<QueryResponse>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_listing(self, data: Vec<Value>, next: Option<&str>) -> Self {
        self.with_response(Ok(QueryResponse::Listing(Envelope {
            data,
            next: next.map(str::to_string),
        })))
    }

    pub fn with_messaged(self, message: &str, data: Vec<Value>) -> Self {
        self.with_response(Ok(QueryResponse::Messaged(MessageEnvelope {
            message: message.to_string(),
            data,
            next: None,
        })))
    }

    pub fn with_image(self, image: &str) -> Self {
        self.with_response(Ok(QueryResponse::Image(ImageEnvelope {
            data: ImageData {
                image: image.to_string(),
            },
        })))
    }

    pub fn with_error(self, error: ErrorRecord) -> Self {
        self.with_response(Err(error))
    }

    /// Every query that passed validation so far
    pub fn queries(&self) -> Vec<QueryDescriptor> {
        self.queries.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl QueryExecutor for MockExecutor {
    async fn execute(&self, query: &QueryDescriptor) -> QueryResult<QueryResponse> {
        query.validate()?;
        self.queries.lock().unwrap().push(query.clone());

        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ErrorRecord::new(
                format!("No scripted response for {} query", query.kind()),
                None,
                ErrorCode::UnknownError,
            ))
        })
    }
}
