//! Response envelopes returned by the API
//!
//! Payload items are kept as raw JSON; only the envelope shape is checked.

use crate::endpoints::Endpoint;
use crate::error::{ErrorCode, ErrorRecord, QueryResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{data: [...], next?}` used by cursor listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl Envelope {
    /// Continuation token, if the listing has more items
    pub fn next_token(&self) -> Option<&str> {
        self.next.as_deref().filter(|n| !n.is_empty())
    }
}

/// `{message, data: [...], next?}` used by the legacy IOC listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
    pub data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// `{data: {image}}` returned by the threat image endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEnvelope {
    pub data: ImageData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    /// `data:<mime>;base64,<payload>` URL
    pub image: String,
}

/// Parsed body of a successful call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Listing(Envelope),
    Messaged(MessageEnvelope),
    Image(ImageEnvelope),
}

impl QueryResponse {
    /// Parse a 2xx body into the envelope shape of `endpoint`
    pub fn parse(endpoint: Endpoint, status: u16, body: &str) -> QueryResult<Self> {
        let parsed = match endpoint {
            Endpoint::Ioc => serde_json::from_str(body).map(Self::Messaged),
            Endpoint::ThreatImage => serde_json::from_str(body).map(Self::Image),
            _ => serde_json::from_str(body).map(Self::Listing),
        };

        parsed.map_err(|e| {
            ErrorRecord::new(
                format!("Unexpected response body from {}: {}", endpoint.path(), e),
                Some(status),
                ErrorCode::UnknownError,
            )
        })
    }

    pub fn data(&self) -> &[Value] {
        match self {
            Self::Listing(envelope) => &envelope.data,
            Self::Messaged(envelope) => &envelope.data,
            Self::Image(_) => &[],
        }
    }

    pub fn next_token(&self) -> Option<&str> {
        match self {
            Self::Listing(envelope) => envelope.next_token(),
            Self::Messaged(envelope) => envelope.next.as_deref().filter(|n| !n.is_empty()),
            Self::Image(_) => None,
        }
    }

    pub fn into_listing(self) -> QueryResult<Envelope> {
        match self {
            Self::Listing(envelope) => Ok(envelope),
            other => Err(shape_mismatch("listing", &other)),
        }
    }

    pub fn into_messaged(self) -> QueryResult<MessageEnvelope> {
        match self {
            Self::Messaged(envelope) => Ok(envelope),
            other => Err(shape_mismatch("message listing", &other)),
        }
    }

    pub fn into_image(self) -> QueryResult<ImageEnvelope> {
        match self {
            Self::Image(envelope) => Ok(envelope),
            other => Err(shape_mismatch("image", &other)),
        }
    }
}

fn shape_mismatch(expected: &str, actual: &QueryResponse) -> ErrorRecord {
    let actual = match actual {
        QueryResponse::Listing(_) => "listing",
        QueryResponse::Messaged(_) => "message listing",
        QueryResponse::Image(_) => "image",
    };
    ErrorRecord::new(
        format!("Expected a {} response but received a {} response", expected, actual),
        None,
        ErrorCode::UnknownError,
    )
}
