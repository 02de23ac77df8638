//! Pure business logic for error classification
//! No presentation concerns - returns codes and short hints only

use crate::error::ErrorCode;

/// Trait for mapping HTTP statuses to error codes
pub trait ErrorClassifier: Send + Sync {
    /// Classify a non-2xx HTTP status
    fn classify(&self, status: u16) -> ErrorCode;

    /// Short remediation hint for a code
    fn hint(&self, code: ErrorCode) -> &'static str;
}

/// Default status table classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier;

impl StatusClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorClassifier for StatusClassifier {
    fn classify(&self, status: u16) -> ErrorCode {
        classify_status(status)
    }

    fn hint(&self, code: ErrorCode) -> &'static str {
        describe(code)
    }
}

/// Map an HTTP status to its error code
pub fn classify_status(status: u16) -> ErrorCode {
    match status {
        400 => ErrorCode::BadRequest,
        401 => ErrorCode::Unauthorized,
        403 => ErrorCode::Forbidden,
        404 => ErrorCode::NotFound,
        429 => ErrorCode::RateLimited,
        500 => ErrorCode::InternalError,
        _ => ErrorCode::UnknownError,
    }
}

/// Friendly description of an error code
pub fn describe(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidParameter => "Correct the request parameters before retrying",
        ErrorCode::InvalidCountry => "Use a full country name from the supported list",
        ErrorCode::InvalidIndustry => "Use an industry name from the supported list",
        ErrorCode::BadRequest => "The API rejected the request as malformed",
        ErrorCode::Unauthorized => "Authentication failed - check the API key",
        ErrorCode::Forbidden => "The API key is not allowed to access this resource",
        ErrorCode::NotFound => "Requested resource or endpoint not found",
        ErrorCode::RateLimited => "Rate limit reached - slow down and retry later",
        ErrorCode::InternalError => "The API reported an internal error",
        ErrorCode::UnknownError => "The API returned an unexpected status",
        ErrorCode::Timeout => "The API did not answer before the configured timeout",
        ErrorCode::NetworkError => "The API could not be reached",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(classify_status(400), ErrorCode::BadRequest);
        assert_eq!(classify_status(401), ErrorCode::Unauthorized);
        assert_eq!(classify_status(403), ErrorCode::Forbidden);
        assert_eq!(classify_status(404), ErrorCode::NotFound);
        assert_eq!(classify_status(429), ErrorCode::RateLimited);
        assert_eq!(classify_status(500), ErrorCode::InternalError);
    }

    #[test]
    fn test_unlisted_statuses_are_unknown() {
        for status in [302, 402, 418, 502, 503, 504] {
            assert_eq!(classify_status(status), ErrorCode::UnknownError);
        }
    }

    #[test]
    fn test_classifier_trait() {
        let classifier = StatusClassifier::new();
        assert_eq!(classifier.classify(429), ErrorCode::RateLimited);
        assert!(classifier.hint(ErrorCode::RateLimited).contains("slow down"));
    }
}
