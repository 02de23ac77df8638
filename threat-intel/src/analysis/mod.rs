//! Error classification - pure mapping from transport outcomes to error codes
//!
//! Timeout and transport failures are classified by the request coordinator
//! directly; this module only covers HTTP statuses.

pub mod error_classifier;

pub use error_classifier::{classify_status, describe, ErrorClassifier, StatusClassifier};
