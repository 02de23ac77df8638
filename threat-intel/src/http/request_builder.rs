use crate::error::{IntelError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request};
use url::Url;

/// Builds authenticated GET requests
#[derive(Clone)]
pub struct RequestBuilderImpl {
    client: Client,
    headers: HeaderMap,
}

impl RequestBuilderImpl {
    /// Create a new request builder carrying the bearer token
    pub fn new(client: Client, api_key: &str) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| IntelError::invalid_config("API key contains characters not allowed in a header"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self { client, headers })
    }

    pub fn build_request(&self, url: Url) -> reqwest::Result<Request> {
        self.client.get(url).headers(self.headers.clone()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers() {
        let builder = RequestBuilderImpl::new(Client::new(), "abc").unwrap();
        let request = builder
            .build_request(Url::parse("https://api.falconfeeds.io/merlin/cve").unwrap())
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert!(request.headers()[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_rejects_unencodable_key() {
        let result = RequestBuilderImpl::new(Client::new(), "bad\nkey");
        assert!(matches!(result, Err(IntelError::InvalidConfig { .. })));
    }
}
