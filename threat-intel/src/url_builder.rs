use crate::query::QueryDescriptor;
use url::Url;

/// Builder for the request URL of a single query
pub struct UrlBuilder<'a> {
    base_url: &'a Url,
    query: &'a QueryDescriptor,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(base_url: &'a Url, query: &'a QueryDescriptor) -> Self {
        Self { base_url, query }
    }

    /// Base URL + endpoint path, with the query's present filters appended in order
    pub fn build(&self) -> Url {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}{}",
            url.path().trim_end_matches('/'),
            self.query.endpoint().path()
        );
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        let pairs = self.query.query_pairs();
        if !pairs.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in pairs.iter() {
                query_pairs.append_pair(key, value);
            }
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{CveQuery, ImageQuery, ThreatFeedQuery, VictimKey};

    fn base() -> Url {
        Url::parse("https://api.falconfeeds.io/merlin/").unwrap()
    }

    #[test]
    fn test_path_is_appended_to_base() {
        let base = base();
        let query = QueryDescriptor::from(ImageQuery::new("IMG-1"));
        let url = UrlBuilder::new(&base, &query).build();
        assert_eq!(url.as_str(), "https://api.falconfeeds.io/merlin/threat/image?uuid=IMG-1");
    }

    #[test]
    fn test_absent_filters_are_omitted() {
        let base = base();
        let query = QueryDescriptor::from(CveQuery::default());
        let url = UrlBuilder::new(&base, &query).build();
        assert_eq!(url.as_str(), "https://api.falconfeeds.io/merlin/cve?resultCount=10");
    }

    #[test]
    fn test_values_are_encoded() {
        let base = base();
        let query = QueryDescriptor::from(ThreatFeedQuery::by_victim(
            VictimKey::Industry,
            "Healthcare & Pharmaceuticals",
        ));
        let url = UrlBuilder::new(&base, &query).build();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("victimKey".to_string(), "Industry".to_string())));
        assert!(pairs.contains(&(
            "victimValue".to_string(),
            "Healthcare & Pharmaceuticals".to_string()
        )));
        assert!(!url.as_str().contains("& "));
    }
}
