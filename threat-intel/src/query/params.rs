//! Per-resource filter sets
//!
//! Each struct carries only the filters its endpoint understands. Field names
//! deserialize from the camelCase argument names used by the tool host, and
//! `query_pairs` produces the same names on the wire.

use crate::endpoints::DEFAULT_RESULT_COUNT;
use crate::query::types::{
    ConfidenceLevel, ImageType, IocThreatType, IocType, ThreatCategory, VictimKey,
};
use serde::Deserialize;
use std::fmt;

/// Ordered query-string pairs; absent filters are never pushed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(&'static str, String)>,
}

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `key=value` only when the value is present
    pub fn optional<V: fmt::Display>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    /// Push a mandatory `key=value`
    pub fn required<V: fmt::Display>(&mut self, key: &'static str, value: V) -> &mut Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Value of the first pair with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// CVE search filters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CveQuery {
    #[serde(rename = "cveID")]
    pub cve_id: Option<String>,
    pub keyword: Option<String>,
    pub published_since: Option<u64>,
    pub published_till: Option<u64>,
    pub result_count: u32,
    pub next: Option<String>,
}

impl Default for CveQuery {
    fn default() -> Self {
        Self {
            cve_id: None,
            keyword: None,
            published_since: None,
            published_till: None,
            result_count: DEFAULT_RESULT_COUNT,
            next: None,
        }
    }
}

impl CveQuery {
    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .optional("cveID", self.cve_id.as_deref())
            .optional("keyword", self.keyword.as_deref())
            .optional("publishedSince", self.published_since)
            .optional("publishedTill", self.published_till)
            .required("resultCount", self.result_count)
            .optional("next", self.next.as_deref());
        pairs
    }
}

/// Threat feed filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThreatFeedQuery {
    pub uuid: Option<String>,
    pub next: Option<String>,
    pub category: Option<ThreatCategory>,
    pub published_since: Option<u64>,
    pub published_till: Option<u64>,
    pub victim_key: Option<VictimKey>,
    pub victim_value: Option<String>,
    #[serde(rename = "threatActorUUID")]
    pub threat_actor_uuid: Option<String>,
    pub keyword: Option<String>,
}

impl ThreatFeedQuery {
    /// Feeds whose victim matches `key = value`
    pub fn by_victim<S: Into<String>>(key: VictimKey, value: S) -> Self {
        Self {
            victim_key: Some(key),
            victim_value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .optional("uuid", self.uuid.as_deref())
            .optional("next", self.next.as_deref())
            .optional("category", self.category)
            .optional("publishedSince", self.published_since)
            .optional("publishedTill", self.published_till)
            .optional("victimKey", self.victim_key)
            .optional("victimValue", self.victim_value.as_deref())
            .optional("threatActorUUID", self.threat_actor_uuid.as_deref())
            .optional("keyword", self.keyword.as_deref());
        pairs
    }
}

/// Threat actor filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThreatActorQuery {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub next: Option<String>,
}

impl ThreatActorQuery {
    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .optional("uuid", self.uuid.as_deref())
            .optional("name", self.name.as_deref())
            .optional("next", self.next.as_deref());
        pairs
    }
}

/// Legacy IOC listing filters, paginated by page number
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IocQuery {
    pub country: Option<String>,
    pub page: Option<u32>,
    pub threat_type: Option<IocThreatType>,
}

impl IocQuery {
    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .optional("country", self.country.as_deref())
            .optional("page", self.page)
            .optional("threatType", self.threat_type);
        pairs
    }
}

/// IOC v2 filters, paginated by cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IocV2Query {
    #[serde(rename = "type")]
    pub ioc_type: Option<IocType>,
    pub confidence: Option<ConfidenceLevel>,
    pub keyword: Option<String>,
    #[serde(rename = "malwareUUID")]
    pub malware_uuid: Option<String>,
    #[serde(rename = "threatActorUUID")]
    pub threat_actor_uuid: Option<String>,
    pub next: Option<String>,
}

impl IocV2Query {
    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .optional("type", self.ioc_type)
            .optional("confidence", self.confidence)
            .optional("keyword", self.keyword.as_deref())
            .optional("malwareUUID", self.malware_uuid.as_deref())
            .optional("threatActorUUID", self.threat_actor_uuid.as_deref())
            .optional("next", self.next.as_deref());
        pairs
    }
}

/// Filters shared by the IOC-related actor and malware listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IocEntityQuery {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub next: Option<String>,
}

impl IocEntityQuery {
    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .optional("uuid", self.uuid.as_deref())
            .optional("name", self.name.as_deref())
            .optional("next", self.next.as_deref());
        pairs
    }
}

/// Threat image lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageQuery {
    pub uuid: String,
    #[serde(rename = "type")]
    pub image_type: Option<ImageType>,
}

impl ImageQuery {
    pub fn new<S: Into<String>>(uuid: S) -> Self {
        Self {
            uuid: uuid.into(),
            image_type: None,
        }
    }

    pub fn query_pairs(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();
        pairs
            .required("uuid", &self.uuid)
            .optional("type", self.image_type);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_filters_are_omitted() {
        let query = ThreatFeedQuery {
            category: Some(ThreatCategory::Ransomware),
            ..ThreatFeedQuery::default()
        };
        let pairs = query.query_pairs();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.get("category"), Some("Ransomware"));
        assert_eq!(pairs.get("victimKey"), None);
        assert_eq!(pairs.get("next"), None);
    }

    #[test]
    fn test_cve_always_sends_result_count() {
        let pairs = CveQuery::default().query_pairs();
        assert_eq!(pairs.get("resultCount"), Some("10"));
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_wire_names() {
        let query = IocV2Query {
            ioc_type: Some(IocType::Sha256),
            malware_uuid: Some("MAL-1".to_string()),
            threat_actor_uuid: Some("XTA-1".to_string()),
            ..IocV2Query::default()
        };
        let pairs = query.query_pairs();

        assert_eq!(pairs.get("type"), Some("sha256"));
        assert_eq!(pairs.get("malwareUUID"), Some("MAL-1"));
        assert_eq!(pairs.get("threatActorUUID"), Some("XTA-1"));
    }

    #[test]
    fn test_explicit_empty_string_is_kept() {
        let query = ThreatActorQuery {
            name: Some(String::new()),
            ..ThreatActorQuery::default()
        };
        assert_eq!(query.query_pairs().get("name"), Some(""));
    }

    #[test]
    fn test_deserialize_host_arguments() {
        let query: ThreatFeedQuery = serde_json::from_value(serde_json::json!({
            "category": "Data Leak",
            "victimKey": "Country",
            "victimValue": "Germany",
            "publishedSince": 1_700_000_000_000u64
        }))
        .unwrap();

        assert_eq!(query.category, Some(ThreatCategory::DataLeak));
        assert_eq!(query.victim_key, Some(VictimKey::Country));
        assert_eq!(query.published_since, Some(1_700_000_000_000));

        let cve: CveQuery = serde_json::from_value(serde_json::json!({"cveID": "CVE-2024-1234"})).unwrap();
        assert_eq!(cve.result_count, DEFAULT_RESULT_COUNT);
        assert_eq!(cve.cve_id.as_deref(), Some("CVE-2024-1234"));
    }
}
