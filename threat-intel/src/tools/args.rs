//! Argument payloads accepted by the tools
//!
//! Tools whose arguments mirror a query struct deserialize straight into it;
//! the rest use the small structs below.

use crate::error::{ErrorRecord, QueryResult};
use crate::pagination::PageNumber;
use crate::query::{ConfidenceLevel, IocThreatType, IocType, ThreatCategory, ThreatFeedQuery, VictimKey};
use crate::service::PublishedWindow;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Deserialize a tool's arguments, treating `null` as an empty object
pub fn parse<T: DeserializeOwned>(tool: &str, arguments: Value) -> QueryResult<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    serde_json::from_value(arguments).map_err(|e| {
        ErrorRecord::invalid_parameter(format!("Invalid arguments for {}: {}", tool, e))
    })
}

#[derive(Debug, Deserialize)]
pub struct UuidArgs {
    pub uuid: String,
}

#[derive(Debug, Deserialize)]
pub struct NameArgs {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CountryArgs {
    pub country: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatTypeArgs {
    pub threat_type: IocThreatType,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageArgs {
    pub image_uuid: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileArgs {
    pub actor_name: String,
    pub include_feeds: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ActorFeedsArgs {
    #[serde(rename = "threatActorUUID")]
    pub threat_actor_uuid: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryArgs {
    pub category: ThreatCategory,
    pub published_since: Option<u64>,
    pub published_till: Option<u64>,
    pub victim_key: Option<VictimKey>,
    pub victim_value: Option<String>,
}

impl CategoryArgs {
    pub fn window(&self) -> PublishedWindow {
        PublishedWindow {
            since: self.published_since,
            till: self.published_till,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordWindowArgs {
    pub keyword: String,
    pub published_since: Option<u64>,
    pub published_till: Option<u64>,
}

impl KeywordWindowArgs {
    pub fn window(&self) -> PublishedWindow {
        PublishedWindow {
            since: self.published_since,
            till: self.published_till,
        }
    }
}

/// Victim filter shared by the organization, domain, country and industry tools.
/// Each tool names the victim field after its key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictimArgs {
    #[serde(alias = "organization", alias = "domain", alias = "country", alias = "industry")]
    pub value: String,
    pub published_since: Option<u64>,
    pub published_till: Option<u64>,
    pub category: Option<ThreatCategory>,
}

impl VictimArgs {
    pub fn window(&self) -> PublishedWindow {
        PublishedWindow {
            since: self.published_since,
            till: self.published_till,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextFeedPageArgs {
    pub next_token: String,
    #[serde(flatten)]
    pub filters: ThreatFeedQuery,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextActorPageArgs {
    pub next_token: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IocPageArgs {
    pub page: u32,
    pub country: Option<String>,
    pub threat_type: Option<IocThreatType>,
}

impl IocPageArgs {
    pub fn page_number(&self) -> QueryResult<PageNumber> {
        PageNumber::new(self.page)
            .ok_or_else(|| ErrorRecord::invalid_parameter("page must be at least 1"))
    }
}

#[derive(Debug, Deserialize)]
pub struct IocTypeArgs {
    #[serde(rename = "type")]
    pub ioc_type: IocType,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UuidCursorArgs {
    pub uuid: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfidenceArgs {
    pub confidence: ConfidenceLevel,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordCursorArgs {
    pub keyword: String,
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_null_arguments_are_empty_object() {
        let query: crate::query::ThreatActorQuery = parse("search_threat_actors", Value::Null).unwrap();
        assert!(query.name.is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let error = parse::<UuidArgs>("get_threat_actor_by_id", json!({})).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidParameter);
        assert!(error.message.contains("get_threat_actor_by_id"));
        assert!(error.message.contains("uuid"));
    }

    #[test]
    fn test_unknown_enum_value() {
        let error = parse::<CategoryArgs>(
            "get_threat_feeds_by_category",
            json!({"category": "Gossip"}),
        )
        .unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidParameter);
    }

    #[test]
    fn test_victim_field_aliases() {
        let args: VictimArgs = parse(
            "get_threat_feeds_by_domain",
            json!({"domain": "example.com", "publishedSince": 1700000000000u64}),
        )
        .unwrap();
        assert_eq!(args.value, "example.com");
        assert_eq!(args.window().since, Some(1_700_000_000_000));
    }

    #[test]
    fn test_next_feed_page_flattens_filters() {
        let args: NextFeedPageArgs = parse(
            "get_next_threat_feed_page",
            json!({"nextToken": "abc", "category": "Ransomware", "threatActorUUID": "TA-1"}),
        )
        .unwrap();
        assert_eq!(args.next_token, "abc");
        assert_eq!(args.filters.category, Some(ThreatCategory::Ransomware));
        assert_eq!(args.filters.threat_actor_uuid.as_deref(), Some("TA-1"));
    }

    #[test]
    fn test_page_zero_rejected() {
        let args: IocPageArgs = parse("get_iocs_page", json!({"page": 0})).unwrap();
        let error = args.page_number().unwrap_err();
        assert_eq!(error.message, "page must be at least 1");
    }
}
