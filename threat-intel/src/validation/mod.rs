//! Pre-flight validation of query descriptors
//!
//! A descriptor that fails any rule never reaches the request coordinator.

pub mod rules;
pub mod victims;

pub use victims::{is_valid_country, is_valid_industry, SUPPORTED_COUNTRIES, SUPPORTED_INDUSTRIES};

use crate::error::{ErrorRecord, QueryResult};
use crate::query::QueryDescriptor;
use crate::traits::ParameterValidator;

/// Default rule set for every resource kind
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryValidator;

impl QueryValidator {
    pub fn new() -> Self {
        Self
    }

    /// All violations of the descriptor's rules, in rule order
    pub fn violations(&self, query: &QueryDescriptor) -> Vec<ErrorRecord> {
        match query {
            QueryDescriptor::Cve(q) => rules::cve(q),
            QueryDescriptor::ThreatFeed(q) => rules::threat_feed(q),
            QueryDescriptor::ThreatActor(q) => rules::threat_actor(q),
            QueryDescriptor::Ioc(q) => rules::ioc(q),
            QueryDescriptor::IocV2(q) => rules::ioc_v2(q),
            QueryDescriptor::IocActor(q) | QueryDescriptor::IocMalware(q) => rules::ioc_entity(q),
            QueryDescriptor::Image(q) => rules::image(q),
        }
    }
}

impl ParameterValidator for QueryValidator {
    fn validate(&self, query: &QueryDescriptor) -> QueryResult<()> {
        match self.violations(query).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

impl QueryDescriptor {
    /// Validate with the default rule set
    pub fn validate(&self) -> QueryResult<()> {
        QueryValidator::new().validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::query::{
        CveQuery, ImageQuery, IocEntityQuery, IocQuery, IocV2Query, ThreatActorQuery,
        ThreatFeedQuery, VictimKey,
    };

    fn cve(result_count: u32) -> QueryDescriptor {
        CveQuery {
            result_count,
            ..CveQuery::default()
        }
        .into()
    }

    fn feed(key: Option<VictimKey>, value: Option<&str>) -> QueryDescriptor {
        ThreatFeedQuery {
            victim_key: key,
            victim_value: value.map(str::to_string),
            ..ThreatFeedQuery::default()
        }
        .into()
    }

    fn code_of(query: &QueryDescriptor) -> Option<ErrorCode> {
        query.validate().err().map(|e| e.code)
    }

    #[test]
    fn test_cve_result_count_bounds() {
        assert_eq!(code_of(&cve(0)), Some(ErrorCode::InvalidParameter));
        assert_eq!(code_of(&cve(51)), Some(ErrorCode::InvalidParameter));
        for count in [1, 10, 50] {
            assert!(cve(count).validate().is_ok());
        }
    }

    #[test]
    fn test_validation_errors_carry_status_400() {
        let error = cve(0).validate().unwrap_err();
        assert_eq!(error.status, Some(400));
        assert_eq!(error.message, "resultCount must be at least 1");
    }

    #[test]
    fn test_victim_pair_is_mutually_required() {
        assert_eq!(
            code_of(&feed(Some(VictimKey::Country), None)),
            Some(ErrorCode::InvalidParameter)
        );
        assert_eq!(
            code_of(&feed(Some(VictimKey::Country), Some(""))),
            Some(ErrorCode::InvalidParameter)
        );
        assert_eq!(
            code_of(&feed(None, Some("Germany"))),
            Some(ErrorCode::InvalidParameter)
        );
        assert!(feed(None, None).validate().is_ok());
    }

    #[test]
    fn test_victim_domain_membership() {
        assert_eq!(
            code_of(&feed(Some(VictimKey::Country), Some("Atlantis"))),
            Some(ErrorCode::InvalidCountry)
        );
        assert!(feed(Some(VictimKey::Country), Some("Germany")).validate().is_ok());

        assert_eq!(
            code_of(&feed(Some(VictimKey::Industry), Some("Piracy"))),
            Some(ErrorCode::InvalidIndustry)
        );
        assert!(feed(Some(VictimKey::Industry), Some("Financial Services"))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_free_form_victim_keys() {
        assert!(feed(Some(VictimKey::Organization), Some("acme corp")).validate().is_ok());
        assert!(feed(Some(VictimKey::Site), Some("example.com")).validate().is_ok());
    }

    #[test]
    fn test_legacy_ioc_page() {
        let page = |page| {
            QueryDescriptor::from(IocQuery {
                page,
                ..IocQuery::default()
            })
        };
        assert_eq!(code_of(&page(Some(0))), Some(ErrorCode::InvalidParameter));
        assert!(page(Some(1)).validate().is_ok());
        assert!(page(None).validate().is_ok());
    }

    #[test]
    fn test_cursor_must_not_be_empty() {
        let v2 = |next: Option<&str>| {
            QueryDescriptor::from(IocV2Query {
                next: next.map(str::to_string),
                ..IocV2Query::default()
            })
        };
        assert_eq!(code_of(&v2(Some(""))), Some(ErrorCode::InvalidParameter));
        assert!(v2(None).validate().is_ok());
        assert!(v2(Some("abc123")).validate().is_ok());

        let actors = QueryDescriptor::from(ThreatActorQuery {
            next: Some(String::new()),
            ..ThreatActorQuery::default()
        });
        assert_eq!(code_of(&actors), Some(ErrorCode::InvalidParameter));

        let malware = QueryDescriptor::IocMalware(IocEntityQuery {
            next: Some(String::new()),
            ..IocEntityQuery::default()
        });
        assert_eq!(code_of(&malware), Some(ErrorCode::InvalidParameter));
    }

    #[test]
    fn test_image_uuid_required() {
        assert_eq!(
            code_of(&ImageQuery::new("").into()),
            Some(ErrorCode::InvalidParameter)
        );
        assert!(QueryDescriptor::from(ImageQuery::new("IMG-42")).validate().is_ok());
    }

    #[test]
    fn test_all_rules_are_reported() {
        let query = QueryDescriptor::from(ThreatFeedQuery {
            victim_key: Some(VictimKey::Country),
            victim_value: Some("Atlantis".to_string()),
            next: Some(String::new()),
            ..ThreatFeedQuery::default()
        });

        let violations = QueryValidator::new().violations(&query);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].code, ErrorCode::InvalidCountry);
        assert_eq!(violations[1].code, ErrorCode::InvalidParameter);
    }
}
