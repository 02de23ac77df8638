//! Per-resource validation rules
//!
//! Every rule of a resource is evaluated; the returned list is in rule order.

use crate::endpoints::MAX_CVE_RESULT_COUNT;
use crate::error::ErrorRecord;
use crate::query::{
    CveQuery, ImageQuery, IocEntityQuery, IocQuery, IocV2Query, ThreatActorQuery,
    ThreatFeedQuery, VictimKey,
};
use crate::validation::victims;

pub fn cve(query: &CveQuery) -> Vec<ErrorRecord> {
    let mut violations = Vec::new();

    if query.result_count > MAX_CVE_RESULT_COUNT {
        violations.push(ErrorRecord::invalid_parameter(format!(
            "resultCount cannot exceed {}",
            MAX_CVE_RESULT_COUNT
        )));
    }
    if query.result_count < 1 {
        violations.push(ErrorRecord::invalid_parameter(
            "resultCount must be at least 1",
        ));
    }
    violations.extend(cursor(query.next.as_deref()));

    violations
}

pub fn threat_feed(query: &ThreatFeedQuery) -> Vec<ErrorRecord> {
    let mut violations = Vec::new();

    let value = query.victim_value.as_deref().filter(|v| !v.is_empty());
    match (query.victim_key, value) {
        (Some(_), None) => violations.push(ErrorRecord::invalid_parameter(
            "victimValue is required when victimKey is specified",
        )),
        (None, Some(_)) => violations.push(ErrorRecord::invalid_parameter(
            "victimKey is required when victimValue is specified",
        )),
        (Some(key), Some(value)) => violations.extend(victim_value(key, value)),
        (None, None) => {}
    }
    violations.extend(cursor(query.next.as_deref()));

    violations
}

pub fn threat_actor(query: &ThreatActorQuery) -> Vec<ErrorRecord> {
    cursor(query.next.as_deref()).into_iter().collect()
}

pub fn ioc(query: &IocQuery) -> Vec<ErrorRecord> {
    match query.page {
        Some(0) => vec![ErrorRecord::invalid_parameter("page must be at least 1")],
        _ => Vec::new(),
    }
}

pub fn ioc_v2(query: &IocV2Query) -> Vec<ErrorRecord> {
    cursor(query.next.as_deref()).into_iter().collect()
}

pub fn ioc_entity(query: &IocEntityQuery) -> Vec<ErrorRecord> {
    cursor(query.next.as_deref()).into_iter().collect()
}

pub fn image(query: &ImageQuery) -> Vec<ErrorRecord> {
    if query.uuid.trim().is_empty() {
        vec![ErrorRecord::invalid_parameter("Image UUID is required")]
    } else {
        Vec::new()
    }
}

/// An omitted cursor means "first page"; an empty one is a malformed continuation
fn cursor(next: Option<&str>) -> Option<ErrorRecord> {
    match next {
        Some("") => Some(ErrorRecord::invalid_parameter(
            "The 'next' token cannot be an empty string.",
        )),
        _ => None,
    }
}

fn victim_value(key: VictimKey, value: &str) -> Option<ErrorRecord> {
    match key {
        VictimKey::Country if !victims::is_valid_country(value) => Some(
            ErrorRecord::invalid_country(victims::country_validation_message(value)),
        ),
        VictimKey::Industry if !victims::is_valid_industry(value) => Some(
            ErrorRecord::invalid_industry(victims::industry_validation_message(value)),
        ),
        _ => None,
    }
}
