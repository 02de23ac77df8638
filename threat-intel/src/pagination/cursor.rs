use crate::error::{ErrorRecord, QueryResult};
use crate::query::{
    CveQuery, IocEntityQuery, IocV2Query, QueryDescriptor, ThreatActorQuery, ThreatFeedQuery,
};
use crate::traits::QueryExecutor;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Opaque server-issued continuation token, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// `None` for an empty token, which the API never issues
    pub fn new<S: Into<String>>(token: S) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// A caller-supplied token; empty is an `invalid_parameter` error
    pub fn parse<S: Into<String>>(token: S) -> QueryResult<Self> {
        Self::new(token).ok_or_else(empty_cursor)
    }

    /// An optional caller-supplied token: omitted means the first page
    pub fn from_optional(token: Option<String>) -> QueryResult<Option<Self>> {
        token.map(Self::parse).transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn empty_cursor() -> ErrorRecord {
    ErrorRecord::invalid_parameter("The 'next' token cannot be an empty string.")
}

/// A filter set continued by replaying a cursor
pub trait CursorPaginated: Clone {
    /// The descriptor for the page at `cursor` (first page when `None`)
    fn at_cursor(&self, cursor: Option<&Cursor>) -> QueryDescriptor;
}

impl CursorPaginated for CveQuery {
    fn at_cursor(&self, cursor: Option<&Cursor>) -> QueryDescriptor {
        QueryDescriptor::Cve(Self {
            next: cursor.map(|c| c.as_str().to_string()),
            ..self.clone()
        })
    }
}

impl CursorPaginated for ThreatFeedQuery {
    fn at_cursor(&self, cursor: Option<&Cursor>) -> QueryDescriptor {
        QueryDescriptor::ThreatFeed(Self {
            next: cursor.map(|c| c.as_str().to_string()),
            ..self.clone()
        })
    }
}

impl CursorPaginated for ThreatActorQuery {
    fn at_cursor(&self, cursor: Option<&Cursor>) -> QueryDescriptor {
        QueryDescriptor::ThreatActor(Self {
            next: cursor.map(|c| c.as_str().to_string()),
            ..self.clone()
        })
    }
}

impl CursorPaginated for IocV2Query {
    fn at_cursor(&self, cursor: Option<&Cursor>) -> QueryDescriptor {
        QueryDescriptor::IocV2(Self {
            next: cursor.map(|c| c.as_str().to_string()),
            ..self.clone()
        })
    }
}

/// Threat actors related to IOCs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IocActorListing(pub IocEntityQuery);

/// Malware families related to IOCs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IocMalwareListing(pub IocEntityQuery);

impl CursorPaginated for IocActorListing {
    fn at_cursor(&self, cursor: Option<&Cursor>) -> QueryDescriptor {
        QueryDescriptor::IocActor(IocEntityQuery {
            next: cursor.map(|c| c.as_str().to_string()),
            ..self.0.clone()
        })
    }
}

impl CursorPaginated for IocMalwareListing {
    fn at_cursor(&self, cursor: Option<&Cursor>) -> QueryDescriptor {
        QueryDescriptor::IocMalware(IocEntityQuery {
            next: cursor.map(|c| c.as_str().to_string()),
            ..self.0.clone()
        })
    }
}

/// One batch of a cursor listing
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage {
    pub data: Vec<Value>,
    /// Token for the following batch; `None` once the listing is exhausted
    pub next: Option<Cursor>,
}

/// Walks a cursor listing batch by batch.
///
/// Exhaustion is signalled by an absent `next` in the response envelope. A failed
/// call leaves the position unchanged, so `next_page` may simply be called again.
pub struct CursorPaginator<'a, E, Q> {
    executor: &'a E,
    filters: Q,
    cursor: Option<Cursor>,
    exhausted: bool,
}

impl<'a, E: QueryExecutor, Q: CursorPaginated> CursorPaginator<'a, E, Q> {
    /// Start from the first page
    pub fn new(executor: &'a E, filters: Q) -> Self {
        Self {
            executor,
            filters,
            cursor: None,
            exhausted: false,
        }
    }

    /// Continue from a cursor previously returned for these same filters
    pub fn resume(executor: &'a E, filters: Q, cursor: Cursor) -> Self {
        Self {
            executor,
            filters,
            cursor: Some(cursor),
            exhausted: false,
        }
    }

    pub fn filters(&self) -> &Q {
        &self.filters
    }

    /// Cursor the next call will replay
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch the next batch, or `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> QueryResult<Option<CursorPage>> {
        if self.exhausted {
            return Ok(None);
        }

        let query = self.filters.at_cursor(self.cursor.as_ref());
        let envelope = self.executor.execute(&query).await?.into_listing()?;

        let next = envelope.next.and_then(Cursor::new);
        debug!(
            kind = query.kind(),
            items = envelope.data.len(),
            has_next = next.is_some(),
            "fetched cursor page"
        );

        self.exhausted = next.is_none();
        self.cursor = next.clone();

        Ok(Some(CursorPage {
            data: envelope.data,
            next,
        }))
    }

    /// Drain pages until exhaustion or until at least `limit` items are gathered
    pub async fn collect_items(&mut self, limit: usize) -> QueryResult<Vec<Value>> {
        let mut items = Vec::new();
        while items.len() < limit {
            match self.next_page().await? {
                Some(page) => items.extend(page.data),
                None => break,
            }
        }
        items.truncate(limit);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ErrorRecord};
    use crate::query::ThreatCategory;
    use crate::testing::MockExecutor;
    use serde_json::json;

    fn ransomware() -> ThreatFeedQuery {
        ThreatFeedQuery {
            category: Some(ThreatCategory::Ransomware),
            ..ThreatFeedQuery::default()
        }
    }

    #[test]
    fn test_empty_cursor_is_rejected() {
        assert!(Cursor::new("").is_none());
        assert_eq!(Cursor::new("abc123").unwrap().as_str(), "abc123");

        let error = Cursor::parse("").unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidParameter);
        assert_eq!(error.status, Some(400));

        assert!(Cursor::from_optional(None).unwrap().is_none());
        assert!(Cursor::from_optional(Some(String::new())).is_err());
        assert_eq!(
            Cursor::from_optional(Some("abc123".to_string())).unwrap(),
            Cursor::new("abc123")
        );
    }

    #[tokio::test]
    async fn test_walks_until_next_is_absent() {
        let executor = MockExecutor::new()
            .with_listing(vec![json!({"uuid": "1"}), json!({"uuid": "2"})], Some("c1"))
            .with_listing(vec![json!({"uuid": "3"})], None);

        let mut paginator = CursorPaginator::new(&executor, ransomware());

        let first = paginator.next_page().await.unwrap().unwrap();
        assert_eq!(first.data.len(), 2);
        assert_eq!(first.next, Cursor::new("c1"));

        let second = paginator.next_page().await.unwrap().unwrap();
        assert_eq!(second.data.len(), 1);
        assert!(second.next.is_none());
        assert!(paginator.is_exhausted());

        assert!(paginator.next_page().await.unwrap().is_none());
        assert_eq!(executor.queries().len(), 2);
    }

    #[tokio::test]
    async fn test_filters_are_replayed_with_cursor() {
        let executor = MockExecutor::new()
            .with_listing(vec![json!({})], Some("abc123"))
            .with_listing(vec![], None);

        let mut paginator = CursorPaginator::new(&executor, ransomware());
        paginator.next_page().await.unwrap();
        paginator.next_page().await.unwrap();

        let queries = executor.queries();
        let first = queries[0].query_pairs();
        let second = queries[1].query_pairs();
        assert_eq!(first.get("next"), None);
        assert_eq!(second.get("next"), Some("abc123"));
        assert_eq!(first.get("category"), second.get("category"));
        assert_eq!(second.get("category"), Some("Ransomware"));
    }

    #[tokio::test]
    async fn test_stray_next_in_filters_is_ignored() {
        let executor = MockExecutor::new().with_listing(vec![], None);
        let filters = IocV2Query {
            next: Some("stale".to_string()),
            ..IocV2Query::default()
        };

        let mut paginator = CursorPaginator::new(&executor, filters);
        paginator.next_page().await.unwrap();

        assert_eq!(executor.queries()[0].query_pairs().get("next"), None);
    }

    #[tokio::test]
    async fn test_resume_and_ioc_entity_listings() {
        let executor = MockExecutor::new().with_listing(vec![json!({"name": "Emotet"})], None);
        let listing = IocMalwareListing(IocEntityQuery {
            name: Some("Emotet".to_string()),
            ..IocEntityQuery::default()
        });

        let mut paginator =
            CursorPaginator::resume(&executor, listing, Cursor::new("page-2").unwrap());
        paginator.next_page().await.unwrap();

        let query = &executor.queries()[0];
        assert!(matches!(query, QueryDescriptor::IocMalware(_)));
        assert_eq!(query.query_pairs().get("next"), Some("page-2"));
    }

    #[tokio::test]
    async fn test_error_keeps_position() {
        let executor = MockExecutor::new()
            .with_listing(vec![json!({})], Some("c1"))
            .with_error(ErrorRecord::from_status(429, "API request failed: Too Many Requests"))
            .with_listing(vec![json!({})], None);

        let mut paginator = CursorPaginator::new(&executor, ThreatActorQuery::default());
        paginator.next_page().await.unwrap();

        let error = paginator.next_page().await.unwrap_err();
        assert_eq!(error.code, ErrorCode::RateLimited);
        assert_eq!(paginator.cursor(), Cursor::new("c1").as_ref());

        paginator.next_page().await.unwrap();
        let queries = executor.queries();
        assert_eq!(queries[1], queries[2]);
    }

    #[tokio::test]
    async fn test_collect_items_stops_at_limit() {
        let executor = MockExecutor::new()
            .with_listing(vec![json!(1), json!(2)], Some("c1"))
            .with_listing(vec![json!(3), json!(4)], Some("c2"));

        let mut paginator = CursorPaginator::new(&executor, CveQuery::default());
        let items = paginator.collect_items(3).await.unwrap();

        assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(executor.remaining(), 0);
        assert!(!paginator.is_exhausted());
    }
}
