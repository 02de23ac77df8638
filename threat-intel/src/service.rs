//! Typed operations over a [`QueryExecutor`]
//!
//! Each method builds one query descriptor and returns the envelope unmodified,
//! except the threat actor profile which composes an actor search with a feed listing.

use crate::config::IntelConfig;
use crate::error::QueryResult;
use crate::pagination::{
    Cursor, CursorPaginated, CursorPaginator, IocActorListing, IocMalwareListing, NumberedPage,
    PageNumber, PageNumberPaginator,
};
use crate::query::{
    CveQuery, ImageQuery, IocEntityQuery, IocQuery, IocThreatType, IocV2Query, QueryDescriptor,
    ThreatActorQuery, ThreatCategory, ThreatFeedQuery, VictimKey,
};
use crate::traits::QueryExecutor;
use crate::types::{Envelope, ImageEnvelope, MessageEnvelope};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Optional publication window shared by the threat feed filters, in epoch milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishedWindow {
    pub since: Option<u64>,
    pub till: Option<u64>,
}

/// Result of [`ThreatIntelService::threat_actor_profile`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatActorProfile {
    pub threat_actor: Value,
    pub search_query: String,
    pub matched_actors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributed_feeds: Option<AttributedFeeds>,
}

/// Feeds attributed to a profiled actor, or why they could not be fetched
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributedFeeds {
    #[serde(rename_all = "camelCase")]
    Feeds {
        count: usize,
        feeds: Vec<Value>,
        has_more: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_token: Option<String>,
    },
    Failed { error: String, details: String },
}

/// Threat intelligence operations shared by every concurrent caller
pub struct ThreatIntelService<E> {
    executor: E,
    config: Arc<IntelConfig>,
}

impl<E: QueryExecutor> ThreatIntelService<E> {
    pub fn new(executor: E, config: Arc<IntelConfig>) -> Self {
        Self { executor, config }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn config(&self) -> &IntelConfig {
        &self.config
    }

    async fn listing(&self, query: QueryDescriptor) -> QueryResult<Envelope> {
        self.executor.execute(&query).await?.into_listing()
    }

    /// One page of a cursor listing, as an envelope
    async fn cursor_page<Q: CursorPaginated>(
        &self,
        filters: Q,
        cursor: Option<Cursor>,
    ) -> QueryResult<Envelope> {
        let mut paginator = match cursor {
            Some(cursor) => CursorPaginator::resume(&self.executor, filters, cursor),
            None => CursorPaginator::new(&self.executor, filters),
        };

        Ok(match paginator.next_page().await? {
            Some(page) => Envelope {
                data: page.data,
                next: page.next.map(Cursor::into_string),
            },
            None => Envelope::default(),
        })
    }

    // CVE

    pub async fn search_cves(&self, query: CveQuery) -> QueryResult<Envelope> {
        self.listing(query.into()).await
    }

    // Threat feeds

    pub async fn get_threat_feeds(&self, query: ThreatFeedQuery) -> QueryResult<Envelope> {
        self.listing(query.into()).await
    }

    pub async fn get_threat_feed_by_id(&self, uuid: &str) -> QueryResult<Envelope> {
        self.get_threat_feeds(ThreatFeedQuery {
            uuid: Some(uuid.to_string()),
            ..ThreatFeedQuery::default()
        })
        .await
    }

    pub async fn get_threat_feeds_by_actor(
        &self,
        threat_actor_uuid: &str,
        cursor: Option<Cursor>,
    ) -> QueryResult<Envelope> {
        let filters = ThreatFeedQuery {
            threat_actor_uuid: Some(threat_actor_uuid.to_string()),
            ..ThreatFeedQuery::default()
        };
        self.cursor_page(filters, cursor).await
    }

    pub async fn get_threat_feeds_by_category(
        &self,
        category: ThreatCategory,
        window: PublishedWindow,
        victim_key: Option<VictimKey>,
        victim_value: Option<String>,
    ) -> QueryResult<Envelope> {
        self.get_threat_feeds(ThreatFeedQuery {
            category: Some(category),
            published_since: window.since,
            published_till: window.till,
            victim_key,
            victim_value,
            ..ThreatFeedQuery::default()
        })
        .await
    }

    pub async fn search_threat_feeds_by_keyword(
        &self,
        keyword: &str,
        window: PublishedWindow,
    ) -> QueryResult<Envelope> {
        self.get_threat_feeds(ThreatFeedQuery {
            keyword: Some(keyword.to_string()),
            published_since: window.since,
            published_till: window.till,
            ..ThreatFeedQuery::default()
        })
        .await
    }

    pub async fn get_threat_feeds_by_victim(
        &self,
        key: VictimKey,
        value: &str,
        window: PublishedWindow,
        category: Option<ThreatCategory>,
    ) -> QueryResult<Envelope> {
        self.get_threat_feeds(ThreatFeedQuery {
            published_since: window.since,
            published_till: window.till,
            category,
            ..ThreatFeedQuery::by_victim(key, value)
        })
        .await
    }

    /// Continue a threat feed listing; `filters` must be those of the first page
    pub async fn next_threat_feed_page(
        &self,
        filters: ThreatFeedQuery,
        cursor: Cursor,
    ) -> QueryResult<Envelope> {
        self.cursor_page(filters, Some(cursor)).await
    }

    pub async fn get_threat_image(&self, query: ImageQuery) -> QueryResult<ImageEnvelope> {
        self.executor
            .execute(&query.into())
            .await?
            .into_image()
    }

    // Threat actors

    pub async fn search_threat_actors(&self, query: ThreatActorQuery) -> QueryResult<Envelope> {
        self.listing(query.into()).await
    }

    pub async fn get_threat_actor_by_id(&self, uuid: &str) -> QueryResult<Envelope> {
        self.search_threat_actors(ThreatActorQuery {
            uuid: Some(uuid.to_string()),
            ..ThreatActorQuery::default()
        })
        .await
    }

    pub async fn search_threat_actors_by_name(&self, name: &str) -> QueryResult<Envelope> {
        self.search_threat_actors(ThreatActorQuery {
            name: Some(name.to_string()),
            ..ThreatActorQuery::default()
        })
        .await
    }

    /// Continue a threat actor listing; `filters` must be those of the first page
    pub async fn next_threat_actor_page(
        &self,
        filters: ThreatActorQuery,
        cursor: Cursor,
    ) -> QueryResult<Envelope> {
        self.cursor_page(filters, Some(cursor)).await
    }

    /// Search actors by name, take the best match, and attach its attributed feeds.
    ///
    /// `Ok(None)` when no actor matches. A failing feed lookup is reported inside the
    /// profile rather than failing the whole call.
    pub async fn threat_actor_profile(
        &self,
        actor_name: &str,
        include_feeds: Option<bool>,
    ) -> QueryResult<Option<ThreatActorProfile>> {
        let actors = self.search_threat_actors_by_name(actor_name).await?;
        let matched_actors = actors.data.len();

        let Some(threat_actor) = actors.data.into_iter().next() else {
            debug!(actor = actor_name, "no threat actor matched");
            return Ok(None);
        };

        let include_feeds =
            include_feeds.unwrap_or(self.config.threat_intelligence.include_attributed_feeds);

        let attributed_feeds = if include_feeds {
            Some(self.attributed_feeds(&threat_actor).await)
        } else {
            None
        };

        Ok(Some(ThreatActorProfile {
            threat_actor,
            search_query: actor_name.to_string(),
            matched_actors,
            attributed_feeds,
        }))
    }

    async fn attributed_feeds(&self, threat_actor: &Value) -> AttributedFeeds {
        let Some(uuid) = threat_actor.get("uuid").and_then(Value::as_str) else {
            return AttributedFeeds::Failed {
                error: "Failed to retrieve attributed threat feeds".to_string(),
                details: "Matched threat actor has no uuid".to_string(),
            };
        };

        match self.get_threat_feeds_by_actor(uuid, None).await {
            Ok(envelope) => {
                let cap = self.config.threat_intelligence.max_feeds_per_response;
                let mut feeds = envelope.data;
                let truncated = feeds.len() > cap;
                feeds.truncate(cap);

                AttributedFeeds::Feeds {
                    count: feeds.len(),
                    feeds,
                    has_more: truncated || envelope.next.is_some(),
                    next_token: envelope.next,
                }
            }
            Err(error) => {
                warn!(actor_uuid = uuid, code = %error.code, "attributed feed lookup failed");
                AttributedFeeds::Failed {
                    error: "Failed to retrieve attributed threat feeds".to_string(),
                    details: error.message,
                }
            }
        }
    }

    // IOCs

    pub async fn search_iocs(&self, query: IocQuery) -> QueryResult<MessageEnvelope> {
        self.executor.execute(&query.into()).await?.into_messaged()
    }

    pub async fn get_iocs_by_country(&self, country: &str) -> QueryResult<MessageEnvelope> {
        self.search_iocs(IocQuery {
            country: Some(country.to_string()),
            ..IocQuery::default()
        })
        .await
    }

    pub async fn get_iocs_by_threat_type(
        &self,
        threat_type: IocThreatType,
    ) -> QueryResult<MessageEnvelope> {
        self.search_iocs(IocQuery {
            threat_type: Some(threat_type),
            ..IocQuery::default()
        })
        .await
    }

    /// One page of the legacy IOC listing; an empty page means the listing is exhausted
    pub async fn get_iocs_page(
        &self,
        filters: IocQuery,
        page: PageNumber,
    ) -> QueryResult<NumberedPage> {
        let mut paginator = PageNumberPaginator::starting_at(&self.executor, filters, page);
        Ok(paginator.next_page().await?.unwrap_or(NumberedPage {
            page,
            message: String::new(),
            data: Vec::new(),
        }))
    }

    pub async fn search_iocs_v2(&self, query: IocV2Query) -> QueryResult<Envelope> {
        self.listing(query.into()).await
    }

    pub async fn get_ioc_threat_actors(&self, query: IocEntityQuery) -> QueryResult<Envelope> {
        let cursor = Cursor::from_optional(query.next.clone())?;
        self.cursor_page(IocActorListing(query), cursor).await
    }

    pub async fn get_ioc_malwares(&self, query: IocEntityQuery) -> QueryResult<Envelope> {
        let cursor = Cursor::from_optional(query.next.clone())?;
        self.cursor_page(IocMalwareListing(query), cursor).await
    }
}
