//! Logical queries: one variant per resource kind

pub mod params;
pub mod types;

pub use params::{
    CveQuery, ImageQuery, IocEntityQuery, IocQuery, IocV2Query, QueryPairs, ThreatActorQuery,
    ThreatFeedQuery,
};
pub use types::{ConfidenceLevel, ImageType, IocThreatType, IocType, ThreatCategory, VictimKey};

use crate::endpoints::Endpoint;

/// How a resource continues a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    /// Opaque server-issued `next` token
    Cursor,
    /// 1-based `page` incremented by the caller
    PageNumber,
    /// Single-object lookup
    None,
}

/// A query for exactly one resource, carrying only that resource's filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDescriptor {
    Cve(CveQuery),
    ThreatFeed(ThreatFeedQuery),
    ThreatActor(ThreatActorQuery),
    Ioc(IocQuery),
    IocV2(IocV2Query),
    IocActor(IocEntityQuery),
    IocMalware(IocEntityQuery),
    Image(ImageQuery),
}

impl QueryDescriptor {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Cve(_) => Endpoint::Cve,
            Self::ThreatFeed(_) => Endpoint::ThreatFeed,
            Self::ThreatActor(_) => Endpoint::ThreatActor,
            Self::Ioc(_) => Endpoint::Ioc,
            Self::IocV2(_) => Endpoint::IocV2,
            Self::IocActor(_) => Endpoint::IocActor,
            Self::IocMalware(_) => Endpoint::IocMalware,
            Self::Image(_) => Endpoint::ThreatImage,
        }
    }

    /// Query-string pairs with absent filters omitted
    pub fn query_pairs(&self) -> QueryPairs {
        match self {
            Self::Cve(q) => q.query_pairs(),
            Self::ThreatFeed(q) => q.query_pairs(),
            Self::ThreatActor(q) => q.query_pairs(),
            Self::Ioc(q) => q.query_pairs(),
            Self::IocV2(q) => q.query_pairs(),
            Self::IocActor(q) | Self::IocMalware(q) => q.query_pairs(),
            Self::Image(q) => q.query_pairs(),
        }
    }

    pub fn pagination(&self) -> PaginationStyle {
        match self {
            Self::Ioc(_) => PaginationStyle::PageNumber,
            Self::Image(_) => PaginationStyle::None,
            _ => PaginationStyle::Cursor,
        }
    }

    /// Short resource label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cve(_) => "cve",
            Self::ThreatFeed(_) => "threat_feed",
            Self::ThreatActor(_) => "threat_actor",
            Self::Ioc(_) => "ioc",
            Self::IocV2(_) => "ioc_v2",
            Self::IocActor(_) => "ioc_actor",
            Self::IocMalware(_) => "ioc_malware",
            Self::Image(_) => "image",
        }
    }
}

impl From<CveQuery> for QueryDescriptor {
    fn from(query: CveQuery) -> Self {
        Self::Cve(query)
    }
}

impl From<ThreatFeedQuery> for QueryDescriptor {
    fn from(query: ThreatFeedQuery) -> Self {
        Self::ThreatFeed(query)
    }
}

impl From<ThreatActorQuery> for QueryDescriptor {
    fn from(query: ThreatActorQuery) -> Self {
        Self::ThreatActor(query)
    }
}

impl From<IocQuery> for QueryDescriptor {
    fn from(query: IocQuery) -> Self {
        Self::Ioc(query)
    }
}

impl From<IocV2Query> for QueryDescriptor {
    fn from(query: IocV2Query) -> Self {
        Self::IocV2(query)
    }
}

impl From<ImageQuery> for QueryDescriptor {
    fn from(query: ImageQuery) -> Self {
        Self::Image(query)
    }
}
