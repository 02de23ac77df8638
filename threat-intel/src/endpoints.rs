//! Fixed API endpoint paths and limits

/// Production API base, including the `/merlin` prefix
pub const DEFAULT_BASE_URL: &str = "https://api.falconfeeds.io/merlin";

/// Upper bound for `resultCount` on CVE queries
pub const MAX_CVE_RESULT_COUNT: u32 = 50;

/// `resultCount` used when the caller does not choose one
pub const DEFAULT_RESULT_COUNT: u32 = 10;

/// Default per-call timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Every resource the API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Cve,
    ThreatFeed,
    ThreatActor,
    Ioc,
    IocV2,
    ThreatImage,
    IocActor,
    IocMalware,
}

impl Endpoint {
    /// Path appended to the base URL
    pub fn path(&self) -> &'static str {
        match self {
            Self::Cve => "/cve",
            Self::ThreatFeed => "/threat/feed",
            Self::ThreatActor => "/threat/actor",
            Self::Ioc => "/ioc",
            Self::IocV2 => "/ioc/v2",
            Self::ThreatImage => "/threat/image",
            Self::IocActor => "/ioc/actor",
            Self::IocMalware => "/ioc/malware",
        }
    }
}
