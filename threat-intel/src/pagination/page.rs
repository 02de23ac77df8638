use crate::error::QueryResult;
use crate::query::{IocQuery, QueryDescriptor};
use crate::traits::QueryExecutor;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::num::NonZeroU32;
use tracing::debug;

/// 1-based page index of the legacy IOC listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// `None` for page 0
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The following page, or `None` past `u32::MAX`
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A filter set continued by incrementing a page number
pub trait PageNumbered: Clone {
    fn at_page(&self, page: PageNumber) -> QueryDescriptor;
}

impl PageNumbered for IocQuery {
    fn at_page(&self, page: PageNumber) -> QueryDescriptor {
        QueryDescriptor::Ioc(Self {
            page: Some(page.get()),
            ..self.clone()
        })
    }
}

/// One page of the legacy IOC listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberedPage {
    pub page: PageNumber,
    pub message: String,
    pub data: Vec<Value>,
}

/// Walks a page-numbered listing.
///
/// The listing has no continuation field; an empty `data` array marks the end. That
/// empty page is still returned, after which `next_page` yields `None`.
pub struct PageNumberPaginator<'a, E, Q> {
    executor: &'a E,
    filters: Q,
    page: PageNumber,
    exhausted: bool,
}

impl<'a, E: QueryExecutor, Q: PageNumbered> PageNumberPaginator<'a, E, Q> {
    pub fn new(executor: &'a E, filters: Q) -> Self {
        Self::starting_at(executor, filters, PageNumber::FIRST)
    }

    pub fn starting_at(executor: &'a E, filters: Q, page: PageNumber) -> Self {
        Self {
            executor,
            filters,
            page,
            exhausted: false,
        }
    }

    pub fn filters(&self) -> &Q {
        &self.filters
    }

    /// Page the next call will request
    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch the current page and advance, or `None` after an empty page
    pub async fn next_page(&mut self) -> QueryResult<Option<NumberedPage>> {
        if self.exhausted {
            return Ok(None);
        }

        let query = self.filters.at_page(self.page);
        let envelope = self.executor.execute(&query).await?.into_messaged()?;

        debug!(
            kind = query.kind(),
            page = self.page.get(),
            items = envelope.data.len(),
            "fetched numbered page"
        );

        let page = self.page;
        match page.next() {
            Some(following) if !envelope.data.is_empty() => self.page = following,
            _ => self.exhausted = true,
        }

        Ok(Some(NumberedPage {
            page,
            message: envelope.message,
            data: envelope.data,
        }))
    }
}
