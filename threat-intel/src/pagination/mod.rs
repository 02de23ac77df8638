//! Continuation of listing queries
//!
//! Two disciplines coexist and are kept apart by type: opaque cursors for the
//! CVE, threat feed, threat actor and IOC v2 family, and 1-based page numbers for
//! the legacy IOC listing. A paginator owns its filter set, so every page is
//! requested with exactly the filters that produced the first one.

pub mod cursor;
pub mod page;

pub use cursor::{Cursor, CursorPage, CursorPaginated, CursorPaginator, IocActorListing, IocMalwareListing};
pub use page::{NumberedPage, PageNumber, PageNumberPaginator, PageNumbered};
