//! Listing catalog for the London short-let marketplace.
//!
//! [`PropertyCatalog`] holds the listings inside the selected price range and
//! answers borough, search, and statistics queries. [`MarketSession`] wraps a
//! catalog with the caller-side state (search log, viewed listings) that the
//! HTTP router and CLI share.

pub mod boroughs;
pub mod domain;
pub mod history;
mod inventory;
pub mod router;
mod search;
mod session;
pub mod source;
pub mod statistics;
pub mod views;

pub use boroughs::{Borough, BoroughTable};
pub use domain::{
    CatalogError, Listing, PriceRange, SearchOrder, SearchRequest, SearchScope, SortCriterion,
    VolumeClass, ENTIRE_HOME,
};
pub use history::{
    most_frequent, FileSearchHistory, HistoryError, InMemorySearchHistory, SearchHistory,
};
pub use inventory::{BoroughVolume, PropertyCatalog};
pub use router::{catalog_router, shared_session, SharedSession};
pub use search::normalize_query;
pub use session::MarketSession;
pub use source::{
    parse_listings, CsvListingSource, InMemoryListingSource, ListingSource, ListingSourceError,
};
pub use statistics::{CheapestBooking, Statistic, StatisticsBoard, StatisticsSnapshot, UNAVAILABLE};
pub use views::{BoroughVolumeView, ListingDescription, ListingSummaryView};

/// Volume bucket for a borough's active listing count.
pub fn classify_volume(count: usize) -> VolumeClass {
    VolumeClass::from_count(count)
}
