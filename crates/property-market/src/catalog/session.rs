use std::collections::HashMap;

use super::domain::{CatalogError, SearchRequest, SortCriterion};
use super::history::{most_frequent, SearchHistory};
use super::inventory::PropertyCatalog;
use super::source::ListingSource;
use super::statistics::StatisticsBoard;
use super::views::{ListingDescription, ListingSummaryView};
use tracing::{info, warn};

/// One user's view of the marketplace: the catalog plus the search log and
/// the listings the user has opened.
pub struct MarketSession<S, H> {
    catalog: PropertyCatalog<S>,
    history: H,
    viewed: HashMap<String, u32>,
}

impl<S, H> MarketSession<S, H>
where
    S: ListingSource,
    H: SearchHistory,
{
    pub fn new(catalog: PropertyCatalog<S>, history: H) -> Self {
        Self {
            catalog,
            history,
            viewed: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &PropertyCatalog<S> {
        &self.catalog
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Applies a new price range and returns the active listing count.
    pub fn select_range(&mut self, min: u32, max: u32) -> Result<usize, CatalogError> {
        self.catalog.set_active_range(min, max)?;
        Ok(self.catalog.active_len())
    }

    /// Listings of one borough, optionally re-sorting the catalog first.
    pub fn borough_listings(
        &mut self,
        borough: &str,
        sort: Option<SortCriterion>,
    ) -> Vec<ListingSummaryView> {
        if let Some(criterion) = sort {
            self.catalog.sort_by(criterion);
        }

        self.catalog
            .listings_in(borough)
            .into_iter()
            .map(ListingSummaryView::from)
            .collect()
    }

    /// Search typed by the user. The expression is logged even when it
    /// matches nothing; a logging failure does not fail the search. Until a
    /// price range is selected nothing is searched or logged.
    pub fn user_search(&self, request: &SearchRequest) -> Vec<ListingSummaryView> {
        if self.catalog.active_range().is_none() {
            info!(query = %request.query, "search ignored, no price range selected");
            return Vec::new();
        }

        let results: Vec<ListingSummaryView> = self
            .catalog
            .run_search(request)
            .into_iter()
            .map(ListingSummaryView::from)
            .collect();

        if let Err(err) = self.history.record(&request.query) {
            warn!(error = %err, "failed to record search expression");
        }

        if results.is_empty() {
            info!(query = %request.query, "search returned no listings");
        }

        results
    }

    /// Describes an active listing and remembers it as viewed.
    pub fn view_listing(&mut self, listing_id: &str) -> Result<ListingDescription, CatalogError> {
        let listing = self.catalog.describe(listing_id)?;
        self.viewed.insert(listing.id.clone(), listing.price);
        Ok(ListingDescription::from(listing))
    }

    pub fn viewed_count(&self) -> usize {
        self.viewed.len()
    }

    /// Integer mean nightly price of every distinct listing viewed so far.
    pub fn viewed_average_price(&self) -> Option<u64> {
        let count = self.viewed.len() as u64;
        let total: u64 = self.viewed.values().map(|price| u64::from(*price)).sum();
        total.checked_div(count)
    }

    pub fn most_searched_expression(&self) -> Option<String> {
        match self.history.entries() {
            Ok(entries) => most_frequent(entries),
            Err(err) => {
                warn!(error = %err, "failed to read search history");
                None
            }
        }
    }

    pub fn statistics_board(&self) -> StatisticsBoard {
        StatisticsBoard {
            snapshot: self.catalog.compute_statistics(),
            viewed_average_price: self.viewed_average_price(),
            most_searched_expression: self.most_searched_expression(),
        }
    }
}
