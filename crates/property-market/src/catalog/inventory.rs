use super::boroughs::{Borough, BoroughTable};
use super::domain::{
    CatalogError, Listing, PriceRange, SearchRequest, SearchScope, SortCriterion, VolumeClass,
};
use super::search::{name_matches, normalize_query, rank_by_relevancy};
use super::source::ListingSource;
use super::statistics::{summarize, StatisticsSnapshot};
use serde::Serialize;
use tracing::{debug, info};

/// Active listing count for one borough of the map.
#[derive(Debug, Clone, Serialize)]
pub struct BoroughVolume {
    pub borough: Borough,
    pub count: usize,
    pub volume: VolumeClass,
}

/// Owns the listings inside the selected price range and answers every
/// borough, search, and statistics query against them.
///
/// The active subset is empty until the first successful
/// [`set_active_range`](Self::set_active_range).
#[derive(Debug)]
pub struct PropertyCatalog<S> {
    source: S,
    boroughs: BoroughTable,
    active: Vec<Listing>,
    range: Option<PriceRange>,
}

impl<S: ListingSource> PropertyCatalog<S> {
    pub fn new(source: S, boroughs: BoroughTable) -> Self {
        Self {
            source,
            boroughs,
            active: Vec::new(),
            range: None,
        }
    }

    /// Reloads the source and keeps listings priced within `[min, max]`.
    /// On any error the previous subset stays in place.
    pub fn set_active_range(&mut self, min: u32, max: u32) -> Result<(), CatalogError> {
        let range = PriceRange::new(min, max)?;
        let loaded = self.source.load()?;
        let total = loaded.len();

        let active: Vec<Listing> = loaded
            .into_iter()
            .filter(|listing| range.contains(listing.price))
            .collect();

        info!(%range, total, active = active.len(), "active price range updated");

        self.active = active;
        self.range = Some(range);
        Ok(())
    }

    pub fn active_range(&self) -> Option<PriceRange> {
        self.range
    }

    pub fn listings(&self) -> &[Listing] {
        &self.active
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn boroughs(&self) -> &BoroughTable {
        &self.boroughs
    }

    pub fn count_by_borough(&self, borough: &str) -> usize {
        self.active
            .iter()
            .filter(|listing| listing.neighbourhood == borough)
            .count()
    }

    pub fn listings_in(&self, borough: &str) -> Vec<&Listing> {
        self.active
            .iter()
            .filter(|listing| listing.neighbourhood == borough)
            .collect()
    }

    pub fn classify_volume(count: usize) -> VolumeClass {
        VolumeClass::from_count(count)
    }

    pub fn borough_volumes(&self) -> Vec<BoroughVolume> {
        self.boroughs
            .iter()
            .map(|borough| {
                let count = self.count_by_borough(&borough.name);
                BoroughVolume {
                    borough: borough.clone(),
                    count,
                    volume: Self::classify_volume(count),
                }
            })
            .collect()
    }

    /// Stable in-place reorder; equal keys keep their relative order.
    pub fn sort_by(&mut self, criterion: SortCriterion) {
        criterion.apply(&mut self.active);
        debug!(criterion = criterion.label(), "active listings re-sorted");
    }

    pub fn search(&self, query: &str, scope: &SearchScope) -> Vec<&Listing> {
        let Some(needle) = normalize_query(query) else {
            return Vec::new();
        };

        self.active
            .iter()
            .filter(|listing| scope.admits(listing) && name_matches(listing, &needle))
            .collect()
    }

    pub fn search_by_relevancy(&self, query: &str) -> Vec<&Listing> {
        match normalize_query(query) {
            Some(needle) => rank_by_relevancy(&self.active, &needle),
            None => Vec::new(),
        }
    }

    /// Search screen query: match, order the matches, then narrow to the scope.
    /// Sorting here reorders only the result set.
    pub fn run_search(&self, request: &SearchRequest) -> Vec<&Listing> {
        let mut results = match request.order.criterion() {
            None => self.search_by_relevancy(&request.query),
            Some(criterion) => {
                let mut matches = self.search(&request.query, &SearchScope::AllBoroughs);
                criterion.apply(&mut matches);
                matches
            }
        };
        results.retain(|listing| request.scope.admits(listing));

        debug!(
            query = %request.query,
            order = ?request.order,
            results = results.len(),
            "search executed"
        );
        results
    }

    pub fn describe(&self, listing_id: &str) -> Result<&Listing, CatalogError> {
        self.active
            .iter()
            .find(|listing| listing.id == listing_id)
            .ok_or_else(|| CatalogError::NotFound(listing_id.to_owned()))
    }

    pub fn compute_statistics(&self) -> StatisticsSnapshot {
        summarize(&self.active, self.boroughs.len())
    }
}
