use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::source::ListingSourceError;

/// Room type counted by the "entire homes and apartments" statistic.
pub const ENTIRE_HOME: &str = "Entire home/apt";

/// A single short-let listing as exported by the listing source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub host_id: String,
    pub host_name: String,
    pub neighbourhood: String,
    pub room_type: String,
    pub price: u32,
    pub minimum_nights: u32,
    pub number_of_reviews: u32,
    pub reviews_per_month: f64,
    pub calculated_host_listings_count: u32,
    pub availability_365: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub last_review: Option<String>,
}

impl Listing {
    /// Cost of the shortest allowed stay.
    pub fn stay_cost(&self) -> u64 {
        u64::from(self.price) * u64::from(self.minimum_nights)
    }

    pub fn last_review_date(&self) -> Option<NaiveDate> {
        self.last_review
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }

    pub(crate) fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Inclusive nightly price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    pub fn new(min: u32, max: u32) -> Result<Self, CatalogError> {
        if max < min {
            return Err(CatalogError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, price: u32) -> bool {
        self.min <= price && price <= self.max
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{a3}{} - \u{a3}{}", self.min, self.max)
    }
}

/// Bucket for how many active listings a borough holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeClass {
    Empty,
    Low,
    Medium,
    High,
}

impl VolumeClass {
    pub const LOW_MEDIUM_BOUNDARY: usize = 1000;
    pub const MEDIUM_HIGH_BOUNDARY: usize = 2000;

    pub const fn from_count(count: usize) -> Self {
        if count == 0 {
            Self::Empty
        } else if count < Self::LOW_MEDIUM_BOUNDARY {
            Self::Low
        } else if count < Self::MEDIUM_HIGH_BOUNDARY {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "No listings",
            Self::Low => "Low volume",
            Self::Medium => "Medium volume",
            Self::High => "High volume",
        }
    }

    /// Map colour used by the borough map.
    pub const fn swatch(self) -> &'static str {
        match self {
            Self::Empty => "#D0D0D0",
            Self::Low => "#fab1a0",
            Self::Medium => "#ffeaa7",
            Self::High => "#55efc4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    ReviewsDesc,
    PriceAsc,
    PriceDesc,
    HostNameAsc,
}

impl SortCriterion {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReviewsDesc => "Number of Reviews",
            Self::PriceAsc => "Price (Low - High)",
            Self::PriceDesc => "Price (High - Low)",
            Self::HostNameAsc => "Host Name (A - Z)",
        }
    }

    pub(crate) fn apply<T: AsRef<Listing>>(self, listings: &mut [T]) {
        match self {
            Self::ReviewsDesc => listings.sort_by(|a, b| {
                b.as_ref()
                    .number_of_reviews
                    .cmp(&a.as_ref().number_of_reviews)
            }),
            Self::PriceAsc => listings.sort_by_key(|listing| listing.as_ref().price),
            Self::PriceDesc => {
                listings.sort_by(|a, b| b.as_ref().price.cmp(&a.as_ref().price))
            }
            Self::HostNameAsc => {
                listings.sort_by(|a, b| a.as_ref().host_name.cmp(&b.as_ref().host_name))
            }
        }
    }
}

impl AsRef<Listing> for Listing {
    fn as_ref(&self) -> &Listing {
        self
    }
}

/// Which listings a name search covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    AllBoroughs,
    Borough(String),
}

impl SearchScope {
    /// Treats a missing or "ALL BOROUGHS" selection as the whole catalog.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection.map(str::trim) {
            None | Some("") => Self::AllBoroughs,
            Some(value) if value.eq_ignore_ascii_case("all boroughs") => Self::AllBoroughs,
            Some(value) => Self::Borough(value.to_string()),
        }
    }

    pub(crate) fn admits(&self, listing: &Listing) -> bool {
        match self {
            Self::AllBoroughs => true,
            Self::Borough(name) => listing.neighbourhood == *name,
        }
    }
}

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    #[default]
    Relevancy,
    ReviewsDesc,
    PriceAsc,
    PriceDesc,
    HostNameAsc,
}

impl SearchOrder {
    pub const fn criterion(self) -> Option<SortCriterion> {
        match self {
            Self::Relevancy => None,
            Self::ReviewsDesc => Some(SortCriterion::ReviewsDesc),
            Self::PriceAsc => Some(SortCriterion::PriceAsc),
            Self::PriceDesc => Some(SortCriterion::PriceDesc),
            Self::HostNameAsc => Some(SortCriterion::HostNameAsc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub query: String,
    pub scope: SearchScope,
    pub order: SearchOrder,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn in_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn ordered_by(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("price range is invalid: maximum {max} is below minimum {min}")]
    InvalidRange { min: u32, max: u32 },
    #[error("listing {0} is not available in the selected price range")]
    NotFound(String),
    #[error(transparent)]
    Source(#[from] ListingSourceError),
}
