use super::domain::{Listing, VolumeClass};
use super::inventory::BoroughVolume;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Row shown in a borough's listing list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSummaryView {
    pub id: String,
    pub name: String,
    pub host_name: String,
    pub neighbourhood: String,
    pub price: u32,
    pub number_of_reviews: u32,
    pub minimum_nights: u32,
}

impl From<&Listing> for ListingSummaryView {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            name: listing.name.clone(),
            host_name: listing.host_name.clone(),
            neighbourhood: listing.neighbourhood.clone(),
            price: listing.price,
            number_of_reviews: listing.number_of_reviews,
            minimum_nights: listing.minimum_nights,
        }
    }
}

/// Detail pane for a single listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDescription {
    pub id: String,
    pub host_name: String,
    pub name: String,
    pub neighbourhood: String,
    pub room_type: String,
    pub price: u32,
    pub minimum_nights: u32,
    pub last_review: Option<String>,
    pub last_review_date: Option<NaiveDate>,
    pub availability_365: u32,
    pub calculated_host_listings_count: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub reviews_per_month: f64,
}

impl From<&Listing> for ListingDescription {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            host_name: listing.host_name.clone(),
            name: listing.name.clone(),
            neighbourhood: listing.neighbourhood.clone(),
            room_type: listing.room_type.clone(),
            price: listing.price,
            minimum_nights: listing.minimum_nights,
            last_review: listing.last_review.clone(),
            last_review_date: listing.last_review_date(),
            availability_365: listing.availability_365,
            calculated_host_listings_count: listing.calculated_host_listings_count,
            latitude: listing.latitude,
            longitude: listing.longitude,
            reviews_per_month: listing.reviews_per_month,
        }
    }
}

impl fmt::Display for ListingDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host name: {}", self.host_name)?;
        writeln!(f, "Property name: {}", self.name)?;
        writeln!(f, "Borough: {}", self.neighbourhood)?;
        writeln!(f, "Minimum nights: {}", self.minimum_nights)?;
        writeln!(f, "Property ID: {}", self.id)?;
        writeln!(
            f,
            "Last review: {}",
            self.last_review.as_deref().unwrap_or("never")
        )?;
        writeln!(f, "Room type: {}", self.room_type)?;
        writeln!(f, "Availability throughout the year: {}", self.availability_365)?;
        writeln!(f, "Host listings count: {}", self.calculated_host_listings_count)?;
        writeln!(f, "Property latitude: {}", self.latitude)?;
        writeln!(f, "Property longitude: {}", self.longitude)?;
        write!(
            f,
            "Average number of reviews per month: {}",
            self.reviews_per_month
        )
    }
}

/// Map tile for one borough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoroughVolumeView {
    pub name: String,
    pub abbreviation: String,
    pub column: u8,
    pub row: u8,
    pub count: usize,
    pub volume: VolumeClass,
    pub volume_label: &'static str,
    pub swatch: &'static str,
}

impl From<&BoroughVolume> for BoroughVolumeView {
    fn from(entry: &BoroughVolume) -> Self {
        Self {
            name: entry.borough.name.clone(),
            abbreviation: entry.borough.abbreviation.clone(),
            column: entry.borough.column,
            row: entry.borough.row,
            count: entry.count,
            volume: entry.volume,
            volume_label: entry.volume.label(),
            swatch: entry.volume.swatch(),
        }
    }
}
