use super::domain::{Listing, ENTIRE_HOME};
use serde::Serialize;
use std::collections::HashMap;

/// Value shown for a statistic that cannot be computed.
pub const UNAVAILABLE: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistic {
    pub name: String,
    pub value: String,
}

impl Statistic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: UNAVAILABLE.to_string(),
        }
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value.unwrap_or_else(|| UNAVAILABLE.to_string());
        self
    }

    pub fn is_available(&self) -> bool {
        self.value != UNAVAILABLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheapestBooking {
    pub listing_id: String,
    pub name: String,
    pub neighbourhood: String,
    pub cost: u64,
}

/// Aggregates over the active subset at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub average_reviews: Option<f64>,
    pub active_count: usize,
    pub entire_home_count: usize,
    pub most_expensive_borough: Option<String>,
    pub average_per_borough: usize,
    pub cheapest_booking: Option<CheapestBooking>,
}

#[derive(Debug, Default, Clone, Copy)]
struct StayTotals {
    sum: u64,
    count: u64,
}

impl StayTotals {
    /// Compares averages exactly by cross-multiplying.
    fn exceeds(&self, other: &StayTotals) -> bool {
        u128::from(self.sum) * u128::from(other.count)
            > u128::from(other.sum) * u128::from(self.count)
    }
}

pub(crate) fn summarize(listings: &[Listing], borough_count: usize) -> StatisticsSnapshot {
    let active_count = listings.len();

    let average_reviews = if listings.is_empty() {
        None
    } else {
        let total: u64 = listings
            .iter()
            .map(|listing| u64::from(listing.number_of_reviews))
            .sum();
        Some(total as f64 / active_count as f64)
    };

    let entire_home_count = listings
        .iter()
        .filter(|listing| listing.room_type == ENTIRE_HOME)
        .count();

    StatisticsSnapshot {
        average_reviews,
        active_count,
        entire_home_count,
        most_expensive_borough: most_expensive_borough(listings),
        average_per_borough: active_count.checked_div(borough_count).unwrap_or(0),
        cheapest_booking: cheapest_booking(listings),
    }
}

/// Borough with the highest mean stay cost. Boroughs are visited in the order
/// they first appear and only a strictly greater mean replaces the leader.
fn most_expensive_borough(listings: &[Listing]) -> Option<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, StayTotals> = HashMap::new();

    for listing in listings {
        let entry = totals
            .entry(listing.neighbourhood.as_str())
            .or_insert_with(|| {
                order.push(listing.neighbourhood.as_str());
                StayTotals::default()
            });
        entry.sum += listing.stay_cost();
        entry.count += 1;
    }

    let mut leader: Option<(&str, StayTotals)> = None;
    for borough in order {
        let candidate = totals[borough];
        match leader {
            Some((_, best)) if !candidate.exceeds(&best) => {}
            _ => leader = Some((borough, candidate)),
        }
    }

    leader.map(|(borough, _)| borough.to_string())
}

fn cheapest_booking(listings: &[Listing]) -> Option<CheapestBooking> {
    let mut cheapest: Option<&Listing> = None;
    for listing in listings {
        match cheapest {
            Some(best) if listing.stay_cost() >= best.stay_cost() => {}
            _ => cheapest = Some(listing),
        }
    }

    cheapest.map(|listing| CheapestBooking {
        listing_id: listing.id.clone(),
        name: listing.name.clone(),
        neighbourhood: listing.neighbourhood.clone(),
        cost: listing.stay_cost(),
    })
}

/// The full statistics panel: catalog aggregates plus the session-level
/// figures that depend on what the user viewed and searched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsBoard {
    pub snapshot: StatisticsSnapshot,
    pub viewed_average_price: Option<u64>,
    pub most_searched_expression: Option<String>,
}

impl StatisticsBoard {
    pub fn statistics(&self) -> Vec<Statistic> {
        let snapshot = &self.snapshot;
        vec![
            Statistic::new("Average number of reviews per property")
                .with_value(snapshot.average_reviews.map(|avg| format!("{avg:.2}"))),
            Statistic::new("Total number of available properties")
                .with_value(Some(snapshot.active_count.to_string())),
            Statistic::new("Number of entire homes and apartments")
                .with_value(Some(snapshot.entire_home_count.to_string())),
            Statistic::new("Most expensive borough")
                .with_value(snapshot.most_expensive_borough.clone()),
            Statistic::new("Average price of all viewed properties")
                .with_value(self.viewed_average_price.map(|price| format!("\u{a3}{price}"))),
            Statistic::new("Most searched expression")
                .with_value(self.most_searched_expression.clone()),
            Statistic::new("Average number of properties per borough")
                .with_value(Some(snapshot.average_per_borough.to_string())),
            Statistic::new("Minimum booking expense").with_value(
                snapshot.cheapest_booking.as_ref().map(|booking| {
                    format!(
                        "\u{a3}{} ({}, {})",
                        booking.cost, booking.name, booking.neighbourhood
                    )
                }),
            ),
        ]
    }
}
