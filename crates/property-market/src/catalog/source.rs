use super::domain::Listing;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DAYS_PER_YEAR: u32 = 365;

/// Provider of the full, unfiltered listing set.
pub trait ListingSource: Send + Sync {
    fn load(&self) -> Result<Vec<Listing>, ListingSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ListingSourceError {
    #[error("failed to read listing export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the Airbnb London export from disk on every load.
#[derive(Debug, Clone)]
pub struct CsvListingSource {
    path: PathBuf,
}

impl CsvListingSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for CsvListingSource {
    fn load(&self) -> Result<Vec<Listing>, ListingSourceError> {
        let file = std::fs::File::open(&self.path)?;
        let listings = parse_listings(file)?;
        debug!(path = %self.path.display(), count = listings.len(), "listing export loaded");
        Ok(listings)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryListingSource {
    listings: Vec<Listing>,
}

impl InMemoryListingSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ListingSourceError> {
        Ok(Self::new(parse_listings(reader)?))
    }
}

impl ListingSource for InMemoryListingSource {
    fn load(&self) -> Result<Vec<Listing>, ListingSourceError> {
        Ok(self.listings.clone())
    }
}

/// Parses listing rows, keeping the first row for any repeated id.
pub fn parse_listings<R: Read>(reader: R) -> Result<Vec<Listing>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut seen = HashSet::new();
    let mut listings = Vec::new();
    let mut duplicates = 0usize;
    let mut clamped = 0usize;

    for record in csv_reader.deserialize::<ListingRow>() {
        let row = record?;
        if !seen.insert(row.id.clone()) {
            duplicates += 1;
            continue;
        }
        if row.availability_365 > DAYS_PER_YEAR {
            clamped += 1;
        }
        listings.push(row.into_listing());
    }

    if duplicates > 0 {
        warn!(duplicates, "dropped listing rows with repeated ids");
    }
    if clamped > 0 {
        warn!(clamped, max = DAYS_PER_YEAR, "clamped availability_365 to one year");
    }

    Ok(listings)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    host_id: String,
    #[serde(default)]
    host_name: String,
    neighbourhood: String,
    latitude: f64,
    longitude: f64,
    room_type: String,
    price: u32,
    minimum_nights: u32,
    #[serde(default)]
    number_of_reviews: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_review: Option<String>,
    #[serde(default)]
    reviews_per_month: Option<f64>,
    #[serde(default)]
    calculated_host_listings_count: u32,
    #[serde(default)]
    availability_365: u32,
}

impl ListingRow {
    fn into_listing(self) -> Listing {
        Listing {
            id: self.id,
            name: self.name,
            host_id: self.host_id,
            host_name: self.host_name,
            neighbourhood: self.neighbourhood,
            room_type: self.room_type,
            price: self.price,
            minimum_nights: self.minimum_nights,
            number_of_reviews: self.number_of_reviews,
            reviews_per_month: self.reviews_per_month.unwrap_or(0.0),
            calculated_host_listings_count: self.calculated_host_listings_count,
            availability_365: self.availability_365.min(DAYS_PER_YEAR),
            latitude: self.latitude,
            longitude: self.longitude,
            last_review: self.last_review,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,host_id,host_name,neighbourhood,latitude,longitude,room_type,price,minimum_nights,number_of_reviews,last_review,reviews_per_month,calculated_host_listings_count,availability_365\n";

    #[test]
    fn parses_rows_with_empty_optional_cells() {
        let csv = format!(
            "{HEADER}13913,Holiday London DB Room Let-on going,54730,Alina,Islington,51.56802,-0.11121,Private room,65,1,21,2018-12-11,0.18,2,347\n\
15400, Bright Chelsea  Apartment ,60302,Philippa,Kensington and Chelsea,51.48796,-0.16898,Entire home/apt,100,3,0,,,1,0\n"
        );

        let listings = parse_listings(csv.as_bytes()).expect("rows parse");
        assert_eq!(listings.len(), 2);

        let islington = &listings[0];
        assert_eq!(islington.host_name, "Alina");
        assert_eq!(islington.price, 65);
        assert_eq!(islington.last_review.as_deref(), Some("2018-12-11"));
        assert!((islington.reviews_per_month - 0.18).abs() < f64::EPSILON);

        let chelsea = &listings[1];
        assert_eq!(chelsea.name, "Bright Chelsea  Apartment");
        assert!(chelsea.last_review.is_none());
        assert_eq!(chelsea.reviews_per_month, 0.0);
        assert_eq!(chelsea.stay_cost(), 300);
    }

    #[test]
    fn repeated_ids_keep_first_row() {
        let csv = format!(
            "{HEADER}1,First,9,Ann,Camden,51.5,-0.1,Private room,40,1,0,,,1,10\n\
1,Second,9,Ann,Camden,51.5,-0.1,Private room,90,1,0,,,1,10\n"
        );

        let listings = parse_listings(csv.as_bytes()).expect("rows parse");
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "First");
    }

    #[test]
    fn availability_beyond_a_year_is_clamped() {
        let csv = format!(
            "{HEADER}1,Flat,9,Ann,Camden,51.5,-0.1,Private room,40,1,0,,,1,400\n\
2,Room,9,Ann,Camden,51.5,-0.1,Private room,55,1,0,,,1,365\n"
        );

        let listings = parse_listings(csv.as_bytes()).expect("rows parse");
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].availability_365, 365);
        assert_eq!(listings[1].availability_365, 365);
    }

    #[test]
    fn malformed_price_is_a_csv_error() {
        let csv = format!("{HEADER}1,Flat,9,Ann,Camden,51.5,-0.1,Private room,cheap,1,0,,,1,10\n");
        assert!(parse_listings(csv.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = CsvListingSource::from_path("does/not/exist.csv");
        assert!(matches!(source.load(), Err(ListingSourceError::Io(_))));
    }
}
