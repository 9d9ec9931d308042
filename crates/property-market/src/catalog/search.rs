use super::domain::Listing;

/// Trimmed, lower-cased, single-line query text; `None` when nothing is
/// left to match. Line breaks collapse into one space.
pub fn normalize_query(query: &str) -> Option<String> {
    let single_line = query
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if single_line.is_empty() {
        None
    } else {
        Some(single_line.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelevancyTier {
    Exact,
    Prefix,
    Substring,
}

impl RelevancyTier {
    fn classify(name_key: &str, needle: &str) -> Option<Self> {
        if name_key == needle {
            Some(Self::Exact)
        } else if name_key.starts_with(needle) {
            Some(Self::Prefix)
        } else if name_key.contains(needle) {
            Some(Self::Substring)
        } else {
            None
        }
    }
}

pub(crate) fn name_matches(listing: &Listing, needle: &str) -> bool {
    listing.name_key().contains(needle)
}

/// Orders matches exact first, then prefix, then substring. Each tier keeps
/// the incoming order and a listing lands only in the first tier it fits.
pub(crate) fn rank_by_relevancy<'a, I>(listings: I, needle: &str) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut exact = Vec::new();
    let mut prefix = Vec::new();
    let mut substring = Vec::new();

    for listing in listings {
        match RelevancyTier::classify(&listing.name_key(), needle) {
            Some(RelevancyTier::Exact) => exact.push(listing),
            Some(RelevancyTier::Prefix) => prefix.push(listing),
            Some(RelevancyTier::Substring) => substring.push(listing),
            None => {}
        }
    }

    exact.extend(prefix);
    exact.extend(substring);
    exact
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: &str, name: &str) -> Listing {
        Listing {
            id: id.to_string(),
            name: name.to_string(),
            host_id: String::new(),
            host_name: String::new(),
            neighbourhood: "Camden".to_string(),
            room_type: "Private room".to_string(),
            price: 50,
            minimum_nights: 1,
            number_of_reviews: 0,
            reviews_per_month: 0.0,
            calculated_host_listings_count: 1,
            availability_365: 0,
            latitude: 51.5,
            longitude: -0.1,
            last_review: None,
        }
    }

    #[test]
    fn blank_queries_normalize_to_nothing() {
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query("  Cosy LOFT "), Some("cosy loft".to_string()));
    }

    #[test]
    fn line_breaks_collapse_to_one_line() {
        assert_eq!(normalize_query("Loft\ncastle").as_deref(), Some("loft castle"));
        assert_eq!(normalize_query(" canal \r\n\r\n view ").as_deref(), Some("canal view"));
        assert_eq!(normalize_query("\n\r\n"), None);
    }

    #[test]
    fn tiers_are_exact_prefix_then_substring() {
        let listings = vec![
            named("1", "Sunny loft near park"),
            named("2", "Loft living"),
            named("3", "LOFT"),
            named("4", "Garden flat"),
            named("5", "Big loft"),
            named("6", "Loft"),
        ];

        let ids: Vec<_> = rank_by_relevancy(&listings, "loft")
            .into_iter()
            .map(|listing| listing.id.as_str())
            .collect();

        assert_eq!(ids, vec!["3", "6", "2", "1", "5"]);
    }

    #[test]
    fn classify_prefers_earliest_tier() {
        assert_eq!(RelevancyTier::classify("loft", "loft"), Some(RelevancyTier::Exact));
        assert_eq!(RelevancyTier::classify("lofty", "loft"), Some(RelevancyTier::Prefix));
        assert_eq!(RelevancyTier::classify("a loft", "loft"), Some(RelevancyTier::Substring));
        assert_eq!(RelevancyTier::classify("flat", "loft"), None);
    }
}
