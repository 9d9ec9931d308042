use metrics_exporter_prometheus::PrometheusHandle;
use property_market::catalog::{
    BoroughTable, CsvListingSource, FileSearchHistory, MarketSession, PropertyCatalog,
    SearchOrder, SortCriterion,
};
use property_market::config::MarketConfig;
use property_market::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type MarketSessionHandle = MarketSession<CsvListingSource, FileSearchHistory>;

/// Session over the configured CSV and search log. The configured initial
/// range, if any, is applied before the session is handed out.
pub(crate) fn build_session(config: &MarketConfig) -> Result<MarketSessionHandle, AppError> {
    let source = CsvListingSource::from_path(&config.listings_csv);
    let history = FileSearchHistory::new(&config.search_history);
    let catalog = PropertyCatalog::new(source, BoroughTable::london());
    let mut session = MarketSession::new(catalog, history);

    if let Some(range) = config.initial_range {
        session.select_range(range.min, range.max)?;
    }

    Ok(session)
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortCriterion, String> {
    match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "reviews" | "reviews-desc" => Ok(SortCriterion::ReviewsDesc),
        "price-asc" => Ok(SortCriterion::PriceAsc),
        "price-desc" => Ok(SortCriterion::PriceDesc),
        "host-name" | "host-name-asc" => Ok(SortCriterion::HostNameAsc),
        _ => Err(format!(
            "unknown sort '{raw}' (expected reviews, price-asc, price-desc, host-name)"
        )),
    }
}

pub(crate) fn parse_order(raw: &str) -> Result<SearchOrder, String> {
    if raw.trim().eq_ignore_ascii_case("relevancy") {
        return Ok(SearchOrder::Relevancy);
    }

    parse_sort(raw).map(|criterion| match criterion {
        SortCriterion::ReviewsDesc => SearchOrder::ReviewsDesc,
        SortCriterion::PriceAsc => SearchOrder::PriceAsc,
        SortCriterion::PriceDesc => SearchOrder::PriceDesc,
        SortCriterion::HostNameAsc => SearchOrder::HostNameAsc,
    })
}
