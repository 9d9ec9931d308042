use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{PriceRange, SearchOrder, SearchRequest, SearchScope, SortCriterion};
use super::history::SearchHistory;
use super::session::MarketSession;
use super::source::ListingSource;
use super::statistics::{Statistic, StatisticsSnapshot};
use super::views::{BoroughVolumeView, ListingDescription, ListingSummaryView};
use crate::error::AppError;

/// Session shared by every handler; the mutex serializes catalog access.
pub type SharedSession<S, H> = Arc<Mutex<MarketSession<S, H>>>;

pub fn shared_session<S, H>(session: MarketSession<S, H>) -> SharedSession<S, H> {
    Arc::new(Mutex::new(session))
}

/// Router builder exposing the borough map, search, and statistics endpoints.
pub fn catalog_router<S, H>(session: SharedSession<S, H>) -> Router
where
    S: ListingSource + 'static,
    H: SearchHistory + 'static,
{
    Router::new()
        .route("/api/v1/range", put(range_handler::<S, H>))
        .route("/api/v1/boroughs", get(boroughs_handler::<S, H>))
        .route(
            "/api/v1/boroughs/:borough/listings",
            get(borough_listings_handler::<S, H>),
        )
        .route("/api/v1/listings/:listing_id", get(listing_handler::<S, H>))
        .route("/api/v1/search", get(search_handler::<S, H>))
        .route("/api/v1/statistics", get(statistics_handler::<S, H>))
        .with_state(session)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RangeRequest {
    pub min_price: u32,
    pub max_price: u32,
}

#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub min_price: u32,
    pub max_price: u32,
    pub active_count: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingsQuery {
    #[serde(default)]
    pub sort: Option<SortCriterion>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub borough: Option<String>,
    #[serde(default)]
    pub order: SearchOrder,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<ListingSummaryView>,
}

#[derive(Debug, Serialize)]
pub struct ListingDetailResponse {
    pub listing: ListingDescription,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct BoroughMapResponse {
    pub range: Option<PriceRange>,
    pub boroughs: Vec<BoroughVolumeView>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub range: Option<PriceRange>,
    pub statistics: Vec<Statistic>,
    pub snapshot: StatisticsSnapshot,
}

fn lock<S, H>(session: &SharedSession<S, H>) -> MutexGuard<'_, MarketSession<S, H>> {
    session
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) async fn range_handler<S, H>(
    State(session): State<SharedSession<S, H>>,
    Json(request): Json<RangeRequest>,
) -> Result<Json<RangeResponse>, AppError>
where
    S: ListingSource + 'static,
    H: SearchHistory + 'static,
{
    let active_count = tokio::task::spawn_blocking(move || {
        lock(&session).select_range(request.min_price, request.max_price)
    })
    .await
    .map_err(|err| AppError::Server(axum::Error::new(err)))??;

    Ok(Json(RangeResponse {
        min_price: request.min_price,
        max_price: request.max_price,
        active_count,
    }))
}

pub(crate) async fn boroughs_handler<S, H>(
    State(session): State<SharedSession<S, H>>,
) -> Json<BoroughMapResponse>
where
    S: ListingSource + 'static,
    H: SearchHistory + 'static,
{
    let session = lock(&session);
    let catalog = session.catalog();
    let boroughs = catalog
        .borough_volumes()
        .iter()
        .map(BoroughVolumeView::from)
        .collect();

    Json(BoroughMapResponse {
        range: catalog.active_range(),
        boroughs,
    })
}

pub(crate) async fn borough_listings_handler<S, H>(
    State(session): State<SharedSession<S, H>>,
    Path(borough): Path<String>,
    Query(query): Query<ListingsQuery>,
) -> Json<Vec<ListingSummaryView>>
where
    S: ListingSource + 'static,
    H: SearchHistory + 'static,
{
    let mut session = lock(&session);
    let name = session
        .catalog()
        .boroughs()
        .resolve(&borough)
        .map(|entry| entry.name.clone())
        .unwrap_or(borough);

    Json(session.borough_listings(&name, query.sort))
}

pub(crate) async fn listing_handler<S, H>(
    State(session): State<SharedSession<S, H>>,
    Path(listing_id): Path<String>,
) -> Result<Json<ListingDetailResponse>, AppError>
where
    S: ListingSource + 'static,
    H: SearchHistory + 'static,
{
    let listing = lock(&session).view_listing(&listing_id)?;
    let text = listing.to_string();

    Ok(Json(ListingDetailResponse { listing, text }))
}

pub(crate) async fn search_handler<S, H>(
    State(session): State<SharedSession<S, H>>,
    Query(query): Query<SearchQuery>,
) -> Response
where
    S: ListingSource + 'static,
    H: SearchHistory + 'static,
{
    if query.q.trim().is_empty() {
        let payload = json!({ "error": "search expression must not be empty" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let request = SearchRequest::new(query.q.clone())
        .in_scope(SearchScope::from_selection(query.borough.as_deref()))
        .ordered_by(query.order);

    let session = lock(&session);
    let results = session.user_search(&request);
    let body = SearchResponse {
        query: query.q,
        count: results.len(),
        results,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn statistics_handler<S, H>(
    State(session): State<SharedSession<S, H>>,
) -> Json<StatisticsResponse>
where
    S: ListingSource + 'static,
    H: SearchHistory + 'static,
{
    let session = lock(&session);
    let board = session.statistics_board();

    Json(StatisticsResponse {
        range: session.catalog().active_range(),
        statistics: board.statistics(),
        snapshot: board.snapshot,
    })
}
