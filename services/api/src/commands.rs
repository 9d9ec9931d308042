use crate::infra::{build_session, MarketSessionHandle};
use clap::Args;
use property_market::catalog::{
    PriceRange, SearchOrder, SearchRequest, SearchScope, SortCriterion, StatisticsBoard,
};
use property_market::config::AppConfig;
use property_market::error::AppError;
use std::path::PathBuf;

/// Range and data-file overrides shared by every catalog command.
#[derive(Args, Debug, Default)]
pub(crate) struct MarketArgs {
    /// Lowest nightly price to include (requires --max-price)
    #[arg(long, requires = "max_price")]
    pub(crate) min_price: Option<u32>,
    /// Highest nightly price to include (requires --min-price)
    #[arg(long, requires = "min_price")]
    pub(crate) max_price: Option<u32>,
    /// Listings CSV to read instead of MARKET_LISTINGS_CSV
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ListingsArgs {
    /// Borough name or four-letter abbreviation
    pub(crate) borough: String,
    /// reviews, price-asc, price-desc, or host-name
    #[arg(long, value_parser = crate::infra::parse_sort)]
    pub(crate) sort: Option<SortCriterion>,
    #[command(flatten)]
    pub(crate) market: MarketArgs,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Expression matched against listing names
    pub(crate) query: String,
    /// Restrict results to one borough ("All Boroughs" searches everywhere)
    #[arg(long)]
    pub(crate) borough: Option<String>,
    /// relevancy (default), reviews, price-asc, price-desc, or host-name
    #[arg(long, value_parser = crate::infra::parse_order, default_value = "relevancy")]
    pub(crate) order: SearchOrder,
    #[command(flatten)]
    pub(crate) market: MarketArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DescribeArgs {
    /// Listing id as it appears in the CSV
    pub(crate) id: String,
    #[command(flatten)]
    pub(crate) market: MarketArgs,
}

/// Loads configuration, applies the CLI overrides, and selects the range.
/// Without any range the whole price spectrum is active.
fn open_session(args: MarketArgs) -> Result<MarketSessionHandle, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.listings {
        config.market.listings_csv = path;
    }

    let range = match (args.min_price, args.max_price) {
        (Some(min), Some(max)) => PriceRange::new(min, max)?,
        _ => config.market.initial_range.unwrap_or(PriceRange {
            min: 0,
            max: u32::MAX,
        }),
    };

    let mut session = build_session(&config.market)?;
    session.select_range(range.min, range.max)?;
    Ok(session)
}

pub(crate) fn run_boroughs(args: MarketArgs) -> Result<(), AppError> {
    let session = open_session(args)?;
    let catalog = session.catalog();

    println!("London borough map");
    if let Some(range) = catalog.active_range() {
        println!("Price range: {range} ({} active listings)", catalog.active_len());
    }
    println!();

    for volume in catalog.borough_volumes() {
        println!(
            "  [{:>2},{:>2}] {:<4} {:<24} {:>5}  {}",
            volume.borough.column,
            volume.borough.row,
            volume.borough.abbreviation,
            volume.borough.name,
            volume.count,
            volume.volume.label()
        );
    }
    Ok(())
}

pub(crate) fn run_listings(args: ListingsArgs) -> Result<(), AppError> {
    let mut session = open_session(args.market)?;
    let name = session
        .catalog()
        .boroughs()
        .resolve(&args.borough)
        .map(|borough| borough.name.clone())
        .unwrap_or(args.borough);

    let listings = session.borough_listings(&name, args.sort);

    match args.sort {
        Some(criterion) => println!(
            "{name}: {} listings, sorted by {}",
            listings.len(),
            criterion.label()
        ),
        None => println!("{name}: {} listings", listings.len()),
    }
    for listing in &listings {
        println!(
            "  {:>10}  £{:<6} {:>4} reviews  min {} nights  {} (host {})",
            listing.id,
            listing.price,
            listing.number_of_reviews,
            listing.minimum_nights,
            listing.name,
            listing.host_name
        );
    }
    Ok(())
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let session = open_session(args.market)?;
    let request = SearchRequest::new(args.query.clone())
        .in_scope(SearchScope::from_selection(args.borough.as_deref()))
        .ordered_by(args.order);

    let results = session.user_search(&request);
    if results.is_empty() {
        println!("No listings match '{}'", args.query);
        return Ok(());
    }

    println!("{} listings match '{}'", results.len(), args.query);
    for listing in &results {
        println!(
            "  {:>10}  £{:<6} {:<22} {}",
            listing.id, listing.price, listing.neighbourhood, listing.name
        );
    }
    Ok(())
}

pub(crate) fn run_describe(args: DescribeArgs) -> Result<(), AppError> {
    let mut session = open_session(args.market)?;
    let description = session.view_listing(&args.id)?;
    println!("{description}");
    Ok(())
}

pub(crate) fn run_stats(args: MarketArgs) -> Result<(), AppError> {
    let session = open_session(args)?;
    let board = session.statistics_board();
    render_statistics(&board);
    Ok(())
}

fn render_statistics(board: &StatisticsBoard) {
    println!("Statistics");
    for statistic in board.statistics() {
        println!("  {:<44} {}", statistic.name, statistic.value);
    }
}
