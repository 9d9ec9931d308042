use crate::commands::{
    run_boroughs, run_describe, run_listings, run_search, run_stats, DescribeArgs, ListingsArgs,
    MarketArgs, SearchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use property_market::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "London Property Marketplace",
    about = "Browse, search, and summarise London short-let listings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the borough map with listing counts and volume classes
    Boroughs(MarketArgs),
    /// List the active listings of one borough
    Listings(ListingsArgs),
    /// Search listing names and record the expression in the search log
    Search(SearchArgs),
    /// Show the detail text of a single listing
    Describe(DescribeArgs),
    /// Print the statistics board for the selected price range
    Stats(MarketArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Boroughs(args) => run_boroughs(args),
        Command::Listings(args) => run_listings(args),
        Command::Search(args) => run_search(args),
        Command::Describe(args) => run_describe(args),
        Command::Stats(args) => run_stats(args),
    }
}
