use anyhow::{Context, Result};
use api_client::{JsonFileSource, ReportClient, TradeSource};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use configuration::{Config, init_tracing, load_config, load_config_from};
use core_types::{DateRange, Granularity, RangePreset};
use dashboard::{Dashboard, DashboardState, RangeSelection, SortDirection, SortField, TradeTableState};
use std::path::PathBuf;

mod render;

/// The main entry point for the tradeboard dashboard.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path, true),
        None => load_config(),
    }
    .context("Failed to load configuration")?;

    let _log_guard = init_tracing(&config.logging).context("Failed to initialise logging")?;

    let today = Local::now().date_naive();
    let (selection, range) = resolve_range(&cli, &config, today)?;
    let initial = DashboardState::new(selection, range);

    // Execute the appropriate command against the chosen data source
    match &cli.input {
        Some(path) => {
            tracing::info!(path = %path.display(), "Reading trades from file.");
            run(Dashboard::new(JsonFileSource::new(path), initial), &cli, &config).await
        }
        None => {
            let client = ReportClient::new(&config.api).context("Failed to build the API client")?;
            run(Dashboard::new(client, initial), &cli, &config).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal dashboard for reported trading activity.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quick-select range: 24H, 7D, 30D, YTD or 1Y. Defaults to the configured range.
    #[arg(long, global = true, conflicts_with = "from")]
    range: Option<RangePreset>,

    /// Start of a custom range (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// End of a custom range (format: YYYY-MM-DD). Defaults to --from.
    #[arg(long, global = true, requires = "from")]
    to: Option<NaiveDate>,

    /// Read trades from an exported JSON report instead of the remote endpoint.
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Path to a configuration file (default: ./config.toml, optional).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the derived data as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline stats and the top winning/losing symbols.
    Summary,
    /// Profit per period with a cumulative running total.
    Chart(ChartArgs),
    /// Calendar-month performance with an all-time row.
    Monthly,
    /// The paginated trade table.
    Trades(TradesArgs),
}

#[derive(Args)]
struct ChartArgs {
    /// daily, weekly (week of month, not ISO) or monthly. Defaults to the configured value.
    #[arg(long)]
    granularity: Option<Granularity>,
}

#[derive(Args)]
struct TradesArgs {
    /// Case-insensitive filter on symbol, type and status.
    #[arg(long, default_value = "")]
    search: String,

    /// Column to sort by: date, symbol, type, buy, sell, profit, value.
    #[arg(long, default_value = "date")]
    sort: SortField,

    /// Sort ascending instead of the default newest/largest first.
    #[arg(long)]
    asc: bool,

    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    page: usize,
}

fn resolve_range(cli: &Cli, config: &Config, today: NaiveDate) -> Result<(RangeSelection, DateRange)> {
    if let Some(from) = cli.from {
        let to = cli.to.unwrap_or(from);
        let range = DateRange::new(from, to)?;
        return Ok((RangeSelection::Custom, range));
    }

    let preset: RangePreset = cli.range.unwrap_or(config.dashboard.default_range);
    Ok((
        RangeSelection::Preset(preset),
        DateRange::from_preset(preset, today),
    ))
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Refreshes once, then renders the requested view.
async fn run<S: TradeSource>(dashboard: Dashboard<S>, cli: &Cli, config: &Config) -> Result<()> {
    dashboard.refresh().await;
    let state = dashboard.state().await;

    // A failed refresh is reported once; rendering continues with whatever data is left.
    if let Some(notice) = &state.notice {
        eprintln!("Error: {notice}");
    }

    match &cli.command {
        Commands::Summary => {
            let snapshot = state.snapshot(config.dashboard.default_granularity);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&snapshot.metrics)?);
                return Ok(());
            }
            println!("{}", render::summary_cards(&state, &snapshot.metrics));
            println!("{}", render::symbol_table("Top Winning Symbols", &snapshot.metrics.winning_symbols));
            println!("{}", render::symbol_table("Top Losing Symbols", &snapshot.metrics.losing_symbols));
        }
        Commands::Chart(args) => {
            let granularity = args.granularity.unwrap_or(config.dashboard.default_granularity);
            let series = analytics::bucket_trades(&state.trades, granularity);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&series)?);
                return Ok(());
            }
            println!("{}", render::series_table(&series, granularity));
        }
        Commands::Monthly => {
            let breakdown = analytics::monthly_breakdown(&state.trades);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
                return Ok(());
            }
            println!("{}", render::monthly_table(&breakdown));
        }
        Commands::Trades(args) => {
            let direction = if args.asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            let table_state = TradeTableState::default()
                .with_rows_per_page(config.dashboard.rows_per_page)
                .with_search(args.search.clone())
                .with_sort(args.sort, direction);
            let first = table_state.view(&state.trades);
            let page = table_state.with_page(args.page, first.total_pages).view(&state.trades);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
                return Ok(());
            }
            println!("{}", render::trades_table(&page));
            if page.total_pages > 1 {
                println!("Page {} of {} ({} trades)", page.page, page.total_pages, page.total_matches);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tradeboard").chain(args.iter().copied())).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 2).unwrap()
    }

    #[test]
    fn test_custom_single_day_range() {
        let cli = parse(&["summary", "--from", "2025-03-01"]);
        let (selection, range) = resolve_range(&cli, &Config::default(), today()).unwrap();
        assert_eq!(selection, RangeSelection::Custom);
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_preset_falls_back_to_config() {
        let cli = parse(&["monthly"]);
        let (selection, range) = resolve_range(&cli, &Config::default(), today()).unwrap();
        assert_eq!(selection, RangeSelection::Preset(RangePreset::Last30Days));
        assert_eq!(range.end, today());

        let cli = parse(&["chart", "--granularity", "weekly", "--range", "ytd"]);
        let (selection, _) = resolve_range(&cli, &Config::default(), today()).unwrap();
        assert_eq!(selection, RangeSelection::Preset(RangePreset::YearToDate));
    }

    #[test]
    fn test_inverted_custom_range_is_rejected() {
        let cli = parse(&["summary", "--from", "2025-03-10", "--to", "2025-03-01"]);
        assert!(resolve_range(&cli, &Config::default(), today()).is_err());
    }

    #[test]
    fn test_range_and_from_conflict() {
        let result = Cli::try_parse_from(["tradeboard", "summary", "--range", "7D", "--from", "2025-01-01"]);
        assert!(result.is_err());
    }
}
