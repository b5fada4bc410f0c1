mod display;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use evictwatch_core::SummaryConfig;
use evictwatch_core::batch::filings_to_batch;
use evictwatch_core::window::trailing_start;
use evictwatch_engine::Engine;

#[derive(Parser)]
#[command(name = "evictwatch", version, about = "Eviction court filing summaries by county and date window")]
struct Cli {
    /// Dataset key.
    #[arg(long, env = "EVICTWATCH_DATASET", default_value = "evictions", global = true)]
    dataset: String,

    /// URL or local path to read instead of the dataset's default location.
    #[arg(long, env = "EVICTWATCH_SOURCE", global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filing totals for a window, change over the previous period, and top parties.
    Summary {
        /// County to include; repeat for several. Defaults to the Portland metro counties.
        #[arg(long = "county")]
        counties: Vec<String>,

        /// First filing date (YYYY-MM-DD). Defaults to `--window-days` before the end date.
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last filing date (YYYY-MM-DD). Defaults to the latest filing.
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Rows per party table.
        #[arg(long, env = "EVICTWATCH_TOP_N")]
        top_n: Option<usize>,

        /// Length of the default window in days.
        #[arg(long, env = "EVICTWATCH_WINDOW_DAYS")]
        window_days: Option<u32>,

        /// Emit JSON instead of tables.
        #[arg(long)]
        json: bool,
    },
    /// List counties and the span of available filing dates.
    Counties,
    /// Show a single filing.
    Show {
        case_code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("evictwatch v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let loaded = evictwatch_load::load_dataset(&cli.dataset, cli.source.as_deref())
        .await
        .with_context(|| format!("loading dataset {:?}", cli.dataset))?;

    match cli.command {
        Command::Summary {
            counties,
            start,
            end,
            top_n,
            window_days,
            json,
        } => {
            let mut config = SummaryConfig::default();
            if let Some(n) = top_n {
                config.top_n = n;
            }
            if let Some(days) = window_days {
                config.default_window_days = days;
            }

            let engine = Engine::new(loaded.filings, config);
            let mut selection = engine.default_selection()?;
            if !counties.is_empty() {
                selection.counties = counties.into_iter().collect();
            }
            if let Some(end) = end {
                selection.end = end;
                if start.is_none()
                    && let Some(span) = engine.filings().date_span()
                {
                    // Keep the default window length when only the end moves.
                    selection.start =
                        trailing_start(end, span.min, engine.config().default_window_days);
                }
            }
            if let Some(start) = start {
                selection.start = start;
            }

            let summary = engine
                .summarize(&selection)
                .context("invalid date selection")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                display::print_summary(&summary)?;
            }
        }
        Command::Counties => display::print_counties(&loaded.filings),
        Command::Show { case_code } => {
            let filing = loaded
                .filings
                .get(&case_code)
                .with_context(|| format!("no filing with case code {case_code:?}"))?;
            let batch = filings_to_batch(&[filing])?;
            display::print_filing_card(&batch)?;
        }
    }

    Ok(())
}
