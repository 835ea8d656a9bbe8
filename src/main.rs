mod api;
mod boards;
mod config;
mod demo;
mod http;
mod logging;
mod models;
mod report;
mod skills;
mod writer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use api::{run_api_collection, ApiRunOutcome, IT_KEYWORDS};
use boards::{default_boards, scrape_boards, Pace};
use config::ApiConfig;
use http::BlockingHttp;
use writer::{count_csv_rows, save_offers_csv};

const SCRAPE_PREFIX: &str = "stages_alternance";

#[derive(Parser)]
#[command(name = "offres")]
#[command(about = "Collect IT job offers from the France Travail API and job boards")]
struct Cli {
    /// Root of the output tree
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the offers API with the IT keyword catalog (needs CLIENT_ID/CLIENT_SECRET)
    Api,

    /// Scrape internship and apprenticeship offers from job boards
    Scrape,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Api => run_api(&cli.data_dir),
        Commands::Scrape => run_scrape(&cli.data_dir),
    }
}

fn run_api(data_dir: &Path) -> Result<()> {
    let config = ApiConfig::from_env()?;
    let http = BlockingHttp::new()?;

    println!("Collecting raw offers for {} keywords...", IT_KEYWORDS.len());

    match run_api_collection(&http, &config, IT_KEYWORDS, data_dir)? {
        ApiRunOutcome::AuthFailed => {
            println!("Authentication failed, nothing collected.");
        }
        ApiRunOutcome::NoOffers => {
            println!("No offers collected.");
        }
        ApiRunOutcome::Saved { total, paths } => {
            println!("\n{} raw offers saved:", total);
            println!("  - {}", paths.json.display());
            println!("  - {}", paths.csv.display());
            println!("  - {}", paths.metadata.display());
        }
    }

    Ok(())
}

fn run_scrape(data_dir: &Path) -> Result<()> {
    let http = BlockingHttp::new()?;
    let boards = default_boards();

    println!(
        "Scraping {}",
        boards.iter().map(|b| b.name()).collect::<Vec<_>>().join(", ")
    );
    println!("{}", "=".repeat(60));

    let outcome = scrape_boards(&http, &boards, Pace::Polite);
    if outcome.used_demo_data {
        println!("\nScraping failed on every site, using demonstration data.");
    }

    let Some(path) = save_offers_csv(&outcome.offers, &data_dir.join("offres"), SCRAPE_PREFIX)? else {
        println!("No offers collected.");
        return Ok(());
    };

    report::print_summary(&report::summarize(&outcome.offers));
    println!("\nSaved to: {}", path.display());
    report::print_preview(&outcome.offers);

    let rows = count_csv_rows(&path)?;
    println!("\nDone: {} offers in {}", rows, path.display());

    Ok(())
}
