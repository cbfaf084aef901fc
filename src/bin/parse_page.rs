//! Runs the page parser over a saved HTML file, for checking a supplier
//! profile against real markup without hitting the network.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use stock_scraper::core::PageParser;
use stock_scraper::utils::{logger, validation::Validate};
use stock_scraper::{ProductFormParser, SupplierProfile};

#[derive(Parser)]
#[command(name = "parse-page")]
#[command(about = "Parse a saved supplier page and print the stock rows as CSV")]
struct Args {
    /// HTML file to parse
    html: String,

    /// Supplier profile TOML; defaults to the built-in profile
    #[arg(short, long)]
    profile: Option<String>,

    /// URL recorded as the rows' source_url
    #[arg(long, default_value = "file://local")]
    source_url: String,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let profile = match &args.profile {
        Some(path) => SupplierProfile::from_file(path)
            .with_context(|| format!("loading profile {}", path))?,
        None => SupplierProfile::default(),
    };
    profile.validate().context("invalid supplier profile")?;

    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("reading {}", args.html))?;
    let parser = ProductFormParser::new(&profile.selectors)?;
    let records = parser.parse(&html, &args.source_url, Utc::now());

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    eprintln!("{} rows", records.len());
    Ok(())
}
