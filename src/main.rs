use clap::Parser;
use stock_scraper::utils::error::ErrorSeverity;
use stock_scraper::utils::{logger, validation::Validate};
use stock_scraper::{CliConfig, SupplierProfile};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting stock-scraper");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let profile = match &config.profile {
        Some(path) => match SupplierProfile::from_file(path) {
            Ok(profile) => profile,
            Err(e) => {
                eprintln!("❌ Failed to load supplier profile '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => SupplierProfile::default(),
    };

    match stock_scraper::run(&config, &profile).await {
        Ok(summary) => match summary.destination {
            Some(destination) => {
                tracing::info!("✅ Scrape completed successfully!");
                println!(
                    "Wrote {} rows to {} ({} of {} pages failed)",
                    summary.records_written,
                    destination,
                    summary.pages_failed,
                    summary.urls_total
                );
            }
            None => {
                println!("No URLs found. Provide urls.csv or enable USE_SHEETS.");
            }
        },
        Err(e) => {
            tracing::error!(
                "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
