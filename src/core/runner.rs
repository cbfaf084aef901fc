use crate::adapters::sheets::{ServiceAccountAuth, ServiceAccountKey, StaticToken};
use crate::adapters::{CsvSink, CsvUrlSource, HttpFetcher, SheetsClient, SheetsSink, SheetsUrlSource};
use crate::config::profile::SupplierProfile;
use crate::config::LocalStorage;
use crate::core::engine::ScrapeEngine;
use crate::core::pipeline::StockPipeline;
use crate::core::{ConfigProvider, OutputMode, RunSummary, Sink, TokenProvider, UrlSource};
use crate::parser::ProductFormParser;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::Validate;
use reqwest::Client;
use std::sync::Arc;

fn token_provider<C: ConfigProvider>(config: &C, client: Client) -> Result<Box<dyn TokenProvider>> {
    if let Some(token) = config.access_token() {
        tracing::debug!("Using pre-issued Google access token");
        return Ok(Box::new(StaticToken(token.to_string())));
    }

    let key_path = config
        .service_account_json()
        .ok_or_else(|| ScrapeError::MissingConfigError {
            field: "GOOGLE_SERVICE_ACCOUNT_JSON".to_string(),
        })?;
    let key = ServiceAccountKey::from_file(key_path)?;
    tracing::debug!("Using service account {}", key.client_email);
    Ok(Box::new(ServiceAccountAuth::new(key, client)?))
}

/// URL source and sink for the configured output mode. Both read from the
/// same place they write to: local files, or the one worksheet.
pub fn build_endpoints<C: ConfigProvider>(
    config: &C,
) -> Result<(Box<dyn UrlSource>, Box<dyn Sink>)> {
    match config.output_mode() {
        OutputMode::Csv { path, append } => {
            tracing::info!("📄 Output mode: CSV ({})", path);
            let storage = LocalStorage::default();
            let urls: Box<dyn UrlSource> =
                Box::new(CsvUrlSource::new(storage.clone(), config.urls_csv_path()));
            let sink: Box<dyn Sink> = Box::new(CsvSink::new(storage, path, append));
            Ok((urls, sink))
        }
        OutputMode::Sheets {
            spreadsheet_id,
            worksheet,
        } => {
            tracing::info!("📊 Output mode: Google Sheets ({} / {})", spreadsheet_id, worksheet);
            let http = Client::builder().timeout(config.request_timeout()).build()?;
            let tokens = token_provider(config, http.clone())?;
            let client = Arc::new(
                SheetsClient::new(http, tokens, spreadsheet_id)
                    .with_base_url(config.sheets_base_url()),
            );
            let urls: Box<dyn UrlSource> =
                Box::new(SheetsUrlSource::new(client.clone(), worksheet.clone()));
            let sink: Box<dyn Sink> = Box::new(SheetsSink::new(client, worksheet));
            Ok((urls, sink))
        }
    }
}

/// One full scrape: URLs → pages → records → sink.
pub async fn run<C: ConfigProvider>(config: &C, profile: &SupplierProfile) -> Result<RunSummary> {
    profile.validate()?;
    tracing::debug!("Supplier profile: {}", profile.name);

    let parser = ProductFormParser::new(&profile.selectors)?;
    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let (urls, sink) = build_endpoints(config)?;

    let pipeline = StockPipeline::new(urls, fetcher, parser, sink)
        .with_derived_skus(profile.derived.clone())
        .with_request_delay(config.request_delay());

    ScrapeEngine::new(pipeline).run().await
}
