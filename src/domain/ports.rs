use crate::domain::model::{ScrapeResult, StockRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Where scraped records end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Csv { path: String, append: bool },
    Sheets { spreadsheet_id: String, worksheet: String },
}

pub trait ConfigProvider: Send + Sync {
    fn use_sheets(&self) -> bool;
    fn spreadsheet_id(&self) -> Option<&str>;
    fn worksheet_name(&self) -> &str;
    fn service_account_json(&self) -> Option<&str>;
    /// Pre-issued bearer token; takes precedence over the service account.
    fn access_token(&self) -> Option<&str>;
    fn sheets_base_url(&self) -> &str;
    fn urls_csv_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn append_output(&self) -> bool;
    fn request_timeout(&self) -> Duration;
    fn request_delay(&self) -> Duration;

    /// Sheets only when the flag is on and a spreadsheet is named; CSV otherwise.
    fn output_mode(&self) -> OutputMode {
        match (self.use_sheets(), self.spreadsheet_id()) {
            (true, Some(id)) if !id.trim().is_empty() => OutputMode::Sheets {
                spreadsheet_id: id.trim().to_string(),
                worksheet: self.worksheet_name().to_string(),
            },
            (true, _) => {
                tracing::warn!("USE_SHEETS is on but SPREADSHEET_ID is unset, falling back to CSV");
                OutputMode::Csv {
                    path: self.output_path().to_string(),
                    append: self.append_output(),
                }
            }
            (false, _) => OutputMode::Csv {
                path: self.output_path().to_string(),
                append: self.append_output(),
            },
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Extracts records from one supplier's page markup.
pub trait PageParser: Send + Sync {
    fn parse(&self, html: &str, source_url: &str, scraped_at: DateTime<Utc>) -> Vec<StockRecord>;
}

#[async_trait]
pub trait UrlSource: Send + Sync {
    async fn load_urls(&self) -> Result<Vec<String>>;
}

#[async_trait]
pub trait Sink: Send + Sync {
    /// Writes all records and returns a human-readable destination.
    async fn write(&self, records: &[StockRecord]) -> Result<String>;
}

#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ScrapeResult>;
    async fn transform(&self, scraped: ScrapeResult) -> Result<ScrapeResult>;
    async fn load(&self, records: &[StockRecord]) -> Result<String>;
}

// Lets the CLI pick a sink / URL source / token provider at runtime and still hand it to a generic pipeline.
#[async_trait]
impl<T: Sink + ?Sized> Sink for Box<T> {
    async fn write(&self, records: &[StockRecord]) -> Result<String> {
        (**self).write(records).await
    }
}

#[async_trait]
impl<T: TokenProvider + ?Sized> TokenProvider for Box<T> {
    async fn access_token(&self) -> Result<String> {
        (**self).access_token().await
    }
}

#[async_trait]
impl<T: UrlSource + ?Sized> UrlSource for Box<T> {
    async fn load_urls(&self) -> Result<Vec<String>> {
        (**self).load_urls().await
    }
}
