use crate::adapters::sheets::client::DEFAULT_SHEETS_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use clap::{ArgAction, Parser};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Only a case-insensitive "true" turns a flag on; anything else is off.
fn parse_truthy(value: &str) -> std::result::Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

#[derive(Clone, Serialize, Deserialize, Parser)]
#[command(name = "stock-scraper")]
#[command(about = "Scrape supplier stock levels into a CSV file or a Google Sheet")]
pub struct CliConfig {
    /// Read URLs from and write stock to Google Sheets instead of local CSV files
    #[arg(long, env = "USE_SHEETS", default_value = "false", action = ArgAction::Set, value_parser = parse_truthy)]
    pub use_sheets: bool,

    #[arg(long, env = "SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    #[arg(long, env = "WORKSHEET_NAME", default_value = "URLS")]
    pub worksheet_name: String,

    /// Path to the Google service account key file
    #[arg(long, env = "GOOGLE_SERVICE_ACCOUNT_JSON")]
    pub service_account_json: Option<String>,

    /// Bearer token to use instead of the service account (e.g. from gcloud)
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    #[serde(skip_serializing)]
    pub access_token: Option<String>,

    #[arg(long, env = "SHEETS_BASE_URL", default_value = DEFAULT_SHEETS_BASE_URL, hide = true)]
    pub sheets_base_url: String,

    /// Local CSV with a `url` column, used when Sheets is off
    #[arg(long, env = "URLS_CSV", default_value = "urls.csv")]
    pub urls_csv: String,

    #[arg(long, env = "OUTPUT_CSV", default_value = "output.csv")]
    pub output_path: String,

    /// Append to the output CSV instead of overwriting it
    #[arg(long, env = "CSV_APPEND", default_value = "false", action = ArgAction::Set, value_parser = parse_truthy)]
    pub append: bool,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "20")]
    pub request_timeout_secs: u64,

    /// Pause between consecutive page fetches
    #[arg(long, env = "REQUEST_DELAY_SECS", default_value = "0.5")]
    pub request_delay_secs: f64,

    /// Supplier profile TOML; the built-in profile is used when omitted
    #[arg(long, env = "SUPPLIER_PROFILE")]
    pub profile: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

// Hand-written so verbose logging never prints the bearer token.
impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("use_sheets", &self.use_sheets)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("worksheet_name", &self.worksheet_name)
            .field("service_account_json", &self.service_account_json)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("sheets_base_url", &self.sheets_base_url)
            .field("urls_csv", &self.urls_csv)
            .field("output_path", &self.output_path)
            .field("append", &self.append)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("request_delay_secs", &self.request_delay_secs)
            .field("profile", &self.profile)
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl ConfigProvider for CliConfig {
    fn use_sheets(&self) -> bool {
        self.use_sheets
    }

    fn spreadsheet_id(&self) -> Option<&str> {
        self.spreadsheet_id.as_deref()
    }

    fn worksheet_name(&self) -> &str {
        &self.worksheet_name
    }

    fn service_account_json(&self) -> Option<&str> {
        self.service_account_json.as_deref()
    }

    fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    fn sheets_base_url(&self) -> &str {
        &self.sheets_base_url
    }

    fn urls_csv_path(&self) -> &str {
        &self.urls_csv
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn append_output(&self) -> bool {
        self.append
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn request_delay(&self) -> Duration {
        // Out-of-range values are rejected by `validate`; never panic here.
        Duration::try_from_secs_f64(self.request_delay_secs).unwrap_or(Duration::ZERO)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_path("urls_csv", &self.urls_csv)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 600)?;
        validate_range("request_delay_secs", self.request_delay_secs, 0.0, 3600.0)?;
        validate_url("sheets_base_url", &self.sheets_base_url)?;
        if let Some(profile) = &self.profile {
            validate_path("profile", profile)?;
        }
        Ok(())
    }
}
