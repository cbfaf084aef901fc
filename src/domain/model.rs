use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One SKU's scraped quantity at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub sku: String,
    pub quantity: u64,
    pub source_url: String,
    pub timestamp: DateTime<Utc>,
}

impl StockRecord {
    pub fn new(
        sku: impl Into<String>,
        quantity: u64,
        source_url: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            source_url: source_url.into(),
            timestamp,
        }
    }
}

/// Output of the extract phase.
#[derive(Debug, Clone, Default)]
pub struct ScrapeResult {
    pub records: Vec<StockRecord>,
    pub urls_total: usize,
    pub pages_failed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub urls_total: usize,
    pub pages_failed: usize,
    pub records_written: usize,
    /// `None` when there was nothing to scrape and no output was written.
    pub destination: Option<String>,
}
