use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;
use std::time::Instant;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("🚀 Starting stock scrape");

        let scraped = self.pipeline.extract().await?;
        if scraped.urls_total == 0 {
            tracing::info!("No URLs found. Provide a urls.csv or enable USE_SHEETS.");
            return Ok(RunSummary {
                urls_total: 0,
                pages_failed: 0,
                records_written: 0,
                destination: None,
            });
        }
        tracing::info!(
            "📥 Scraped {} records from {} pages ({} failed)",
            scraped.records.len(),
            scraped.urls_total - scraped.pages_failed,
            scraped.pages_failed
        );

        let transformed = self.pipeline.transform(scraped).await?;
        tracing::info!("🔧 {} records after derived SKUs", transformed.records.len());

        let destination = self.pipeline.load(&transformed.records).await?;
        tracing::info!(
            "💾 Wrote {} records to {} in {:?}",
            transformed.records.len(),
            destination,
            started.elapsed()
        );

        Ok(RunSummary {
            urls_total: transformed.urls_total,
            pages_failed: transformed.pages_failed,
            records_written: transformed.records.len(),
            destination: Some(destination),
        })
    }
}
