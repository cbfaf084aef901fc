use crate::config::profile::DerivedSkuRule;
use crate::core::derive::apply_derived_skus;
use crate::core::{Fetcher, PageParser, Pipeline, ScrapeResult, Sink, StockRecord, UrlSource};
use crate::utils::error::Result;
use chrono::Utc;
use std::time::Duration;

/// URL source → fetch → parse → derived SKUs → sink, one page at a time.
pub struct StockPipeline<U: UrlSource, F: Fetcher, P: PageParser, S: Sink> {
    pub(crate) urls: U,
    pub(crate) fetcher: F,
    pub(crate) parser: P,
    pub(crate) sink: S,
    pub(crate) derived: Vec<DerivedSkuRule>,
    pub(crate) request_delay: Duration,
}

impl<U: UrlSource, F: Fetcher, P: PageParser, S: Sink> StockPipeline<U, F, P, S> {
    pub fn new(urls: U, fetcher: F, parser: P, sink: S) -> Self {
        Self {
            urls,
            fetcher,
            parser,
            sink,
            derived: Vec::new(),
            request_delay: Duration::ZERO,
        }
    }

    pub fn with_derived_skus(mut self, rules: Vec<DerivedSkuRule>) -> Self {
        self.derived = rules;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl<U: UrlSource, F: Fetcher, P: PageParser, S: Sink> Pipeline for StockPipeline<U, F, P, S> {
    async fn extract(&self) -> Result<ScrapeResult> {
        let urls = self.urls.load_urls().await?;
        tracing::info!("📋 {} supplier URLs to scrape", urls.len());

        let mut result = ScrapeResult {
            urls_total: urls.len(),
            ..ScrapeResult::default()
        };

        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }

            tracing::debug!("Fetching {}", url);
            let html = match self.fetcher.fetch(url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("⚠️ Failed to GET {}: {}", url, e);
                    result.pages_failed += 1;
                    continue;
                }
            };

            let records = self.parser.parse(&html, url, Utc::now());
            if records.is_empty() {
                tracing::warn!("⚠️ No stock rows found on {}", url);
            }
            result.records.extend(records);
        }

        Ok(result)
    }

    async fn transform(&self, mut scraped: ScrapeResult) -> Result<ScrapeResult> {
        apply_derived_skus(&mut scraped.records, &self.derived);
        Ok(scraped)
    }

    async fn load(&self, records: &[StockRecord]) -> Result<String> {
        self.sink.write(records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::profile::SupplierProfile;
    use crate::utils::error::ScrapeError;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockUrls(Vec<String>);

    #[async_trait::async_trait]
    impl UrlSource for MockUrls {
        async fn load_urls(&self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct MockFetcher {
        pages: HashMap<String, String>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.calls.lock().await.push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| ScrapeError::ParseError {
                message: format!("no page for {}", url),
            })
        }
    }

    /// One record per line, `sku=qty`.
    struct LineParser;

    impl PageParser for LineParser {
        fn parse(&self, html: &str, source_url: &str, at: DateTime<Utc>) -> Vec<StockRecord> {
            html.lines()
                .filter_map(|line| line.split_once('='))
                .filter_map(|(sku, qty)| Some(StockRecord::new(sku, qty.parse().ok()?, source_url, at)))
                .collect()
        }
    }

    #[derive(Clone, Default)]
    struct MockSink {
        written: Arc<Mutex<Vec<StockRecord>>>,
    }

    #[async_trait::async_trait]
    impl Sink for MockSink {
        async fn write(&self, records: &[StockRecord]) -> Result<String> {
            self.written.lock().await.extend_from_slice(records);
            Ok("mock".to_string())
        }
    }

    fn pipeline(
        urls: &[&str],
        pages: &[(&str, &str)],
    ) -> (StockPipeline<MockUrls, MockFetcher, LineParser, MockSink>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fetcher = MockFetcher {
            pages: pages
                .iter()
                .map(|(u, p)| (u.to_string(), p.to_string()))
                .collect(),
            calls: calls.clone(),
        };
        let urls = MockUrls(urls.iter().map(|u| u.to_string()).collect());
        (
            StockPipeline::new(urls, fetcher, LineParser, MockSink::default()),
            calls,
        )
    }

    #[tokio::test]
    async fn test_extract_fetches_every_url_in_order() {
        let (pipeline, calls) = pipeline(
            &["https://a.test", "https://b.test"],
            &[("https://a.test", "A1=3\nA2=4"), ("https://b.test", "B1=5")],
        );

        let result = pipeline.extract().await.unwrap();

        assert_eq!(*calls.lock().await, vec!["https://a.test", "https://b.test"]);
        assert_eq!(result.urls_total, 2);
        assert_eq!(result.pages_failed, 0);
        let skus: Vec<_> = result.records.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A1", "A2", "B1"]);
        assert_eq!(result.records[2].source_url, "https://b.test");
    }

    #[tokio::test]
    async fn test_extract_skips_failed_pages() {
        let (pipeline, _) = pipeline(
            &["https://down.test", "https://b.test"],
            &[("https://b.test", "B1=5")],
        );

        let result = pipeline.extract().await.unwrap();

        assert_eq!(result.pages_failed, 1);
        assert_eq!(result.records.len(), 1);
    }

    #[tokio::test]
    async fn test_transform_applies_derived_rules() {
        let (pipeline, _) = pipeline(&["https://a.test"], &[("https://a.test", "ACGEL250=24")]);
        let pipeline = pipeline.with_derived_skus(SupplierProfile::default().derived);

        let scraped = pipeline.extract().await.unwrap();
        let transformed = pipeline.transform(scraped).await.unwrap();

        let pairs: Vec<_> = transformed
            .records
            .iter()
            .map(|r| (r.sku.as_str(), r.quantity))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("ACGEL250", 24),
                ("ACGEL250(2)", 12),
                ("ACGEL250(4)", 6),
                ("ACGEL250(12)", 2)
            ]
        );
    }

    #[tokio::test]
    async fn test_load_hands_records_to_sink() {
        let (pipeline, _) = pipeline(&[], &[]);
        let sink = pipeline.sink.clone();
        let records = vec![StockRecord::new("X", 1, "https://a.test", Utc::now())];

        let destination = pipeline.load(&records).await.unwrap();

        assert_eq!(destination, "mock");
        assert_eq!(*sink.written.lock().await, records);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_requests_only() {
        let (pipeline, _) = pipeline(
            &["https://a.test", "https://b.test", "https://c.test"],
            &[],
        );
        let pipeline = pipeline.with_request_delay(Duration::from_secs(2));

        let started = tokio::time::Instant::now();
        pipeline.extract().await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(4) && elapsed < Duration::from_secs(5));
    }
}
