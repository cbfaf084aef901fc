use crate::core::{Storage, UrlSource};
use crate::utils::error::Result;

/// Reads supplier URLs from the `url` column of a local CSV file.
pub struct CsvUrlSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> CsvUrlSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage> UrlSource for CsvUrlSource<S> {
    async fn load_urls(&self) -> Result<Vec<String>> {
        if !self.storage.exists(&self.path).await {
            tracing::info!("URL list {} not found", self.path);
            return Ok(Vec::new());
        }

        let data = self.storage.read_file(&self.path).await?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_slice());

        let Some(column) = reader
            .headers()?
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("url"))
        else {
            tracing::warn!("⚠️ {} has no 'url' column", self.path);
            return Ok(Vec::new());
        };

        let mut urls = Vec::new();
        for row in reader.records() {
            let row = row?;
            if let Some(url) = row.get(column).map(str::trim).filter(|u| !u.is_empty()) {
                urls.push(url.to_string());
            }
        }

        tracing::debug!("Loaded {} URLs from {}", urls.len(), self.path);
        Ok(urls)
    }
}
