use crate::core::{Sink, StockRecord, Storage};
use crate::utils::error::{Result, ScrapeError};

pub const CSV_HEADER: [&str; 4] = ["sku", "quantity", "source_url", "timestamp"];

/// Local CSV output. Overwrites by default; in append mode the header is only
/// written when the file is new or empty.
pub struct CsvSink<S: Storage> {
    storage: S,
    path: String,
    append: bool,
}

impl<S: Storage> CsvSink<S> {
    pub fn new(storage: S, path: impl Into<String>, append: bool) -> Self {
        Self {
            storage,
            path: path.into(),
            append,
        }
    }

    async fn existing_content(&self) -> Result<Vec<u8>> {
        if !self.append || !self.storage.exists(&self.path).await {
            return Ok(Vec::new());
        }
        let mut content = self.storage.read_file(&self.path).await?;
        if !content.is_empty() && !content.ends_with(b"\n") {
            content.push(b'\n');
        }
        Ok(content)
    }
}

#[async_trait::async_trait]
impl<S: Storage> Sink for CsvSink<S> {
    async fn write(&self, records: &[StockRecord]) -> Result<String> {
        let existing = self.existing_content().await?;
        let needs_header = existing.is_empty();

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(existing);
        if needs_header {
            writer.write_record(CSV_HEADER)?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| ScrapeError::IoError(e.into_error()))?;

        tracing::debug!("Writing {} bytes to {}", data.len(), self.path);
        self.storage.write_file(&self.path, &data).await?;
        Ok(self.path.clone())
    }
}
