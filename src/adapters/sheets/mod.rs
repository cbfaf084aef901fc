pub mod auth;
pub mod client;

pub use auth::{ServiceAccountAuth, ServiceAccountKey, StaticToken};
pub use client::{a1_range, GridRange, SheetsClient, ValueRange};

use crate::core::{Sink, StockRecord, TokenProvider, UrlSource};
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

/// Writes `Code` / `QTY` into columns B and C of the worksheet, leaving
/// column A (the URL list) alone.
pub struct SheetsSink<T: TokenProvider> {
    client: Arc<SheetsClient<T>>,
    worksheet: String,
}

impl<T: TokenProvider> SheetsSink<T> {
    pub fn new(client: Arc<SheetsClient<T>>, worksheet: impl Into<String>) -> Self {
        Self {
            client,
            worksheet: worksheet.into(),
        }
    }

    fn column(&self, column: char, header: &str, cells: impl Iterator<Item = Value>) -> ValueRange {
        let values: Vec<Vec<Value>> = std::iter::once(Value::from(header))
            .chain(cells)
            .map(|cell| vec![cell])
            .collect();
        let range = format!("{column}1:{column}{}", values.len());

        ValueRange {
            range: a1_range(&self.worksheet, &range),
            major_dimension: Some("ROWS".to_string()),
            values,
        }
    }
}

#[async_trait::async_trait]
impl<T: TokenProvider> Sink for SheetsSink<T> {
    async fn write(&self, records: &[StockRecord]) -> Result<String> {
        let destination = format!(
            "spreadsheet {} ({})",
            self.client.spreadsheet_id(),
            self.worksheet
        );

        self.client
            .batch_clear(&[
                a1_range(&self.worksheet, "B2:B"),
                a1_range(&self.worksheet, "C2:C"),
            ])
            .await?;

        if records.is_empty() {
            tracing::info!("No records; cleared {}", destination);
            return Ok(destination);
        }

        let codes = self.column('B', "Code", records.iter().map(|r| Value::from(r.sku.as_str())));
        let quantities = self.column('C', "QTY", records.iter().map(|r| Value::from(r.quantity)));
        self.client.batch_update_values(&[codes, quantities]).await?;

        let sheet_id = self.client.sheet_id(&self.worksheet).await?;
        self.client
            .bold(GridRange {
                sheet_id,
                start_row_index: 0,
                end_row_index: 1,
                start_column_index: 1,
                end_column_index: 3,
            })
            .await?;

        tracing::info!("📊 Google Sheet updated: {} rows", records.len());
        Ok(destination)
    }
}

/// Supplier URLs from column A of the worksheet; a leading `url` header is dropped.
pub struct SheetsUrlSource<T: TokenProvider> {
    client: Arc<SheetsClient<T>>,
    worksheet: String,
}

impl<T: TokenProvider> SheetsUrlSource<T> {
    pub fn new(client: Arc<SheetsClient<T>>, worksheet: impl Into<String>) -> Self {
        Self {
            client,
            worksheet: worksheet.into(),
        }
    }
}

#[async_trait::async_trait]
impl<T: TokenProvider> UrlSource for SheetsUrlSource<T> {
    async fn load_urls(&self) -> Result<Vec<String>> {
        let mut cells = self
            .client
            .read_column(&a1_range(&self.worksheet, "A:A"))
            .await?;

        if cells
            .first()
            .is_some_and(|first| first.trim().eq_ignore_ascii_case("url"))
        {
            cells.remove(0);
        }

        Ok(cells
            .into_iter()
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use httpmock::prelude::*;
    use reqwest::Client;
    use serde_json::json;

    fn client(server: &MockServer) -> Arc<SheetsClient<StaticToken>> {
        Arc::new(
            SheetsClient::new(Client::new(), StaticToken("tok".to_string()), "sheet123")
                .with_base_url(server.base_url()),
        )
    }

    #[tokio::test]
    async fn test_url_source_drops_header_and_blanks() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v4/spreadsheets/sheet123/values/URLS!A:A");
            then.status(200).json_body(json!({
                "range": "URLS!A1:A4",
                "majorDimension": "COLUMNS",
                "values": [[" URL ", "https://a.test", "", "https://b.test "]]
            }));
        });

        let urls = SheetsUrlSource::new(client(&server), "URLS")
            .load_urls()
            .await
            .unwrap();

        assert_eq!(urls, vec!["https://a.test", "https://b.test"]);
    }

    #[tokio::test]
    async fn test_sink_clears_writes_and_bolds() {
        let server = MockServer::start();
        let clear = server.mock(|when, then| {
            when.method(POST)
                .path("/v4/spreadsheets/sheet123/values:batchClear")
                .json_body(json!({ "ranges": ["URLS!B2:B", "URLS!C2:C"] }));
            then.status(200).json_body(json!({ "spreadsheetId": "sheet123" }));
        });
        let update = server.mock(|when, then| {
            when.method(POST)
                .path("/v4/spreadsheets/sheet123/values:batchUpdate")
                .json_body(json!({
                    "valueInputOption": "RAW",
                    "data": [
                        {
                            "range": "URLS!B1:B3",
                            "majorDimension": "ROWS",
                            "values": [["Code"], ["ACGEL5L"], ["ACGEL5L+"]]
                        },
                        {
                            "range": "URLS!C1:C3",
                            "majorDimension": "ROWS",
                            "values": [["QTY"], [7], [7]]
                        }
                    ]
                }));
            then.status(200).json_body(json!({ "totalUpdatedCells": 6 }));
        });
        let meta = server.mock(|when, then| {
            when.method(GET).path("/v4/spreadsheets/sheet123");
            then.status(200).json_body(json!({
                "sheets": [{ "properties": { "sheetId": 42, "title": "URLS" } }]
            }));
        });
        let bold = server.mock(|when, then| {
            when.method(POST)
                .path("/v4/spreadsheets/sheet123:batchUpdate")
                .body_contains("\"sheetId\":42")
                .body_contains("\"bold\":true");
            then.status(200).json_body(json!({ "replies": [{}] }));
        });

        let now = Utc::now();
        let records = vec![
            StockRecord::new("ACGEL5L", 7, "https://a.test", now),
            StockRecord::new("ACGEL5L+", 7, "https://a.test", now),
        ];
        let destination = SheetsSink::new(client(&server), "URLS")
            .write(&records)
            .await
            .unwrap();

        clear.assert();
        update.assert();
        meta.assert();
        bold.assert();
        assert_eq!(destination, "spreadsheet sheet123 (URLS)");
    }

    #[tokio::test]
    async fn test_sink_with_no_records_only_clears() {
        let server = MockServer::start();
        let clear = server.mock(|when, then| {
            when.method(POST).path("/v4/spreadsheets/sheet123/values:batchClear");
            then.status(200).json_body(json!({}));
        });
        let update = server.mock(|when, then| {
            when.method(POST).path("/v4/spreadsheets/sheet123/values:batchUpdate");
            then.status(200).json_body(json!({}));
        });

        SheetsSink::new(client(&server), "URLS")
            .write(&[])
            .await
            .unwrap();

        clear.assert();
        update.assert_hits(0);
    }
}
