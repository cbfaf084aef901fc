use crate::core::TokenProvider;
use crate::utils::error::{Result, ScrapeError};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Zero-based, end-exclusive cell rectangle on one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    pub start_row_index: u32,
    pub end_row_index: u32,
    pub start_column_index: u32,
    pub end_column_index: u32,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

/// `Sheet1!A1:B2` notation, quoting titles that need it.
pub fn a1_range(worksheet: &str, cells: &str) -> String {
    if worksheet
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        format!("{}!{}", worksheet, cells)
    } else {
        format!("'{}'!{}", worksheet.replace('\'', "''"), cells)
    }
}

/// Thin client for the handful of Sheets API v4 calls the scraper needs.
pub struct SheetsClient<T: TokenProvider> {
    client: Client,
    tokens: T,
    base_url: String,
    spreadsheet_id: String,
}

impl<T: TokenProvider> SheetsClient<T> {
    pub fn new(client: Client, tokens: T, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            client,
            tokens,
            base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn endpoint(&self, tail: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| ScrapeError::config(format!("invalid Sheets base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(tail);
        Ok(url)
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let token = self.tokens.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Google wraps failures as {"error": {"message": ...}}.
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or(body);
            return Err(ScrapeError::SheetsApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Values of the first column in `range`, formatted as displayed.
    pub async fn read_column(&self, range: &str) -> Result<Vec<String>> {
        let url = self.endpoint(&[self.spreadsheet_id.as_str(), "values", range])?;
        tracing::debug!("Reading {} from spreadsheet {}", range, self.spreadsheet_id);

        let values: ValueRange = self
            .send(self.client.get(url).query(&[("majorDimension", "COLUMNS")]))
            .await?;

        Ok(values
            .values
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|cell| match cell {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect())
    }

    pub async fn batch_clear(&self, ranges: &[String]) -> Result<()> {
        let url = self.endpoint(&[self.spreadsheet_id.as_str(), "values:batchClear"])?;
        tracing::debug!("Clearing {:?}", ranges);

        let _: Value = self
            .send(self.client.post(url).json(&json!({ "ranges": ranges })))
            .await?;
        Ok(())
    }

    /// Writes several ranges in one call; values are stored as given (RAW).
    pub async fn batch_update_values(&self, data: &[ValueRange]) -> Result<()> {
        let url = self.endpoint(&[self.spreadsheet_id.as_str(), "values:batchUpdate"])?;
        tracing::debug!("Updating {} ranges", data.len());

        let body = json!({ "valueInputOption": "RAW", "data": data });
        let _: Value = self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    /// Numeric id of the worksheet titled `title`.
    pub async fn sheet_id(&self, title: &str) -> Result<i64> {
        let url = self.endpoint(&[self.spreadsheet_id.as_str()])?;
        let meta: SpreadsheetMeta = self
            .send(
                self.client
                    .get(url)
                    .query(&[("fields", "sheets.properties(sheetId,title)")]),
            )
            .await?;

        meta.sheets
            .into_iter()
            .find(|s| s.properties.title == title)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| {
                ScrapeError::config(format!(
                    "worksheet '{}' not found in spreadsheet {}",
                    title, self.spreadsheet_id
                ))
            })
    }

    pub async fn bold(&self, range: GridRange) -> Result<()> {
        let target = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.endpoint(&[target.as_str()])?;
        let body = json!({
            "requests": [{
                "repeatCell": {
                    "range": range,
                    "cell": { "userEnteredFormat": { "textFormat": { "bold": true } } },
                    "fields": "userEnteredFormat.textFormat.bold"
                }
            }]
        });

        let _: Value = self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }
}
