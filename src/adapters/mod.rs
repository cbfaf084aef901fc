// Adapters layer: concrete implementations of the domain ports for external systems
// (supplier HTTP, local CSV files, Google Sheets).

pub mod csv_sink;
pub mod http;
pub mod sheets;
pub mod url_source;

pub use csv_sink::CsvSink;
pub use http::HttpFetcher;
pub use sheets::{SheetsClient, SheetsSink, SheetsUrlSource};
pub use url_source::CsvUrlSource;
