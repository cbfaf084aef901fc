pub mod derive;
pub mod engine;
pub mod pipeline;
pub mod runner;

pub use crate::domain::model::{RunSummary, ScrapeResult, StockRecord};
pub use crate::domain::ports::{
    ConfigProvider, Fetcher, OutputMode, PageParser, Pipeline, Sink, Storage, TokenProvider,
    UrlSource,
};
pub use crate::utils::error::Result;
