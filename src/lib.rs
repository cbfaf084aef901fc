pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod parser;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{profile::SupplierProfile, LocalStorage};
pub use crate::core::{engine::ScrapeEngine, pipeline::StockPipeline, runner::run};
pub use domain::model::{RunSummary, StockRecord};
pub use parser::ProductFormParser;
pub use utils::error::{Result, ScrapeError};
