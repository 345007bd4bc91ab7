pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::csv_table::{CsvTableReader, CsvTableWriter};
pub use crate::adapters::http::ReqwestDispatcher;
pub use crate::config::{file::FileConfig, RunConfig};
pub use crate::core::runner::{preview_batch, run_batch, BatchRunner};
pub use crate::utils::error::{Result, RowcallError};
