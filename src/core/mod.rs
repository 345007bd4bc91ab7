pub mod assembler;
pub mod classifier;
pub mod result_writer;
pub mod row_processor;
pub mod runner;

pub use crate::domain::model::{ColumnLayout, ColumnRole, PreparedRequest, RequestTemplate, RowResult};
pub use crate::domain::ports::{Dispatcher, TableReader, TableWriter};
pub use crate::utils::error::Result;
