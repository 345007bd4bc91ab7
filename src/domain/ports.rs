use crate::domain::model::{DispatchedResponse, PreparedRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of table rows. The first row returned is the header.
pub trait TableReader {
    /// `Ok(None)` once the input is exhausted.
    fn next_row(&mut self) -> Result<Option<Vec<String>>>;
}

/// Sink for output rows. Each row must be durable once `write_row` returns.
pub trait TableWriter {
    fn write_row(&mut self, fields: &[String]) -> Result<()>;
}

#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Sends the request and reads the full response body, whatever the status.
    async fn dispatch(&self, request: &PreparedRequest) -> Result<DispatchedResponse>;
}
