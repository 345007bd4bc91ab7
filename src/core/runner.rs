use crate::adapters::csv_table::{CsvTableReader, CsvTableWriter};
use crate::adapters::http::ReqwestDispatcher;
use crate::config::RunConfig;
use crate::core::assembler::assemble;
use crate::core::classifier::classify_header;
use crate::core::result_writer::{build_result_row, write_result};
use crate::core::row_processor::{apply_row, prepare};
use crate::domain::model::{ColumnLayout, PreparedRequest, RequestTemplate, RunSummary};
use crate::domain::ports::{Dispatcher, TableReader, TableWriter};
use crate::utils::error::{Result, RowcallError};

/// Drives one pass over an input table. Rows run strictly one after
/// another; the first error stops the run.
pub struct BatchRunner<R: TableReader> {
    template: RequestTemplate,
    reader: R,
    input_name: String,
}

impl<R: TableReader> BatchRunner<R> {
    pub fn new(template: RequestTemplate, reader: R, input_name: impl Into<String>) -> Self {
        Self {
            template,
            reader,
            input_name: input_name.into(),
        }
    }

    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }

    /// Reads and classifies the header row. Must be called once, before any
    /// data row is processed.
    pub fn read_layout(&mut self) -> Result<ColumnLayout> {
        let header = self
            .reader
            .next_row()?
            .ok_or_else(|| RowcallError::FileAccessError {
                path: self.input_name.clone(),
                message: "no header row".to_string(),
            })?;
        tracing::info!("Header: {}", header.join(","));
        Ok(classify_header(&header))
    }

    /// Merges the next row and returns its request, or `None` at end of input.
    fn next_request(
        &mut self,
        layout: &ColumnLayout,
        row_number: usize,
    ) -> Result<Option<PreparedRequest>> {
        let Some(row) = self.reader.next_row()? else {
            return Ok(None);
        };
        tracing::debug!("Row {}: {}", row_number, row.join(","));

        let meta = apply_row(&mut self.template, layout, &row, row_number)?;
        if !meta.is_empty() {
            tracing::debug!("Row {} meta: {:?}", row_number, meta);
        }

        prepare(&self.template).map(Some)
    }

    /// Sends every remaining data row and writes its result. Returns the
    /// number of rows processed.
    pub async fn process_rows<D, W>(
        &mut self,
        layout: &ColumnLayout,
        dispatcher: &D,
        writer: &mut W,
    ) -> Result<usize>
    where
        D: Dispatcher + ?Sized,
        W: TableWriter,
    {
        let mut rows_processed = 0;

        while let Some(request) = self.next_request(layout, rows_processed + 1)? {
            rows_processed += 1;
            tracing::info!(
                "Row {}: {} {} query={:?}",
                rows_processed,
                request.method,
                request.url,
                request.query
            );
            tracing::debug!("Row {} body: {}", rows_processed, request.body);

            let response = dispatcher.dispatch(&request).await?;
            tracing::info!(
                "Row {}: status {} ({} bytes)",
                rows_processed,
                response.status,
                response.body.len()
            );

            let result = build_result_row(layout, &self.template, &response.body);
            write_result(writer, &result)?;
        }

        tracing::info!("Processed {} rows", rows_processed);
        Ok(rows_processed)
    }

    /// Header then rows, for callers whose writer already exists.
    pub async fn run<D, W>(&mut self, dispatcher: &D, writer: &mut W) -> Result<usize>
    where
        D: Dispatcher + ?Sized,
        W: TableWriter,
    {
        let layout = self.read_layout()?;
        self.process_rows(&layout, dispatcher, writer).await
    }

    /// Assembles each row's request and hands it to `on_request` as soon as
    /// it is ready. Nothing is sent. Returns the number of rows seen.
    pub fn dry_run<F>(&mut self, mut on_request: F) -> Result<usize>
    where
        F: FnMut(&PreparedRequest),
    {
        let layout = self.read_layout()?;
        let mut rows = 0;

        while let Some(request) = self.next_request(&layout, rows + 1)? {
            rows += 1;
            on_request(&request);
        }

        Ok(rows)
    }
}

/// Runs the configured batch against the network. `Ok(None)` when no input
/// file is configured. The output file is only created once the header row
/// has been read, so an unreadable input leaves an existing output intact.
pub async fn run_batch(config: &RunConfig) -> Result<Option<RunSummary>> {
    let template = assemble(config)?;
    let Some(input) = config.file.as_deref() else {
        tracing::info!("No input file configured, nothing to send");
        return Ok(None);
    };

    let reader = CsvTableReader::open(input)?;
    let mut runner = BatchRunner::new(template, reader, input);
    let layout = runner.read_layout()?;

    let mut writer = CsvTableWriter::create(&config.output)?;
    let dispatcher = ReqwestDispatcher::new();

    let rows_processed = runner.process_rows(&layout, &dispatcher, &mut writer).await?;
    Ok(Some(RunSummary {
        rows_processed,
        output_path: config.output.clone(),
    }))
}

/// Like [`run_batch`] but only assembles requests, passing each to
/// `on_request`. No output file is created.
pub fn preview_batch<F>(config: &RunConfig, on_request: F) -> Result<usize>
where
    F: FnMut(&PreparedRequest),
{
    let template = assemble(config)?;
    let Some(input) = config.file.as_deref() else {
        return Ok(0);
    };

    let reader = CsvTableReader::open(input)?;
    BatchRunner::new(template, reader, input).dry_run(on_request)
}
