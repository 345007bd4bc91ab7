use crate::domain::ports::{TableReader, TableWriter};
use crate::utils::error::{Result, RowcallError};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Comma-separated input. Every row, header included, comes back as plain
/// fields; rows must all have the header's field count.
pub struct CsvTableReader<R: Read = File> {
    name: String,
    reader: csv::Reader<R>,
    record: StringRecord,
}

impl CsvTableReader<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RowcallError::FileAccessError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_reader(path.display().to_string(), file))
    }
}

impl<R: Read> CsvTableReader<R> {
    pub fn from_reader(name: impl Into<String>, source: R) -> Self {
        Self {
            name: name.into(),
            reader: ReaderBuilder::new().has_headers(false).from_reader(source),
            record: StringRecord::new(),
        }
    }
}

impl<R: Read> TableReader for CsvTableReader<R> {
    fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        let more = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| RowcallError::FileAccessError {
                path: self.name.clone(),
                message: e.to_string(),
            })?;

        Ok(more.then(|| self.record.iter().map(str::to_string).collect()))
    }
}

/// Comma-separated output, flushed after every row so a failed run keeps
/// what was written before the failure.
pub struct CsvTableWriter<W: Write = File> {
    writer: csv::Writer<W>,
}

impl CsvTableWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| RowcallError::FileAccessError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvTableWriter<W> {
    pub fn from_writer(sink: W) -> Self {
        Self {
            writer: WriterBuilder::new().flexible(true).from_writer(sink),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| RowcallError::WriteError {
            message: e.to_string(),
        })
    }
}

impl<W: Write> TableWriter for CsvTableWriter<W> {
    fn write_row(&mut self, fields: &[String]) -> Result<()> {
        self.writer
            .write_record(fields)
            .map_err(|e| RowcallError::WriteError {
                message: e.to_string(),
            })?;
        self.writer.flush().map_err(|e| RowcallError::WriteError {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_header_and_rows() {
        let data = "qp-id,body\n7,\"{\"\"x\"\":1}\"\n";
        let mut reader = CsvTableReader::from_reader("mem", data.as_bytes());

        assert_eq!(reader.next_row().unwrap(), Some(vec!["qp-id".to_string(), "body".to_string()]));
        assert_eq!(reader.next_row().unwrap(), Some(vec!["7".to_string(), "{\"x\":1}".to_string()]));
        assert_eq!(reader.next_row().unwrap(), None);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let mut reader = CsvTableReader::from_reader("mem", "".as_bytes());
        assert_eq!(reader.next_row().unwrap(), None);
    }

    #[test]
    fn test_uneven_rows_are_rejected() {
        let mut reader = CsvTableReader::from_reader("mem", "a,b\n1\n".as_bytes());
        reader.next_row().unwrap();
        assert!(matches!(
            reader.next_row(),
            Err(RowcallError::FileAccessError { .. })
        ));
    }

    #[test]
    fn test_writer_quotes_fields() {
        let mut writer = CsvTableWriter::from_writer(Vec::new());
        writer
            .write_row(&["id-7".to_string(), "{\"a\":\"b,c\"}".to_string()])
            .unwrap();
        writer.write_row(&["ok".to_string()]).unwrap();

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "id-7,\"{\"\"a\"\":\"\"b,c\"\"}\"\nok\n");
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            CsvTableReader::open(&missing),
            Err(RowcallError::FileAccessError { .. })
        ));
    }
}
