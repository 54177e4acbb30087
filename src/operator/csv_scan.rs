//! Source operator reading delimited text with a header row.

use crate::error::Result;
use crate::operator::{Operator, OperatorState};
use crate::record::{Header, Record};
use csv::{Reader, ReaderBuilder, StringRecord};
use log::debug;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

/// Scan over a delimited file.
///
/// The file is opened by `open()` and released by `close()`. Its first line
/// becomes the output header. Rows may be shorter or longer than the header.
pub struct CsvScan {
    path: PathBuf,
    delimiter: u8,
    reader: Option<Reader<File>>,
    buffer: StringRecord,
    header: Arc<Header>,
    exhausted: bool,
    state: OperatorState,
}

impl CsvScan {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_delimiter(path, b',')
    }

    pub fn with_delimiter(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
            reader: None,
            buffer: StringRecord::new(),
            header: Arc::new(Header::default()),
            exhausted: false,
            state: OperatorState::Closed,
        }
    }
}

impl Operator for CsvScan {
    fn open(&mut self) -> Result<()> {
        if self.state.is_open() {
            return Ok(());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        self.header = Arc::new(Header::new(reader.headers()?.iter()));
        debug!("CsvScan opened {} with header {}", self.path.display(), self.header);

        self.reader = Some(reader);
        self.exhausted = false;
        self.state = OperatorState::Open;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.reader = None;
        self.state = OperatorState::Closed;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Record>> {
        self.state.ensure_open()?;
        if self.exhausted {
            return Ok(None);
        }
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        if reader.read_record(&mut self.buffer)? {
            Ok(Some(Record::from_fields(self.buffer.iter())))
        } else {
            self.exhausted = true;
            Ok(None)
        }
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn header(&self) -> &Arc<Header> {
        &self.header
    }
}
