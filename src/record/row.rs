use crate::error::{Error, Result};
use crate::record::{Document, Header};

/// One row of string values aligned with some [`Header`].
///
/// The number of fields is fixed when the record is built. Cloning copies the
/// field storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Create a record with `len` empty fields
    pub fn new(len: usize) -> Self {
        Self {
            fields: vec![String::new(); len],
        }
    }

    /// Create a record from already materialized values
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Positional read.
    pub fn retrieve(&self, index: usize) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(Error::OutOfRange {
                index,
                len: self.fields.len(),
            })
    }

    /// Read a field by name, resolving it against `header`.
    ///
    /// A name missing from the header, or a position past the end of this
    /// record, reads as the empty string.
    pub fn retrieve_by_name(&self, header: &Header, name: &str) -> &str {
        header
            .position(name)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Copy of this record with field `index` replaced.
    pub fn with_field(&self, index: usize, value: impl Into<String>) -> Result<Record> {
        let len = self.fields.len();
        if index >= len {
            return Err(Error::OutOfRange { index, len });
        }
        let mut fields = self.fields.clone();
        fields[index] = value.into();
        Ok(Record { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Pair this record's values with the names in `header`.
    pub fn to_document(&self, header: &Header) -> Document {
        Document::from_record(header, self)
    }
}
