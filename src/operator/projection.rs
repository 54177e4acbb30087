//! Projection operator.
//!
//! Selects and reorders fields of the child's records by name, producing new
//! records under a new header.

use crate::error::{Error, Result};
use crate::operator::{Operator, OperatorState};
use crate::record::{Header, Record};
use log::debug;
use std::sync::Arc;

/// Operator that projects named fields from child records
pub struct Projection {
    /// Child operator that produces records
    child: Box<dyn Operator>,
    /// Output field names, in output order
    names: Vec<String>,
    /// Child positions of `names`, resolved on open
    positions: Vec<usize>,
    header: Arc<Header>,
    state: OperatorState,
}

impl Projection {
    /// # Example
    /// ```ignore
    /// // If child produces [id, name, age, email]
    /// // names ["age", "id"] would produce [age, id]
    /// ```
    pub fn new<I, S>(child: Box<dyn Operator>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self {
            child,
            header: Arc::new(Header::new(names.iter().cloned())),
            names,
            positions: Vec::new(),
            state: OperatorState::Closed,
        }
    }
}

impl Operator for Projection {
    fn open(&mut self) -> Result<()> {
        if self.state.is_open() {
            return Ok(());
        }

        self.child.open()?;
        self.positions = match self.child.header().positions(&self.names) {
            Ok(positions) => positions,
            Err(missing) => {
                let err = Error::FieldNotFound(missing.to_string());
                self.child.close()?;
                return Err(err);
            }
        };
        self.state = OperatorState::Open;

        debug!(
            "Projection opened: {} from {}",
            self.header,
            self.child.header()
        );
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.positions.clear();
        self.state = OperatorState::Closed;
        self.child.close()
    }

    fn next(&mut self) -> Result<Option<Record>> {
        self.state.ensure_open()?;

        match self.child.next()? {
            Some(record) => {
                // short child records read as empty strings, as with by-name access
                let fields = self
                    .positions
                    .iter()
                    .map(|&i| record.retrieve(i).unwrap_or(""));
                Ok(Some(Record::from_fields(fields)))
            }
            None => Ok(None),
        }
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn header(&self) -> &Arc<Header> {
        &self.header
    }
}
