//! Limit operator.
//!
//! Limits the number of records returned from a child operator, optionally
//! skipping a number of leading records first.

use crate::error::Result;
use crate::operator::{Operator, OperatorState};
use crate::record::{Header, Record};
use std::sync::Arc;

/// Operator that limits the number of records returned
pub struct Limit {
    /// Child operator that produces records
    child: Box<dyn Operator>,
    /// Maximum number of records to return
    limit: usize,
    /// Number of records to skip before returning
    offset: usize,
    skipped: usize,
    returned: usize,
    /// Output header (same as child's header)
    header: Arc<Header>,
    state: OperatorState,
}

impl Limit {
    pub fn new(child: Box<dyn Operator>, limit: usize) -> Self {
        Self::with_offset(child, limit, 0)
    }

    pub fn with_offset(child: Box<dyn Operator>, limit: usize, offset: usize) -> Self {
        Self {
            child,
            limit,
            offset,
            skipped: 0,
            returned: 0,
            header: Arc::new(Header::default()),
            state: OperatorState::Closed,
        }
    }
}

impl Operator for Limit {
    fn open(&mut self) -> Result<()> {
        if self.state.is_open() {
            return Ok(());
        }

        self.child.open()?;
        self.header = Arc::clone(self.child.header());
        self.skipped = 0;
        self.returned = 0;
        self.state = OperatorState::Open;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state = OperatorState::Closed;
        self.child.close()
    }

    fn next(&mut self) -> Result<Option<Record>> {
        self.state.ensure_open()?;

        // Once the limit is reached the child is not pulled again
        if self.returned >= self.limit {
            return Ok(None);
        }

        while self.skipped < self.offset {
            match self.child.next()? {
                Some(_) => self.skipped += 1,
                None => return Ok(None),
            }
        }

        match self.child.next()? {
            Some(record) => {
                self.returned += 1;
                Ok(Some(record))
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
