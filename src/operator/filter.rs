//! Filter operator.
//!
//! Passes through the child's records for which a predicate tree holds. The
//! predicate is bound to the child's header when the filter is opened.

use crate::error::{Error, Result};
use crate::operator::{Operator, OperatorState};
use crate::predicate::{BoundPredicate, Predicate};
use crate::record::{Header, Record};
use log::{debug, trace};
use std::sync::Arc;

/// Operator that filters records based on a predicate tree
pub struct Filter {
    /// Child operator that produces records
    child: Box<dyn Operator>,
    /// Unbound predicate, kept so the filter can be reopened
    predicate: Predicate,
    /// Predicate bound to the child's header while open
    bound: Option<BoundPredicate>,
    /// Output header (same as child's header)
    header: Arc<Header>,
    passed: usize,
    rejected: usize,
    state: OperatorState,
}

impl Filter {
    pub fn new(child: Box<dyn Operator>, predicate: Predicate) -> Self {
        Self {
            child,
            predicate,
            bound: None,
            header: Arc::new(Header::default()),
            passed: 0,
            rejected: 0,
            state: OperatorState::Closed,
        }
    }
}

impl Operator for Filter {
    fn open(&mut self) -> Result<()> {
        if self.state.is_open() {
            return Ok(());
        }

        self.child.open()?;
        self.header = Arc::clone(self.child.header());
        self.bound = Some(self.predicate.clone().bind(Arc::clone(&self.header)));
        self.passed = 0;
        self.rejected = 0;
        self.state = OperatorState::Open;

        debug!("Filter opened: {} over {}", self.predicate, self.header);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.state.is_open() {
            debug!(
                "Filter closed: {} passed, {} rejected",
                self.passed, self.rejected
            );
        }
        self.bound = None;
        self.state = OperatorState::Closed;
        self.child.close()
    }

    fn next(&mut self) -> Result<Option<Record>> {
        self.state.ensure_open()?;
        let predicate = self.bound.as_ref().ok_or(Error::NotOpen)?;

        // Keep pulling from the child until a record satisfies the predicate
        while let Some(record) = self.child.next()? {
            if predicate.eval(&record)? {
                self.passed += 1;
                return Ok(Some(record));
            }
            self.rejected += 1;
            trace!("Filter rejected record {:?}", record);
        }
        Ok(None)
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn header(&self) -> &Arc<Header> {
        &self.header
    }
}
