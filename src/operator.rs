//! Pull-based operator pipeline.
//!
//! Every stage implements [`Operator`]: it is opened, asked for records one at
//! a time via `next()`, and closed. A stage pulls from its child only when its
//! own `next()` is called, so records flow strictly in order with no
//! prefetching.

use crate::error::{Error, Result};
use crate::record::{Header, Record};
use std::sync::Arc;

pub mod csv_scan;
pub mod filter;
pub mod limit;
pub mod projection;
pub mod values_scan;

pub use csv_scan::CsvScan;
pub use filter::Filter;
pub use limit::Limit;
pub use projection::Projection;
pub use values_scan::ValuesScan;

/// Trait for all pipeline stages
pub trait Operator: Send {
    /// Move to the open state. Opening an open operator is a no-op.
    fn open(&mut self) -> Result<()>;

    /// Release whatever `open()` acquired. Safe to call at any time; closing a
    /// closed operator is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Get the next record, or `None` once the stream is exhausted.
    /// Fails with [`Error::NotOpen`] unless the operator is open.
    fn next(&mut self) -> Result<Option<Record>>;

    /// True iff the operator is open
    fn is_open(&self) -> bool;

    /// Names of the fields of every record this operator produces.
    /// Fixed once `open()` has completed.
    fn header(&self) -> &Arc<Header>;
}

/// Lifecycle state of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatorState {
    #[default]
    Closed,
    Open,
}

impl OperatorState {
    pub fn is_open(&self) -> bool {
        *self == OperatorState::Open
    }

    pub fn ensure_open(&self) -> Result<()> {
        match self {
            OperatorState::Open => Ok(()),
            OperatorState::Closed => Err(Error::NotOpen),
        }
    }
}

/// Pull every remaining record from an open operator.
pub fn drain(operator: &mut dyn Operator) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    while let Some(record) = operator.next()? {
        records.push(record);
    }
    Ok(records)
}

/// Open `operator`, pull all of its records and close it again.
///
/// The operator is closed even when opening or pulling fails; the first
/// error wins.
pub fn execute(operator: &mut dyn Operator) -> Result<Vec<Record>> {
    if let Err(err) = operator.open() {
        // the open error is what the caller needs to see
        let _ = operator.close();
        return Err(err);
    }
    let result = drain(operator);
    let closed = operator.close();
    let records = result?;
    closed?;
    Ok(records)
}
