//! In-memory source operator.

use crate::error::Result;
use crate::operator::{Operator, OperatorState};
use crate::record::{Header, Record};
use log::debug;
use std::sync::Arc;

/// Source that produces a fixed list of records, in order
pub struct ValuesScan {
    header: Arc<Header>,
    rows: Vec<Record>,
    position: usize,
    state: OperatorState,
}

impl ValuesScan {
    pub fn new(header: Arc<Header>, rows: Vec<Record>) -> Self {
        Self {
            header,
            rows,
            position: 0,
            state: OperatorState::Closed,
        }
    }
}

impl Operator for ValuesScan {
    fn open(&mut self) -> Result<()> {
        if self.state.is_open() {
            return Ok(());
        }
        self.position = 0;
        self.state = OperatorState::Open;
        debug!("ValuesScan opened with {} rows over {}", self.rows.len(), self.header);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state = OperatorState::Closed;
        Ok(())
    }

    fn next(&mut self) -> Result<Option<Record>> {
        self.state.ensure_open()?;
        let record = self.rows.get(self.position).cloned();
        if record.is_some() {
            self.position += 1;
        }
        Ok(record)
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn header(&self) -> &Arc<Header> {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn create_scan() -> ValuesScan {
        let header = Arc::new(Header::new(["id", "name"]));
        let rows = vec![
            Record::from_fields(["1", "Alice"]),
            Record::from_fields(["2", "Bob"]),
        ];
        ValuesScan::new(header, rows)
    }

    #[test]
    fn test_next_before_open_fails() {
        let mut scan = create_scan();
        assert!(!scan.is_open());
        assert!(matches!(scan.next(), Err(Error::NotOpen)));
    }

    #[test]
    fn test_scan_in_order() -> Result<()> {
        let mut scan = create_scan();
        scan.open()?;
        assert!(scan.is_open());

        let first = scan.next()?.expect("Should have first record");
        assert_eq!(first.retrieve_by_name(scan.header(), "name"), "Alice");
        let second = scan.next()?.expect("Should have second record");
        assert_eq!(second.retrieve(0)?, "2");
        Ok(())
    }

    #[test]
    fn test_exhaustion_is_idempotent() -> Result<()> {
        let mut scan = create_scan();
        scan.open()?;
        scan.next()?;
        scan.next()?;
        for _ in 0..5 {
            assert!(scan.next()?.is_none());
        }
        Ok(())
    }

    #[test]
    fn test_close_and_reopen_restarts() -> Result<()> {
        let mut scan = create_scan();
        scan.open()?;
        scan.next()?;
        scan.close()?;
        assert!(!scan.is_open());
        assert!(matches!(scan.next(), Err(Error::NotOpen)));

        // closing twice is harmless
        scan.close()?;

        scan.open()?;
        let first = scan.next()?.expect("Should restart from the beginning");
        assert_eq!(first.retrieve(1)?, "Alice");
        Ok(())
    }

    #[test]
    fn test_empty_source() -> Result<()> {
        let mut scan = ValuesScan::new(Arc::new(Header::new(["x"])), vec![]);
        scan.open()?;
        assert!(scan.next()?.is_none());
        assert!(scan.next()?.is_none());
        Ok(())
    }
}
