//! Row representation flowing between operators.
//!
//! - **Header**: ordered field names, shared by every record one operator produces
//! - **Record**: ordered string values, positionally aligned with a header
//! - **Document**: a named-field property bag rebuilt from a record and its header
//!
//! Records are immutable by convention. A stage that changes fields produces
//! a new record rather than touching the one it received.

pub mod document;
pub mod header;
pub mod row;

pub use document::Document;
pub use header::Header;
pub use row::Record;
