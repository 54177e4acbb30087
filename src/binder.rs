//! Binding of table and column references in a parsed query fragment.
//!
//! - [`TableBinder`] resolves FROM-clause table sources into a [`TableContext`],
//!   optionally restricted to a known universe of graph node tables
//! - [`ColumnUsageScanner`] collects the tables referenced through qualified
//!   columns and the column names that carry no qualifier
//!
//! Both are stateless across invocations: each call builds a fresh result.

pub mod column_usage;
pub mod table_context;

pub use column_usage::{ColumnUsage, ColumnUsageScanner};
pub use table_context::{TableBinder, TableContext, TableSource, DEFAULT_SCHEMA};
