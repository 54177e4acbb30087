pub mod binder;
pub mod error;
pub mod operator;
pub mod predicate;
pub mod record;
pub mod sql;

pub use error::{Error, Result};
