//! Boolean predicate trees used to filter records.
//!
//! A tree is built unbound, holding only field names. Binding attaches the
//! header every node resolves names against and yields a [`BoundPredicate`],
//! the only form that can be evaluated.

pub mod bound;
pub mod builder;
pub mod function;

pub use bound::BoundPredicate;
pub use builder::PredicateBuilder;
pub use function::{ComparisonKind, FieldComparison, LogicalKind, Predicate};
