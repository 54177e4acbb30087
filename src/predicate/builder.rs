//! Fluent helpers for assembling predicate trees.

use crate::predicate::{ComparisonKind, Predicate};

/// Builder for creating predicate trees
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// left = right (string equality)
    pub fn eq(left: impl Into<String>, right: impl Into<String>) -> Predicate {
        Predicate::compare(left, right, ComparisonKind::Eq)
    }

    /// left != right (string inequality)
    pub fn neq(left: impl Into<String>, right: impl Into<String>) -> Predicate {
        Predicate::compare(left, right, ComparisonKind::Neq)
    }

    /// left < right (numeric)
    pub fn lt(left: impl Into<String>, right: impl Into<String>) -> Predicate {
        Predicate::compare(left, right, ComparisonKind::Lt)
    }

    /// left > right (numeric)
    pub fn gt(left: impl Into<String>, right: impl Into<String>) -> Predicate {
        Predicate::compare(left, right, ComparisonKind::Gt)
    }

    /// left >= right (numeric)
    pub fn gte(left: impl Into<String>, right: impl Into<String>) -> Predicate {
        Predicate::compare(left, right, ComparisonKind::Gte)
    }

    /// left <= right (numeric)
    pub fn lte(left: impl Into<String>, right: impl Into<String>) -> Predicate {
        Predicate::compare(left, right, ComparisonKind::Lte)
    }

    pub fn and(left: Predicate, right: Predicate) -> Predicate {
        left.and(right)
    }

    pub fn or(left: Predicate, right: Predicate) -> Predicate {
        left.or(right)
    }

    /// Left-deep AND over all predicates. `None` when the input is empty.
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Option<Predicate> {
        predicates.into_iter().reduce(Predicate::and)
    }

    /// Left-deep OR over all predicates. `None` when the input is empty.
    pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Option<Predicate> {
        predicates.into_iter().reduce(Predicate::or)
    }
}
