//! Evaluation of predicate trees against records.

use crate::error::{Error, Result};
use crate::predicate::{ComparisonKind, FieldComparison, LogicalKind, Predicate};
use crate::record::{Header, Record};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A predicate tree with its header attached, ready for evaluation.
///
/// Field names are resolved against the header at evaluation time. The tree
/// and header are never modified by evaluation.
#[derive(Debug, Clone)]
pub struct BoundPredicate {
    root: Predicate,
    header: Arc<Header>,
}

impl BoundPredicate {
    pub(crate) fn new(root: Predicate, header: Arc<Header>) -> Self {
        Self { root, header }
    }

    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    pub fn predicate(&self) -> &Predicate {
        &self.root
    }

    /// Detach the header, returning the unbound tree.
    pub fn unbind(self) -> Predicate {
        self.root
    }

    /// Evaluate the tree against `record`.
    pub fn eval(&self, record: &Record) -> Result<bool> {
        self.eval_node(&self.root, record, &mut |_| {})
    }

    /// Evaluate the tree, calling `inspect` for each leaf just before it is
    /// evaluated. Leaves skipped by short-circuiting are not reported.
    pub fn eval_inspect<F>(&self, record: &Record, mut inspect: F) -> Result<bool>
    where
        F: FnMut(&FieldComparison),
    {
        self.eval_node(&self.root, record, &mut inspect)
    }

    fn eval_node(
        &self,
        node: &Predicate,
        record: &Record,
        inspect: &mut dyn FnMut(&FieldComparison),
    ) -> Result<bool> {
        match node {
            Predicate::Comparison(cmp) => {
                inspect(cmp);
                self.eval_comparison(cmp, record)
            }
            Predicate::Binary { kind, left, right } => {
                let lhs = self.eval_node(left, record, inspect)?;
                match (kind, lhs) {
                    (LogicalKind::And, false) => Ok(false),
                    (LogicalKind::Or, true) => Ok(true),
                    _ => self.eval_node(right, record, inspect),
                }
            }
        }
    }

    fn eval_comparison(&self, cmp: &FieldComparison, record: &Record) -> Result<bool> {
        let left = self.field_value(&cmp.left, record)?;
        let right = self.field_value(&cmp.right, record)?;

        match cmp.kind {
            ComparisonKind::Eq => Ok(left == right),
            ComparisonKind::Neq => Ok(left != right),
            kind => {
                let l = parse_decimal(&cmp.left, left)?;
                let r = parse_decimal(&cmp.right, right)?;
                // both operands are finite, so the ordering always exists
                let ord = l.partial_cmp(&r).ok_or_else(|| {
                    Error::InvariantViolation(format!("unordered operands in {}", cmp))
                })?;
                ordering_holds(kind, ord)
            }
        }
    }

    fn field_value<'r>(&self, name: &str, record: &'r Record) -> Result<&'r str> {
        let index = self
            .header
            .position(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))?;
        record.retrieve(index)
    }
}

impl fmt::Display for BoundPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} over {}", self.root, self.header)
    }
}

fn ordering_holds(kind: ComparisonKind, ord: Ordering) -> Result<bool> {
    match kind {
        ComparisonKind::Lt => Ok(ord == Ordering::Less),
        ComparisonKind::Gt => Ok(ord == Ordering::Greater),
        ComparisonKind::Lte => Ok(ord != Ordering::Greater),
        ComparisonKind::Gte => Ok(ord != Ordering::Less),
        ComparisonKind::Eq | ComparisonKind::Neq => Err(Error::InvariantViolation(format!(
            "'{}' is not an ordered comparison",
            kind.as_str()
        ))),
    }
}

/// Parse a field value as a finite decimal number.
fn parse_decimal(field: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(Error::Format {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::PredicateBuilder as P;

    fn header() -> Arc<Header> {
        Arc::new(Header::new(["a", "b", "c", "d"]))
    }

    fn record(values: [&str; 4]) -> Record {
        Record::from_fields(values)
    }

    #[test]
    fn test_numeric_ordering_not_lexicographic() -> Result<()> {
        let pred = P::lt("a", "b").bind(header());
        assert!(pred.eval(&record(["3", "10", "", ""]))?);

        let pred = P::gt("a", "b").bind(header());
        assert!(!pred.eval(&record(["3", "10", "", ""]))?);
        Ok(())
    }

    #[test]
    fn test_equality_is_raw_string() -> Result<()> {
        let eq = P::eq("a", "b").bind(header());
        assert!(!eq.eval(&record(["3", "3.0", "", ""]))?);
        assert!(eq.eval(&record(["3", "3", "", ""]))?);
        assert!(!eq.eval(&record(["x", "X", "", ""]))?);

        let neq = P::neq("a", "b").bind(header());
        assert!(neq.eval(&record(["3", "3.0", "", ""]))?);

        // ordered comparisons do normalize numerically
        let lte = P::lte("a", "b").bind(header());
        assert!(lte.eval(&record(["3", "3.0", "", ""]))?);
        let gte = P::gte("a", "b").bind(header());
        assert!(gte.eval(&record(["3", "3.0", "", ""]))?);
        Ok(())
    }

    #[test]
    fn test_non_numeric_ordered_comparison_is_format_error() {
        let pred = P::lt("a", "b").bind(header());
        let err = pred.eval(&record(["abc", "10", "", ""]));
        assert!(matches!(err, Err(Error::Format { ref field, ref value })
            if field == "a" && value == "abc"));

        // empty string is not a number either
        let err = pred.eval(&record(["1", "", "", ""]));
        assert!(matches!(err, Err(Error::Format { .. })));

        let err = pred.eval(&record(["NaN", "1", "", ""]));
        assert!(matches!(err, Err(Error::Format { .. })));
    }

    #[test]
    fn test_decimal_grammar() -> Result<()> {
        // surrounding whitespace is not trimmed
        let lt = P::lt("a", "b").bind(header());
        let err = lt.eval(&record([" 3", "10", "", ""]));
        assert!(matches!(err, Err(Error::Format { ref field, ref value })
            if field == "a" && value == " 3"));
        let err = lt.eval(&record(["3", "10 ", "", ""]));
        assert!(matches!(err, Err(Error::Format { ref field, .. }) if field == "b"));

        // exponent notation is a finite decimal
        let gt = P::gt("a", "b").bind(header());
        assert!(gt.eval(&record(["1e3", "999", "", ""]))?);
        assert!(!gt.eval(&record(["1E2", "999", "", ""]))?);

        let err = gt.eval(&record(["inf", "1", "", ""]));
        assert!(matches!(err, Err(Error::Format { .. })));
        Ok(())
    }

    #[test]
    fn test_ordering_rejects_equality_kinds() {
        assert!(matches!(
            ordering_holds(ComparisonKind::Eq, Ordering::Equal),
            Err(Error::InvariantViolation(_))
        ));
        assert!(matches!(
            ordering_holds(ComparisonKind::Lte, Ordering::Equal),
            Ok(true)
        ));
    }

    #[test]
    fn test_unknown_field_is_error() {
        let pred = P::eq("a", "zzz").bind(header());
        let err = pred.eval(&record(["", "", "", ""]));
        assert!(matches!(err, Err(Error::FieldNotFound(ref name)) if name == "zzz"));
    }

    #[test]
    fn test_record_shorter_than_header_is_out_of_range() {
        let pred = P::eq("a", "d").bind(header());
        let err = pred.eval(&Record::from_fields(["1", "2"]));
        assert!(matches!(err, Err(Error::OutOfRange { index: 3, len: 2 })));
    }

    #[test]
    fn test_and_short_circuits() -> Result<()> {
        // right side would fail with FieldNotFound if it were evaluated
        let pred = P::and(P::eq("a", "b"), P::eq("missing", "c")).bind(header());
        assert!(!pred.eval(&record(["1", "2", "", ""]))?);

        let mut visited = Vec::new();
        pred.eval_inspect(&record(["1", "2", "", ""]), |cmp| {
            visited.push(cmp.clone())
        })?;
        assert_eq!(visited, vec![FieldComparison::new("a", "b", ComparisonKind::Eq)]);

        // when the left side holds the right side runs and fails
        assert!(matches!(
            pred.eval(&record(["1", "1", "", ""])),
            Err(Error::FieldNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_or_short_circuits() -> Result<()> {
        let pred = P::or(P::eq("a", "b"), P::lt("c", "d")).bind(header());

        let mut count = 0;
        // c and d are not numeric, so evaluating the right side would fail
        assert!(pred.eval_inspect(&record(["x", "x", "p", "q"]), |_| count += 1)?);
        assert_eq!(count, 1);

        let mut count = 0;
        assert!(pred.eval_inspect(&record(["x", "y", "1", "2"]), |_| count += 1)?);
        assert_eq!(count, 2);
        Ok(())
    }

    #[test]
    fn test_left_child_first() -> Result<()> {
        let pred = P::and(P::eq("a", "a"), P::and(P::eq("b", "b"), P::eq("c", "c")))
            .bind(header());
        let mut order = Vec::new();
        pred.eval_inspect(&record(["", "", "", ""]), |cmp| order.push(cmp.left.clone()))?;
        assert_eq!(order, vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn test_eval_is_deterministic() -> Result<()> {
        let pred = P::or(P::gt("a", "b"), P::eq("c", "d")).bind(header());
        let rec = record(["5", "7", "k", "k"]);
        let before = rec.clone();

        let first = pred.eval(&rec)?;
        for _ in 0..10 {
            assert_eq!(pred.eval(&rec)?, first);
        }
        assert_eq!(rec, before);
        Ok(())
    }

    #[test]
    fn test_unbind_round_trip() {
        let tree = P::eq("a", "b");
        let bound = tree.clone().bind(header());
        assert_eq!(bound.to_string(), "a = b over [a, b, c, d]");
        assert_eq!(bound.unbind(), tree);
    }
}
