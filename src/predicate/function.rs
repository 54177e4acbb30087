//! Predicate tree nodes.

use crate::error::{Error, Result};
use crate::predicate::BoundPredicate;
use crate::record::Header;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Comparison applied by a leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonKind {
    Eq,
    Neq,
    Lt,
    Gt,
    Gte,
    Lte,
}

impl ComparisonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonKind::Eq => "=",
            ComparisonKind::Neq => "!=",
            ComparisonKind::Lt => "<",
            ComparisonKind::Gt => ">",
            ComparisonKind::Gte => ">=",
            ComparisonKind::Lte => "<=",
        }
    }
}

impl FromStr for ComparisonKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "=" | "==" | "eq" => Ok(ComparisonKind::Eq),
            "!=" | "<>" | "neq" => Ok(ComparisonKind::Neq),
            "<" | "lt" => Ok(ComparisonKind::Lt),
            ">" | "gt" => Ok(ComparisonKind::Gt),
            ">=" | "gte" => Ok(ComparisonKind::Gte),
            "<=" | "lte" => Ok(ComparisonKind::Lte),
            _ => Err(Error::InvariantViolation(format!(
                "unknown comparison kind '{}'",
                s
            ))),
        }
    }
}

/// Combinator applied by an internal node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKind {
    And,
    Or,
}

impl LogicalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalKind::And => "AND",
            LogicalKind::Or => "OR",
        }
    }
}

impl FromStr for LogicalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "and" | "&&" => Ok(LogicalKind::And),
            "or" | "||" => Ok(LogicalKind::Or),
            _ => Err(Error::InvariantViolation(format!(
                "unknown logical kind '{}'",
                s
            ))),
        }
    }
}

/// Leaf comparing two fields of the same record by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldComparison {
    pub left: String,
    pub right: String,
    pub kind: ComparisonKind,
}

impl FieldComparison {
    pub fn new(left: impl Into<String>, right: impl Into<String>, kind: ComparisonKind) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.kind.as_str(), self.right)
    }
}

/// Unbound predicate tree.
///
/// Each internal node owns both children; trees are finite and acyclic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Comparison(FieldComparison),
    Binary {
        kind: LogicalKind,
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
}

impl Predicate {
    pub fn compare(left: impl Into<String>, right: impl Into<String>, kind: ComparisonKind) -> Self {
        Predicate::Comparison(FieldComparison::new(left, right, kind))
    }

    pub fn and(self, other: Predicate) -> Self {
        Predicate::Binary {
            kind: LogicalKind::And,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    pub fn or(self, other: Predicate) -> Self {
        Predicate::Binary {
            kind: LogicalKind::Or,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Attach `header` to every node of the tree.
    pub fn bind(self, header: Arc<Header>) -> BoundPredicate {
        BoundPredicate::new(self, header)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Comparison(cmp) => write!(f, "{}", cmp),
            Predicate::Binary { kind, left, right } => {
                write!(f, "({} {} {})", left, kind.as_str(), right)
            }
        }
    }
}
