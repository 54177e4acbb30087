//! Table and column usage inside expressions.

use crate::sql::ast::{ColumnReference, Expression, FunctionCall, SearchedCase, SelectStatement};
use crate::sql::Visitor;
use std::collections::BTreeSet;
use std::convert::Infallible;

/// Names collected by [`ColumnUsageScanner`], all lower-cased
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnUsage {
    /// Qualifiers of qualified column references
    pub tables: BTreeSet<String>,
    /// Column references without a qualifier
    pub columns: BTreeSet<String>,
}

impl ColumnUsage {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.columns.is_empty()
    }
}

/// Collects table qualifiers and unqualified column names.
///
/// Scalar subqueries, function calls and searched CASE expressions are
/// boundaries: column references below them are not collected. Every other
/// node, including derived tables and EXISTS/IN subqueries, is walked.
#[derive(Debug, Default)]
pub struct ColumnUsageScanner {
    usage: ColumnUsage,
}

impl ColumnUsageScanner {
    pub fn scan_expression(expr: &Expression) -> ColumnUsage {
        let mut scanner = Self::default();
        infallible(scanner.visit_expression(expr));
        scanner.usage
    }

    /// Scan the projections, FROM sources, WHERE, GROUP BY, HAVING and
    /// ORDER BY of `select`.
    pub fn scan_select(select: &SelectStatement) -> ColumnUsage {
        let mut scanner = Self::default();
        infallible(scanner.visit_select(select));
        scanner.usage
    }
}

impl<'ast> Visitor<'ast> for ColumnUsageScanner {
    type Error = Infallible;

    fn visit_column(&mut self, column: &'ast ColumnReference) -> Result<(), Infallible> {
        match column.identifiers.len() {
            0 => {}
            1 => {
                self.usage
                    .columns
                    .insert(column.identifiers[0].to_lowercase());
            }
            _ => {
                if let Some(table) = column.qualifier() {
                    self.usage.tables.insert(table.to_lowercase());
                }
            }
        }
        Ok(())
    }

    fn visit_scalar_subquery(&mut self, _subquery: &'ast SelectStatement) -> Result<(), Infallible> {
        Ok(())
    }

    fn visit_function_call(&mut self, _call: &'ast FunctionCall) -> Result<(), Infallible> {
        Ok(())
    }

    fn visit_searched_case(&mut self, _case: &'ast SearchedCase) -> Result<(), Infallible> {
        Ok(())
    }
}

fn infallible(result: Result<(), Infallible>) {
    if let Err(never) = result {
        match never {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ast::{
        JoinType, NamedTableReference, SelectItem, TableReference, WhenClause,
    };

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_qualified_and_unqualified_columns() {
        // p.age > 5 AND status = 'x'
        let expr = Expression::qualified_column(["p", "age"])
            .gt(Expression::number("5"))
            .and(Expression::column("status").eq(Expression::string("x")));

        let usage = ColumnUsageScanner::scan_expression(&expr);
        assert_eq!(usage.tables, set(&["p"]));
        assert_eq!(usage.columns, set(&["status"]));
    }

    #[test]
    fn test_names_are_lower_cased() {
        let expr = Expression::qualified_column(["P", "Age"])
            .eq(Expression::qualified_column(["p", "AGE"]))
            .or(Expression::column("Status").eq(Expression::column("STATUS")));

        let usage = ColumnUsageScanner::scan_expression(&expr);
        assert_eq!(usage.tables, set(&["p"]));
        assert_eq!(usage.columns, set(&["status"]));
    }

    #[test]
    fn test_multi_part_identifier_uses_second_from_last() {
        let expr = Expression::qualified_column(["dbo", "Person", "name"]);
        let usage = ColumnUsageScanner::scan_expression(&expr);
        assert_eq!(usage.tables, set(&["person"]));
        assert!(usage.columns.is_empty());
    }

    #[test]
    fn test_boundaries_are_not_descended() {
        let subquery = SelectStatement::from_tables(vec![TableReference::named(
            NamedTableReference::new("Orders").with_alias("o"),
        )])
        .with_where(Expression::qualified_column(["o", "id"]).eq(Expression::column("inner_col")));

        let case = Expression::SearchedCase(SearchedCase {
            when_clauses: vec![WhenClause {
                condition: Expression::qualified_column(["c", "flag"]).eq(Expression::number("1")),
                result: Expression::column("case_col"),
            }],
            else_clause: None,
        });

        let expr = Expression::scalar_subquery(subquery)
            .eq(Expression::function(
                "upper",
                vec![Expression::qualified_column(["f", "name"])],
            ))
            .and(case.eq(Expression::column("outer_col")));

        let usage = ColumnUsageScanner::scan_expression(&expr);
        assert!(usage.tables.is_empty());
        assert_eq!(usage.columns, set(&["outer_col"]));
    }

    #[test]
    fn test_other_expressions_are_walked() {
        let expr = Expression::Between {
            expression: Box::new(Expression::qualified_column(["n", "weight"])),
            low: Box::new(Expression::column("lo")),
            high: Box::new(Expression::column("hi")),
            negated: false,
        }
        .and(Expression::IsNull {
            expression: Box::new(Expression::qualified_column(["m", "x"])),
            negated: true,
        });

        let usage = ColumnUsageScanner::scan_expression(&expr);
        assert_eq!(usage.tables, set(&["m", "n"]));
        assert_eq!(usage.columns, set(&["hi", "lo"]));
    }

    #[test]
    fn test_scan_select() {
        let from = TableReference::named(NamedTableReference::new("Person").with_alias("p"))
            .join(
                JoinType::Inner,
                TableReference::derived(
                    SelectStatement::from_tables(vec![]).with_where(Expression::column("hidden")),
                    "d",
                ),
                Some(Expression::qualified_column(["p", "id"]).eq(Expression::qualified_column(["d", "pid"]))),
            );
        let select = SelectStatement {
            projections: vec![SelectItem::Expression(Expression::column("name"), None)],
            from: vec![from],
            where_clause: Some(Expression::column("age").gt(Expression::number("1"))),
            ..SelectStatement::default()
        };

        let usage = ColumnUsageScanner::scan_select(&select);
        assert_eq!(usage.tables, set(&["d", "p"]));
        assert_eq!(usage.columns, set(&["age", "hidden", "name"]));
    }

    #[test]
    fn test_derived_table_and_exists_scan_alike() {
        // SELECT * FROM Orders x WHERE x.a = inner_col
        let inner = || {
            SelectStatement::from_tables(vec![TableReference::named(
                NamedTableReference::new("Orders").with_alias("x"),
            )])
            .with_where(Expression::qualified_column(["x", "a"]).eq(Expression::column("inner_col")))
        };

        let derived = SelectStatement::from_tables(vec![TableReference::derived(inner(), "d")]);
        let exists = SelectStatement::from_tables(vec![]).with_where(Expression::Exists {
            subquery: Box::new(inner()),
            negated: false,
        });

        let from_derived = ColumnUsageScanner::scan_select(&derived);
        let from_exists = ColumnUsageScanner::scan_select(&exists);
        assert_eq!(from_derived.tables, set(&["x"]));
        assert_eq!(from_derived.columns, set(&["inner_col"]));
        assert_eq!(from_derived, from_exists);
    }

    #[test]
    fn test_scanner_is_fresh_per_call() {
        let first = ColumnUsageScanner::scan_expression(&Expression::column("a"));
        let second = ColumnUsageScanner::scan_expression(&Expression::number("1"));
        assert_eq!(first.columns, set(&["a"]));
        assert!(second.is_empty());
    }
}
