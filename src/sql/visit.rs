//! Traversal over the fragment AST.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! recurses into all children of the node. An implementation overrides only
//! the node kinds it cares about; everything else is walked transparently.

use crate::sql::ast::*;

pub trait Visitor<'ast> {
    type Error;

    fn visit_select(&mut self, select: &'ast SelectStatement) -> Result<(), Self::Error> {
        walk_select(self, select)
    }

    fn visit_select_item(&mut self, item: &'ast SelectItem) -> Result<(), Self::Error> {
        walk_select_item(self, item)
    }

    fn visit_table_reference(&mut self, table: &'ast TableReference) -> Result<(), Self::Error> {
        walk_table_reference(self, table)
    }

    fn visit_named_table(&mut self, _table: &'ast NamedTableReference) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_derived_table(
        &mut self,
        subquery: &'ast SelectStatement,
        _alias: &'ast str,
    ) -> Result<(), Self::Error> {
        self.visit_select(subquery)
    }

    fn visit_join(&mut self, join: &'ast Join) -> Result<(), Self::Error> {
        walk_join(self, join)
    }

    fn visit_expression(&mut self, expr: &'ast Expression) -> Result<(), Self::Error> {
        walk_expression(self, expr)
    }

    fn visit_column(&mut self, _column: &'ast ColumnReference) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_scalar_subquery(&mut self, subquery: &'ast SelectStatement) -> Result<(), Self::Error> {
        self.visit_select(subquery)
    }

    fn visit_function_call(&mut self, call: &'ast FunctionCall) -> Result<(), Self::Error> {
        walk_function_call(self, call)
    }

    fn visit_searched_case(&mut self, case: &'ast SearchedCase) -> Result<(), Self::Error> {
        walk_searched_case(self, case)
    }
}

pub fn walk_select<'ast, V>(visitor: &mut V, select: &'ast SelectStatement) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    for item in &select.projections {
        visitor.visit_select_item(item)?;
    }
    for table in &select.from {
        visitor.visit_table_reference(table)?;
    }
    if let Some(expr) = &select.where_clause {
        visitor.visit_expression(expr)?;
    }
    for expr in &select.group_by {
        visitor.visit_expression(expr)?;
    }
    if let Some(expr) = &select.having {
        visitor.visit_expression(expr)?;
    }
    for item in &select.order_by {
        visitor.visit_expression(&item.expression)?;
    }
    Ok(())
}

pub fn walk_select_item<'ast, V>(visitor: &mut V, item: &'ast SelectItem) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    match item {
        SelectItem::AllColumns | SelectItem::AllColumnsFrom(_) => Ok(()),
        SelectItem::Expression(expr, _) => visitor.visit_expression(expr),
    }
}

pub fn walk_table_reference<'ast, V>(
    visitor: &mut V,
    table: &'ast TableReference,
) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    match table {
        TableReference::Named(named) => visitor.visit_named_table(named),
        TableReference::Derived { subquery, alias } => visitor.visit_derived_table(subquery, alias),
        TableReference::Join(join) => visitor.visit_join(join),
    }
}

pub fn walk_join<'ast, V>(visitor: &mut V, join: &'ast Join) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    visitor.visit_table_reference(&join.left)?;
    visitor.visit_table_reference(&join.right)?;
    if let Some(on) = &join.on {
        visitor.visit_expression(on)?;
    }
    Ok(())
}

pub fn walk_expression<'ast, V>(visitor: &mut V, expr: &'ast Expression) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    match expr {
        Expression::Literal(_) => Ok(()),
        Expression::Column(column) => visitor.visit_column(column),
        Expression::BinaryOp { left, right, .. } => {
            visitor.visit_expression(left)?;
            visitor.visit_expression(right)
        }
        Expression::UnaryOp { operand, .. } => visitor.visit_expression(operand),
        Expression::Function(call) => visitor.visit_function_call(call),
        Expression::SearchedCase(case) => visitor.visit_searched_case(case),
        Expression::SimpleCase {
            operand,
            when_clauses,
            else_clause,
        } => {
            visitor.visit_expression(operand)?;
            walk_when_clauses(visitor, when_clauses, else_clause.as_deref())
        }
        Expression::Cast { expression, .. } => visitor.visit_expression(expression),
        Expression::InList {
            expression, list, ..
        } => {
            visitor.visit_expression(expression)?;
            for item in list {
                visitor.visit_expression(item)?;
            }
            Ok(())
        }
        Expression::InSubquery {
            expression,
            subquery,
            ..
        } => {
            visitor.visit_expression(expression)?;
            visitor.visit_select(subquery)
        }
        Expression::Between {
            expression,
            low,
            high,
            ..
        } => {
            visitor.visit_expression(expression)?;
            visitor.visit_expression(low)?;
            visitor.visit_expression(high)
        }
        Expression::Like {
            expression,
            pattern,
            escape,
            ..
        } => {
            visitor.visit_expression(expression)?;
            visitor.visit_expression(pattern)?;
            if let Some(escape) = escape {
                visitor.visit_expression(escape)?;
            }
            Ok(())
        }
        Expression::IsNull { expression, .. } => visitor.visit_expression(expression),
        Expression::Exists { subquery, .. } => visitor.visit_select(subquery),
        Expression::ScalarSubquery(subquery) => visitor.visit_scalar_subquery(subquery),
    }
}

pub fn walk_function_call<'ast, V>(visitor: &mut V, call: &'ast FunctionCall) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    for arg in &call.args {
        visitor.visit_expression(arg)?;
    }
    Ok(())
}

pub fn walk_searched_case<'ast, V>(visitor: &mut V, case: &'ast SearchedCase) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    walk_when_clauses(visitor, &case.when_clauses, case.else_clause.as_deref())
}

fn walk_when_clauses<'ast, V>(
    visitor: &mut V,
    when_clauses: &'ast [WhenClause],
    else_clause: Option<&'ast Expression>,
) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    for clause in when_clauses {
        visitor.visit_expression(&clause.condition)?;
        visitor.visit_expression(&clause.result)?;
    }
    if let Some(expr) = else_clause {
        visitor.visit_expression(expr)?;
    }
    Ok(())
}
