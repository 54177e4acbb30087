//! Alias to table resolution for FROM clauses.

use crate::error::{Error, Result};
use crate::sql::ast::{NamedTableReference, SelectStatement};
use crate::sql::Visitor;
use log::debug;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

/// Schema assumed for table references that do not name one
pub const DEFAULT_SCHEMA: &str = "dbo";

/// AST node an alias resolves to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableSource<'ast> {
    Named(&'ast NamedTableReference),
    Derived {
        subquery: &'ast SelectStatement,
        alias: &'ast str,
    },
}

/// Mapping from exposed name (alias, or table name when unaliased) to the
/// table source it resolves to. Keys are lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableContext<'ast> {
    entries: BTreeMap<String, TableSource<'ast>>,
}

impl<'ast> TableContext<'ast> {
    pub fn get(&self, name: &str) -> Option<&TableSource<'ast>> {
        self.entries.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableSource<'ast>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Register `source` under `name`. A name already present is rejected.
    fn register(&mut self, name: &str, source: TableSource<'ast>) -> Result<()> {
        match self.entries.entry(name.to_lowercase()) {
            Entry::Occupied(e) => Err(Error::DuplicateAlias(e.key().clone())),
            Entry::Vacant(e) => {
                e.insert(source);
                Ok(())
            }
        }
    }
}

/// Resolves FROM-clause table sources into a [`TableContext`].
///
/// When a universe of `(schema, table)` pairs is supplied, named tables
/// outside it are left out of the context. That is filtering, not an error:
/// a query may touch tables this binder is not responsible for.
#[derive(Debug, Clone, Default)]
pub struct TableBinder {
    universe: Option<HashSet<(String, String)>>,
}

impl TableBinder {
    /// Binder accepting every named table
    pub fn new() -> Self {
        Self::default()
    }

    /// Binder restricted to the given `(schema, table)` pairs, compared
    /// case-insensitively
    pub fn with_universe<I, S, T>(tables: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let universe = tables
            .into_iter()
            .map(|(s, t)| (s.as_ref().to_lowercase(), t.as_ref().to_lowercase()))
            .collect();
        Self {
            universe: Some(universe),
        }
    }

    /// Bind every table source reachable from `select`.
    ///
    /// The whole statement is walked, so named tables under EXISTS, IN and
    /// scalar subqueries are registered too. Derived tables are registered
    /// under their alias without binding their inner FROM clauses.
    pub fn bind<'ast>(&self, select: &'ast SelectStatement) -> Result<TableContext<'ast>> {
        let mut visitor = TableVisitor {
            binder: self,
            context: TableContext::default(),
        };
        visitor.visit_select(select)?;
        debug!("Bound {} table source(s)", visitor.context.len());
        Ok(visitor.context)
    }

    fn accepts(&self, table: &NamedTableReference) -> bool {
        match &self.universe {
            None => true,
            Some(universe) => {
                let schema = table
                    .schema
                    .as_deref()
                    .unwrap_or(DEFAULT_SCHEMA)
                    .to_lowercase();
                universe.contains(&(schema, table.table.to_lowercase()))
            }
        }
    }
}

struct TableVisitor<'b, 'ast> {
    binder: &'b TableBinder,
    context: TableContext<'ast>,
}

impl<'b, 'ast> Visitor<'ast> for TableVisitor<'b, 'ast> {
    type Error = Error;

    fn visit_named_table(&mut self, table: &'ast NamedTableReference) -> Result<()> {
        if !self.binder.accepts(table) {
            debug!(
                "Skipping table {}.{} outside the bound universe",
                table.schema.as_deref().unwrap_or(DEFAULT_SCHEMA),
                table.table
            );
            return Ok(());
        }
        self.context
            .register(table.exposed_name(), TableSource::Named(table))
    }

    fn visit_derived_table(&mut self, subquery: &'ast SelectStatement, alias: &'ast str) -> Result<()> {
        self.context
            .register(alias, TableSource::Derived { subquery, alias })
    }
}
