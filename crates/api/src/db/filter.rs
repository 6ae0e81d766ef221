//! Row predicates for filtered listings.
//!
//! Filters are expressed against [`PredicateSink`], which only knows two kinds
//! of condition: a case-insensitive substring match and an integer equality
//! match. [`PgPredicates`] renders them into a `sqlx::QueryBuilder` as bound
//! parameters; other backends (the in-memory store used by the service tests)
//! evaluate them directly.

use sqlx::{Postgres, QueryBuilder};

/// Columns that listing filters may constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ShopName,
    ProductName,
    ProductStock,
}

impl Column {
    /// Qualified column name, using the `s` (shops) and `p` (products) aliases.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::ShopName => "s.name",
            Self::ProductName => "p.name",
            Self::ProductStock => "p.stock",
        }
    }
}

/// Receiver for filter predicates.
pub trait PredicateSink {
    /// Require `column` to contain `needle`, ignoring case.
    fn contains_ignore_case(&mut self, column: Column, needle: &str);

    /// Require `column` to equal `value`.
    fn equals(&mut self, column: Column, value: i32);
}

/// How the first predicate joins onto the query built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joiner {
    Where,
    And,
}

/// Writes predicates into a Postgres query as `AND`-ed conditions.
pub struct PgPredicates<'b, 'args> {
    builder: &'b mut QueryBuilder<'args, Postgres>,
    joiner: Joiner,
}

impl<'b, 'args> PgPredicates<'b, 'args> {
    /// Start a new `WHERE` clause on the first predicate.
    pub fn where_clause(builder: &'b mut QueryBuilder<'args, Postgres>) -> Self {
        Self {
            builder,
            joiner: Joiner::Where,
        }
    }

    /// Extend a `WHERE` clause the caller has already opened.
    pub fn and_clause(builder: &'b mut QueryBuilder<'args, Postgres>) -> Self {
        Self {
            builder,
            joiner: Joiner::And,
        }
    }

    fn push_joiner(&mut self) {
        match self.joiner {
            Joiner::Where => {
                self.builder.push(" WHERE ");
                self.joiner = Joiner::And;
            }
            Joiner::And => {
                self.builder.push(" AND ");
            }
        }
    }
}

impl PredicateSink for PgPredicates<'_, '_> {
    fn contains_ignore_case(&mut self, column: Column, needle: &str) {
        self.push_joiner();
        self.builder
            .push(column.sql())
            .push(" ILIKE '%' || ")
            .push_bind(escape_like(needle))
            .push(" || '%'");
    }

    fn equals(&mut self, column: Column, value: i32) {
        self.push_joiner();
        self.builder.push(column.sql()).push(" = ").push_bind(value);
    }
}

/// Escape `LIKE` wildcards so the needle matches literally.
///
/// Postgres uses `\` as the default `LIKE` escape character.
#[must_use]
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
