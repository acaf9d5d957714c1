//! Type definitions for parsed schema objects

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Represents every table parsed from one schema dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: IndexMap<String, Table>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table to the schema, replacing any table with the same name
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Represents a table and everything declared in its body
///
/// Indexes are keyed by the column they cover, constraints by column and
/// then by kind. A second declaration for the same key replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: IndexMap<String, Column>,
    pub indexes: IndexMap<String, Index>,
    pub constraints: IndexMap<String, IndexMap<ConstraintKind, Constraint>>,
}

impl Table {
    /// Create a new table with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Add a column to the table
    pub fn add_column(&mut self, column: Column) {
        self.columns.insert(column.name.clone(), column);
    }

    /// Add an index to the table
    pub fn add_index(&mut self, index: Index) {
        self.indexes.insert(index.column_name.clone(), index);
    }

    /// Add a constraint to the table
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints
            .entry(constraint.column_name.clone())
            .or_default()
            .insert(constraint.kind.clone(), constraint);
    }

    /// Look up the constraint of `kind` declared on `column`
    pub fn constraint(&self, column: &str, kind: &ConstraintKind) -> Option<&Constraint> {
        self.constraints.get(column).and_then(|kinds| kinds.get(kind))
    }
}

/// Represents a column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    /// Everything after the type: nullability, default, comment...
    pub other: String,
}

impl Column {
    /// Create a new column with the given name and type
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            other: String::new(),
        }
    }

    /// Set the trailing definition text
    pub fn other(mut self, other: &str) -> Self {
        self.other = other.to_string();
        self
    }
}

/// Represents a `KEY` index declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub column_name: String,
}

/// Kind of a key or constraint declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ConstraintKind {
    Primary,
    Unique,
    /// Kind token of a named `CONSTRAINT` line, e.g. `FOREIGN` or `CHECK`
    Other(String),
}

impl ConstraintKind {
    pub fn from_token(token: &str) -> Self {
        match token {
            "PRIMARY" => ConstraintKind::Primary,
            "UNIQUE" => ConstraintKind::Unique,
            other => ConstraintKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConstraintKind::Primary => "PRIMARY",
            ConstraintKind::Unique => "UNIQUE",
            ConstraintKind::Other(token) => token,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ConstraintKind {
    fn from(token: String) -> Self {
        ConstraintKind::from_token(&token)
    }
}

impl From<ConstraintKind> for String {
    fn from(kind: ConstraintKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Represents a named constraint or a `PRIMARY`/`UNIQUE` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    pub column_name: String,
    pub kind: ConstraintKind,
    /// Trailing clause, e.g. the `REFERENCES ...` part of a foreign key
    pub other: String,
}
