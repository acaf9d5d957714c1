//! Schema module for SchemaCompare
//!
//! This module handles schema dump parsing and comparison.

pub mod diff;
pub mod parser;
pub mod tokenizer;
pub mod types;

// Re-export key types
pub use diff::{compare, group_by_kind, Diff, DiffKind, SchemaDiff};
pub use parser::{parse_schema, ParseOutcome, SchemaParser, SkippedLine};
pub use tokenizer::{classify, classify_line, tokenize, LineKind};
pub use types::{Column, Constraint, ConstraintKind, Index, Schema, Table};
