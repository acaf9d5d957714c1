//! Schema builder
//!
//! This module folds classified lines into a [`Schema`]. The builder is
//! never in more than one table at a time: a header opens a table, a trailer
//! or the next header commits it, and the end of input commits whatever is
//! still open.

use serde::Serialize;
use tracing::Level;

use crate::config::ParseConfig;
use crate::schema::tokenizer::{classify_line, LineKind};
use crate::schema::types::{Schema, Table};

/// A line inside a table body that could not be turned into a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the input
    pub line_number: usize,
    pub text: String,
    pub reason: String,
}

/// Result of a parse together with the lines that were dropped
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub schema: Schema,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug)]
enum BuilderState {
    Outside,
    InTable(Table),
}

#[derive(Debug)]
struct Builder {
    state: BuilderState,
    outcome: ParseOutcome,
}

impl Builder {
    fn new() -> Self {
        Self {
            state: BuilderState::Outside,
            outcome: ParseOutcome::default(),
        }
    }

    fn commit(&mut self) {
        let state = std::mem::replace(&mut self.state, BuilderState::Outside);
        if let BuilderState::InTable(table) = state {
            tracing::debug!(
                table = %table.name,
                columns = table.columns.len(),
                indexes = table.indexes.len(),
                "Parsed table"
            );
            self.outcome.schema.add_table(table);
        }
    }

    fn apply(mut self, line_number: usize, line: &str) -> Self {
        let kind = classify_line(line);

        if let LineKind::TableHeader { name } = kind {
            self.commit();
            self.state = BuilderState::InTable(Table::new(&name));
            return self;
        }

        let BuilderState::InTable(table) = &mut self.state else {
            return self;
        };

        match kind {
            LineKind::TableTrailer => self.commit(),
            LineKind::Column(column) => table.add_column(column),
            LineKind::Index(index) => table.add_index(index),
            LineKind::Constraint(constraint) => table.add_constraint(constraint),
            LineKind::Malformed { reason } => self.outcome.skipped.push(SkippedLine {
                line_number,
                text: line.to_string(),
                reason,
            }),
            LineKind::TableHeader { .. } | LineKind::Ignored => {}
        }
        self
    }

    fn finish(mut self) -> ParseOutcome {
        self.commit();
        self.outcome
    }
}

/// Parser turning schema dump text into a [`Schema`]
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    config: ParseConfig,
}

impl SchemaParser {
    /// Create a new parser
    pub fn new(config: &ParseConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Level at which skipped lines are logged
    pub fn skipped_line_level(&self) -> Level {
        if self.config.warn_on_skipped_lines {
            Level::WARN
        } else {
            Level::DEBUG
        }
    }

    /// Parse a dump, dropping anything that cannot be understood
    pub fn parse(&self, text: &str) -> Schema {
        self.parse_with_report(text).schema
    }

    /// Parse a dump and report the lines that were skipped
    pub fn parse_with_report(&self, text: &str) -> ParseOutcome {
        let outcome = text
            .lines()
            .enumerate()
            .fold(Builder::new(), |builder, (index, line)| builder.apply(index + 1, line))
            .finish();

        let level = self.skipped_line_level();
        for skipped in &outcome.skipped {
            crate::log_at!(
                level,
                line = skipped.line_number,
                text = %skipped.text,
                reason = %skipped.reason,
                "Skipped schema line"
            );
        }

        outcome
    }
}

/// Parse a dump with the default configuration
pub fn parse_schema(text: &str) -> Schema {
    SchemaParser::default().parse(text)
}
