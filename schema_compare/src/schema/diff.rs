//! Schema difference calculator
//!
//! This module checks that a comparison schema (B) has everything a reference
//! schema (A) declares. Anything present only in B is never reported.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DiffConfig;
use crate::schema::types::{Schema, Table};

/// Kind of a reported discrepancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffKind {
    MissingTable,
    MissingColumn,
    WrongColumnType,
    WrongColumnOther,
    MissingConstraint,
    WrongConstraintOther,
    MissingIndex,
}

impl DiffKind {
    /// Order in which kinds appear in a report
    pub const REPORT_ORDER: [DiffKind; 7] = [
        DiffKind::MissingTable,
        DiffKind::MissingColumn,
        DiffKind::WrongColumnType,
        DiffKind::WrongColumnOther,
        DiffKind::MissingConstraint,
        DiffKind::WrongConstraintOther,
        DiffKind::MissingIndex,
    ];

    pub fn priority(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiffKind::MissingTable => "MISSING_TABLE",
            DiffKind::MissingColumn => "MISSING_COLUMN",
            DiffKind::WrongColumnType => "WRONG_COLUMN_TYPE",
            DiffKind::WrongColumnOther => "WRONG_COLUMN_OTHER",
            DiffKind::MissingConstraint => "MISSING_CONSTRAINT",
            DiffKind::WrongConstraintOther => "WRONG_CONSTRAINT_OTHER",
            DiffKind::MissingIndex => "MISSING_INDEX",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single discrepancy between A and B
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub kind: DiffKind,
    /// `table`, `table.column` or `table.column.KIND`
    pub target: String,
    pub a: String,
    /// Empty when the element is missing from B
    pub b: String,
}

impl Diff {
    pub fn new(
        kind: DiffKind,
        target: impl Into<String>,
        a: impl Into<String>,
        b: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            target: target.into(),
            a: a.into(),
            b: b.into(),
        }
    }

    fn missing(kind: DiffKind, target: impl Into<String>, a: impl Into<String>) -> Self {
        Self::new(kind, target, a, String::new())
    }
}

/// Ordered differences between two schemas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    diffs: Vec<Diff>,
}

impl SchemaDiff {
    /// Generate the grouped diff of `reference` against `target`
    pub fn generate(reference: &Schema, target: &Schema, config: &DiffConfig) -> Self {
        let mut diffs = Vec::new();

        for table_a in reference.tables.values() {
            if config.ignore_tables.iter().any(|name| name == &table_a.name) {
                tracing::debug!(table = %table_a.name, "Skipping ignored table");
                continue;
            }

            match target.table(&table_a.name) {
                Some(table_b) => Self::compare_table(table_a, table_b, &mut diffs),
                None => diffs.push(Diff::missing(
                    DiffKind::MissingTable,
                    &table_a.name,
                    &table_a.name,
                )),
            }
        }

        let diffs = group_by_kind(diffs, config.sort_within_kind);
        tracing::info!(
            tables = reference.len(),
            differences = diffs.len(),
            "Compared schemas"
        );

        Self { diffs }
    }

    fn compare_table(table_a: &Table, table_b: &Table, diffs: &mut Vec<Diff>) {
        let table = &table_a.name;

        for column_a in table_a.columns.values() {
            let Some(column_b) = table_b.columns.get(&column_a.name) else {
                diffs.push(Diff::missing(DiffKind::MissingColumn, table, &column_a.name));
                continue;
            };

            let target = format!("{}.{}", table, column_a.name);
            if column_a.data_type != column_b.data_type {
                diffs.push(Diff::new(
                    DiffKind::WrongColumnType,
                    &target,
                    &column_a.data_type,
                    &column_b.data_type,
                ));
            }
            if column_a.other != column_b.other {
                diffs.push(Diff::new(
                    DiffKind::WrongColumnOther,
                    &target,
                    &column_a.other,
                    &column_b.other,
                ));
            }
        }

        // Only presence matters; a renamed index on the same column matches.
        for (column, index_a) in &table_a.indexes {
            if !table_b.indexes.contains_key(column) {
                diffs.push(Diff::missing(
                    DiffKind::MissingIndex,
                    format!("{}.{}", table, column),
                    &index_a.name,
                ));
            }
        }

        for (column, kinds) in &table_a.constraints {
            for (kind, constraint_a) in kinds {
                match table_b.constraint(column, kind) {
                    None => diffs.push(Diff::missing(
                        DiffKind::MissingConstraint,
                        format!("{}.{}", table, column),
                        kind.as_str(),
                    )),
                    Some(constraint_b) if constraint_a.other != constraint_b.other => {
                        diffs.push(Diff::new(
                            DiffKind::WrongConstraintOther,
                            format!("{}.{}.{}", table, column, kind),
                            &constraint_a.other,
                            &constraint_b.other,
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
    }

    pub fn diffs(&self) -> &[Diff] {
        &self.diffs
    }

    pub fn into_diffs(self) -> Vec<Diff> {
        self.diffs
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    /// Check if the schemas matched
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Number of diffs per kind, omitting kinds with none
    pub fn count_by_kind(&self) -> BTreeMap<DiffKind, usize> {
        let mut counts = BTreeMap::new();
        for diff in &self.diffs {
            *counts.entry(diff.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Concatenate diffs bucketed by kind in [`DiffKind::REPORT_ORDER`].
///
/// Each bucket keeps emission order unless `sort_within_kind` is set, in
/// which case it is stably sorted by target and then by value-in-A.
pub fn group_by_kind(diffs: Vec<Diff>, sort_within_kind: bool) -> Vec<Diff> {
    let mut buckets: [Vec<Diff>; 7] = Default::default();
    for diff in diffs {
        buckets[diff.kind.priority()].push(diff);
    }

    if sort_within_kind {
        for bucket in &mut buckets {
            bucket.sort_by(|x, y| x.target.cmp(&y.target).then_with(|| x.a.cmp(&y.a)));
        }
    }

    buckets.into_iter().flatten().collect()
}

/// Compare two schemas with the default configuration
pub fn compare(reference: &Schema, target: &Schema) -> Vec<Diff> {
    SchemaDiff::generate(reference, target, &DiffConfig::default()).into_diffs()
}
