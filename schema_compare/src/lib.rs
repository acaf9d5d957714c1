//! SchemaCompare: structural diffs between two schema dumps
//!
//! SchemaCompare reads `CREATE TABLE` dumps without touching a live database,
//! builds a model of each one and reports what the reference dump (A) declares
//! that the comparison dump (B) lacks or declares differently.

pub mod config;
pub mod error;
pub mod report;
pub mod schema;
pub mod utils;

use std::fs;
use std::path::Path;

// Re-export main types for easier access
pub use config::Config;
pub use error::{Error, Result};
pub use report::ReportFormat;
pub use schema::diff::{compare, Diff, DiffKind, SchemaDiff};
pub use schema::parser::{parse_schema, ParseOutcome, SchemaParser, SkippedLine};
pub use schema::types::Schema;

/// Read a schema dump from disk
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| Error::FileReadError {
        path: path.to_path_buf(),
        source,
    })
}

/// The main client for comparing schema dumps
#[derive(Debug, Clone, Default)]
pub struct SchemaCompareClient {
    config: Config,
    parser: SchemaParser,
}

impl SchemaCompareClient {
    /// Create a new client from configuration
    pub fn new(config: Config) -> Self {
        let parser = SchemaParser::new(&config.parse);
        Self { config, parser }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse one dump
    pub fn parse(&self, text: &str) -> Schema {
        self.parser.parse(text)
    }

    /// Compare two already parsed schemas
    pub fn compare_schemas(&self, reference: &Schema, target: &Schema) -> SchemaDiff {
        SchemaDiff::generate(reference, target, &self.config.diff)
    }

    /// Parse both dumps and compare them
    pub fn compare_texts(&self, reference: &str, target: &str) -> SchemaDiff {
        let reference = self.parse(reference);
        let target = self.parse(target);
        self.compare_schemas(&reference, &target)
    }

    /// Read, parse and compare two dump files
    pub fn compare_files(
        &self,
        reference: impl AsRef<Path>,
        target: impl AsRef<Path>,
    ) -> Result<SchemaDiff> {
        let reference = load_schema_file(reference)?;
        let target = load_schema_file(target)?;
        Ok(self.compare_texts(&reference, &target))
    }
}
