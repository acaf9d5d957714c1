use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use schema_compare::config::{self, Config};
use schema_compare::report::{render_report, ReportFormat};
use schema_compare::utils::init_logging;
use schema_compare::{load_schema_file, SchemaCompareClient};

/// Report what schema dump A declares that schema dump B lacks
#[derive(Debug, Parser)]
#[command(name = "schema_compare", version, about)]
struct Cli {
    /// Reference dump (A)
    file_a: PathBuf,

    /// Dump checked against the reference (B)
    file_b: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, overrides `output.format`
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Column header for A, defaults to its path
    #[arg(long)]
    label_a: Option<String>,

    /// Column header for B, defaults to its path
    #[arg(long)]
    label_b: Option<String>,

    /// Exit with status 1 when differences are found
    #[arg(long)]
    fail_on_diff: bool,

    /// Print both parsed schemas before the diff
    #[arg(long)]
    dump: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Log level selected by repeated `-v`, if any
fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

impl Cli {
    /// Load the configuration file, if any, and apply command-line overrides
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(format) = self.format {
            config.output.format = format;
        }
        config.output.fail_on_diff |= self.fail_on_diff;
        if let Some(level) = verbosity_level(self.verbose) {
            config.logging.level = level.to_string();
        }
        Ok(config)
    }

    /// Column headers for A and B
    fn labels(&self) -> (String, String) {
        let label_a = self
            .label_a
            .clone()
            .unwrap_or_else(|| self.file_a.display().to_string());
        let label_b = self
            .label_b
            .clone()
            .unwrap_or_else(|| self.file_b.display().to_string());
        (label_a, label_b)
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.resolve_config()?;
    init_logging(&config.logging).context("initializing logging")?;

    let text_a = load_schema_file(&cli.file_a)?;
    let text_b = load_schema_file(&cli.file_b)?;

    let client = SchemaCompareClient::new(config);
    let schema_a = client.parse(&text_a);
    let schema_b = client.parse(&text_b);
    let diff = client.compare_schemas(&schema_a, &schema_b);

    let (label_a, label_b) = cli.labels();
    let schemas = cli.dump.then_some((&schema_a, &schema_b));
    let output = &client.config().output;
    print!(
        "{}",
        render_report(diff.diffs(), &label_a, &label_b, schemas, output.format)?
    );

    if output.fail_on_diff && !diff.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    run(Cli::parse())
}
