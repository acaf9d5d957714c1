//! Runs the `schema_compare` binary against dumps on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::{tempdir, TempDir};

const USERS: &str = "\
CREATE TABLE `users` (
  `id` INT NOT NULL,
  `name` VARCHAR(50),
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8;
";

struct Dumps {
    _dir: TempDir,
    a: PathBuf,
    b: PathBuf,
}

fn dumps(a: &str, b: &str) -> Dumps {
    let dir = tempdir().unwrap();
    let path_a = dir.path().join("a.sql");
    let path_b = dir.path().join("b.sql");
    fs::write(&path_a, a).unwrap();
    fs::write(&path_b, b).unwrap();
    Dumps {
        _dir: dir,
        a: path_a,
        b: path_b,
    }
}

fn run(a: &Path, b: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schema_compare"))
        .arg(a)
        .arg(b)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn headers_default_to_file_paths() {
    let files = dumps(USERS, "");
    let output = run(&files.a, &files.b, &[]);

    assert!(output.status.success());
    let out = stdout(&output);
    let header = out.lines().find(|l| l.starts_with("Type")).unwrap();
    assert!(header.contains(&files.a.display().to_string()), "{header}");
    assert!(header.contains(&files.b.display().to_string()), "{header}");
    assert!(out.contains("MISSING_TABLE"));
}

#[test]
fn labels_replace_paths_in_headers() {
    let files = dumps(USERS, USERS);
    let output = run(&files.a, &files.b, &["--label-a", "prod", "--label-b", "staging"]);

    assert_eq!(stdout(&output), "Diffs\n\nType | Target | prod | staging\n");
}

#[rstest]
#[case::no_flag(&[], 0)]
#[case::fail_on_diff(&["--fail-on-diff"], 1)]
fn exit_status_on_differences(#[case] args: &[&str], #[case] code: i32) {
    let files = dumps(USERS, "");
    assert_eq!(run(&files.a, &files.b, args).status.code(), Some(code));
}

#[test]
fn fail_on_diff_succeeds_when_schemas_match() {
    let files = dumps(USERS, USERS);
    assert_eq!(run(&files.a, &files.b, &["--fail-on-diff"]).status.code(), Some(0));
}

#[test]
fn format_flag_overrides_config() {
    let files = dumps(USERS, "");
    let config = files.a.with_file_name("schema_compare.toml");
    fs::write(&config, "[output]\nformat = \"yaml\"\n").unwrap();

    let output = run(
        &files.a,
        &files.b,
        &["--config", config.to_str().unwrap(), "--format", "json"],
    );
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["diffs"][0]["kind"], "MISSING_TABLE");

    let output = run(&files.a, &files.b, &["--config", config.to_str().unwrap()]);
    let value: serde_yaml::Value = serde_yaml::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["diffs"][0]["target"].as_str(), Some("users"));
}

#[rstest]
#[case::yaml("yaml")]
#[case::json("json")]
fn dump_in_structured_formats_is_one_document(#[case] format: &str) {
    let files = dumps(USERS, "");
    let output = run(&files.a, &files.b, &["--dump", "--format", format]);
    let out = stdout(&output);

    let value: serde_json::Value = if format == "json" {
        serde_json::from_str(&out).unwrap()
    } else {
        serde_yaml::from_str(&out).unwrap()
    };
    assert_eq!(value["schemas"]["a"]["tables"]["users"]["name"], "users");
    assert_eq!(value["schemas"]["b"]["tables"], serde_json::json!({}));
    assert_eq!(value["diffs"][0]["kind"], "MISSING_TABLE");
}

#[test]
fn table_dump_is_headed_by_labels() {
    let files = dumps(USERS, "");
    let output = run(
        &files.a,
        &files.b,
        &["--dump", "--label-a", "prod", "--label-b", "staging"],
    );
    let out = stdout(&output);

    let prod = out.find("Schema: prod").unwrap();
    let staging = out.find("Schema: staging").unwrap();
    let table = out.find("Table: users").unwrap();
    let diffs = out.find("Diffs").unwrap();
    assert!(prod < table && table < staging && staging < diffs, "{out}");
}

#[test]
fn verbosity_raises_log_level() {
    let files = dumps(USERS, "");

    let quiet = run(&files.a, &files.b, &[]);
    assert_eq!(stderr(&quiet), "");

    let info = stderr(&run(&files.a, &files.b, &["-v"]));
    assert!(info.contains("Compared schemas"), "{info}");
    assert!(!info.contains("Parsed table"), "{info}");

    let debug = stderr(&run(&files.a, &files.b, &["-vv"]));
    assert!(debug.contains("Parsed table"), "{debug}");
}

#[test]
fn unreadable_file_is_fatal() {
    let files = dumps(USERS, "");
    let missing = files.a.with_file_name("missing.sql");
    let output = run(&missing, &files.b, &[]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.contains("Failed to read schema file"), "{err}");
    assert!(err.contains(&missing.display().to_string()), "{err}");
}
