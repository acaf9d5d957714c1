//! Line tokenizer and classifier
//!
//! Every line of a dump is handled on its own: it is trimmed, split on single
//! spaces and matched against a fixed list of rules to decide what it
//! declares. Nothing here knows whether the line sits inside a table body;
//! that is the parser's job.

use crate::schema::types::{Column, Constraint, ConstraintKind, Index};

/// First tokens that never start a column definition
const NON_COLUMN_TOKENS: &[&str] = &["PRIMARY", "KEY", "CONSTRAINT", "UNIQUE", "", "--"];

/// Options trailer emitted by MySQL dumps after the table body
const ENGINE_TRAILER: &str = "ENGINE=InnoDB";

/// What a single line declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `CREATE TABLE name (`
    TableHeader { name: String },
    /// `) ENGINE=...;` or any other line closing a table body
    TableTrailer,
    Column(Column),
    Index(Index),
    Constraint(Constraint),
    /// Blank lines, comments and anything no rule recognises
    Ignored,
    /// A recognised declaration missing the tokens it needs
    Malformed { reason: String },
}

/// Trim surrounding spaces and split on single spaces.
///
/// Runs of spaces are not collapsed, so `a  b` yields an empty token.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.trim_matches(' ').split(' ').collect()
}

/// Tokenize and classify one line
pub fn classify_line(line: &str) -> LineKind {
    classify(&tokenize(line))
}

/// Classify a tokenized line
pub fn classify(tokens: &[&str]) -> LineKind {
    let first = tokens.first().copied().unwrap_or("");

    if first == "CREATE" && tokens.get(1) == Some(&"TABLE") {
        return match tokens.get(2) {
            Some(name) => LineKind::TableHeader {
                name: strip_quotes(name).to_string(),
            },
            None => malformed("CREATE TABLE without a table name"),
        };
    }

    if tokens.get(1) == Some(&ENGINE_TRAILER) || first.starts_with(')') {
        return LineKind::TableTrailer;
    }

    if !NON_COLUMN_TOKENS.contains(&first) {
        return classify_column(tokens);
    }

    match first {
        "KEY" => classify_index(tokens),
        "CONSTRAINT" => classify_named_constraint(tokens),
        "PRIMARY" | "UNIQUE" => classify_key_constraint(tokens),
        _ => LineKind::Ignored,
    }
}

fn classify_column(tokens: &[&str]) -> LineKind {
    let (Some(name), Some(data_type)) = (tokens.first(), tokens.get(1)) else {
        return malformed("column definition without a type");
    };

    let name = strip_quotes(name);
    if name.is_empty() {
        return malformed("column definition with an empty name");
    }

    LineKind::Column(Column {
        name: name.to_string(),
        data_type: data_type.trim_end_matches(',').to_string(),
        other: join_rest(tokens, 2),
    })
}

fn classify_index(tokens: &[&str]) -> LineKind {
    let (Some(name), Some(columns)) = (tokens.get(1), tokens.get(2)) else {
        return malformed("KEY without an index name and column list");
    };

    LineKind::Index(Index {
        name: strip_quotes(name).to_string(),
        column_name: column_from_list(columns),
    })
}

fn classify_named_constraint(tokens: &[&str]) -> LineKind {
    let (Some(name), Some(kind), Some(columns)) = (tokens.get(1), tokens.get(2), tokens.get(4))
    else {
        return malformed("CONSTRAINT without a name, kind and column list");
    };

    LineKind::Constraint(Constraint {
        name: strip_quotes(name).to_string(),
        column_name: strip_quotes(columns.trim_matches('(').trim_matches(')')).to_string(),
        kind: ConstraintKind::from_token(kind),
        other: join_rest(tokens, 5),
    })
}

fn classify_key_constraint(tokens: &[&str]) -> LineKind {
    let Some(columns) = tokens.get(2) else {
        return malformed("key declaration without a column list");
    };

    let column_name = column_from_list(columns);
    LineKind::Constraint(Constraint {
        name: column_name.clone(),
        column_name,
        kind: ConstraintKind::from_token(tokens[0]),
        other: String::new(),
    })
}

/// `(`col`),` -> `col`
fn column_from_list(token: &str) -> String {
    let token = token.trim_matches(',').trim_matches('(').trim_matches(')');
    strip_quotes(token).to_string()
}

fn strip_quotes(identifier: &str) -> &str {
    identifier.trim_matches(|c| c == '`' || c == '"')
}

/// Rejoin `tokens[from..]` with single spaces and trim surrounding commas
fn join_rest(tokens: &[&str], from: usize) -> String {
    tokens
        .get(from..)
        .unwrap_or_default()
        .join(" ")
        .trim_matches(',')
        .to_string()
}

fn malformed(reason: &str) -> LineKind {
    LineKind::Malformed {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokenize_keeps_empty_tokens_between_double_spaces() {
        assert_eq!(tokenize("  `id` INT  NOT NULL,  "), vec!["`id`", "INT", "", "NOT", "NULL,"]);
        assert_eq!(tokenize(""), vec![""]);
    }

    #[test]
    fn table_header() {
        assert_eq!(
            classify_line("CREATE TABLE `users` ("),
            LineKind::TableHeader {
                name: "users".to_string()
            }
        );
        assert!(matches!(classify_line("CREATE TABLE"), LineKind::Malformed { .. }));
    }

    #[test]
    fn trailers() {
        assert_eq!(
            classify_line(") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"),
            LineKind::TableTrailer
        );
        assert_eq!(classify_line(");"), LineKind::TableTrailer);
    }

    #[test]
    fn column_definition() {
        assert_eq!(
            classify_line("  `email` varchar(255) NOT NULL DEFAULT '',"),
            LineKind::Column(Column {
                name: "email".to_string(),
                data_type: "varchar(255)".to_string(),
                other: "NOT NULL DEFAULT ''".to_string(),
            })
        );
        assert_eq!(
            classify_line("`id` INT,"),
            LineKind::Column(Column::new("id", "INT"))
        );
        assert!(matches!(classify_line("`id`"), LineKind::Malformed { .. }));
    }

    #[test]
    fn skipped_first_tokens() {
        assert_eq!(classify_line(""), LineKind::Ignored);
        assert_eq!(classify_line("-- a comment"), LineKind::Ignored);
        assert!(matches!(classify_line("KEY"), LineKind::Malformed { .. }));
    }

    #[test]
    fn index_definition() {
        assert_eq!(
            classify_line("  KEY `idx_name` (`name`),"),
            LineKind::Index(Index {
                name: "idx_name".to_string(),
                column_name: "name".to_string(),
            })
        );
    }

    #[test]
    fn named_constraint() {
        assert_eq!(
            classify_line(
                "  CONSTRAINT `fk_x` FOREIGN KEY (`org_id`) \
                 REFERENCES `orgs` (`id`) ON DELETE CASCADE,"
            ),
            LineKind::Constraint(Constraint {
                name: "fk_x".to_string(),
                column_name: "org_id".to_string(),
                kind: ConstraintKind::Other("FOREIGN".to_string()),
                other: "REFERENCES `orgs` (`id`) ON DELETE CASCADE".to_string(),
            })
        );
        assert!(matches!(
            classify_line("CONSTRAINT `fk_x` FOREIGN KEY"),
            LineKind::Malformed { .. }
        ));
    }

    #[test]
    fn primary_and_unique_keys() {
        assert_eq!(
            classify_line("  PRIMARY KEY (`id`),"),
            LineKind::Constraint(Constraint {
                name: "id".to_string(),
                column_name: "id".to_string(),
                kind: ConstraintKind::Primary,
                other: String::new(),
            })
        );
        // The third token is taken as the column, so a named unique key is
        // keyed by its name.
        let line = "  UNIQUE KEY `uk_email` (`email`),";
        let LineKind::Constraint(unique) = classify_line(line) else {
            panic!("expected a constraint");
        };
        assert_eq!(unique.kind, ConstraintKind::Unique);
        assert_eq!(unique.column_name, "uk_email");
    }
}
