//! Output formatting for revelro-cli (table, json)

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print a warning message
    pub fn warn(&self, msg: &str) {
        eprintln!("{}", msg.yellow());
    }

    /// Print any serializable value as pretty JSON
    pub fn print_json<T: Serialize>(&self, data: &T) {
        println!(
            "{}",
            serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
        );
    }

    /// Print rows as a table
    pub fn print_table<T: Tabled>(&self, rows: &[T]) {
        if rows.is_empty() {
            if !self.quiet {
                println!("No data");
            }
        } else {
            println!("{}", Table::new(rows));
        }
    }

    /// Print key-value pairs
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        for (key, value) in pairs {
            println!("{}: {}", key.bold(), value);
        }
    }
}

// =============================================================================
// Display types
// =============================================================================

/// One leaf of a vehicle record
#[derive(Debug, Tabled, Serialize, PartialEq, Eq)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Flatten a JSON tree into dotted-path rows.
///
/// Array elements use their index as the path segment. Empty objects and
/// arrays produce a single row with an empty value.
pub fn flatten(value: &Value) -> Vec<FieldRow> {
    let mut rows = Vec::new();
    flatten_into(value, String::new(), &mut rows);
    rows
}

fn flatten_into(value: &Value, path: String, rows: &mut Vec<FieldRow>) {
    let child = |key: &str| {
        if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path, key)
        }
    };

    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, item) in map {
                flatten_into(item, child(key), rows);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (idx, item) in items.iter().enumerate() {
                flatten_into(item, child(&idx.to_string()), rows);
            }
        }
        leaf => rows.push(FieldRow {
            field: path,
            value: scalar_text(leaf),
        }),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Object(_) | Value::Array(_) => String::new(),
        other => other.to_string(),
    }
}
