//! Operators command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use litset_literals::Operator;
use serde_json::json;

/// Table of every foldable operator with its arity
pub fn list(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let width = Operator::ALL.iter().map(|op| op.name().len()).max().unwrap_or(0);
            Ok(Operator::ALL
                .iter()
                .map(|op| {
                    let kind = if op.is_predicate() { "predicate" } else { "" };
                    format!(
                        "{}  {:<12} {}",
                        format!("{:<width$}", op.name()).bold(),
                        op.arity().to_string(),
                        kind.dimmed()
                    )
                    .trim_end()
                    .to_string()
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let table: Vec<_> = Operator::ALL
                .iter()
                .map(|op| {
                    json!({
                        "name": op.name(),
                        "arity": op.arity().to_string(),
                        "predicate": op.is_predicate(),
                    })
                })
                .collect();
            output::format_json(&json!(table), format == OutputFormat::JsonPretty)
        }
    }
}
