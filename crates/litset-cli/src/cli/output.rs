//! Output formatting utilities

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use litset_literals::{LiteralValue, Quantity};
use litset_units::UnitRegistry;
use serde_json::{Value, json};
use std::fs::File;
use std::io::{IsTerminal, Write};
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable value sets
    #[default]
    Pretty,
    /// Wire-format JSON on one line
    Json,
    /// Indented wire-format JSON
    JsonPretty,
}

/// When to color terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Set up color output based on user preference
pub fn setup_colors(mode: ColorMode) {
    let enabled = match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    };
    colored::control::set_override(enabled);
}

/// Format an error for display, including its context chain
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", "Success:".green().bold(), message)
}

/// Name derived units after a registered unit when one matches, e.g. `W` for `V·A`
pub fn with_named_unit(value: &LiteralValue, units: &UnitRegistry) -> LiteralValue {
    let LiteralValue::Numbers(quantity) = value else {
        return value.clone();
    };
    if quantity.unit().symbol().is_some() || quantity.unit().is_dimensionless() {
        return value.clone();
    }
    match units.find_named(quantity.unit()) {
        Some(named) => Quantity::new(quantity.values().clone(), named.clone()).into(),
        None => value.clone(),
    }
}

/// One literal as a colored line: kind, then its values
pub fn pretty_line(value: &LiteralValue, units: &UnitRegistry) -> String {
    let named = with_named_unit(value, units);
    format!("{} {}", format!("{}:", named.kind()).cyan(), named.pretty_str())
}

/// Render literals in the requested format
pub fn render(
    values: &[LiteralValue],
    format: OutputFormat,
    units: &UnitRegistry,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(values
            .iter()
            .map(|v| pretty_line(v, units))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let serialized = values
                .iter()
                .map(LiteralValue::serialize)
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to serialize literal")?;
            let document = match serialized.as_slice() {
                [single] => single.clone(),
                _ => Value::Array(serialized),
            };
            format_json(&document, format == OutputFormat::JsonPretty)
        }
    }
}

/// Render a yes/no answer
pub fn render_bool(answer: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty if answer => Ok("true".green().bold().to_string()),
        OutputFormat::Pretty => Ok("false".red().bold().to_string()),
        _ => format_json(&json!(answer), false),
    }
}

pub fn format_json(value: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        writeln!(file, "{content}")
            .with_context(|| format!("Failed to write to output file: {}", path.display()))?;
        eprintln!(
            "{}",
            format_success(&format!("Output written to {}", path.display()))
        );
    } else {
        println!("{content}");
    }
    Ok(())
}
