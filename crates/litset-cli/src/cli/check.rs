//! Check command implementation

use super::input::LiteralLoader;
use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::ValueEnum;
use litset_literals::Precision;
use std::path::PathBuf;

/// Relation tested between two literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Relation {
    /// Every value of the left literal is a value of the right one
    Subset,
    /// Both literals hold the same values
    Equals,
}

/// Configuration for check command
pub struct CheckConfig {
    pub relation: Relation,
    pub lhs: PathBuf,
    pub rhs: PathBuf,
    pub precision: Precision,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Test the relation and print the answer; returns whether it holds
pub fn check(config: &CheckConfig) -> Result<bool> {
    let holds = evaluate(config)?;
    let content = output::render_bool(holds, config.format)?;
    output::write_output(&content, config.output_file.as_deref())?;
    Ok(holds)
}

pub fn evaluate(config: &CheckConfig) -> Result<bool> {
    let mut loader = LiteralLoader::new();
    let lhs = loader.load_single(&config.lhs)?;
    let rhs = loader.load_single(&config.rhs)?;
    log::debug!("checking {:?}: {lhs} against {rhs}", config.relation);

    let holds = match config.relation {
        Relation::Subset => lhs.is_subset_of_with(&rhs, &config.precision),
        Relation::Equals => lhs.equals_with(&rhs, &config.precision),
    };
    holds.with_context(|| {
        format!(
            "Cannot compare {} with {}",
            config.lhs.display(),
            config.rhs.display()
        )
    })
}
