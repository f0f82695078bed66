//! Fold command implementation

use super::input::LiteralLoader;
use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use litset_literals::{LiteralValue, Operator, Precision, fold_with};
use std::path::PathBuf;

/// Configuration for fold command
pub struct FoldConfig {
    pub operator: String,
    /// Operand files, read in order; a file holding an array supplies several operands
    pub files: Vec<PathBuf>,
    pub precision: Precision,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Apply an operator to the literals in the given files and print the result
pub fn fold(config: FoldConfig) -> Result<()> {
    let mut loader = LiteralLoader::new();
    let result = fold_files(&mut loader, &config.operator, &config.files, &config.precision)?;
    let content = output::render(std::slice::from_ref(&result), config.format, loader.units())?;
    output::write_output(&content, config.output_file.as_deref())
}

pub fn fold_files(
    loader: &mut LiteralLoader,
    operator: &str,
    files: &[PathBuf],
    precision: &Precision,
) -> Result<LiteralValue> {
    let op: Operator = operator.parse()?;
    let operands = loader.load_files(files)?;
    log::info!("folding {} over {} operand(s)", op.name(), operands.len());
    fold_with(op, &operands, precision).with_context(|| format!("Failed to apply {}", op.name()))
}
