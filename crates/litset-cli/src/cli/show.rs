//! Show command implementation

use super::input::LiteralLoader;
use super::output::{self, OutputFormat};
use anyhow::Result;
use std::path::PathBuf;

/// Configuration for show command
pub struct ShowConfig {
    pub files: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// Decode literal files and render them
pub fn show(config: ShowConfig) -> Result<()> {
    if config.files.is_empty() {
        anyhow::bail!("No files specified");
    }
    let content = render_files(&config.files, config.format)?;
    output::write_output(&content, config.output_file.as_deref())
}

pub fn render_files(files: &[PathBuf], format: OutputFormat) -> Result<String> {
    let mut loader = LiteralLoader::new();
    let literals = loader.load_files(files)?;
    output::render(&literals, format, loader.units())
}
