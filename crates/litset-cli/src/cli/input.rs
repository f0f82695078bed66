//! Loading serialized literals from disk

use anyhow::{Context, Result};
use litset_literals::{DeserializeContext, EnumRegistry, LiteralValue};
use litset_units::UnitRegistry;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Decodes literal files against one unit registry, collecting enum
/// domains across every file it reads
pub struct LiteralLoader {
    units: UnitRegistry,
    enums: EnumRegistry,
}

impl LiteralLoader {
    pub fn new() -> Self {
        Self {
            units: UnitRegistry::si(),
            enums: EnumRegistry::new(),
        }
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    /// Parse a document holding one tagged literal or an array of them
    pub fn load_str(&mut self, json: &str) -> Result<Vec<LiteralValue>> {
        let document: Value = serde_json::from_str(json).context("Invalid JSON")?;
        let items = match document {
            Value::Array(items) => items,
            single => vec![single],
        };
        let mut ctx = DeserializeContext::new(&self.units, &mut self.enums);
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                LiteralValue::from_json_value(item, &mut ctx)
                    .with_context(|| format!("Failed to decode literal #{i}"))
            })
            .collect()
    }

    pub fn load_file(&mut self, path: &Path) -> Result<Vec<LiteralValue>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read literal file: {}", path.display()))?;
        let literals = self
            .load_str(&content)
            .with_context(|| format!("Failed to load literals from {}", path.display()))?;
        log::debug!("loaded {} literal(s) from {}", literals.len(), path.display());
        Ok(literals)
    }

    /// Literals of every file, in order
    pub fn load_files(&mut self, paths: &[impl AsRef<Path>]) -> Result<Vec<LiteralValue>> {
        let mut literals = Vec::new();
        for path in paths {
            literals.extend(self.load_file(path.as_ref())?);
        }
        Ok(literals)
    }

    /// Exactly one literal from `path`
    pub fn load_single(&mut self, path: &Path) -> Result<LiteralValue> {
        let mut literals = self.load_file(path)?;
        if literals.len() != 1 {
            anyhow::bail!(
                "{} holds {} literals, expected exactly one",
                path.display(),
                literals.len()
            );
        }
        Ok(literals.remove(0))
    }
}

impl Default for LiteralLoader {
    fn default() -> Self {
        Self::new()
    }
}
