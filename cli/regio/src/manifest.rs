//! `regio.toml` manifest parsing for batch generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The top-level manifest structure for a batch generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegioManifest {
    /// Project metadata and input description (required).
    pub project: ProjectConfig,
    /// Output placement.
    #[serde(default)]
    pub output: OutputConfig,
    /// Peripherals to generate headers for.
    #[serde(default)]
    pub peripherals: Vec<PeripheralEntry>,
    /// Vector-table generation; absent means no handlers file.
    #[serde(default)]
    pub handlers: Option<HandlersConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// SVD file to read, relative to the manifest.
    pub svd: PathBuf,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Output placement section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated files land in, relative to the manifest.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("io")
}

/// One peripheral to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeripheralEntry {
    /// Peripheral name as it appears in the SVD.
    pub name: String,
    /// Output filename; defaults to the lower-cased name plus `.hpp`.
    #[serde(default)]
    pub file: Option<String>,
}

impl PeripheralEntry {
    /// The filename this entry's header is written to.
    pub fn file_name(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| format!("{}.hpp", self.name.to_lowercase()))
    }
}

/// Vector-table generation section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlersConfig {
    /// Output filename for the handlers setup file.
    #[serde(default = "default_handlers_file")]
    pub file: String,
}

fn default_handlers_file() -> String {
    "handlers.cpp".to_string()
}

impl RegioManifest {
    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing regio.toml")
    }
}
