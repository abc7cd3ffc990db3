//! `cfgsat.toml` configuration discovery and parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cfgsat_rules::ReaderOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE: &str = "cfgsat.toml";

/// The top-level configuration. Every section and field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CfgsatConfig {
    /// Rule file reader settings.
    #[serde(default)]
    pub rules: RulesConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// Brute-force enumeration settings.
    #[serde(default)]
    pub enumerate: EnumerateConfig,
}

/// `[rules]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RulesConfig {
    /// Declare rule operands that are missing from the component list.
    #[serde(default)]
    pub implicit_components: bool,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How results are printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `[enumerate]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnumerateConfig {
    /// Largest component count `cfgsat enumerate` accepts.
    #[serde(default = "default_max_components")]
    pub max_components: usize,
}

impl Default for EnumerateConfig {
    fn default() -> Self {
        Self {
            max_components: default_max_components(),
        }
    }
}

fn default_max_components() -> usize {
    16
}

impl CfgsatConfig {
    /// Search upward from `start_dir` for `cfgsat.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load a config file from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Explicit path if given, otherwise upward discovery, otherwise defaults.
    pub fn resolve(cwd: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading configuration");
            return Self::load(path);
        }
        match Self::find_and_load(cwd)? {
            Some((config, dir)) => {
                debug!(dir = %dir.display(), "found {CONFIG_FILE}");
                Ok(config)
            }
            None => {
                debug!("no {CONFIG_FILE} found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing cfgsat.toml")
    }

    /// Reader options with an optional command-line override.
    pub fn reader_options(&self, implicit_override: bool) -> ReaderOptions {
        ReaderOptions {
            implicit_components: implicit_override || self.rules.implicit_components,
        }
    }

    /// Output format, command line first.
    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.unwrap_or(self.output.format)
    }

    /// Default contents written by `cfgsat init`.
    pub fn template() -> String {
        r#"[rules]
implicit-components = false

[output]
format = "text"

[enumerate]
max-components = 16
"#
        .to_string()
    }
}
