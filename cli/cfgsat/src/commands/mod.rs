//! CLI command implementations.

pub mod check;
pub mod enumerate;
pub mod init;
pub mod solve;
pub mod template;

use std::path::Path;

use anyhow::{Context, Result};
use cfgsat_rules::{load_rules, ReaderOptions, RuleFile};

/// Read a rule file, attaching the path to any error.
pub(crate) fn load_rule_file(path: &Path, options: &ReaderOptions) -> Result<RuleFile> {
    load_rules(path, options).with_context(|| format!("loading rules from {}", path.display()))
}

/// Heading line for text output: the product label, or the file name.
pub(crate) fn heading(file: &RuleFile, path: &Path) -> String {
    match &file.product {
        Some(product) => product.clone(),
        None => path.display().to_string(),
    }
}
