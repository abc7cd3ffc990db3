//! `cfgsat enumerate`: list every feasible selection by brute force.

use std::path::Path;

use anyhow::{Context, Result};
use cfgsat_core::enumerate_feasible;
use cfgsat_rules::ReaderOptions;
use serde_json::json;

use crate::config::OutputFormat;

/// Enumerate the feasible selections of the rule file at `path` that
/// include every component in `select`. Returns whether at least one exists.
pub fn run(
    path: &Path,
    options: &ReaderOptions,
    select: &[String],
    limit: usize,
    format: OutputFormat,
) -> Result<bool> {
    let file = super::load_rule_file(path, options)?;
    let selections = enumerate_feasible(&file.problem, select, limit)
        .with_context(|| format!("enumerating {}", path.display()))?;

    match format {
        OutputFormat::Text => {
            let heading = super::heading(&file, path);
            print!("{}", render_text(&heading, &selections));
        }
        OutputFormat::Json => {
            let report = json!({
                "product": file.product,
                "requested": select,
                "count": selections.len(),
                "configurations": selections,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(!selections.is_empty())
}

pub(crate) fn render_text(heading: &str, selections: &[Vec<String>]) -> String {
    let mut text = format!("=== {heading} ===\n");
    text.push_str(&format!("{} feasible configuration(s)\n", selections.len()));
    for (index, selection) in selections.iter().enumerate() {
        let listed = if selection.is_empty() {
            "(none)".to_string()
        } else {
            selection.join(", ")
        };
        text.push_str(&format!("  {:>4}. {listed}\n", index + 1));
    }
    text
}
