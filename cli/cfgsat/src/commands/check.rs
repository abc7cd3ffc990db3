//! `cfgsat check`: test one concrete selection against every rule.

use std::path::Path;

use anyhow::{Context, Result};
use cfgsat_core::{check_selection, Violation};
use cfgsat_rules::ReaderOptions;
use serde_json::json;

use crate::config::OutputFormat;

/// Check `select` against the rule file at `path`. Returns whether the
/// selection breaks no rule.
pub fn run(
    path: &Path,
    options: &ReaderOptions,
    select: &[String],
    format: OutputFormat,
) -> Result<bool> {
    let file = super::load_rule_file(path, options)?;
    let violations = check_selection(&file.problem, select)
        .with_context(|| format!("checking selection against {}", path.display()))?;

    match format {
        OutputFormat::Text => {
            let heading = super::heading(&file, path);
            print!("{}", render_text(&heading, select, &violations));
        }
        OutputFormat::Json => {
            let report = json!({
                "product": file.product,
                "selected": select,
                "valid": violations.is_empty(),
                "violations": violations,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(violations.is_empty())
}

pub(crate) fn render_text(heading: &str, selected: &[String], violations: &[Violation]) -> String {
    let mut text = format!("=== {heading} ===\n");
    if selected.is_empty() {
        text.push_str("Selected: (none)\n");
    } else {
        text.push_str(&format!("Selected: {}\n", selected.join(", ")));
    }
    if violations.is_empty() {
        text.push_str("Selection satisfies every rule.\n");
    } else {
        text.push_str(&format!("{} violation(s):\n", violations.len()));
        for violation in violations {
            text.push_str(&format!("  - {violation}\n"));
        }
    }
    text
}
