//! Plain-text rule format.
//!
//! ```text
//! # comments and blank lines are skipped
//! product: Coffee Machine
//! Milk
//! Lid
//! Milk REQUIRES Lid
//! Milk CONFLICTS BigTank
//! ```
//!
//! A line whose whitespace-separated tokens include `REQUIRES` or
//! `CONFLICTS` must be exactly `A KEYWORD B`. Keywords are case-sensitive.
//! Every other line declares one component, named by the trimmed line.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use cfgsat_core::{Problem, Rule};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, RulesError};

const REQUIRES: &str = "REQUIRES";
const CONFLICTS: &str = "CONFLICTS";
const PRODUCT_PREFIX: &str = "product:";

/// A parsed rule file: an optional product label plus the problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleFile {
    pub product: Option<String>,
    pub problem: Problem,
}

/// Reader behaviour switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    /// Declare rule operands that never appear on a component line,
    /// appended after the explicit components in first-appearance order.
    /// When off they are kept as-is and the solver rejects them.
    pub implicit_components: bool,
}

/// Parse rule text. A leading UTF-8 byte order mark is ignored.
pub fn parse_rules(text: &str, options: &ReaderOptions) -> Result<RuleFile> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut file = RuleFile::default();
    let mut operands: Vec<String> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(product) = line.strip_prefix(PRODUCT_PREFIX) {
            file.product = Some(product.trim().to_string());
            continue;
        }

        match parse_rule(line, index + 1)? {
            Some(rule) => {
                let (a, b) = rule.operands();
                operands.push(a.to_string());
                operands.push(b.to_string());
                file.problem.add_rule(rule);
            }
            None => file.problem.components.push(line.to_string()),
        }
    }

    if options.implicit_components {
        let mut declared: HashSet<String> = file.problem.components.iter().cloned().collect();
        for name in operands {
            if declared.insert(name.clone()) {
                warn!(component = %name, "declaring component implicitly from a rule");
                file.problem.components.push(name);
            }
        }
    }

    debug!(
        components = file.problem.components.len(),
        rules = file.problem.rule_count(),
        "parsed rule file"
    );
    Ok(file)
}

/// `Ok(None)` for a component line, `Ok(Some(rule))` for a rule line.
fn parse_rule(line: &str, line_number: usize) -> Result<Option<Rule>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if !tokens.iter().any(|t| *t == REQUIRES || *t == CONFLICTS) {
        return Ok(None);
    }
    match tokens.as_slice() {
        [a, REQUIRES, b] => Ok(Some(Rule::requires(*a, *b))),
        [a, CONFLICTS, b] => Ok(Some(Rule::conflicts(*a, *b))),
        _ => Err(RulesError::MalformedRule {
            line: line_number,
            text: line.to_string(),
        }),
    }
}

/// Read and parse a rule file from disk.
pub fn load_rules(path: &Path, options: &ReaderOptions) -> Result<RuleFile> {
    let text = fs::read_to_string(path)?;
    parse_rules(&text, options)
}

/// Render a rule file: product line, components, requires, conflicts.
pub fn render_rules(file: &RuleFile) -> String {
    let mut text = String::new();
    if let Some(product) = &file.product {
        text.push_str(&format!("{PRODUCT_PREFIX} {product}\n"));
    }
    for component in &file.problem.components {
        text.push_str(&format!("{component}\n"));
    }
    for rule in file.problem.rules() {
        text.push_str(&format!("{rule}\n"));
    }
    text
}

/// Write a rule file to disk.
pub fn write_rules(path: &Path, file: &RuleFile) -> Result<()> {
    fs::write(path, render_rules(file))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COFFEE: &str = "\
# coffee machine
product: Coffee Machine

Milk
Lid
Flush
Milk REQUIRES Lid
Milk REQUIRES Flush
Lid CONFLICTS Flush
";

    #[test]
    fn parses_components_and_rules() {
        let file = parse_rules(COFFEE, &ReaderOptions::default()).unwrap();
        assert_eq!(file.product.as_deref(), Some("Coffee Machine"));
        assert_eq!(file.problem.components, vec!["Milk", "Lid", "Flush"]);
        assert_eq!(
            file.problem.requires,
            vec![
                ("Milk".to_string(), "Lid".to_string()),
                ("Milk".to_string(), "Flush".to_string()),
            ]
        );
        assert_eq!(
            file.problem.conflicts,
            vec![("Lid".to_string(), "Flush".to_string())]
        );
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let text = "\u{feff}Milk\nLid\nMilk REQUIRES Lid\n";
        let file = parse_rules(text, &ReaderOptions::default()).unwrap();
        assert_eq!(file.problem.components, vec!["Milk", "Lid"]);

        let outcome = cfgsat_core::solve(&file.problem, &["Milk"]).unwrap();
        assert!(outcome.assignment().unwrap().is_selected("Lid"));
    }

    #[test]
    fn serializes_product_and_problem() {
        let file = parse_rules(COFFEE, &ReaderOptions::default()).unwrap();
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["product"], "Coffee Machine");
        assert_eq!(value["problem"]["components"][2], "Flush");
        assert_eq!(value["problem"]["requires"][0], serde_json::json!(["Milk", "Lid"]));
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let text = "  A  \n\tB\nA   REQUIRES\tB  \n";
        let file = parse_rules(text, &ReaderOptions::default()).unwrap();
        assert_eq!(file.problem.components, vec!["A", "B"]);
        assert_eq!(file.problem.requires.len(), 1);
    }

    #[test]
    fn malformed_rule_reports_line() {
        let err = parse_rules("A\nB\nA REQUIRES\n", &ReaderOptions::default()).unwrap_err();
        match err {
            RulesError::MalformedRule { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "A REQUIRES");
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert!(parse_rules("A REQUIRES B C", &ReaderOptions::default()).is_err());
        assert!(parse_rules("REQUIRES A B", &ReaderOptions::default()).is_err());
    }

    #[test]
    fn keywords_are_case_sensitive() {
        let file = parse_rules("A requires B", &ReaderOptions::default()).unwrap();
        assert_eq!(file.problem.components, vec!["A requires B"]);
        assert_eq!(file.problem.rule_count(), 0);
    }

    #[test]
    fn undeclared_operands_kept_by_default() {
        let file = parse_rules("A\nA REQUIRES Ghost\n", &ReaderOptions::default()).unwrap();
        assert_eq!(file.problem.components, vec!["A"]);
        assert!(cfgsat_core::solve::<&str>(&file.problem, &[]).is_err());
    }

    #[test]
    fn implicit_components_appended_in_first_appearance_order() {
        let options = ReaderOptions {
            implicit_components: true,
        };
        let text = "B\nC CONFLICTS A\nA REQUIRES B\nD REQUIRES C\nA\n";
        let file = parse_rules(text, &options).unwrap();
        assert_eq!(file.problem.components, vec!["B", "A", "C", "D"]);
        assert!(cfgsat_core::solve::<&str>(&file.problem, &[]).is_ok());
    }

    #[test]
    fn duplicate_component_lines_pass_through() {
        let file = parse_rules("A\nA\n", &ReaderOptions::default()).unwrap();
        assert_eq!(file.problem.components, vec!["A", "A"]);
    }

    #[test]
    fn render_then_parse_preserves_file() {
        let file = parse_rules(COFFEE, &ReaderOptions::default()).unwrap();
        let text = render_rules(&file);
        assert!(text.starts_with("product: Coffee Machine\nMilk\n"));
        assert!(text.contains("Lid CONFLICTS Flush\n"));
        assert_eq!(parse_rules(&text, &ReaderOptions::default()).unwrap(), file);
    }

    #[test]
    fn load_and_write_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        let file = parse_rules(COFFEE, &ReaderOptions::default()).unwrap();

        write_rules(&path, &file).unwrap();
        let loaded = load_rules(&path, &ReaderOptions::default()).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rules(&dir.path().join("nope.txt"), &ReaderOptions::default()).unwrap_err();
        assert!(matches!(err, RulesError::Io(_)));
    }
}
