//! `cfgsat solve`: decide a rule file, optionally with components forced on.

use std::path::Path;

use anyhow::{Context, Result};
use cfgsat_core::{implied_components, solve, Outcome};
use cfgsat_rules::{ReaderOptions, RuleFile};
use serde::Serialize;

use crate::config::OutputFormat;

#[derive(Serialize)]
struct SolveReport<'a> {
    product: Option<&'a str>,
    requested: &'a [String],
    implied: &'a [String],
    outcome: &'a Outcome,
}

/// Solve the rule file at `path`. Returns whether the configuration is
/// feasible.
pub fn run(
    path: &Path,
    options: &ReaderOptions,
    select: &[String],
    format: OutputFormat,
) -> Result<bool> {
    let file = super::load_rule_file(path, options)?;
    let outcome = solve(&file.problem, select)
        .with_context(|| format!("solving {}", path.display()))?;
    let implied = if outcome.is_feasible() {
        implied_components(&file.problem, select)?
    } else {
        Vec::new()
    };

    let output = match format {
        OutputFormat::Text => {
            render_text(&super::heading(&file, path), select, &implied, &outcome)
        }
        OutputFormat::Json => render_json(&file, select, &implied, &outcome)?,
    };
    print!("{output}");
    Ok(outcome.is_feasible())
}

/// Human-readable report. Selected components are labelled `requested`,
/// `implied` (forced by a requested one) or `free choice`.
pub(crate) fn render_text(
    heading: &str,
    requested: &[String],
    implied: &[String],
    outcome: &Outcome,
) -> String {
    let mut text = format!("=== {heading} ===\n");
    if !requested.is_empty() {
        text.push_str(&format!("Requested: {}\n", requested.join(", ")));
    }
    match outcome {
        Outcome::Feasible { assignment } => {
            text.push_str("Configuration is possible.\n");
            text.push_str("Selected components:\n");
            let mut any = false;
            for name in assignment.selected() {
                let origin = if requested.iter().any(|r| r == name) {
                    "requested"
                } else if implied.iter().any(|i| i == name) {
                    "implied"
                } else {
                    "free choice"
                };
                text.push_str(&format!("  {name:<24} ({origin})\n"));
                any = true;
            }
            if !any {
                text.push_str("  (none)\n");
            }
        }
        Outcome::Infeasible {
            component,
            implicated,
        } => {
            text.push_str("Configuration is NOT possible.\n");
            if let Some(name) = component {
                text.push_str(&format!("Contradiction on component '{name}'.\n"));
            }
            let others: Vec<&str> = implicated
                .iter()
                .map(String::as_str)
                .filter(|n| Some(*n) != component.as_deref())
                .collect();
            if !others.is_empty() {
                text.push_str(&format!("Also contradicted: {}\n", others.join(", ")));
            }
        }
    }
    text
}

pub(crate) fn render_json(
    file: &RuleFile,
    requested: &[String],
    implied: &[String],
    outcome: &Outcome,
) -> Result<String> {
    let report = SolveReport {
        product: file.product.as_deref(),
        requested,
        implied,
        outcome,
    };
    let mut json = serde_json::to_string_pretty(&report).context("serializing solve report")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgsat_core::Problem;

    fn coffee() -> Problem {
        Problem::new(["Milk", "Lid", "Flush"])
            .requires("Milk", "Lid")
            .requires("Milk", "Flush")
    }

    fn report(problem: &Problem, requested: &[String]) -> String {
        let outcome = solve(problem, requested).unwrap();
        let implied = implied_components(problem, requested).unwrap();
        render_text("Coffee", requested, &implied, &outcome)
    }

    fn line_for<'a>(text: &'a str, name: &str) -> Option<&'a str> {
        text.lines().find(|l| l.split_whitespace().next() == Some(name))
    }

    #[test]
    fn text_marks_requested_and_implied() {
        let text = report(&coffee(), &["Milk".to_string()]);

        assert!(text.contains("Configuration is possible."));
        assert!(line_for(&text, "Milk").unwrap().ends_with("(requested)"));
        assert!(line_for(&text, "Lid").unwrap().ends_with("(implied)"));
        assert!(line_for(&text, "Flush").unwrap().ends_with("(implied)"));
    }

    #[test]
    fn text_without_selection_implies_nothing() {
        let text = report(&coffee(), &[]);

        assert!(!text.contains("Requested:"));
        assert!(!text.contains("(implied)"));
        assert!(!text.contains("(requested)"));
        for name in ["Milk", "Lid", "Flush"] {
            if let Some(line) = line_for(&text, name) {
                assert!(line.ends_with("(free choice)"), "{line}");
            }
        }
    }

    #[test]
    fn text_with_empty_selection_says_none() {
        let outcome = solve::<&str>(&Problem::default(), &[]).unwrap();
        let text = render_text("Empty", &[], &[], &outcome);
        assert!(text.contains("Configuration is possible."));
        assert!(text.contains("(none)"));
    }

    #[test]
    fn unrelated_selection_is_not_implied() {
        let mut problem = coffee().requires("Heater", "Flush");
        problem.components.push("Heater".to_string());
        let text = report(&problem, &["Heater".to_string()]);

        assert!(line_for(&text, "Flush").unwrap().ends_with("(implied)"));
        assert!(!line_for(&text, "Lid").is_some_and(|l| l.ends_with("(implied)")));
    }

    #[test]
    fn text_names_contradiction() {
        let problem = Problem::new(["BigTank", "ExtraHeater"]).conflicts("BigTank", "ExtraHeater");
        let requested = vec!["BigTank".to_string(), "ExtraHeater".to_string()];
        let outcome = solve(&problem, &requested).unwrap();
        let text = render_text("Coffee", &requested, &[], &outcome);

        assert!(text.contains("Configuration is NOT possible."));
        assert!(text.contains("Contradiction on component 'BigTank'"));
    }

    #[test]
    fn json_report_shape() {
        let file = RuleFile {
            product: Some("Coffee".to_string()),
            problem: coffee(),
        };
        let requested = vec!["Milk".to_string()];
        let outcome = solve(&file.problem, &requested).unwrap();
        let implied = implied_components(&file.problem, &requested).unwrap();
        let json = render_json(&file, &requested, &implied, &outcome).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["product"], "Coffee");
        assert_eq!(value["requested"][0], "Milk");
        assert_eq!(value["implied"], serde_json::json!(["Lid", "Flush"]));
        assert_eq!(value["outcome"]["status"], "feasible");
        assert_eq!(value["outcome"]["assignment"]["Lid"], true);
    }
}
