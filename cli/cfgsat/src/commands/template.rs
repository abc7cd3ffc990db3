//! `cfgsat template`: built-in product rule sets.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cfgsat_rules::{find_template, render_rules, templates, RuleFile};
use tracing::info;

use crate::config::OutputFormat;

/// List the built-in templates.
pub fn list() -> Result<()> {
    println!("Built-in templates:");
    println!();
    for template in templates() {
        println!("  {:<20} {}", template.name, template.description);
    }
    println!();
    println!("Use 'cfgsat template show <name>' for the rules.");
    Ok(())
}

/// Print a template in rule file format, or as JSON.
pub fn show(name: &str, format: OutputFormat) -> Result<()> {
    let template = match find_template(name) {
        Ok(template) => template,
        Err(e) => bail!("{e}. Use 'cfgsat template list' to see available templates."),
    };
    print!("{}", render(&template.to_rule_file(), format)?);
    Ok(())
}

pub(crate) fn render(file: &RuleFile, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_rules(file)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(file).context("serializing template")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write a template to `output`, or to `<name>.rules` in `dir`.
pub fn create(name: &str, output: Option<&Path>, dir: &Path) -> Result<()> {
    let path = create_file(name, output, dir)?;
    println!("Created {}", path.display());
    Ok(())
}

pub(crate) fn create_file(name: &str, output: Option<&Path>, dir: &Path) -> Result<PathBuf> {
    let template = find_template(name)?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => dir.join(template.default_filename()),
    };
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    template
        .write_to(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(template = template.name, path = %path.display(), "template written");
    Ok(path)
}
