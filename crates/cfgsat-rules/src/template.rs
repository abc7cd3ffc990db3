//! Built-in product templates.

use std::path::Path;

use cfgsat_core::Problem;

use crate::error::{Result, RulesError};
use crate::format::{write_rules, RuleFile};

/// A ready-made product rule set.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Lookup key, e.g. `coffee-machine`.
    pub name: &'static str,
    /// Product label written to the rule file.
    pub product: &'static str,
    pub description: &'static str,
    pub components: &'static [&'static str],
    pub requires: &'static [(&'static str, &'static str)],
    pub conflicts: &'static [(&'static str, &'static str)],
}

impl Template {
    pub fn to_problem(&self) -> Problem {
        let mut problem = Problem::new(self.components.iter().copied());
        for (a, b) in self.requires {
            problem = problem.requires(*a, *b);
        }
        for (a, b) in self.conflicts {
            problem = problem.conflicts(*a, *b);
        }
        problem
    }

    pub fn to_rule_file(&self) -> RuleFile {
        RuleFile {
            product: Some(self.product.to_string()),
            problem: self.to_problem(),
        }
    }

    /// Write the template to `path` in the plain-text rule format.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_rules(path, &self.to_rule_file())
    }

    /// Default file name for `template create` without `--output`.
    pub fn default_filename(&self) -> String {
        format!("{}.rules", self.name)
    }
}

const TEMPLATES: &[Template] = &[
    Template {
        name: "coffee-machine",
        product: "Coffee Machine Standard",
        description: "Coffee machine with an optional cappuccino module",
        components: &[
            "MilkTank",
            "Lid",
            "FlushChannel",
            "MilkHeater",
            "BigWaterTank",
            "ExtraHeater",
        ],
        requires: &[
            ("MilkTank", "Lid"),
            ("MilkTank", "FlushChannel"),
            ("MilkHeater", "FlushChannel"),
        ],
        conflicts: &[("BigWaterTank", "ExtraHeater")],
    },
    Template {
        name: "fencing-kit",
        product: "Fencing Full Set",
        description: "One weapon with its protective gear and scoring equipment",
        components: &[
            "Foil",
            "Epee",
            "Sabre",
            "Mask",
            "Jacket",
            "Breeches",
            "Glove",
            "Socks",
            "FoilLame",
            "SabreLame",
            "FoilBodyWire",
        ],
        requires: &[
            ("Foil", "Mask"),
            ("Foil", "Jacket"),
            ("Foil", "Breeches"),
            ("Foil", "Glove"),
            ("Foil", "Socks"),
            ("Epee", "Mask"),
            ("Epee", "Jacket"),
            ("Epee", "Breeches"),
            ("Epee", "Glove"),
            ("Epee", "Socks"),
            ("Sabre", "Mask"),
            ("Sabre", "Jacket"),
            ("Sabre", "Breeches"),
            ("Sabre", "Glove"),
            ("Sabre", "Socks"),
            ("Foil", "FoilLame"),
            ("Foil", "FoilBodyWire"),
            ("Sabre", "SabreLame"),
        ],
        conflicts: &[
            ("Foil", "Epee"),
            ("Foil", "Sabre"),
            ("Epee", "Sabre"),
            ("Epee", "FoilLame"),
            ("Epee", "SabreLame"),
            ("Epee", "FoilBodyWire"),
            ("Sabre", "FoilLame"),
            ("Sabre", "FoilBodyWire"),
        ],
    },
    Template {
        name: "vacuum-cleaner",
        product: "Vacuum Cleaner Basic",
        description: "Cordless or corded vacuum cleaner with optional filters",
        components: &[
            "HepaFilter",
            "TurboBrush",
            "DustContainer",
            "FloorNozzle",
            "Battery",
        ],
        requires: &[("TurboBrush", "Battery"), ("HepaFilter", "DustContainer")],
        conflicts: &[("Battery", "FloorNozzle")],
    },
];

/// All built-in templates, in listing order.
pub fn templates() -> &'static [Template] {
    TEMPLATES
}

/// Look a template up by name.
pub fn find_template(name: &str) -> Result<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| RulesError::UnknownTemplate {
            name: name.to_string(),
        })
}
