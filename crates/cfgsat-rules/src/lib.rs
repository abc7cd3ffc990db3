//! Rule files and product templates for the configuration solver.
//!
//! This crate is the text-facing collaborator of `cfgsat-core`: it turns
//! rule text into a [`Problem`](cfgsat_core::Problem), renders problems
//! back to text, and ships a few ready-made product rule sets.

pub mod error;
pub mod format;
pub mod template;

pub use error::{Result, RulesError};
pub use format::{load_rules, parse_rules, render_rules, write_rules, ReaderOptions, RuleFile};
pub use template::{find_template, templates, Template};
