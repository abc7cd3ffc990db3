//! Bidirectional component name ↔ variable id table.

use std::collections::HashMap;

use crate::error::{Result, SolveError};
use crate::literal::{Literal, VarId};

/// Maps component names to dense variable ids in declaration order.
///
/// Owned by the compiled CNF and handed to every later pipeline stage, so
/// ids are stable for the lifetime of one solve.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    ids: HashMap<String, VarId>,
}

impl SymbolTable {
    /// Assign ids `0..n` to `components` in input order.
    ///
    /// Fails on the first repeated name.
    pub fn from_components<S: AsRef<str>>(components: &[S]) -> Result<Self> {
        let mut table = Self {
            names: Vec::with_capacity(components.len()),
            ids: HashMap::with_capacity(components.len()),
        };
        for name in components {
            let name = name.as_ref();
            if table.ids.contains_key(name) {
                return Err(SolveError::DuplicateComponent {
                    name: name.to_string(),
                });
            }
            table.ids.insert(name.to_string(), table.names.len() as VarId);
            table.names.push(name.to_string());
        }
        Ok(table)
    }

    /// Look up a name, failing with `UnknownComponent`.
    pub fn resolve(&self, name: &str) -> Result<VarId> {
        self.id(name).ok_or_else(|| SolveError::UnknownComponent {
            name: name.to_string(),
        })
    }

    pub fn id(&self, name: &str) -> Option<VarId> {
        self.ids.get(name).copied()
    }

    /// Name of a variable. Panics on ids this table never issued.
    pub fn name(&self, var: VarId) -> &str {
        &self.names[var as usize]
    }

    /// Component name behind a literal, without polarity.
    pub fn literal_name(&self, lit: Literal) -> &str {
        self.name(lit.var())
    }

    /// Names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_declaration_order() {
        let table = SymbolTable::from_components(&["Foil", "Epee", "Sabre"]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.id("Foil"), Some(0));
        assert_eq!(table.id("Sabre"), Some(2));
        assert_eq!(table.name(1), "Epee");
        assert_eq!(table.literal_name(Literal::negative(2)), "Sabre");
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = SymbolTable::from_components(&["A", "B", "A"]).unwrap_err();
        assert_eq!(
            err,
            SolveError::DuplicateComponent {
                name: "A".to_string()
            }
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let table = SymbolTable::from_components(&["lid", "Lid"]).unwrap();
        assert_eq!(table.id("lid"), Some(0));
        assert_eq!(table.id("Lid"), Some(1));
        assert!(table.resolve("LID").is_err());
    }

    #[test]
    fn empty_table() {
        let table = SymbolTable::from_components::<&str>(&[]).unwrap();
        assert!(table.is_empty());
        assert!(table.names().is_empty());
    }
}
