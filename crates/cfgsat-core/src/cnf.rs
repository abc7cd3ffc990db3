//! Rule compiler: components and rules to implication-form 2-CNF.
//!
//! Every 2-clause `¬L ∨ M` is stored as the implication `L ⇒ M`, keyed by
//! its antecedent:
//! - `A REQUIRES B` becomes `A ⇒ B`;
//! - `A CONFLICTS B` becomes `A ⇒ ¬B` and `B ⇒ ¬A`;
//! - forcing `X` becomes `¬X ⇒ X`, a unit clause written as a 2-clause.

use tracing::debug;

use crate::error::Result;
use crate::literal::{Literal, VarId};
use crate::problem::Problem;
use crate::symbols::SymbolTable;

/// Implications keyed by antecedent literal.
///
/// Consequents keep insertion order so diagnostics and traversal order are
/// reproducible.
#[derive(Debug, Clone)]
pub struct Cnf {
    symbols: SymbolTable,
    implied: Vec<Vec<Literal>>,
    implication_count: usize,
}

impl Cnf {
    /// An empty CNF over the variables of `symbols`.
    pub fn new(symbols: SymbolTable) -> Self {
        let literal_count = symbols.len() * 2;
        Self {
            symbols,
            implied: vec![Vec::new(); literal_count],
            implication_count: 0,
        }
    }

    /// Record `from ⇒ to`.
    pub fn add_implication(&mut self, from: Literal, to: Literal) {
        self.implied[from.index()].push(to);
        self.implication_count += 1;
    }

    /// Add `¬X ⇒ X` for the named component, forcing it true.
    pub fn force(&mut self, name: &str) -> Result<()> {
        let var = self.symbols.resolve(name)?;
        self.add_implication(Literal::negative(var), Literal::positive(var));
        Ok(())
    }

    /// Literals implied by `lit`, in insertion order.
    pub fn implied_by(&self, lit: Literal) -> &[Literal] {
        &self.implied[lit.index()]
    }

    /// Every stored `(L, M)` meaning `L ⇒ M`, by antecedent index then
    /// insertion order.
    pub fn implications(&self) -> impl Iterator<Item = (Literal, Literal)> + '_ {
        self.implied.iter().enumerate().flat_map(|(index, targets)| {
            let from = Literal::from_index(index);
            targets.iter().map(move |&to| (from, to))
        })
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn var_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn implication_count(&self) -> usize {
        self.implication_count
    }

    /// All variables in id order.
    pub fn vars(&self) -> impl Iterator<Item = VarId> {
        0..self.symbols.len() as VarId
    }
}

/// Compile components and rules into a CNF.
///
/// Variable ids follow `components` order. Duplicate names and rules that
/// reference undeclared components are rejected before anything is built.
pub fn compile<S: AsRef<str>>(
    components: &[S],
    requires: &[(S, S)],
    conflicts: &[(S, S)],
) -> Result<Cnf> {
    let symbols = SymbolTable::from_components(components)?;

    let mut implications = Vec::with_capacity(requires.len() + 2 * conflicts.len());
    for (a, b) in requires {
        let a = symbols.resolve(a.as_ref())?;
        let b = symbols.resolve(b.as_ref())?;
        implications.push((Literal::positive(a), Literal::positive(b)));
    }
    for (a, b) in conflicts {
        let a = symbols.resolve(a.as_ref())?;
        let b = symbols.resolve(b.as_ref())?;
        implications.push((Literal::positive(a), Literal::negative(b)));
        implications.push((Literal::positive(b), Literal::negative(a)));
    }

    let mut cnf = Cnf::new(symbols);
    for (from, to) in implications {
        cnf.add_implication(from, to);
    }

    debug!(
        vars = cnf.var_count(),
        implications = cnf.implication_count(),
        "compiled rules"
    );
    Ok(cnf)
}

/// [`compile`], then force every component in `forced` to true.
pub fn compile_forced<S: AsRef<str>>(
    components: &[S],
    requires: &[(S, S)],
    conflicts: &[(S, S)],
    forced: &[S],
) -> Result<Cnf> {
    let mut cnf = compile(components, requires, conflicts)?;
    for name in forced {
        cnf.force(name.as_ref())?;
    }
    Ok(cnf)
}

/// Compile a [`Problem`] with an optional forced selection.
pub fn compile_problem<S: AsRef<str>>(problem: &Problem, forced: &[S]) -> Result<Cnf> {
    let mut cnf = compile(&problem.components, &problem.requires, &problem.conflicts)?;
    for name in forced {
        cnf.force(name.as_ref())?;
    }
    Ok(cnf)
}
