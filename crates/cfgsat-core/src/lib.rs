//! Feasibility core for product configurations.
//!
//! Components are Boolean variables ("selected" / "not selected") and the
//! rules between them are binary, so deciding whether a configuration
//! exists is an instance of 2-SAT. The pipeline runs strictly one way:
//!
//! 1. **Rule compiler** ([`cnf`]): names to variable ids, rules to
//!    implications `L ⇒ M`.
//! 2. **Implication graph** ([`graph`]): every implication plus its
//!    contrapositive.
//! 3. **SCC finder** ([`scc`]): Tarjan's algorithm over the graph.
//! 4. **Decider / assigner** ([`decide`]): a variable whose two literals
//!    share an SCC is contradicted; otherwise SCC order yields a total
//!    assignment.
//!
//! [`solve`](solve::solve) composes all four. [`check`] and [`enumerate`]
//! answer the same question by direct evaluation for a given selection or
//! for every selection.

pub mod check;
pub mod cnf;
pub mod decide;
pub mod enumerate;
pub mod error;
pub mod graph;
pub mod literal;
pub mod problem;
pub mod scc;
pub mod solve;
pub mod symbols;

pub use check::{check_selection, Violation};
pub use cnf::{compile, compile_forced, compile_problem, Cnf};
pub use decide::{decide, Decision};
pub use enumerate::{enumerate_feasible, MAX_ENUMERATION_COMPONENTS};
pub use error::{Result, SolveError};
pub use graph::{build_graph, ImplicationGraph};
pub use literal::{Literal, VarId};
pub use problem::{Problem, Rule};
pub use scc::{tarjan, SccPartition};
pub use solve::{implied_components, solve, solve_cnf, Assignment, Outcome};
pub use symbols::SymbolTable;
