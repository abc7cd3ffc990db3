//! Brute-force enumeration of every feasible selection.
//!
//! Exponential in the component count and only meant for small catalogues
//! and as an oracle for the SCC-based decider.

use tracing::debug;

use crate::error::{Result, SolveError};
use crate::literal::VarId;
use crate::problem::Problem;
use crate::symbols::SymbolTable;

/// Hard ceiling on the number of components an enumeration may cover.
pub const MAX_ENUMERATION_COMPONENTS: usize = 24;

/// Every selection that breaks no rule and includes all of `forced`.
///
/// Selections list component names in declaration order and come back in
/// ascending bitmask order, where bit `i` stands for component `i`. Fails
/// with `EnumerationTooLarge` when there are more than `limit` components
/// (`limit` is clamped to [`MAX_ENUMERATION_COMPONENTS`]).
pub fn enumerate_feasible<S: AsRef<str>>(
    problem: &Problem,
    forced: &[S],
    limit: usize,
) -> Result<Vec<Vec<String>>> {
    let symbols = SymbolTable::from_components(&problem.components)?;
    let requires = resolve_pairs(&symbols, &problem.requires)?;
    let conflicts = resolve_pairs(&symbols, &problem.conflicts)?;
    let forced = forced
        .iter()
        .map(|name| symbols.resolve(name.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let limit = limit.min(MAX_ENUMERATION_COMPONENTS);
    if symbols.len() > limit {
        return Err(SolveError::EnumerationTooLarge {
            components: symbols.len(),
            limit,
        });
    }
    let forced_mask = forced.iter().fold(0u32, |mask, &var| mask | 1 << var);

    let bit = |mask: u32, var: VarId| mask & (1 << var) != 0;
    let mut feasible = Vec::new();
    for mask in 0u32..(1u32 << symbols.len()) {
        if mask & forced_mask != forced_mask {
            continue;
        }
        let requires_hold = requires.iter().all(|&(a, b)| !bit(mask, a) || bit(mask, b));
        let conflicts_hold = conflicts.iter().all(|&(a, b)| !(bit(mask, a) && bit(mask, b)));
        if requires_hold && conflicts_hold {
            let selection = (0..symbols.len() as VarId)
                .filter(|&var| bit(mask, var))
                .map(|var| symbols.name(var).to_string())
                .collect();
            feasible.push(selection);
        }
    }

    debug!(count = feasible.len(), "enumerated feasible selections");
    Ok(feasible)
}

fn resolve_pairs(symbols: &SymbolTable, pairs: &[(String, String)]) -> Result<Vec<(VarId, VarId)>> {
    pairs
        .iter()
        .map(|(a, b)| Ok((symbols.resolve(a)?, symbols.resolve(b)?)))
        .collect()
}
