//! Signed references to component variables.

use std::fmt;
use std::ops::Not;

/// Dense variable id assigned by the rule compiler, in declaration order.
pub type VarId = u32;

/// A component variable together with a polarity.
///
/// Packed as `var << 1 | positive`: the two literals of a variable sit next
/// to each other with the negative one first, and negation is a single bit
/// flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Literal(u32);

impl Literal {
    /// Build a literal from a variable and a polarity.
    #[inline]
    pub fn new(var: VarId, positive: bool) -> Self {
        Literal((var << 1) | u32::from(positive))
    }

    /// The "selected" literal of `var`.
    #[inline]
    pub fn positive(var: VarId) -> Self {
        Self::new(var, true)
    }

    /// The "not selected" literal of `var`.
    #[inline]
    pub fn negative(var: VarId) -> Self {
        Self::new(var, false)
    }

    /// Rebuild a literal from its dense index (see [`Literal::index`]).
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Literal(index as u32)
    }

    #[inline]
    pub fn var(self) -> VarId {
        self.0 >> 1
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 & 1 == 1
    }

    /// The paired literal of the same variable with opposite polarity.
    #[inline]
    pub fn negate(self) -> Self {
        Literal(self.0 ^ 1)
    }

    /// Dense index in `0..2 * var_count`, used to address per-literal tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Truth value of this literal when its variable is set to `value`.
    #[inline]
    pub fn eval(self, value: bool) -> bool {
        value == self.is_positive()
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        self.negate()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positive() {
            write!(f, "x{}", self.var())
        } else {
            write!(f, "¬x{}", self.var())
        }
    }
}
