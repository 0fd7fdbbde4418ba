//! Expression node types.

use std::fmt;

use smallvec::SmallVec;

use crate::handle::ExprHandle;
use crate::number::Rational;

/// Interned identity of a named symbol.
///
/// Two symbols with the same name in the same arena share one id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Creates an id from a raw symbol-table index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw symbol-table index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sym({})", self.0)
    }
}

/// Identifier of a built-in function, see [`functions`].
pub type FunctionId = u32;

/// An expression node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    /// An exact rational literal.
    Number(Rational),

    /// A named symbol.
    Symbol(SymbolId),

    /// Sum of two or more expressions.
    Add(SmallVec<[ExprHandle; 4]>),

    /// Product of two or more expressions.
    Mul(SmallVec<[ExprHandle; 4]>),

    /// `base ^ exp`.
    Pow {
        /// The base.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// `-arg`.
    Neg(ExprHandle),

    /// `num / den`.
    Div {
        /// The numerator.
        num: ExprHandle,
        /// The denominator.
        den: ExprHandle,
    },

    /// Application of a built-in function.
    Function {
        /// Which function.
        id: FunctionId,
        /// Its arguments.
        args: SmallVec<[ExprHandle; 2]>,
    },
}

impl ExprNode {
    /// Returns true for nodes without children.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(self, ExprNode::Number(_) | ExprNode::Symbol(_))
    }

    /// Returns the numeric value of a literal.
    #[must_use]
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            ExprNode::Number(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the symbol of a symbol node.
    #[must_use]
    pub fn as_symbol(&self) -> Option<SymbolId> {
        match self {
            ExprNode::Symbol(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the children of this node, left to right.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 4]> {
        match self {
            ExprNode::Number(_) | ExprNode::Symbol(_) => SmallVec::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Neg(arg) => smallvec::smallvec![*arg],
            ExprNode::Div { num, den } => smallvec::smallvec![*num, *den],
            ExprNode::Function { args, .. } => args.iter().copied().collect(),
        }
    }
}

/// Built-in function identifiers.
pub mod functions {
    use super::FunctionId;

    /// Sine.
    pub const SIN: FunctionId = 0;
    /// Cosine.
    pub const COS: FunctionId = 1;
    /// Tangent.
    pub const TAN: FunctionId = 2;
    /// Natural exponential.
    pub const EXP: FunctionId = 3;
    /// Natural logarithm.
    pub const LN: FunctionId = 4;
    /// Square root.
    pub const SQRT: FunctionId = 5;
    /// Absolute value.
    pub const ABS: FunctionId = 6;

    const NAMES: [&str; 7] = ["sin", "cos", "tan", "exp", "ln", "sqrt", "abs"];

    /// Returns the printable name of a function.
    #[must_use]
    pub fn name(id: FunctionId) -> &'static str {
        NAMES.get(id as usize).copied().unwrap_or("f")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom() {
        assert!(ExprNode::Number(Rational::integer(4)).is_atom());
        assert!(ExprNode::Symbol(SymbolId::new(0)).is_atom());
        assert!(!ExprNode::Neg(ExprHandle::new(0)).is_atom());
    }

    #[test]
    fn test_children_order() {
        let node = ExprNode::Div {
            num: ExprHandle::new(1),
            den: ExprHandle::new(2),
        };
        assert_eq!(node.children().as_slice(), &[ExprHandle::new(1), ExprHandle::new(2)]);
    }

    #[test]
    fn test_function_names() {
        assert_eq!(functions::name(functions::SIN), "sin");
        assert_eq!(functions::name(functions::SQRT), "sqrt");
        assert_eq!(functions::name(99), "f");
    }
}
