//! Human-readable rendering of expressions.

use std::fmt;

use crate::arena::ExprArena;
use crate::expr::{functions, ExprNode};
use crate::handle::ExprHandle;
use crate::number::Rational;

// Binding strength, loosest first.
const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

/// Renders an expression with symbol names; returned by [`ExprArena::display`].
#[derive(Clone, Copy)]
pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    handle: ExprHandle,
}

impl<'a> ExprDisplay<'a> {
    pub(crate) fn new(arena: &'a ExprArena, handle: ExprHandle) -> Self {
        Self { arena, handle }
    }

    fn precedence(&self, handle: ExprHandle) -> u8 {
        match self.arena.get(handle) {
            ExprNode::Number(value) if value.is_negative() => PREC_NEG,
            ExprNode::Number(value) if !value.is_integer() => PREC_MUL,
            ExprNode::Number(_) | ExprNode::Symbol(_) | ExprNode::Function { .. } => PREC_ATOM,
            ExprNode::Add(_) => PREC_ADD,
            ExprNode::Mul(_) | ExprNode::Div { .. } => PREC_MUL,
            ExprNode::Neg(_) => PREC_NEG,
            ExprNode::Pow { .. } => PREC_POW,
        }
    }

    fn write_operand(
        &self,
        f: &mut fmt::Formatter<'_>,
        handle: ExprHandle,
        min: u8,
    ) -> fmt::Result {
        if self.precedence(handle) < min {
            f.write_str("(")?;
            self.write(f, handle)?;
            f.write_str(")")
        } else {
            self.write(f, handle)
        }
    }

    /// Splits a term into its sign and the magnitude to print after `+`/`-`.
    fn negated_magnitude(&self, handle: ExprHandle) -> Option<Magnitude<'a>> {
        match self.arena.get(handle) {
            ExprNode::Neg(inner) => Some(Magnitude::Expr(*inner)),
            ExprNode::Number(value) if value.is_negative() => {
                Some(Magnitude::Number(value.abs()))
            }
            ExprNode::Mul(args) => {
                let leading = self.arena.number_value(args[0])?;
                if !leading.is_negative() {
                    return None;
                }
                Some(Magnitude::Product(leading.abs(), &args[1..]))
            }
            _ => None,
        }
    }

    fn write_product(
        &self,
        f: &mut fmt::Formatter<'_>,
        coefficient: Option<&Rational>,
        factors: &[ExprHandle],
    ) -> fmt::Result {
        let mut first = true;
        if let Some(c) = coefficient {
            use num_traits::One;
            if !c.is_one() || factors.is_empty() {
                write!(f, "{c}")?;
                first = false;
            }
        }
        for &factor in factors {
            if !first {
                f.write_str("*")?;
            }
            self.write_operand(f, factor, PREC_NEG)?;
            first = false;
        }
        Ok(())
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, handle: ExprHandle) -> fmt::Result {
        match self.arena.get(handle) {
            ExprNode::Number(value) => write!(f, "{value}"),
            ExprNode::Symbol(id) => match self.arena.symbol_name(*id) {
                Some(name) => f.write_str(name),
                None => write!(f, "{id:?}"),
            },
            ExprNode::Add(args) => {
                self.write_operand(f, args[0], PREC_ADD)?;
                for &term in &args[1..] {
                    match self.negated_magnitude(term) {
                        Some(magnitude) => {
                            f.write_str(" - ")?;
                            match magnitude {
                                Magnitude::Expr(inner) => {
                                    self.write_operand(f, inner, PREC_MUL)?;
                                }
                                Magnitude::Number(value) => write!(f, "{value}")?,
                                Magnitude::Product(c, rest) => {
                                    self.write_product(f, Some(&c), rest)?;
                                }
                            }
                        }
                        None => {
                            f.write_str(" + ")?;
                            self.write_operand(f, term, PREC_ADD)?;
                        }
                    }
                }
                Ok(())
            }
            ExprNode::Mul(args) => {
                if let Some(leading) = self.arena.number_value(args[0]) {
                    use num_traits::One;
                    if (-leading).is_one() {
                        f.write_str("-")?;
                        return self.write_product(f, None, &args[1..]);
                    }
                    return self.write_product(f, Some(leading), &args[1..]);
                }
                self.write_product(f, None, args)
            }
            ExprNode::Pow { base, exp } => {
                self.write_operand(f, *base, PREC_ATOM)?;
                f.write_str("^")?;
                self.write_operand(f, *exp, PREC_ATOM)
            }
            ExprNode::Neg(arg) => {
                f.write_str("-")?;
                self.write_operand(f, *arg, PREC_POW)
            }
            ExprNode::Div { num, den } => {
                self.write_operand(f, *num, PREC_MUL)?;
                f.write_str("/")?;
                self.write_operand(f, *den, PREC_POW)
            }
            ExprNode::Function { id, args } => {
                write!(f, "{}(", functions::name(*id))?;
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    self.write(f, arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

enum Magnitude<'a> {
    Expr(ExprHandle),
    Number(Rational),
    Product(Rational, &'a [ExprHandle]),
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, self.handle)
    }
}

impl fmt::Debug for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} [{:?}]", self.handle)
    }
}
