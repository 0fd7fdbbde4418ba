//! # symlin-constraints
//!
//! Linear systems from symbolic equality constraints.
//!
//! This crate provides:
//! - [`OrderedSet`], an insertion-ordered set used as the column order of
//!   unknowns
//! - [`EqualityConstraintSystem`], an ordered list of equations `L == R`
//! - Extraction of `A u = b` from a constraint system, where symbols outside
//!   the ordering remain symbolic parameters in `A` and `b`
//!
//! Extraction only talks to the expression engine through
//! [`SymbolicAlgebra`]. The shipped implementation is
//! [`symlin_poly::ExprConverter`].
//!
//! ## Sign convention
//!
//! By default each row is negated when its first nonzero coefficient is a
//! negative number, so `x = 3*y + 4` and `3*y + 4 = x` give the same row.
//! See [`SignConvention`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algebra;
pub mod config;
pub mod constraint;
pub mod error;
pub mod extract;
pub mod linear_system;
pub mod ordered_set;

#[cfg(test)]
mod proptests;

pub use algebra::{Sign, SymbolicAlgebra};
pub use config::{ExtractionConfig, SignConvention};
pub use constraint::{EqualityConstraint, EqualityConstraintSystem};
pub use error::{AlgebraError, ExtractionError, OrderedSetError};
pub use linear_system::LinearSystem;
pub use ordered_set::{OrderedSet, OrderedVariableSet};
