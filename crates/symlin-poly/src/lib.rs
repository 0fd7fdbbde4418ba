//! # symlin-poly
//!
//! Polynomial normal forms over symlin expressions.
//!
//! This crate provides:
//! - Sorted sparse monomials over expression atoms with signed exponents
//! - Sparse Laurent polynomials with exact rational coefficients
//! - Conversion between expressions and normal form, giving canonical
//!   expressions that compare by handle
//! - Linear coefficient extraction and zero substitution
//!
//! ## Atoms
//!
//! Anything that is not a sum, product, quotient, negation or integer power
//! is treated as an opaque atom: symbols, function applications with
//! canonical arguments, powers with non-integer exponents and reciprocals
//! of multi-term sums.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod convert;
pub mod monomial;
pub mod sparse;

#[cfg(test)]
mod proptests;

pub use convert::{ConvertError, ExprConverter};
pub use monomial::Monomial;
pub use sparse::SparsePoly;
