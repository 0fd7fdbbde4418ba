//! # symlin-core
//!
//! Symbolic expression engine for symlin.
//!
//! This crate provides:
//! - Exact rational literals backed by `dashu`
//! - Arena-allocated, hash-consed expression nodes
//! - 32-bit expression handles with O(1) structural equality
//! - Symbol interning, substitution and display
//!
//! Expressions are only built and stored here. Normal forms and coefficient
//! extraction live in `symlin-poly`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arena;
pub mod display;
pub mod expr;
pub mod handle;
pub mod intern;
pub mod number;

#[cfg(test)]
mod proptests;

pub use arena::ExprArena;
pub use display::ExprDisplay;
pub use expr::{functions, ExprNode, FunctionId, SymbolId};
pub use handle::ExprHandle;
pub use number::Rational;
