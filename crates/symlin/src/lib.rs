//! # symlin
//!
//! Linear systems from symbolic equality constraints, for building
//! optimization problems such as model-predictive control.
//!
//! ## Features
//!
//! - **Expression Arena**: hash-consed expressions with exact rationals
//! - **Canonical Forms**: polynomial normal forms over opaque atoms
//! - **Ordered Unknowns**: insertion-ordered sets fixing the column order
//! - **Extraction**: `A u = b` with parameters kept symbolic, a canonical
//!   row sign, and structured errors for nonlinear or degenerate rows
//!
//! ## Quick Start
//!
//! ```rust
//! use smallvec::smallvec;
//! use symlin::prelude::*;
//!
//! let mut arena = ExprArena::new();
//! let x = arena.symbol("x");
//! let y = arena.symbol("y");
//! let three = arena.integer(3);
//! let four = arena.integer(4);
//! let three_y = arena.mul(smallvec![three, y]);
//! let rhs = arena.add(smallvec![three_y, four]);
//!
//! let mut system = EqualityConstraintSystem::new();
//! system.append_equation(x, rhs);
//!
//! let unknowns: OrderedVariableSet = [y, x]
//!     .iter()
//!     .filter_map(|&h| arena.as_symbol(h))
//!     .collect();
//!
//! let mut algebra = ExprConverter::new(&mut arena);
//! let linear = system.convert_to_linear_system(&mut algebra, &unknowns)?;
//! drop(algebra);
//!
//! assert_eq!(arena.display(linear[(0, 0)]).to_string(), "3");
//! assert_eq!(arena.display(linear[(0, 1)]).to_string(), "-1");
//! assert_eq!(arena.display(linear.constants()[0]).to_string(), "-4");
//! # Ok::<(), symlin::constraints::ExtractionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use symlin_constraints as constraints;
pub use symlin_core as core;
pub use symlin_poly as poly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use symlin_constraints::{
        EqualityConstraint, EqualityConstraintSystem, ExtractionConfig, ExtractionError,
        LinearSystem, OrderedSet, OrderedVariableSet, SignConvention, SymbolicAlgebra,
    };
    pub use symlin_core::{functions, ExprArena, ExprHandle, ExprNode, Rational, SymbolId};
    pub use symlin_poly::{ExprConverter, SparsePoly};
}
