//! Invariants and the contexts through which the engine drives them.
//!
//! The [`Invariant`] trait is the contract between the engine and a functional relation. The
//! invariants in this module cover the common arithmetic and selection relations; the violation
//! invariants in [`violation_invariants`] turn constraints into violation variables.
mod contexts;
mod element_var;
mod extremum;
mod if_then_else;
mod input_cursor;
mod invariant;
mod linear;
pub mod violation_invariants;

pub use contexts::*;
pub use element_var::*;
pub use extremum::*;
pub use if_then_else::*;
pub use input_cursor::*;
pub use invariant::*;
pub use linear::*;
