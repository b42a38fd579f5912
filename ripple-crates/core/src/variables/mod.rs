//! Storage of integer variables and the views layered on top of them.
mod int_var;
mod variable_store;

pub(crate) use int_var::*;
pub(crate) use variable_store::*;
