//! Invariants which define the violation of a constraint: zero when it is satisfied and a
//! positive measure of how far off it is otherwise.
mod equal;
mod less_equal;
mod not_equal;

pub use equal::*;
pub use less_equal::*;
pub use not_equal::*;

use crate::basic_types::LocalId;

const LEFT: LocalId = LocalId::from(0);
const RIGHT: LocalId = LocalId::from(1);
