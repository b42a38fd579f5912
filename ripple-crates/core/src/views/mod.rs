//! Views are derived integer variables without storage of their own.
//!
//! A view is registered on top of a parent (a stored variable or another view) through
//! [`Engine::make_int_view`]. Whenever its value or bounds are requested, they are computed from the
//! parent on the spot. The propagation graph never sees views: an invariant that reads a view is
//! registered as a listener of the stored variable at the bottom of the view chain.
mod element_const_view;
mod in_domain_view;
mod int_abs_view;
mod int_max_view;
mod int_min_view;
mod int_offset_view;
mod scalar_view;

use std::fmt::Debug;

pub use element_const_view::*;
pub use in_domain_view::*;
pub use int_abs_view::*;
pub use int_max_view::*;
pub use int_min_view::*;
pub use int_offset_view::*;
pub use scalar_view::*;

#[cfg(doc)]
use crate::engine::Engine;

/// A function of a single parent value.
pub trait IntView: Debug + 'static {
    /// The value of the view when its parent has the value `parent_value`.
    fn map(&self, parent_value: i64) -> i64;

    /// The bounds of the view when its parent ranges over `[parent_lower_bound,
    /// parent_upper_bound]`.
    fn bounds(&self, parent_lower_bound: i64, parent_upper_bound: i64) -> (i64, i64);
}
