use std::marker::PhantomData;

use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::InvariantContext;
use super::RegistrationContext;
use crate::basic_types::EngineError;
use crate::basic_types::InvariantId;
use crate::basic_types::LocalId;
use crate::basic_types::Timestamp;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;
#[cfg(doc)]
use crate::engine::Engine;

// Allows `Engine::invariant` to hand back the concrete type behind a `Box<dyn Invariant>`.
impl_downcast!(Invariant);

/// A functional relation which defines one or more variables in terms of its inputs.
///
/// Invariants are registered with [`Engine::make_invariant`]. Registration calls
/// [`Invariant::register_vars`], where the invariant declares its inputs and the variables it
/// defines, followed by a non-widening [`Invariant::update_bounds`].
///
/// Once the engine is closed, an invariant is driven in two ways:
/// - The input-to-output propagator tells it which of its inputs changed through
///   [`Invariant::notify_input_changed`].
/// - The output-to-input explorer pulls its inputs one at a time through
///   [`Invariant::next_input`] and reports a change of the most recently pulled input through
///   [`Invariant::notify_current_input_changed`].
///
/// Both paths must leave the defined variables with the value [`Invariant::recompute`] would
/// produce at the same timestamp. Both may be used within the same round, so being notified twice
/// about the same change must not alter the result.
///
/// An invariant may only write to the variables it defines and should only read the inputs it
/// registered. Reading anything else is not detected and breaks incremental propagation.
pub trait Invariant: Downcast {
    /// The name of the invariant, used for logging.
    fn name(&self) -> &str;

    /// Declares the inputs and the defined variables of this invariant.
    ///
    /// Called exactly once, while the engine is open.
    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError>;

    /// Recomputes the bounds of the defined variables from the bounds of the inputs.
    ///
    /// With `widen_only` the bounds of the defined variables may only grow, which keeps repeated
    /// bound computation over cyclic graphs monotone.
    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool);

    /// Called once when the engine is closed, before the initial values are computed.
    fn close(&mut self, _context: &mut InvariantContext<'_>) {}

    /// Computes the values of the defined variables from scratch.
    fn recompute(&mut self, context: &mut InvariantContext<'_>);

    /// Incrementally updates the defined variables given that the input registered under
    /// `local_id` changed.
    fn notify_input_changed(&mut self, context: &mut InvariantContext<'_>, local_id: LocalId);

    /// Returns the next input which the defined variables currently depend on, or [`None`] when
    /// all of them have been returned.
    ///
    /// The sequence restarts at every timestamp. Invariants whose live inputs depend on values
    /// (e.g. an element invariant only reads the selected array entry) only return the live ones.
    fn next_input(&mut self, context: &mut InvariantContext<'_>) -> Option<VarViewId>;

    /// Incrementally updates the defined variables given that the input most recently returned by
    /// [`Invariant::next_input`] changed.
    fn notify_current_input_changed(&mut self, context: &mut InvariantContext<'_>);

    /// Makes the internal state computed at `timestamp` the committed state.
    fn commit(&mut self, _timestamp: Timestamp) {}
}

/// An invariant whose primary defined variable is a violation: zero when a constraint holds and
/// positive otherwise. Registered with [`Engine::make_constraint`].
pub trait ViolationInvariant: Invariant {
    fn violation_id(&self) -> VarId;
}

/// A typed wrapper around an [`InvariantId`] that allows retrieving the concrete invariant from
/// the [`Engine`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct InvariantHandle<I> {
    id: InvariantId,
    invariant: PhantomData<I>,
}

impl<I> InvariantHandle<I> {
    pub(crate) fn new(id: InvariantId) -> Self {
        InvariantHandle {
            id,
            invariant: PhantomData,
        }
    }

    /// The type-erased id of the invariant.
    pub fn id(&self) -> InvariantId {
        self.id
    }
}

impl<I> Clone for InvariantHandle<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for InvariantHandle<I> {}
