use thiserror::Error;

use super::InvariantId;
use super::VarId;
use super::ViewId;
#[cfg(doc)]
use crate::engine::Engine;
use crate::engine::RoundState;

/// Errors reported by the [`Engine`].
///
/// None of them are recovered from inside the engine: a configuration error means the model is
/// built incorrectly, while [`EngineError::FailedToInitialise`] and [`EngineError::DynamicCycle`]
/// indicate an ill-formed invariant network.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A variable can be defined by at most one invariant.
    #[error("{var} is already defined by {defined_by}")]
    VarAlreadyDefined {
        var: VarId,
        defined_by: InvariantId,
    },
    /// Registration was attempted while the engine is not open.
    #[error("the engine is not open")]
    EngineNotOpen,
    #[error("the engine is already open")]
    EngineAlreadyOpen,
    /// The engine was already closed once; its graph cannot be extended any more.
    #[error("the propagation graph is frozen and cannot be reopened")]
    GraphFrozen,
    /// A round was started before the engine was closed.
    #[error("the engine must be closed before it can run moves")]
    EngineNotClosed,
    /// A round-protocol call was made in the wrong phase, e.g. a nested move.
    #[error("cannot {operation} while the engine is in the {state} state")]
    InvalidState {
        operation: &'static str,
        state: RoundState,
    },
    /// Only variables without a defining invariant can be assigned by a move.
    #[error("{0} is defined by an invariant and cannot be assigned by a move")]
    NotASearchVariable(VarId),
    #[error("{0} is a view and cannot be assigned")]
    CannotSetView(ViewId),
    #[error("the domain [{lower_bound}, {upper_bound}] is empty")]
    EmptyDomain { lower_bound: i64, upper_bound: i64 },
    /// A move assigned a value outside the domain of a search variable.
    #[error("{value} is outside the domain [{lower_bound}, {upper_bound}] of {var}")]
    ValueOutsideDomain {
        var: VarId,
        value: i64,
        lower_bound: i64,
        upper_bound: i64,
    },
    /// No stable initial assignment was found while closing the engine.
    #[error("failed to initialise, possibly due to a cycle in the invariant graph")]
    FailedToInitialise,
    /// The invariant is on a cycle which is live for the current values: the lazy explorer
    /// re-entered it while it was still being evaluated, or input-to-output propagation kept
    /// changing its output without settling.
    #[error("dynamic cycle detected at {invariant}")]
    DynamicCycle { invariant: InvariantId },
}
