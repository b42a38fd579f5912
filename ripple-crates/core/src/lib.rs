//! # Ripple
//! Ripple is the propagation engine of a constraint-based local search solver. It maintains a
//! network of integer variables connected by *invariants*, functional relations such as
//! `d = a + 10 * b`, and keeps every defined variable consistent with its inputs while a search
//! procedure tries out moves.
//!
//! Values are versioned by timestamp: a move writes tentative values that are only visible at the
//! timestamp of the move, and nothing needs to be undone when a move is rejected. See
//! [`Engine`] for the round protocol.
//!
//! Two propagation strategies are available, selected through [`EngineOptions`]:
//! - [`PropagationMode::InputToOutput`] re-evaluates everything downstream of a move, in
//!   topological order.
//! - [`PropagationMode::OutputToInput`] only evaluates what a queried variable depends on,
//!   optionally restricted by an [`OutputToInputMarkingMode`].
//!
//! # Features
//! - `debug-checks` enables the expensive internal consistency checks outside of tests.
//! - `clap` derives `clap::ValueEnum` for the option enums, so they can be used as command line
//!   arguments directly.
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod ripple_asserts;
pub(crate) mod variables;

pub mod invariants;
pub mod statistics;
pub mod views;

pub use convert_case;

pub use crate::basic_types::CommittableInt;
pub use crate::basic_types::EngineError;
pub use crate::basic_types::InvariantId;
pub use crate::basic_types::LocalId;
pub use crate::basic_types::Timestamp;
pub use crate::basic_types::VarId;
pub use crate::basic_types::VarViewId;
pub use crate::basic_types::ViewId;
pub use crate::engine::Engine;
pub use crate::engine::EngineOptions;
pub use crate::engine::EngineStatistics;
pub use crate::engine::ListeningInvariant;
pub use crate::engine::OutputToInputMarkingMode;
pub use crate::engine::PropagationMode;
pub use crate::engine::RoundState;
