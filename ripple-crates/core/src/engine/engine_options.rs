#[cfg(doc)]
use crate::engine::Engine;

/// How the [`Engine`] brings queried variables up to date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PropagationMode {
    /// Every variable downstream of a move is re-evaluated, in topological order.
    #[default]
    InputToOutput,
    /// Only the variables that a query depends on are evaluated, by pulling inputs from the
    /// queried variable backwards.
    OutputToInput,
}

/// Which parts of the graph the output-to-input explorer may skip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputToInputMarkingMode {
    /// Explore every input that is reachable from the queried variable.
    #[default]
    None,
    /// Skip inputs which have none of the modified search variables as an ancestor. The ancestor
    /// sets are computed once when the engine is closed.
    OutputToInputStatic,
    /// Skip inputs which are not reachable from a modified search variable. Reachability is
    /// recomputed at the start of every propagation.
    InputToOutputExploration,
}

/// The options of an [`Engine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub propagation_mode: PropagationMode,
    pub marking_mode: OutputToInputMarkingMode,
}

impl EngineOptions {
    /// All combinations of propagation and marking mode which behave differently.
    pub fn all_modes() -> [EngineOptions; 4] {
        [
            EngineOptions {
                propagation_mode: PropagationMode::InputToOutput,
                marking_mode: OutputToInputMarkingMode::None,
            },
            EngineOptions {
                propagation_mode: PropagationMode::OutputToInput,
                marking_mode: OutputToInputMarkingMode::None,
            },
            EngineOptions {
                propagation_mode: PropagationMode::OutputToInput,
                marking_mode: OutputToInputMarkingMode::OutputToInputStatic,
            },
            EngineOptions {
                propagation_mode: PropagationMode::OutputToInput,
                marking_mode: OutputToInputMarkingMode::InputToOutputExploration,
            },
        ]
    }
}
