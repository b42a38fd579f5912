//! The propagation engine and the data structures it drives.
mod engine_options;
mod engine_statistics;
mod output_to_input_explorer;
mod propagation_engine;
mod propagation_graph;
mod store;
mod variable_queue;

pub use engine_options::*;
pub use engine_statistics::EngineStatistics;
pub(crate) use output_to_input_explorer::OutputToInputExplorer;
pub use propagation_engine::Engine;
pub use propagation_engine::RoundState;
pub use propagation_graph::ListeningInvariant;
pub(crate) use propagation_graph::PropagationGraph;
pub(crate) use store::Store;
pub(crate) use variable_queue::VariableQueue;
