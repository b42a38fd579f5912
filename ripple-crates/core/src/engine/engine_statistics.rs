use crate::create_statistics_struct;

create_statistics_struct!(
    /// Counters of the work done by an engine.
    EngineStatistics {
        /// The number of moves that were started.
        num_moves: u64,
        /// The number of probes that were completed.
        num_probes: u64,
        /// The number of commits that were completed.
        num_commits: u64,
        /// The number of variables popped from the input-to-output queue.
        num_dequeued_variables: u64,
        /// The number of times an invariant was told one of its inputs changed.
        num_notifications: u64,
        /// The number of invariants expanded by the output-to-input explorer.
        num_expansions: u64,
        /// The number of recompute passes needed to initialise the engine.
        num_initialisation_passes: u64,
    }
);
