use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::basic_types::VarId;
use crate::containers::KeyedVec;
use crate::ripple_assert_moderate;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum QueueState {
    #[default]
    Absent,
    Enqueued,
    Popped,
}

/// The ready queue of the input-to-output propagator.
///
/// Variables are popped by increasing topological position. On an acyclic graph this means a
/// variable is only popped once every variable its defining invariant reads has been processed.
/// Positions ignore the edges which close a static cycle, so a popped variable may be pushed again
/// when an input behind such an edge changes later in the round. A variable is in the heap at most
/// once at a time; the state is only reset by [`VariableQueue::clear`].
#[derive(Debug, Default)]
pub(crate) struct VariableQueue {
    heap: BinaryHeap<Reverse<(u32, VarId)>>,
    state: KeyedVec<VarId, QueueState>,
    times_popped: KeyedVec<VarId, u32>,
    /// Every variable enqueued since the last clear, in order of first enqueueing.
    enqueued: Vec<VarId>,
}

impl VariableQueue {
    pub(crate) fn register_var(&mut self, var: VarId) {
        self.state.accomodate(var, QueueState::Absent);
        self.times_popped.accomodate(var, 0);
    }

    /// Returns whether the variable was added to the heap.
    pub(crate) fn push(&mut self, var: VarId, position: u32) -> bool {
        match self.state[var] {
            QueueState::Enqueued => return false,
            QueueState::Absent => self.enqueued.push(var),
            QueueState::Popped => {}
        }

        self.state[var] = QueueState::Enqueued;
        self.heap.push(Reverse((position, var)));
        true
    }

    pub(crate) fn pop(&mut self) -> Option<VarId> {
        let Reverse((_, var)) = self.heap.pop()?;
        self.state[var] = QueueState::Popped;
        self.times_popped[var] += 1;
        Some(var)
    }

    /// How often `var` was popped since the last clear.
    pub(crate) fn times_popped(&self, var: VarId) -> u32 {
        self.times_popped[var]
    }

    /// The variables enqueued this round, popped or not.
    pub(crate) fn enqueued(&self) -> &[VarId] {
        &self.enqueued
    }

    pub(crate) fn clear(&mut self) {
        for &var in &self.enqueued {
            self.state[var] = QueueState::Absent;
            self.times_popped[var] = 0;
        }
        self.enqueued.clear();
        self.heap.clear();

        ripple_assert_moderate!(self
            .state
            .iter()
            .all(|&state| state == QueueState::Absent));
    }
}
