use crate::basic_types::CommittableInt;
use crate::basic_types::Timestamp;

/// The position of an invariant in its own input sequence, as used by
/// [`Invariant::next_input`](super::Invariant::next_input).
///
/// The cursor is never committed, so at every new timestamp it reads as "before the first input"
/// again without an explicit reset.
#[derive(Clone, Copy, Debug)]
pub struct InputCursor {
    state: CommittableInt,
}

impl Default for InputCursor {
    fn default() -> Self {
        InputCursor {
            state: CommittableInt::new(Timestamp::default(), -1),
        }
    }
}

impl InputCursor {
    /// Moves the cursor forward and returns the new position.
    pub fn advance(&mut self, timestamp: Timestamp) -> usize {
        self.state.inc_value(timestamp, 1);
        self.state.value(timestamp) as usize
    }

    /// The position most recently returned by [`InputCursor::advance`] at `timestamp`, or
    /// [`None`] if the cursor has not moved yet.
    pub fn position(&self, timestamp: Timestamp) -> Option<usize> {
        usize::try_from(self.state.value(timestamp)).ok()
    }
}
