use super::Timestamp;

/// An integer with a committed value and a single tentative value tagged with the timestamp that
/// wrote it.
///
/// Reading at timestamp `ts` yields the tentative value only when it was written at `ts`; any
/// other timestamp sees the committed value. A move that is never committed is therefore undone
/// for free: its tentative value simply becomes stale once the clock moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommittableInt {
    committed: i64,
    tmp: i64,
    tmp_timestamp: Timestamp,
}

impl CommittableInt {
    pub fn new(timestamp: Timestamp, value: i64) -> Self {
        CommittableInt {
            committed: value,
            tmp: value,
            tmp_timestamp: timestamp,
        }
    }

    pub fn value(&self, timestamp: Timestamp) -> i64 {
        if timestamp == self.tmp_timestamp {
            self.tmp
        } else {
            self.committed
        }
    }

    pub fn committed_value(&self) -> i64 {
        self.committed
    }

    pub fn tmp_timestamp(&self) -> Timestamp {
        self.tmp_timestamp
    }

    /// Whether the value at `timestamp` differs from the committed value.
    pub fn has_changed(&self, timestamp: Timestamp) -> bool {
        self.tmp_timestamp == timestamp && self.tmp != self.committed
    }

    pub fn set_value(&mut self, timestamp: Timestamp, value: i64) {
        self.tmp_timestamp = timestamp;
        self.tmp = value;
    }

    /// Adds `delta` to the value at `timestamp`, starting from the committed value if the
    /// tentative value is stale.
    pub fn inc_value(&mut self, timestamp: Timestamp, delta: i64) {
        self.tmp = self.value(timestamp) + delta;
        self.tmp_timestamp = timestamp;
    }

    /// Overwrites both the committed and the tentative value.
    pub fn commit_value(&mut self, value: i64) {
        self.committed = value;
        self.tmp = value;
    }

    /// Unconditionally makes the tentative value the committed one.
    pub fn commit(&mut self) {
        self.committed = self.tmp;
    }

    /// Commits the tentative value only if it was written at `timestamp`.
    pub fn commit_if(&mut self, timestamp: Timestamp) {
        if self.tmp_timestamp == timestamp {
            self.committed = self.tmp;
        }
    }
}
