/// The logical clock of the engine.
///
/// Every stored value is tagged with the timestamp at which it was last written, so "fresh in this
/// round" versus "stale from an earlier round" is a single comparison instead of an explicit
/// invalidation pass.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn new(value: u64) -> Self {
        Timestamp(value)
    }

    /// The timestamp directly after this one.
    pub fn next(self) -> Self {
        Timestamp(self.0 + 1)
    }

    pub fn unpack(self) -> u64 {
        self.0
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: u64) -> Self::Output {
        Timestamp(self.0 + rhs)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}
