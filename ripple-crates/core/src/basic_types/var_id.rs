use crate::containers::StorageKey;

/// An identifier to a stored integer variable.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarId(pub(crate) u32);

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

impl StorageKey for VarId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        VarId(index as u32)
    }
}

/// An identifier to a view. Views have no storage of their own; they are evaluated on demand from
/// their parent.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ViewId(pub(crate) u32);

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ViewId({})", self.0)
    }
}

impl StorageKey for ViewId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        ViewId(index as u32)
    }
}

/// Anything that can be read as an integer variable: either a stored variable or a view on top of
/// one.
///
/// The propagation graph only knows about stored variables; a view is always resolved to the
/// [`VarId`] it ultimately reads from (its *source*) before it enters the graph.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum VarViewId {
    Var(VarId),
    View(ViewId),
}

impl VarViewId {
    pub fn is_var(self) -> bool {
        matches!(self, VarViewId::Var(_))
    }

    pub fn is_view(self) -> bool {
        matches!(self, VarViewId::View(_))
    }

    /// Returns the stored variable this id refers to, or [`None`] if it is a view.
    pub fn as_var(self) -> Option<VarId> {
        match self {
            VarViewId::Var(var_id) => Some(var_id),
            VarViewId::View(_) => None,
        }
    }
}

impl From<VarId> for VarViewId {
    fn from(value: VarId) -> Self {
        VarViewId::Var(value)
    }
}

impl From<ViewId> for VarViewId {
    fn from(value: ViewId) -> Self {
        VarViewId::View(value)
    }
}

impl std::fmt::Display for VarViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarViewId::Var(var_id) => var_id.fmt(f),
            VarViewId::View(view_id) => view_id.fmt(f),
        }
    }
}
