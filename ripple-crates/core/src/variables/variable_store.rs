use super::IntVar;
use crate::basic_types::Timestamp;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;
use crate::basic_types::ViewId;
use crate::containers::KeyedVec;
use crate::views::IntView;

/// A registered view together with where it reads from.
#[derive(Debug)]
struct ViewEntry {
    view: Box<dyn IntView>,
    /// The variable or view this view is applied to.
    parent: VarViewId,
    /// The stored variable at the bottom of the view chain.
    source: VarId,
}

/// Owns every stored variable and every view of an engine.
#[derive(Debug, Default)]
pub(crate) struct VariableStore {
    int_vars: KeyedVec<VarId, IntVar>,
    views: KeyedVec<ViewId, ViewEntry>,
}

impl VariableStore {
    pub(crate) fn create_int_var(
        &mut self,
        timestamp: Timestamp,
        initial_value: i64,
        lower_bound: i64,
        upper_bound: i64,
    ) -> VarId {
        self.int_vars.push(IntVar::new(
            timestamp,
            initial_value,
            lower_bound,
            upper_bound,
        ))
    }

    pub(crate) fn create_view(&mut self, parent: VarViewId, view: Box<dyn IntView>) -> ViewId {
        let source = self.source_id(parent);
        self.views.push(ViewEntry {
            view,
            parent,
            source,
        })
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.int_vars.len()
    }

    pub(crate) fn num_views(&self) -> usize {
        self.views.len()
    }

    /// The stored variable that `id` ultimately reads from.
    pub(crate) fn source_id(&self, id: VarViewId) -> VarId {
        match id {
            VarViewId::Var(var_id) => var_id,
            VarViewId::View(view_id) => self.views[view_id].source,
        }
    }

    pub(crate) fn int_var(&self, var_id: VarId) -> &IntVar {
        &self.int_vars[var_id]
    }

    pub(crate) fn int_var_mut(&mut self, var_id: VarId) -> &mut IntVar {
        &mut self.int_vars[var_id]
    }

    pub(crate) fn value(&self, timestamp: Timestamp, id: VarViewId) -> i64 {
        match id {
            VarViewId::Var(var_id) => self.int_vars[var_id].value(timestamp),
            VarViewId::View(view_id) => {
                let entry = &self.views[view_id];
                entry.view.map(self.value(timestamp, entry.parent))
            }
        }
    }

    pub(crate) fn committed_value(&self, id: VarViewId) -> i64 {
        match id {
            VarViewId::Var(var_id) => self.int_vars[var_id].committed_value(),
            VarViewId::View(view_id) => {
                let entry = &self.views[view_id];
                entry.view.map(self.committed_value(entry.parent))
            }
        }
    }

    pub(crate) fn has_changed(&self, timestamp: Timestamp, id: VarViewId) -> bool {
        match id {
            VarViewId::Var(var_id) => self.int_vars[var_id].has_changed(timestamp),
            VarViewId::View(_) => self.value(timestamp, id) != self.committed_value(id),
        }
    }

    pub(crate) fn bounds(&self, id: VarViewId) -> (i64, i64) {
        match id {
            VarViewId::Var(var_id) => {
                let var = &self.int_vars[var_id];
                (var.lower_bound(), var.upper_bound())
            }
            VarViewId::View(view_id) => {
                let entry = &self.views[view_id];
                let (lower_bound, upper_bound) = self.bounds(entry.parent);
                entry.view.bounds(lower_bound, upper_bound)
            }
        }
    }

    pub(crate) fn lower_bound(&self, id: VarViewId) -> i64 {
        self.bounds(id).0
    }

    pub(crate) fn upper_bound(&self, id: VarViewId) -> i64 {
        self.bounds(id).1
    }
}
