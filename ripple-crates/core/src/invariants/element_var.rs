use super::InputCursor;
use super::Invariant;
use super::InvariantContext;
use super::RegistrationContext;
use crate::basic_types::EngineError;
use crate::basic_types::LocalId;
use crate::basic_types::VarId;
use crate::basic_types::VarViewId;
use crate::ripple_assert_simple;

const INDEX_LOCAL_ID: LocalId = LocalId::from(0);

/// Maintains `output = array[index - offset]`, where the entries of `array` are variables.
///
/// An index outside `[offset, offset + array.len())` is clamped to the nearest entry. Only the
/// selected entry is an input at any given time; a change of any other entry is ignored.
#[derive(Debug)]
pub struct ElementVar {
    index: VarViewId,
    array: Box<[VarViewId]>,
    offset: i64,
    output: VarId,
    cursor: InputCursor,
}

impl ElementVar {
    pub fn new(index: VarViewId, array: Vec<VarViewId>, offset: i64, output: VarId) -> Self {
        ripple_assert_simple!(!array.is_empty(), "element of an empty array");

        ElementVar {
            index,
            array: array.into_boxed_slice(),
            offset,
            output,
            cursor: InputCursor::default(),
        }
    }

    pub fn output(&self) -> VarId {
        self.output
    }

    /// The position in `array` selected by an index value.
    fn position(&self, index_value: i64) -> usize {
        let last = self.array.len() as i64 - 1;
        (index_value - self.offset).clamp(0, last.max(0)) as usize
    }

    fn selected(&self, context: &InvariantContext<'_>) -> VarViewId {
        self.array[self.position(context.value(self.index))]
    }
}

impl Invariant for ElementVar {
    fn name(&self) -> &str {
        "ElementVar"
    }

    fn register_vars(&mut self, context: &mut RegistrationContext<'_>) -> Result<(), EngineError> {
        context.register_input(self.index, INDEX_LOCAL_ID);
        for (position, &entry) in self.array.iter().enumerate() {
            context.register_input(entry, LocalId::from(position as u32 + 1));
        }
        context.register_defined_var(self.output)
    }

    fn update_bounds(&mut self, context: &mut InvariantContext<'_>, widen_only: bool) {
        let first = self.position(context.lower_bound(self.index));
        let last = self.position(context.upper_bound(self.index));

        let reachable = &self.array[first..=last];
        let lower_bound = reachable
            .iter()
            .map(|&entry| context.lower_bound(entry))
            .min()
            .unwrap_or_default();
        let upper_bound = reachable
            .iter()
            .map(|&entry| context.upper_bound(entry))
            .max()
            .unwrap_or_default();

        context.update_bounds(self.output, lower_bound, upper_bound, widen_only);
    }

    fn recompute(&mut self, context: &mut InvariantContext<'_>) {
        let value = context.value(self.selected(context));
        context.set_value(self.output, value);
    }

    fn notify_input_changed(&mut self, context: &mut InvariantContext<'_>, local_id: LocalId) {
        if local_id == INDEX_LOCAL_ID {
            self.recompute(context);
            return;
        }

        let position = local_id.unpack() as usize - 1;
        if position == self.position(context.value(self.index)) {
            self.recompute(context);
        }
    }

    /// The index first, then the selected entry.
    fn next_input(&mut self, context: &mut InvariantContext<'_>) -> Option<VarViewId> {
        match self.cursor.advance(context.timestamp()) {
            0 => Some(self.index),
            1 => Some(self.selected(context)),
            _ => None,
        }
    }

    fn notify_current_input_changed(&mut self, context: &mut InvariantContext<'_>) {
        self.recompute(context);
    }
}
