//! Prompt state algebra: pure types, zero effects.
//!
//! A list prompt is a cursor over a non-empty item list plus a selection.
//! The selection is what distinguishes radio (one active index) from
//! checkbox (a set of checked values); everything else is shared.

use serde_json::Value;

use crate::error::PromptError;
use crate::types::Item;

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions.
/// The transition function decides what each Action means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move cursor up, wrapping to the last item.
    MoveUp,
    /// Move cursor down, wrapping to the first item.
    MoveDown,
    /// Activate (radio) or toggle (checkbox) the item under the cursor.
    Toggle,
    /// Accept the current selection.
    Submit,
    /// Ctrl-C.
    Abort,
}

// ============================================================================
// SELECTIONS
// ============================================================================

/// The selection half of a list prompt.
pub trait Selection: Clone + PartialEq + std::fmt::Debug {
    /// What the prompt resolves to.
    type Output;

    /// Apply Space with the cursor on `items[cursor]`.
    fn toggle(&mut self, cursor: usize, items: &[Item]);

    /// Whether `items[index]` shows the "on" indicator.
    fn is_marked(&self, index: usize, items: &[Item]) -> bool;

    /// Final answer once the user submits.
    fn resolve(self, items: &[Item]) -> Self::Output;
}

/// Radio selection: exactly one active index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Radio {
    pub active: usize,
}

impl Selection for Radio {
    type Output = Value;

    fn toggle(&mut self, cursor: usize, _items: &[Item]) {
        self.active = cursor;
    }

    fn is_marked(&self, index: usize, _items: &[Item]) -> bool {
        self.active == index
    }

    /// Panics if `active` is out of range; `SelectionState` never lets that happen.
    fn resolve(self, items: &[Item]) -> Value {
        items[self.active].value.clone()
    }
}

/// Checkbox selection: checked values, by equality, in toggle order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Checkbox {
    pub checked: Vec<Value>,
}

impl Checkbox {
    pub fn is_checked(&self, value: &Value) -> bool {
        self.checked.contains(value)
    }
}

impl Selection for Checkbox {
    type Output = Vec<Value>;

    fn toggle(&mut self, cursor: usize, items: &[Item]) {
        let Some(item) = items.get(cursor) else {
            return;
        };
        match self.checked.iter().position(|v| *v == item.value) {
            Some(pos) => {
                self.checked.remove(pos);
            }
            None => self.checked.push(item.value.clone()),
        }
    }

    fn is_marked(&self, index: usize, items: &[Item]) -> bool {
        items
            .get(index)
            .is_some_and(|item| self.is_checked(&item.value))
    }

    fn resolve(self, _items: &[Item]) -> Vec<Value> {
        self.checked
    }
}

// ============================================================================
// LIST STATE
// ============================================================================

/// Transient state of one radio/checkbox invocation.
///
/// Invariant: `cursor < len` and `len > 0`. The constructors refuse an
/// empty list, which is the only way to break it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState<S: Selection> {
    pub cursor: usize,
    pub len: usize,
    pub selection: S,
}

impl<S: Selection + Default> SelectionState<S> {
    /// Cursor on the first item, default selection.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `items` is empty.
    pub fn new(prompt: &str, items: &[Item]) -> Result<Self, PromptError> {
        if items.is_empty() {
            return Err(PromptError::empty_items(prompt));
        }
        Ok(SelectionState {
            cursor: 0,
            len: items.len(),
            selection: S::default(),
        })
    }
}

pub type RadioState = SelectionState<Radio>;
pub type CheckboxState = SelectionState<Checkbox>;

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// The update function returns this. The effects boundary inspects it
/// to decide whether to repaint, resolve, or abort.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<S: Selection> {
    /// Keep looping with this state (repaint first).
    Continue(SelectionState<S>),
    /// Enter pressed: resolve with this final state.
    Submit(SelectionState<S>),
    /// Ctrl-C: trigger cancellation.
    Abort,
}

// ============================================================================
// TESTS
// ============================================================================
