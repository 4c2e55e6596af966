//! Pure rendering: prompt state in, display string out.
//!
//! Identical inputs always give identical output. Erasing a previous
//! rendering is the caller's job.

use serde_json::Value;

use crate::types::Item;

use super::state::{Checkbox, Radio, Selection, SelectionState};
use super::theme::Theme;

/// Glyph pair a selection kind renders with.
pub trait Indicators {
    fn glyphs(theme: &Theme) -> (&str, &str);
}

impl Indicators for Radio {
    fn glyphs(theme: &Theme) -> (&str, &str) {
        (&theme.radio_on, &theme.radio_off)
    }
}

impl Indicators for Checkbox {
    fn glyphs(theme: &Theme) -> (&str, &str) {
        (&theme.checkbox_on, &theme.checkbox_off)
    }
}

/// Render a list prompt.
///
/// First line is `prompt` unless it is empty, then one line per item:
/// indicator, a space, the title (emphasized on the cursor row).
/// Lines are joined with `\n`, no trailing newline.
pub fn render_list<S: Selection + Indicators>(
    prompt: &str,
    items: &[Item],
    state: &SelectionState<S>,
    theme: &Theme,
) -> String {
    let (on, off) = S::glyphs(theme);

    let list = items.iter().enumerate().map(|(i, item)| {
        let indicator = if state.selection.is_marked(i, items) {
            theme.on(on)
        } else {
            theme.off(off)
        };
        let title = if i == state.cursor {
            theme.cursor(&item.title)
        } else {
            item.title.clone()
        };
        format!("{} {}", indicator, title)
    });

    let header = (!prompt.is_empty()).then(|| prompt.to_string());
    header.into_iter().chain(list).collect::<Vec<_>>().join("\n")
}

pub fn render_radio_list(
    prompt: &str,
    items: &[Item],
    cursor: usize,
    active: usize,
    theme: &Theme,
) -> String {
    let state = SelectionState {
        cursor,
        len: items.len(),
        selection: Radio { active },
    };
    render_list(prompt, items, &state, theme)
}

pub fn render_checkbox_list(
    prompt: &str,
    items: &[Item],
    cursor: usize,
    checked: &[Value],
    theme: &Theme,
) -> String {
    let state = SelectionState {
        cursor,
        len: items.len(),
        selection: Checkbox {
            checked: checked.to_vec(),
        },
    };
    render_list(prompt, items, &state, theme)
}

/// Line shown by `ask`.
pub fn render_ask(question: &str) -> String {
    format!("{} ", question)
}

/// Line shown by `confirm`.
pub fn render_confirm(question: &str) -> String {
    format!("{} [y/n] ", question)
}
