//! Indicator glyphs and colors.
//!
//! Color semantics:
//! - Green: active / checked indicator
//! - Red: inactive / unchecked indicator
//! - Bold yellow: the item under the cursor
//!
//! A plain theme keeps the glyphs and drops every escape sequence.

use crossterm::style::{Attribute, Color, ContentStyle};

pub const RADIO_ON: &str = "(*)";
pub const RADIO_OFF: &str = "( )";
pub const CHECKBOX_ON: &str = "[*]";
pub const CHECKBOX_OFF: &str = "[ ]";

/// Presentation settings handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub radio_on: String,
    pub radio_off: String,
    pub checkbox_on: String,
    pub checkbox_off: String,
    /// Emit ANSI styling.
    pub colored: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            radio_on: RADIO_ON.to_string(),
            radio_off: RADIO_OFF.to_string(),
            checkbox_on: CHECKBOX_ON.to_string(),
            checkbox_off: CHECKBOX_OFF.to_string(),
            colored: true,
        }
    }
}

impl Theme {
    /// Default glyphs, no colors.
    pub fn plain() -> Self {
        Theme {
            colored: false,
            ..Theme::default()
        }
    }

    /// Indicator for an item that is on.
    pub fn on(&self, glyph: &str) -> String {
        self.paint(glyph, Some(Color::Green), false)
    }

    /// Indicator for an item that is off.
    pub fn off(&self, glyph: &str) -> String {
        self.paint(glyph, Some(Color::Red), false)
    }

    /// Title of the item under the cursor.
    pub fn cursor(&self, title: &str) -> String {
        self.paint(title, Some(Color::Yellow), true)
    }

    fn paint(&self, text: &str, color: Option<Color>, bold: bool) -> String {
        if !self.colored {
            return text.to_string();
        }
        paint(text, color, bold)
    }
}

/// Decorate `text` with a foreground color and optional bold.
///
/// Exposed for callers that want styled item titles.
pub fn paint(text: &str, color: Option<Color>, bold: bool) -> String {
    let mut style = ContentStyle::new();
    style.foreground_color = color;
    if bold {
        style.attributes.set(Attribute::Bold);
    }
    style.apply(text).to_string()
}
