//! Interactive prompt primitives: ask, confirm, radio, checkbox.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (SelectionState, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `theme`: Glyphs and colors
//! - `run`: Effects (the [`Prompter`])

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::{Prompter, map_key};
pub use theme::Theme;
