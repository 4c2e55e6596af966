//! In-memory terminal driven by a script of lines and keys.
//!
//! Records every operation so tests can assert on the exact output
//! sequence. Running out of scripted input is reported as
//! `UnexpectedEof`, the same way a closed stdin would be.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Terminal;

/// One recorded terminal operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermOp {
    Write(String),
    Clear,
    Up(u16),
    Left(u16),
    CursorVisible(bool),
    RawMode(bool),
    ReadLine,
    ReadKey,
}

/// Scripted [`Terminal`] for tests.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    lines: VecDeque<String>,
    keys: VecDeque<KeyEvent>,
    ops: Vec<TermOp>,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a line of input (without its line-end).
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push_back(line.into());
        self
    }

    /// Queue key presses, consumed in order.
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        self.keys.extend(keys);
        self
    }

    pub fn ops(&self) -> &[TermOp] {
        &self.ops
    }

    /// Every piece of text written, in order.
    pub fn writes(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                TermOp::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// How many keys were consumed so far.
    pub fn keys_read(&self) -> usize {
        self.ops.iter().filter(|op| **op == TermOp::ReadKey).count()
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    /// Cursor visibility after the last toggle (visible if never toggled).
    pub fn cursor_visible(&self) -> bool {
        self.ops
            .iter()
            .rev()
            .find_map(|op| match op {
                TermOp::CursorVisible(v) => Some(*v),
                _ => None,
            })
            .unwrap_or(true)
    }

    /// Whether raw mode is currently held (off if never entered).
    pub fn raw_mode(&self) -> bool {
        self.ops
            .iter()
            .rev()
            .find_map(|op| match op {
                TermOp::RawMode(v) => Some(*v),
                _ => None,
            })
            .unwrap_or(false)
    }
}

fn exhausted(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("script has no more {}", what),
    )
}

impl Terminal for ScriptedTerminal {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.ops.push(TermOp::Write(text.to_string()));
        Ok(())
    }

    fn clear_rendered_lines(&mut self) -> io::Result<()> {
        self.ops.push(TermOp::Clear);
        Ok(())
    }

    fn move_cursor_up(&mut self, n: u16) -> io::Result<()> {
        self.ops.push(TermOp::Up(n));
        Ok(())
    }

    fn move_cursor_left(&mut self, n: u16) -> io::Result<()> {
        self.ops.push(TermOp::Left(n));
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.ops.push(TermOp::CursorVisible(visible));
        Ok(())
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        self.ops.push(TermOp::RawMode(enabled));
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.ops.push(TermOp::ReadLine);
        self.lines.pop_front().ok_or_else(|| exhausted("lines"))
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        self.ops.push(TermOp::ReadKey);
        self.keys.pop_front().ok_or_else(|| exhausted("keys"))
    }
}

// ============================================================================
// KEY HELPERS
// ============================================================================

/// A key press without modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// A printable character key press.
pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// A Ctrl-modified character key press.
pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
