//! Terminal I/O capability consumed by the prompts.
//!
//! The prompts never talk to stdout/stdin directly. They go through the
//! narrow [`Terminal`] trait so the same code drives a real terminal
//! ([`CrosstermTerminal`]) or a script ([`ScriptedTerminal`]).

mod backend;
pub mod scripted;

use std::io;

use crossterm::event::KeyEvent;

pub use self::backend::{CrosstermTerminal, install_panic_hook, restore_terminal};
pub use self::scripted::{ScriptedTerminal, TermOp};

/// Operations a prompt needs from the terminal.
///
/// Positions are relative: every rendering starts at an anchor and the
/// prompt moves the cursor back to it after writing.
pub trait Terminal {
    /// Write raw text (may contain newlines and ANSI styling).
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Erase everything from the cursor down.
    fn clear_rendered_lines(&mut self) -> io::Result<()>;

    fn move_cursor_up(&mut self, n: u16) -> io::Result<()>;

    fn move_cursor_left(&mut self, n: u16) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Hold (or release) raw mode across several key reads.
    ///
    /// While held, typed keys are not echoed between reads.
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()>;

    /// Block until a full line arrives; the line-end is stripped.
    ///
    /// # Errors
    ///
    /// `UnexpectedEof` if input closes before a line-end.
    fn read_line(&mut self) -> io::Result<String>;

    /// Block until the next key press.
    fn read_key(&mut self) -> io::Result<KeyEvent>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        (**self).write_text(text)
    }

    fn clear_rendered_lines(&mut self) -> io::Result<()> {
        (**self).clear_rendered_lines()
    }

    fn move_cursor_up(&mut self, n: u16) -> io::Result<()> {
        (**self).move_cursor_up(n)
    }

    fn move_cursor_left(&mut self, n: u16) -> io::Result<()> {
        (**self).move_cursor_left(n)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        (**self).set_cursor_visible(visible)
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_raw_mode(enabled)
    }

    fn read_line(&mut self) -> io::Result<String> {
        (**self).read_line()
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        (**self).read_key()
    }
}

/// Strip exactly one trailing line-end (`\n` or `\r\n`).
///
/// Returns `None` when the text has no line-end, i.e. the stream closed
/// mid-line.
pub(crate) fn strip_line_end(mut line: String) -> Option<String> {
    if !line.ends_with('\n') {
        return None;
    }
    line.pop();
    if line.ends_with('\r') {
        line.pop();
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_end_removes_one_terminator() {
        assert_eq!(strip_line_end("42\n".into()), Some("42".into()));
        assert_eq!(strip_line_end("42\r\n".into()), Some("42".into()));
        assert_eq!(strip_line_end("\n".into()), Some(String::new()));
    }

    #[test]
    fn strip_line_end_keeps_surrounding_whitespace() {
        assert_eq!(strip_line_end("  spaced  \n".into()), Some("  spaced  ".into()));
        assert_eq!(strip_line_end("two\n\n".into()), Some("two\n".into()));
    }

    #[test]
    fn strip_line_end_rejects_unterminated_input() {
        assert_eq!(strip_line_end(String::new()), None);
        assert_eq!(strip_line_end("partial".into()), None);
    }

    #[test]
    fn mutable_reference_forwards_to_inner_terminal() {
        fn write_via<T: Terminal>(mut t: T) {
            t.write_text("hi").unwrap();
        }

        let mut term = ScriptedTerminal::new();
        write_via(&mut term);
        assert_eq!(term.ops(), &[TermOp::Write("hi".into())]);
    }
}
