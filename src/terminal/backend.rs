//! Real terminal backend on top of crossterm.
//!
//! Output goes through crossterm commands on any `Write` (stdout by
//! default). Raw mode is entered for each key read, or held across a
//! whole list prompt with `set_raw_mode`. Line input always happens in
//! cooked mode.

use std::borrow::Cow;
use std::io::{self, BufRead, Stdout, Write};

use crossterm::cursor::{Hide, MoveLeft, MoveUp, Show};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{ExecutableCommand, QueueableCommand};

use super::{Terminal, strip_line_end};

// ============================================================================
// BACKEND
// ============================================================================

/// [`Terminal`] implementation writing crossterm commands to `W`.
#[derive(Debug)]
pub struct CrosstermTerminal<W: Write = Stdout> {
    out: W,
    raw: Option<RawModeGuard>,
}

impl CrosstermTerminal<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(out: W) -> Self {
        CrosstermTerminal { out, raw: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(Print(line_ends(text, self.raw.is_some())))?;
        self.out.flush()
    }

    fn clear_rendered_lines(&mut self) -> io::Result<()> {
        self.out.execute(Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    fn move_cursor_up(&mut self, n: u16) -> io::Result<()> {
        // CSI 0 A moves one row on most terminals
        if n > 0 {
            self.out.execute(MoveUp(n))?;
        }
        Ok(())
    }

    fn move_cursor_left(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            self.out.execute(MoveLeft(n))?;
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.out.execute(Show)?;
        } else {
            self.out.execute(Hide)?;
        }
        Ok(())
    }

    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        match (enabled, self.raw.is_some()) {
            (true, false) => self.raw = Some(RawModeGuard::enable()?),
            (false, true) => self.raw = None,
            _ => {}
        }
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        strip_line_end(line).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a line-end was received",
            )
        })
    }

    fn read_key(&mut self) -> io::Result<KeyEvent> {
        let _raw = match self.raw {
            Some(_) => None,
            None => Some(RawModeGuard::enable()?),
        };
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
                _ => {} // releases, repeats, mouse, resize
            }
        }
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Raw mode output does no `\n` to `\r\n` translation, so do it here.
fn line_ends(text: &str, raw: bool) -> Cow<'_, str> {
    if raw && text.contains('\n') {
        Cow::Owned(text.replace('\n', "\r\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Raw mode for the lifetime of the guard.
#[derive(Debug)]
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Put the terminal back in a usable state: cooked mode, visible cursor.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(Show)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// TESTS
// ============================================================================
