//! Prompt effects boundary: key mapping, repaint, input loops.
//!
//! This is the only prompt module with side effects. It wires the pure
//! layers (state, update, view) to a [`Terminal`]. Every rendering starts
//! at an anchor; after writing, the cursor is walked back to the anchor so
//! the next `clear_rendered_lines` erases exactly what was drawn.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::cancel::{CancelToken, ShutdownHook};
use crate::error::PromptError;
use crate::terminal::Terminal;
use crate::types::Item;

use super::state::{Action, Checkbox, Radio, Selection, SelectionState, Transition};
use super::theme::Theme;
use super::update::update;
use super::view::{Indicators, render_ask, render_confirm, render_list};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a list-prompt Action.
///
/// Returns None for keys the list prompts ignore.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if is_ctrl_c(&key) {
        return Some(Action::Abort);
    }

    match key.code {
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Enter => Some(Action::Submit),
        _ => None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

// ============================================================================
// PROMPTER
// ============================================================================

/// Runs prompts against a terminal it owns exclusively.
///
/// One prompt at a time: every primitive takes `&mut self`.
pub struct Prompter<T: Terminal> {
    terminal: T,
    theme: Theme,
    cancel: CancelToken,
    on_abort: Option<ShutdownHook>,
}

impl<T: Terminal> Prompter<T> {
    pub fn new(terminal: T) -> Self {
        Prompter {
            terminal,
            theme: Theme::default(),
            cancel: CancelToken::new(),
            on_abort: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Share a token so other code (a signal handler, another thread) can abort.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Cleanup to run when a prompt observes cancellation.
    pub fn on_abort(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_abort = Some(Box::new(hook));
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    pub fn hide_cursor(&mut self) -> Result<(), PromptError> {
        Ok(self.terminal.set_cursor_visible(false)?)
    }

    pub fn show_cursor(&mut self) -> Result<(), PromptError> {
        Ok(self.terminal.set_cursor_visible(true)?)
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    /// Read one line of free text, returned verbatim minus the line-end.
    ///
    /// Ctrl-C is not intercepted here: the line is read in cooked mode.
    ///
    /// # Errors
    ///
    /// `Io` if input closes before a line-end, `Aborted` if the token was
    /// already triggered.
    pub fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        debug!(question, "ask");
        self.terminal.clear_rendered_lines()?;
        if self.cancel.is_cancelled() {
            return self.abort();
        }

        let shown = render_ask(question);
        self.terminal.write_text(&shown)?;
        self.terminal.set_cursor_visible(true)?;
        let answer = self.terminal.read_line()?;
        self.terminal.set_cursor_visible(false)?;

        // the echoed line-end left us at column 0 one row down
        self.terminal.move_cursor_up(1)?;
        self.terminal.clear_rendered_lines()?;

        debug!(question, answer = answer.as_str(), "ask resolved");
        Ok(answer)
    }

    /// Read a single key: `y` is yes, anything else is no.
    ///
    /// # Errors
    ///
    /// `Aborted` on Ctrl-C, `Io` if the key stream fails.
    pub fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        debug!(question, "confirm");
        self.terminal.clear_rendered_lines()?;
        if self.cancel.is_cancelled() {
            return self.abort();
        }

        let shown = render_confirm(question);
        self.terminal.write_text(&shown)?;
        self.terminal.set_cursor_visible(true)?;
        let key = self.terminal.read_key()?;
        self.terminal.set_cursor_visible(false)?;
        self.terminal.move_cursor_left(width(&shown))?;

        if is_ctrl_c(&key) {
            self.cancel.cancel();
            return self.abort();
        }

        let answer = key.code == KeyCode::Char('y');
        self.terminal.clear_rendered_lines()?;
        debug!(question, answer, "confirm resolved");
        Ok(answer)
    }

    /// Single-select list. Resolves to the value of the active item.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `items` is empty (checked before any I/O),
    /// `Aborted` on Ctrl-C, `Io` if the key stream fails.
    pub fn radio(&mut self, question: &str, items: &[Item]) -> Result<Value, PromptError> {
        let state = SelectionState::<Radio>::new(question, items)?;
        debug!(question, items = items.len(), "radio");
        let answer = self.select(question, items, state)?;
        debug!(question, answer = %answer, "radio resolved");
        Ok(answer)
    }

    /// Multi-select list. Resolves to the checked values (possibly none).
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `items` is empty (checked before any I/O),
    /// `Aborted` on Ctrl-C, `Io` if the key stream fails.
    pub fn checkbox(&mut self, question: &str, items: &[Item]) -> Result<Vec<Value>, PromptError> {
        let state = SelectionState::<Checkbox>::new(question, items)?;
        debug!(question, items = items.len(), "checkbox");
        let answer = self.select(question, items, state)?;
        debug!(question, checked = answer.len(), "checkbox resolved");
        Ok(answer)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Shared input loop for radio and checkbox, run in raw mode.
    ///
    /// Raw mode is released on every exit, failures included.
    fn select<S: Selection + Indicators>(
        &mut self,
        question: &str,
        items: &[Item],
        state: SelectionState<S>,
    ) -> Result<S::Output, PromptError> {
        self.terminal.set_raw_mode(true)?;
        let result = self.select_loop(question, items, state);
        let released = self.terminal.set_raw_mode(false);
        let answer = result?;
        released?;
        Ok(answer)
    }

    fn select_loop<S: Selection + Indicators>(
        &mut self,
        question: &str,
        items: &[Item],
        mut state: SelectionState<S>,
    ) -> Result<S::Output, PromptError> {
        self.terminal.clear_rendered_lines()?;
        self.repaint(&render_list(question, items, &state, &self.theme))?;

        loop {
            if self.cancel.is_cancelled() {
                return self.abort();
            }

            let key = self.terminal.read_key()?;
            if let Some(action) = map_key(key) {
                trace!(?action, cursor = state.cursor, "list action");
                match update(state.clone(), action, items) {
                    Transition::Continue(next) => state = next,
                    Transition::Submit(done) => {
                        self.terminal.clear_rendered_lines()?;
                        return Ok(done.selection.resolve(items));
                    }
                    Transition::Abort => {
                        self.cancel.cancel();
                        continue;
                    }
                }
            }

            self.repaint(&render_list(question, items, &state, &self.theme))?;
        }
    }

    /// Erase the previous rendering, draw `text`, return to the anchor.
    fn repaint(&mut self, text: &str) -> Result<(), PromptError> {
        self.terminal.clear_rendered_lines()?;
        self.terminal.write_text(text)?;

        let lines: Vec<&str> = text.split('\n').collect();
        let last = lines.last().map_or(0, |line| width(line));
        self.terminal.move_cursor_left(last)?;
        self.terminal.move_cursor_up(to_u16(lines.len() - 1))?;
        Ok(())
    }

    /// Cleanup after cancellation; always ends in `Aborted`.
    ///
    /// Expects the cursor at the anchor of the current rendering.
    fn abort<R>(&mut self) -> Result<R, PromptError> {
        warn!("prompt aborted");
        self.terminal.clear_rendered_lines()?;
        self.terminal.set_cursor_visible(true)?;
        if let Some(hook) = self.on_abort.as_mut() {
            hook();
        }
        Err(PromptError::Aborted)
    }
}

impl<T: Terminal + std::fmt::Debug> std::fmt::Debug for Prompter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompter")
            .field("terminal", &self.terminal)
            .field("theme", &self.theme)
            .field("cancel", &self.cancel)
            .field("on_abort", &self.on_abort.is_some())
            .finish()
    }
}

/// Display width in cells, ignoring ANSI styling.
fn width(text: &str) -> u16 {
    to_u16(console::measure_text_width(text))
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::scripted::{char_key, ctrl, key};
    use crate::terminal::{ScriptedTerminal, TermOp};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn prompter(term: ScriptedTerminal) -> Prompter<ScriptedTerminal> {
        Prompter::new(term).with_theme(Theme::plain())
    }

    fn ab() -> Vec<Item> {
        vec![Item::new("A", 1), Item::new("B", 2)]
    }

    fn abc() -> Vec<Item> {
        vec![Item::new("A", 1), Item::new("B", 2), Item::new("C", 3)]
    }

    // -- Key mapping --

    #[test]
    fn ctrl_c_maps_to_abort() {
        assert_eq!(map_key(ctrl('c')), Some(Action::Abort));
    }

    #[test]
    fn arrows_space_enter_map_to_actions() {
        assert_eq!(map_key(key(KeyCode::Up)), Some(Action::MoveUp));
        assert_eq!(map_key(key(KeyCode::Down)), Some(Action::MoveDown));
        assert_eq!(map_key(char_key(' ')), Some(Action::Toggle));
        assert_eq!(map_key(key(KeyCode::Enter)), Some(Action::Submit));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(map_key(char_key('j')), None);
        assert_eq!(map_key(char_key('c')), None);
        assert_eq!(map_key(key(KeyCode::Esc)), None);
    }

    // -- ask --

    #[test]
    fn ask_returns_line_verbatim() {
        let mut p = prompter(ScriptedTerminal::new().with_line("42"));
        assert_eq!(p.ask("How old?").unwrap(), "42");

        let term = p.into_terminal();
        assert_eq!(term.writes(), vec!["How old? "]);
        assert!(!term.cursor_visible());
    }

    #[test]
    fn ask_does_not_trim() {
        let mut p = prompter(ScriptedTerminal::new().with_line("  padded "));
        assert_eq!(p.ask("Name?").unwrap(), "  padded ");
    }

    #[test]
    fn ask_returns_to_anchor_and_erases() {
        let mut p = prompter(ScriptedTerminal::new().with_line("42"));
        p.ask("How old?").unwrap();
        let ops = p.into_terminal().ops().to_vec();
        assert_eq!(
            &ops[ops.len() - 2..],
            &[TermOp::Up(1), TermOp::Clear]
        );
        assert!(!ops.iter().any(|op| matches!(op, TermOp::Left(_))));
    }

    #[test]
    fn ask_propagates_closed_input() {
        let mut p = prompter(ScriptedTerminal::new());
        match p.ask("How old?") {
            Err(PromptError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("Expected Io, got {:?}", other),
        }
    }

    // -- confirm --

    #[test]
    fn confirm_y_is_true() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([char_key('y')]));
        assert!(p.confirm("Sure?").unwrap());
    }

    #[test]
    fn confirm_n_and_enter_are_false() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([char_key('n')]));
        assert!(!p.confirm("Sure?").unwrap());

        let mut p = prompter(ScriptedTerminal::new().with_keys([key(KeyCode::Enter)]));
        assert!(!p.confirm("Sure?").unwrap());
    }

    #[test]
    fn confirm_reads_exactly_one_key() {
        let mut p = prompter(
            ScriptedTerminal::new().with_keys([char_key('x'), char_key('y')]),
        );
        assert!(!p.confirm("Sure?").unwrap());
        assert_eq!(p.terminal().keys_read(), 1);
        assert_eq!(p.terminal().remaining_keys(), 1);
    }

    #[test]
    fn confirm_ctrl_c_aborts_and_runs_hook() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut p = prompter(ScriptedTerminal::new().with_keys([ctrl('c')]))
            .on_abort(move || {
                seen.fetch_add(1, Ordering::SeqCst);
            });

        assert!(matches!(p.confirm("Sure?"), Err(PromptError::Aborted)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(p.cancel_token().is_cancelled());
        assert!(p.terminal().cursor_visible());
    }

    // -- radio --

    #[test]
    fn radio_down_space_enter_resolves_second_value() {
        let keys = [key(KeyCode::Down), char_key(' '), key(KeyCode::Enter)];
        let mut p = prompter(ScriptedTerminal::new().with_keys(keys));
        assert_eq!(p.radio("Pick:", &ab()).unwrap(), json!(2));
    }

    #[test]
    fn radio_empty_items_fails_before_any_io() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([key(KeyCode::Enter)]));
        assert!(matches!(p.radio("Pick:", &[]), Err(PromptError::InvalidArgument(_))));
        assert!(p.terminal().ops().is_empty());
    }

    #[test]
    fn radio_repaints_after_every_key() {
        let keys = [key(KeyCode::Down), char_key('z'), key(KeyCode::Enter)];
        let mut p = prompter(ScriptedTerminal::new().with_keys(keys));
        p.radio("Pick:", &ab()).unwrap();

        let term = p.into_terminal();
        assert_eq!(
            term.writes(),
            vec![
                "Pick:\n(*) A\n( ) B",
                "Pick:\n(*) A\n( ) B",
                "Pick:\n(*) A\n( ) B",
            ]
        );
    }

    #[test]
    fn repaint_erases_before_drawing_and_returns_to_anchor() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([key(KeyCode::Enter)]));
        p.radio("Pick:", &ab()).unwrap();
        assert_eq!(
            p.terminal().ops(),
            &[
                TermOp::RawMode(true),
                TermOp::Clear,
                TermOp::Clear,
                TermOp::Write("Pick:\n(*) A\n( ) B".into()),
                TermOp::Left(5),
                TermOp::Up(2),
                TermOp::ReadKey,
                TermOp::Clear,
                TermOp::RawMode(false),
            ]
        );
    }

    #[test]
    fn radio_ctrl_c_aborts_without_reading_further() {
        let keys = [ctrl('c'), key(KeyCode::Enter)];
        let mut p = prompter(ScriptedTerminal::new().with_keys(keys));
        assert!(matches!(p.radio("Pick:", &ab()), Err(PromptError::Aborted)));
        assert_eq!(p.terminal().remaining_keys(), 1);
    }

    #[test]
    fn external_cancel_aborts_at_next_iteration() {
        let token = CancelToken::new();
        token.cancel();
        let mut p = prompter(ScriptedTerminal::new().with_keys([key(KeyCode::Enter)]))
            .with_cancel_token(token);
        assert!(matches!(p.radio("Pick:", &ab()), Err(PromptError::Aborted)));
        assert_eq!(p.terminal().keys_read(), 0);
    }

    #[test]
    fn radio_runs_out_of_keys_with_io_error() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([key(KeyCode::Down)]));
        assert!(matches!(p.radio("Pick:", &ab()), Err(PromptError::Io(_))));
        assert!(!p.terminal().raw_mode());
    }

    #[test]
    fn raw_mode_spans_the_whole_list_loop() {
        let keys = [key(KeyCode::Down), char_key(' '), key(KeyCode::Enter)];
        let mut p = prompter(ScriptedTerminal::new().with_keys(keys));
        p.checkbox("Pick:", &ab()).unwrap();

        let ops = p.terminal().ops();
        let raw: Vec<usize> = ops
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, TermOp::RawMode(_)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(raw, vec![0, ops.len() - 1]);
        assert!(!p.terminal().raw_mode());
    }

    #[test]
    fn aborted_list_leaves_raw_mode() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([ctrl('c')]));
        assert!(p.radio("Pick:", &ab()).is_err());
        assert!(!p.terminal().raw_mode());
    }

    // -- checkbox --

    #[test]
    fn checkbox_space_down_down_space_enter_resolves_first_and_third() {
        let keys = [
            char_key(' '),
            key(KeyCode::Down),
            key(KeyCode::Down),
            char_key(' '),
            key(KeyCode::Enter),
        ];
        let mut p = prompter(ScriptedTerminal::new().with_keys(keys));
        let mut got = p.checkbox("Pick:", &abc()).unwrap();
        got.sort_by_key(|v| v.as_i64());
        assert_eq!(got, vec![json!(1), json!(3)]);
    }

    #[test]
    fn checkbox_enter_immediately_is_empty() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([key(KeyCode::Enter)]));
        assert!(p.checkbox("Pick:", &abc()).unwrap().is_empty());
    }

    #[test]
    fn checkbox_empty_items_is_invalid() {
        let mut p = prompter(ScriptedTerminal::new());
        assert!(matches!(p.checkbox("Pick:", &[]), Err(PromptError::InvalidArgument(_))));
    }

    #[test]
    fn checkbox_shows_checked_state_after_toggle() {
        let keys = [char_key(' '), key(KeyCode::Enter)];
        let mut p = prompter(ScriptedTerminal::new().with_keys(keys));
        p.checkbox("", &ab()).unwrap();
        assert_eq!(p.terminal().writes().last(), Some(&"[*] A\n[ ] B"));
    }

    #[test]
    fn aborted_prompter_stays_aborted() {
        let mut p = prompter(ScriptedTerminal::new().with_keys([ctrl('c')]).with_line("x"));
        assert!(p.checkbox("Pick:", &ab()).is_err());
        assert!(matches!(p.ask("Name?"), Err(PromptError::Aborted)));
    }
}
