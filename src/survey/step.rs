//! Step runner: ask one question at a time and branch on the answers.
//!
//! The runner has no plan of its own. Each step consumes the runner,
//! stores its answer, and hands the runner back, so the caller's own
//! control flow decides what comes next:
//!
//! ```no_run
//! # use keyprompt::{Prompter, StepSurvey, PromptError};
//! # use keyprompt::terminal::CrosstermTerminal;
//! # fn main() -> Result<(), PromptError> {
//! let step = StepSurvey::new(Prompter::new(CrosstermTerminal::stdout()))
//!     .confirm("more", "Continue?")?;
//! let step = if step.answers().flag("more") == Some(true) {
//!     step.ask("detail", "Tell me more:")?
//! } else {
//!     step.skip()?
//! };
//! println!("{:?}", step.into_answers());
//! # Ok(())
//! # }
//! ```
//!
//! A failed step does not lose the runner: [`StepError`] carries it back
//! with every answer gathered so far, and converts into [`PromptError`]
//! for callers that only care about the failure.

use std::fmt;

use tracing::debug;

use crate::error::PromptError;
use crate::prompt::Prompter;
use crate::terminal::Terminal;
use crate::types::{Answer, AnswerSet, Item, Question};

use super::batch::ask_question;

/// A stateful answer accumulator threaded through caller-written steps.
#[derive(Debug)]
pub struct StepSurvey<T: Terminal> {
    prompter: Prompter<T>,
    answers: AnswerSet,
}

impl<T: Terminal> StepSurvey<T> {
    pub fn new(prompter: Prompter<T>) -> Self {
        Self::with_answers(prompter, AnswerSet::new())
    }

    /// Start from answers gathered elsewhere.
    pub fn with_answers(prompter: Prompter<T>, answers: AnswerSet) -> Self {
        StepSurvey { prompter, answers }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn prompter_mut(&mut self) -> &mut Prompter<T> {
        &mut self.prompter
    }

    pub fn into_answers(self) -> AnswerSet {
        self.answers
    }

    pub fn into_parts(self) -> (Prompter<T>, AnswerSet) {
        (self.prompter, self.answers)
    }

    /// Entry point of a chain. Changes nothing.
    pub fn start(self) -> StepResult<T> {
        Ok(self)
    }

    /// Branch arm that asks nothing. Changes nothing.
    pub fn skip(self) -> StepResult<T> {
        Ok(self)
    }

    pub fn ask(self, name: impl Into<String>, prompt: impl Into<String>) -> StepResult<T> {
        self.step(Question::ask(name, prompt))
    }

    pub fn confirm(self, name: impl Into<String>, prompt: impl Into<String>) -> StepResult<T> {
        self.step(Question::confirm(name, prompt))
    }

    pub fn radio(
        self,
        name: impl Into<String>,
        prompt: impl Into<String>,
        items: Vec<Item>,
    ) -> StepResult<T> {
        self.step(Question::radio(name, prompt, items))
    }

    pub fn checkbox(
        self,
        name: impl Into<String>,
        prompt: impl Into<String>,
        items: Vec<Item>,
    ) -> StepResult<T> {
        self.step(Question::checkbox(name, prompt, items))
    }

    /// Run an already-built question as the next step.
    ///
    /// # Errors
    ///
    /// The primitive's error, together with the unchanged runner.
    pub fn step(mut self, question: Question) -> StepResult<T> {
        let answer: Answer = match ask_question(&mut self.prompter, &question) {
            Ok(answer) => answer,
            Err(error) => {
                debug!(name = question.name.as_str(), %error, "step failed");
                return Err(StepError {
                    survey: self,
                    error,
                });
            }
        };
        debug!(name = question.name.as_str(), kind = question.kind.label(), "step answered");
        self.answers.insert(question.name, answer);
        Ok(self)
    }
}

pub type StepResult<T> = Result<StepSurvey<T>, StepError<T>>;

// ============================================================================
// ERRORS
// ============================================================================

/// A failed step: the error plus the runner as it was before the step.
pub struct StepError<T: Terminal> {
    pub survey: StepSurvey<T>,
    pub error: PromptError,
}

impl<T: Terminal> StepError<T> {
    pub fn is_aborted(&self) -> bool {
        self.error.is_aborted()
    }

    pub fn into_parts(self) -> (StepSurvey<T>, PromptError) {
        (self.survey, self.error)
    }
}

impl<T: Terminal> From<StepError<T>> for PromptError {
    fn from(err: StepError<T>) -> Self {
        err.error
    }
}

impl<T: Terminal> fmt::Debug for StepError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepError")
            .field("error", &self.error)
            .field("answers", &self.survey.answers)
            .finish()
    }
}

impl<T: Terminal> fmt::Display for StepError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T: Terminal> std::error::Error for StepError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

// ============================================================================
// TESTS
// ============================================================================
