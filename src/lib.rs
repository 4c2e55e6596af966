//! keyprompt: Keypress-driven interactive prompts and surveys for the terminal.

pub mod cancel;
pub mod error;
pub mod prompt;
pub mod report;
pub mod survey;
pub mod terminal;
pub mod types;

pub use cancel::CancelToken;
pub use error::PromptError;
pub use prompt::{Prompter, Theme};
pub use survey::{StepError, StepSurvey, Survey};
pub use types::{Answer, AnswerSet, Item, Question, QuestionKind};
