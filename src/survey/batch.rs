//! Batch runner: register every question up front, then execute them all.
//!
//! No branching: every registered question is always asked, in
//! registration order. Branching needs [`StepSurvey`](super::StepSurvey).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PromptError;
use crate::prompt::Prompter;
use crate::terminal::Terminal;
use crate::types::{Answer, AnswerSet, Item, Question, QuestionKind};

/// On-disk shape of a survey: `{"questions": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyDefinition {
    pub questions: Vec<Question>,
}

/// An ordered plan of questions.
///
/// Registration consumes and returns the survey; [`execute`](Survey::execute)
/// consumes it for good, so registering after execution cannot happen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Survey {
    questions: Vec<Question>,
}

impl Survey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON survey definition.
    ///
    /// # Errors
    ///
    /// `Json` for malformed input, `InvalidArgument` for a list question
    /// without items.
    pub fn from_json(json: &str) -> Result<Self, PromptError> {
        let definition: SurveyDefinition = serde_json::from_str(json)?;
        for question in &definition.questions {
            question.validate()?;
        }
        Ok(Survey {
            questions: definition.questions,
        })
    }

    /// Load a survey definition from a file.
    pub fn load(path: &Path) -> Result<Self, PromptError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn ask(self, name: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.question(Question::ask(name, prompt))
    }

    pub fn confirm(self, name: impl Into<String>, prompt: impl Into<String>) -> Self {
        self.question(Question::confirm(name, prompt))
    }

    pub fn radio(
        self,
        name: impl Into<String>,
        prompt: impl Into<String>,
        items: Vec<Item>,
    ) -> Self {
        self.question(Question::radio(name, prompt, items))
    }

    pub fn checkbox(
        self,
        name: impl Into<String>,
        prompt: impl Into<String>,
        items: Vec<Item>,
    ) -> Self {
        self.question(Question::checkbox(name, prompt, items))
    }

    /// Append an already-built question.
    pub fn question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn definition(&self) -> SurveyDefinition {
        SurveyDefinition {
            questions: self.questions.clone(),
        }
    }

    /// Ask every question in order and collect the answers.
    ///
    /// The cursor is hidden for the whole run and shown again at the end,
    /// also when a question fails.
    /// A later question with a duplicate name overwrites the earlier answer.
    ///
    /// # Errors
    ///
    /// The first failing question's error, unchanged; remaining questions
    /// are not asked.
    pub fn execute<T: Terminal>(self, prompter: &mut Prompter<T>) -> Result<AnswerSet, PromptError> {
        info!(questions = self.questions.len(), "executing survey");
        prompter.hide_cursor()?;

        let result = ask_all(prompter, self.questions);
        let shown = prompter.show_cursor();
        let answers = result?;
        shown?;
        Ok(answers)
    }
}

fn ask_all<T: Terminal>(
    prompter: &mut Prompter<T>,
    questions: Vec<Question>,
) -> Result<AnswerSet, PromptError> {
    let mut answers = AnswerSet::new();
    for question in questions {
        let answer = ask_question(prompter, &question)?;
        debug!(name = question.name.as_str(), kind = question.kind.label(), "answered");
        answers.insert(question.name, answer);
    }
    Ok(answers)
}

/// Dispatch one question to its primitive.
pub(crate) fn ask_question<T: Terminal>(
    prompter: &mut Prompter<T>,
    question: &Question,
) -> Result<Answer, PromptError> {
    let prompt = question.prompt.as_str();
    Ok(match &question.kind {
        QuestionKind::Ask => Answer::Text(prompter.ask(prompt)?),
        QuestionKind::Confirm => Answer::Bool(prompter.confirm(prompt)?),
        QuestionKind::Radio { items } => Answer::Single(prompter.radio(prompt, items)?),
        QuestionKind::Checkbox { items } => Answer::Multi(prompter.checkbox(prompt, items)?),
    })
}

// ============================================================================
// TESTS
// ============================================================================
