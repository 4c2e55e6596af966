//! Domain types for keyprompt.
//!
//! Questions describe what to ask; answers are what came back. Item values
//! are opaque `serde_json::Value`s compared by equality only.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PromptError;

// ============================================================================
// ITEMS & QUESTIONS
// ============================================================================

/// An option offered in a radio or checkbox list.
///
/// `title` may already carry ANSI styling; it is rendered as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub value: Value,
}

impl Item {
    pub fn new(title: impl Into<String>, value: impl Into<Value>) -> Self {
        Item {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// What kind of prompt a question uses.
///
/// Only the list kinds carry items, so "items iff radio/checkbox" is
/// enforced by the type. Non-emptiness is checked by [`Question::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Free-text line.
    Ask,
    /// Single keypress yes/no.
    Confirm,
    /// Single-select list.
    Radio { items: Vec<Item> },
    /// Multi-select list.
    Checkbox { items: Vec<Item> },
}

impl QuestionKind {
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            QuestionKind::Radio { items } | QuestionKind::Checkbox { items } => Some(items),
            QuestionKind::Ask | QuestionKind::Confirm => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Ask => "ask",
            QuestionKind::Confirm => "confirm",
            QuestionKind::Radio { .. } => "radio",
            QuestionKind::Checkbox { .. } => "checkbox",
        }
    }
}

/// A named question in a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Key the answer is stored under.
    pub name: String,
    /// Text shown to the user. An empty prompt omits the header line of a list.
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn ask(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(name, prompt, QuestionKind::Ask)
    }

    pub fn confirm(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(name, prompt, QuestionKind::Confirm)
    }

    pub fn radio(name: impl Into<String>, prompt: impl Into<String>, items: Vec<Item>) -> Self {
        Self::new(name, prompt, QuestionKind::Radio { items })
    }

    pub fn checkbox(name: impl Into<String>, prompt: impl Into<String>, items: Vec<Item>) -> Self {
        Self::new(name, prompt, QuestionKind::Checkbox { items })
    }

    fn new(name: impl Into<String>, prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Question {
            name: name.into(),
            prompt: prompt.into(),
            kind,
        }
    }

    /// Check the item-list precondition without running anything.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a radio or checkbox question has no items.
    pub fn validate(&self) -> Result<(), PromptError> {
        match self.kind.items() {
            Some([]) => Err(PromptError::empty_items(&self.prompt)),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// ANSWERS
// ============================================================================

/// One resolved answer, tagged by the prompt kind that produced it.
///
/// Serialized untagged so an answer set reads as a plain JSON object.
/// Deserialization is shape-based: strings become `Text`, booleans `Bool`,
/// arrays `Multi`, anything else `Single`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Bool(bool),
    Multi(Vec<Value>),
    Single(Value),
}

impl Answer {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Answer::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_single(&self) -> Option<&Value> {
        match self {
            Answer::Single(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[Value]> {
        match self {
            Answer::Multi(vs) => Some(vs),
            _ => None,
        }
    }
}

/// Accumulated `name -> answer` results, in execution order.
///
/// Re-inserting an existing name replaces the answer but keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(IndexMap<String, Answer>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an answer, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.0.insert(name.into(), answer)
    }

    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// The answer to an `ask` question.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Answer::as_text)
    }

    /// The answer to a `confirm` question.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Answer::as_bool)
    }

    /// The answer to a `radio` question.
    pub fn choice(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Answer::as_single)
    }

    /// The answer to a `checkbox` question.
    pub fn choices(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Answer::as_multi)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Answer)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, Answer)>>(iter: I) -> Self {
        AnswerSet(iter.into_iter().collect())
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// How answers are printed once a survey completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
