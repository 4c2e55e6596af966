//! Answer formatting for output.
//!
//! Pure functions: (AnswerSet, OutputFormat) -> String.
//! No I/O, no side effects.

use serde_json::Value;

use crate::error::PromptError;
use crate::types::{Answer, AnswerSet, OutputFormat};

/// Format collected answers for output.
///
/// # Errors
///
/// `Json` if serialization fails (not expected for well-formed answers).
pub fn format_answers(answers: &AnswerSet, format: OutputFormat) -> Result<String, PromptError> {
    match format {
        OutputFormat::Human => Ok(format_human(answers)),
        OutputFormat::Json => format_json(answers),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(answers: &AnswerSet) -> String {
    let mut out = String::new();
    for (name, answer) in answers.iter() {
        out.push_str(&format!("{}: {}\n", name, format_answer(answer)));
    }
    out
}

fn format_answer(answer: &Answer) -> String {
    match answer {
        Answer::Text(text) => text.clone(),
        Answer::Bool(true) => "yes".to_string(),
        Answer::Bool(false) => "no".to_string(),
        Answer::Single(value) => format_value(value),
        Answer::Multi(values) if values.is_empty() => "(none)".to_string(),
        Answer::Multi(values) => values
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Strings unquoted, everything else as JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(answers: &AnswerSet) -> Result<String, PromptError> {
    let mut out = serde_json::to_string_pretty(answers)?;
    out.push('\n');
    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================
