//! Sequencing engines over the prompt primitives.
//!
//! - `batch`: declarative, register-then-execute, no branching
//! - `step`: one awaited step at a time, caller-driven branching

pub mod batch;
pub mod step;

pub use batch::{Survey, SurveyDefinition};
pub use step::{StepError, StepResult, StepSurvey};
