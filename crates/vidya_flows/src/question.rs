//! The shared question entity and its domain rules.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};

/// Allowed question-kind strings, shared by serde and the schemas.
pub(crate) const QUESTION_KINDS: &[&str] = &[
    "multiple_choice",
    "true_false",
    "assertion_reason",
    "short_answer",
    "long_answer",
];

/// The kind of a generated question.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionKind {
    /// Four options, one correct
    MultipleChoice,
    /// Options fixed to `["True", "False"]`
    TrueFalse,
    /// Assertion/reason statement with four standard options
    AssertionReason,
    /// Free-text answer, no options
    ShortAnswer,
    /// Extended free-text answer, no options
    LongAnswer,
}

/// A single generated question.
///
/// Invariant (enforced by [`validate_question`]): when `options` is
/// present, `answer` equals one of them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question kind tag
    pub kind: QuestionKind,
    /// Question or statement text
    pub text: String,
    /// Choices, when the kind has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// The correct answer; must match one option verbatim when options exist
    pub answer: String,
    /// Worked explanation of the answer
    pub explanation: String,
    /// Per-question difficulty, when the model assigns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Marks allotted, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<u32>,
}

/// Schema fragment describing one question record.
pub(crate) fn question_field_type() -> FieldType {
    FieldType::Object(Schema::new(
        "question",
        vec![
            Field::required("kind", FieldType::Enumeration(QUESTION_KINDS)),
            Field::required("text", FieldType::non_empty_string()),
            Field::optional(
                "options",
                FieldType::bounded_array(FieldType::non_empty_string(), 2, 4),
            ),
            Field::required("answer", FieldType::non_empty_string()),
            Field::required("explanation", FieldType::non_empty_string()),
            Field::optional("difficulty", FieldType::string()),
            Field::optional("marks", FieldType::positive_integer()),
        ],
    ))
}

/// Checks the domain rules of a single question.
///
/// `position` is the zero-based index used in failure messages.
///
/// # Errors
///
/// Returns `GenerationFailed` when:
/// - a multiple-choice or assertion-reason question does not have exactly
///   4 distinct options
/// - a true/false question's options are not exactly `["True", "False"]`
/// - the answer does not equal one option verbatim
pub fn validate_question(question: &Question, position: usize) -> Result<(), FlowError> {
    match question.kind {
        QuestionKind::MultipleChoice | QuestionKind::AssertionReason => {
            let options = question.options.as_deref().ok_or_else(|| {
                FlowError::generation_failed(format!(
                    "Question {} is missing its options. Please try again.",
                    position + 1
                ))
            })?;
            if options.len() != 4 {
                return Err(FlowError::generation_failed(format!(
                    "Question {} has {} options instead of 4. Please try again.",
                    position + 1,
                    options.len()
                )));
            }
            if !all_distinct(options) {
                return Err(FlowError::generation_failed(format!(
                    "Question {} has duplicate options. Please try again.",
                    position + 1
                )));
            }
            require_answer_in_options(question, options, position)
        }
        QuestionKind::TrueFalse => {
            let options = question.options.as_deref().unwrap_or(&[]);
            if options != ["True", "False"] {
                return Err(FlowError::generation_failed(format!(
                    "Question {} is not a well-formed true/false question. Please try again.",
                    position + 1
                )));
            }
            require_answer_in_options(question, options, position)
        }
        QuestionKind::ShortAnswer | QuestionKind::LongAnswer => Ok(()),
    }
}

fn require_answer_in_options(
    question: &Question,
    options: &[String],
    position: usize,
) -> Result<(), FlowError> {
    if options.iter().any(|option| option == &question.answer) {
        Ok(())
    } else {
        Err(FlowError::generation_failed(format!(
            "Question {}'s answer does not match any option. Please try again.",
            position + 1
        )))
    }
}

fn all_distinct(options: &[String]) -> bool {
    let mut seen = std::collections::HashSet::new();
    options.iter().all(|option| seen.insert(option))
}
