//! Student answer evaluation.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Request to evaluate a written answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// The question that was asked
    pub question: String,
    /// The student's answer, verbatim
    pub student_answer: String,
    /// Maximum marks for the question
    pub max_marks: u32,
}

/// The evaluation verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Awarded marks, between 0 and `max_marks`
    pub score: f64,
    /// Overall feedback paragraph
    pub feedback: String,
    /// What the answer did well
    pub strengths: Vec<String>,
    /// What to improve
    pub improvements: Vec<String>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("You are marking an exam answer. Question: \"")
        .placeholder("question")
        .literal("\". Maximum marks: ")
        .placeholder("max_marks")
        .literal(". The student's answer: \"")
        .placeholder("student_answer")
        .literal(
            "\". Award a fair score (fractions of a mark are fine), write a short \
             feedback paragraph, and list concrete strengths and improvements.",
        )
        .build()
});

/// The answer-evaluation flow.
pub struct AnswerEvaluation;

impl Feature for AnswerEvaluation {
    type Input = EvaluationInput;
    type Output = EvaluationReport;

    const NAME: &'static str = "answer_evaluation";

    fn input_schema() -> Schema {
        Schema::new(
            "evaluation_input",
            vec![
                Field::required("question", FieldType::non_empty_string()),
                Field::required("student_answer", FieldType::non_empty_string()),
                Field::required("max_marks", FieldType::integer(Some(1), Some(100))),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        Schema::new(
            "evaluation_report",
            vec![
                Field::required("score", FieldType::Number),
                Field::required("feedback", FieldType::string()),
                Field::required("strengths", FieldType::array(FieldType::non_empty_string())),
                Field::required(
                    "improvements",
                    FieldType::array(FieldType::non_empty_string()),
                ),
            ],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        if output.score < 0.0 || output.score > f64::from(input.max_marks) {
            return Err(FlowError::generation_failed(format!(
                "The evaluation produced a score outside 0 to {}. Please try again.",
                input.max_marks
            )));
        }
        if output.feedback.trim().is_empty() {
            return Err(FlowError::generation_failed(
                "The evaluation came back without feedback. Please try again.",
            ));
        }
        Ok(output)
    }
}
