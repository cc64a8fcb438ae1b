//! Multimodal doubt solving, with a hint-only mode.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use vidya_core::Attachment;
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Request to solve a student's doubt.
///
/// Text and images are both optional, but at least one must be present.
/// Attachments are forwarded to the model unmodified, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubtInput {
    /// The doubt in the student's words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Photographed problem statements, notebook pages, etc.
    #[serde(default)]
    pub images: Vec<Attachment>,
    /// When set, only a guiding hint is produced; solution fields are
    /// withheld entirely, not blanked
    #[serde(default)]
    pub hint_only: bool,
}

/// The solver's answer: a bare hint, or a full worked solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DoubtResponse {
    /// Hint-only mode result
    Hint {
        /// A single guiding hint that does not reveal the answer
        hint: String,
    },
    /// Full-solution result
    Solution {
        /// Strategy in one or two sentences
        approach: String,
        /// Numbered working steps
        steps: Vec<String>,
        /// The final answer
        final_answer: String,
    },
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("A student needs help with a doubt.")
        .conditional("question", |body| {
            body.literal(" The doubt: \"").placeholder("question").literal("\".")
        })
        .conditional("images", |body| {
            body.literal(" The attached images show the problem.")
        })
        .media("images")
        .conditional("hint_only", |body| {
            body.literal(
                " Give only ONE short guiding hint that points the student in the \
                 right direction. Do not reveal the solution or the final answer.",
            )
        })
        .build()
});

/// The doubt-solver flow.
pub struct DoubtSolver;

impl Feature for DoubtSolver {
    type Input = DoubtInput;
    type Output = DoubtResponse;

    const NAME: &'static str = "doubt_solver";

    fn input_schema() -> Schema {
        // `images` is structurally opaque to the schema layer; presence
        // rules live in check_input.
        Schema::new(
            "doubt_input",
            vec![
                Field::optional("question", FieldType::non_empty_string()),
                Field::required("hint_only", FieldType::Boolean),
            ],
        )
    }

    fn output_schema(input: &Self::Input) -> Schema {
        if input.hint_only {
            Schema::new(
                "doubt_hint",
                vec![Field::required("hint", FieldType::non_empty_string())
                    .describe("One guiding hint; never the solution")],
            )
        } else {
            Schema::new(
                "doubt_solution",
                vec![
                    Field::required("approach", FieldType::non_empty_string()),
                    Field::required(
                        "steps",
                        FieldType::non_empty_array(FieldType::non_empty_string()),
                    ),
                    Field::required("final_answer", FieldType::non_empty_string()),
                ],
            )
        }
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn check_input(input: &Self::Input) -> Result<(), FlowError> {
        let has_text = input
            .question
            .as_deref()
            .map(|q| !q.trim().is_empty())
            .unwrap_or(false);
        if !has_text && input.images.is_empty() {
            return Err(FlowError::invalid_input(
                None,
                "Provide the doubt as text, an image, or both.",
            ));
        }
        Ok(())
    }

    fn post_validate(
        input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        match (&output, input.hint_only) {
            (DoubtResponse::Hint { .. }, true) => Ok(output),
            (DoubtResponse::Solution { .. }, false) => Ok(output),
            // Shape mismatches slip past the untagged deserializer only
            // when the model answered in the wrong mode.
            (DoubtResponse::Solution { .. }, true) => Err(FlowError::generation_failed(
                "A full solution came back where only a hint was requested. Try again.",
            )),
            (DoubtResponse::Hint { .. }, false) => Err(FlowError::generation_failed(
                "Only a hint came back where a full solution was requested. Try again.",
            )),
        }
    }
}
