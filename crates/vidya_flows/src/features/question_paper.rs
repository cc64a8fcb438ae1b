//! Question paper generation.

use crate::engine::Feature;
use crate::question::{QUESTION_KINDS, Question, QuestionKind, question_field_type, validate_question};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Paper difficulty, a closed set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Request for a generated question paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperInput {
    /// Grade level, e.g. "10"
    pub grade_level: String,
    /// Subject, e.g. "Science"
    pub subject: String,
    /// Chapter, e.g. "Light"
    pub chapter: String,
    /// How many questions to produce
    pub number_of_questions: u32,
    /// Overall difficulty
    pub difficulty: Difficulty,
    /// Kinds to draw from; empty means the model may mix freely
    #[serde(default)]
    pub question_types: Vec<QuestionKind>,
}

/// A generated question paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperOutput {
    /// The generated questions
    pub questions: Vec<Question>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("You are an experienced school examiner. Generate exactly ")
        .placeholder("number_of_questions")
        .literal(" exam questions for a grade ")
        .placeholder("grade_level")
        .literal(" student studying ")
        .placeholder("subject")
        .literal(", chapter \"")
        .placeholder("chapter")
        .literal("\". Overall difficulty: ")
        .placeholder("difficulty")
        .literal(".")
        .conditional("question_types", |body| {
            body.literal(" Restrict yourself to these question kinds: ")
                .each("question_types", ", ", |item| item.placeholder("."))
                .literal(".")
        })
        .literal(
            " Multiple-choice and assertion-reason questions need exactly 4 distinct \
             options, and the answer must repeat one option verbatim. True/false \
             questions use the options [\"True\", \"False\"]. Every question needs a \
             short explanation of the correct answer.",
        )
        .build()
});

/// The question-paper flow.
///
/// Zero questions is a failure: the student asked for a paper, an empty
/// one is never a legitimate result.
pub struct QuestionPaper;

impl Feature for QuestionPaper {
    type Input = PaperInput;
    type Output = PaperOutput;

    const NAME: &'static str = "question_paper";

    fn input_schema() -> Schema {
        Schema::new(
            "paper_input",
            vec![
                Field::required("grade_level", FieldType::non_empty_string()),
                Field::required("subject", FieldType::non_empty_string()),
                Field::required("chapter", FieldType::non_empty_string()),
                Field::required(
                    "number_of_questions",
                    FieldType::integer(Some(1), Some(50)),
                ),
                Field::required(
                    "difficulty",
                    FieldType::Enumeration(&["easy", "medium", "hard"]),
                ),
                Field::optional(
                    "question_types",
                    FieldType::array(FieldType::Enumeration(QUESTION_KINDS)),
                ),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        Schema::new(
            "paper_output",
            vec![Field::required(
                "questions",
                FieldType::array(question_field_type()),
            )
            .describe("The generated exam questions")],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        if output.questions.is_empty() {
            return Err(FlowError::generation_failed(
                "No questions could be generated for this chapter. \
                 Try a different chapter or fewer constraints.",
            ));
        }
        for (position, question) in output.questions.iter().enumerate() {
            validate_question(question, position)?;
        }
        Ok(output)
    }
}
