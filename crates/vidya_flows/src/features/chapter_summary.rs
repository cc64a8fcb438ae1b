//! Chapter summary generation.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Request for a chapter summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryInput {
    /// Grade level
    pub grade_level: String,
    /// Subject
    pub subject: String,
    /// Chapter
    pub chapter: String,
}

/// A generated chapter summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// One-paragraph summary
    pub summary: String,
    /// Key takeaways in reading order
    pub key_points: Vec<String>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("Summarize for a grade ")
        .placeholder("grade_level")
        .literal(" student the ")
        .placeholder("subject")
        .literal(" chapter \"")
        .placeholder("chapter")
        .literal(
            "\": one tight paragraph plus 3 to 8 key points a student should \
             remember for the exam.",
        )
        .build()
});

/// The chapter-summary flow.
pub struct ChapterSummary;

impl Feature for ChapterSummary {
    type Input = SummaryInput;
    type Output = SummaryOutput;

    const NAME: &'static str = "chapter_summary";

    fn input_schema() -> Schema {
        Schema::new(
            "summary_input",
            vec![
                Field::required("grade_level", FieldType::non_empty_string()),
                Field::required("subject", FieldType::non_empty_string()),
                Field::required("chapter", FieldType::non_empty_string()),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        Schema::new(
            "summary_output",
            vec![
                Field::required("summary", FieldType::string()),
                Field::required(
                    "key_points",
                    FieldType::array(FieldType::non_empty_string()),
                ),
            ],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        if output.summary.trim().is_empty() {
            return Err(FlowError::generation_failed(
                "A summary could not be generated for this chapter. Try again.",
            ));
        }
        Ok(output)
    }
}
