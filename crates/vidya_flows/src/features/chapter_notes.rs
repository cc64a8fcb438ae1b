//! Chapter notes generation.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// How exhaustive the notes should be.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DetailLevel {
    Brief,
    Standard,
    Detailed,
}

/// Request for chapter notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesInput {
    /// Grade level
    pub grade_level: String,
    /// Subject
    pub subject: String,
    /// Chapter
    pub chapter: String,
    /// Desired depth
    pub detail_level: DetailLevel,
}

/// Generated chapter notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesOutput {
    /// Markdown-formatted notes
    pub notes: String,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("Write ")
        .placeholder("detail_level")
        .literal(" revision notes in markdown for a grade ")
        .placeholder("grade_level")
        .literal(" student on ")
        .placeholder("subject")
        .literal(", chapter \"")
        .placeholder("chapter")
        .literal(
            "\". Use headings, bullet points, and bold key terms. Cover definitions, \
             core concepts, formulas where relevant, and common exam points.",
        )
        .build()
});

/// The chapter-notes flow.
pub struct ChapterNotes;

impl Feature for ChapterNotes {
    type Input = NotesInput;
    type Output = NotesOutput;

    const NAME: &'static str = "chapter_notes";

    fn input_schema() -> Schema {
        Schema::new(
            "notes_input",
            vec![
                Field::required("grade_level", FieldType::non_empty_string()),
                Field::required("subject", FieldType::non_empty_string()),
                Field::required("chapter", FieldType::non_empty_string()),
                Field::required(
                    "detail_level",
                    FieldType::Enumeration(&["brief", "standard", "detailed"]),
                ),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        Schema::new(
            "notes_output",
            vec![Field::required("notes", FieldType::string())
                .describe("Markdown revision notes for the chapter")],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        if output.notes.trim().is_empty() {
            return Err(FlowError::generation_failed(
                "Notes could not be generated for this chapter. Try a different chapter.",
            ));
        }
        Ok(output)
    }
}
