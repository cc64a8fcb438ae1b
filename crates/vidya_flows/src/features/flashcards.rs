//! Flashcard generation.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Request for a flashcard set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardInput {
    /// Grade level
    pub grade_level: String,
    /// Subject
    pub subject: String,
    /// Chapter
    pub chapter: String,
    /// How many cards to produce
    pub count: u32,
}

/// One flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Prompt side
    pub front: String,
    /// Answer side
    pub back: String,
}

/// A generated flashcard set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardSet {
    /// The generated cards
    pub cards: Vec<Flashcard>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("Create exactly ")
        .placeholder("count")
        .literal(" revision flashcards for a grade ")
        .placeholder("grade_level")
        .literal(" student on ")
        .placeholder("subject")
        .literal(", chapter \"")
        .placeholder("chapter")
        .literal(
            "\". Each card has a short question or term on the front and a concise \
             answer or definition on the back. No duplicates.",
        )
        .build()
});

/// The flashcards flow.
pub struct Flashcards;

impl Feature for Flashcards {
    type Input = FlashcardInput;
    type Output = FlashcardSet;

    const NAME: &'static str = "flashcards";

    fn input_schema() -> Schema {
        Schema::new(
            "flashcard_input",
            vec![
                Field::required("grade_level", FieldType::non_empty_string()),
                Field::required("subject", FieldType::non_empty_string()),
                Field::required("chapter", FieldType::non_empty_string()),
                Field::required("count", FieldType::integer(Some(1), Some(100))),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        let card = FieldType::Object(Schema::new(
            "flashcard",
            vec![
                Field::required("front", FieldType::non_empty_string()),
                Field::required("back", FieldType::non_empty_string()),
            ],
        ));
        Schema::new(
            "flashcard_set",
            vec![Field::required("cards", FieldType::array(card))],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        if output.cards.is_empty() {
            return Err(FlowError::generation_failed(
                "No flashcards could be generated. Try a different chapter.",
            ));
        }
        Ok(output)
    }
}
