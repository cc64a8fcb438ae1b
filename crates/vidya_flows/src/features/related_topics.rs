//! Related topic suggestions.
//!
//! This is the one flow where an empty result is a legitimate degraded
//! success: "nothing related found" renders fine as an empty shelf, so
//! the list is returned as-is rather than converted into a failure. Every
//! other list-producing flow treats empty output as `GenerationFailed`.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Request for related topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicsInput {
    /// Subject
    pub subject: String,
    /// Chapter the student just studied
    pub chapter: String,
}

/// One suggested topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Topic title
    pub title: String,
    /// Why it connects to the chapter
    pub reason: String,
}

/// Suggested related topics, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicsOutput {
    /// Suggestions in relevance order
    pub topics: Vec<Topic>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("A student just finished the ")
        .placeholder("subject")
        .literal(" chapter \"")
        .placeholder("chapter")
        .literal(
            "\". Suggest up to 5 related topics worth exploring next, each with one \
             line on how it connects. If nothing genuinely relates, return an empty \
             list rather than padding.",
        )
        .build()
});

/// The related-topics flow.
pub struct RelatedTopics;

impl Feature for RelatedTopics {
    type Input = TopicsInput;
    type Output = TopicsOutput;

    const NAME: &'static str = "related_topics";

    fn input_schema() -> Schema {
        Schema::new(
            "topics_input",
            vec![
                Field::required("subject", FieldType::non_empty_string()),
                Field::required("chapter", FieldType::non_empty_string()),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        let topic = FieldType::Object(Schema::new(
            "topic",
            vec![
                Field::required("title", FieldType::non_empty_string()),
                Field::required("reason", FieldType::non_empty_string()),
            ],
        ));
        Schema::new(
            "topics_output",
            vec![Field::required("topics", FieldType::bounded_array(topic, 0, 5))],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        // Empty is a valid answer here; pass it through untouched.
        Ok(output)
    }
}
