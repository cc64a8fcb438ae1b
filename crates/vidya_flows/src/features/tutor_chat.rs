//! Conversational tutor answers.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Substituted when the model replies with nothing usable. This flow
/// degrades instead of failing: a chat box should always say something.
pub(crate) const CLARIFICATION_FALLBACK: &str =
    "I didn't quite catch that. Could you rephrase your question?";

/// Who said a prior turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TutorRole {
    Student,
    Tutor,
}

/// One prior exchange turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Speaker
    pub role: TutorRole,
    /// What was said
    pub text: String,
}

/// Request for a tutor chat answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatInput {
    /// The student's current message
    pub message: String,
    /// Grade level, when known, to pitch the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
    /// Prior turns, oldest first
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// The tutor's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Reply text
    pub reply: String,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal(
            "You are a friendly school tutor. Answer the student's question simply \
             and accurately, with an example where it helps.",
        )
        .conditional("grade_level", |body| {
            body.literal(" Pitch the answer at grade ")
                .placeholder("grade_level")
                .literal(".")
        })
        .conditional("history", |body| {
            body.literal("\n\nConversation so far:\n")
                .each("history", "\n", |turn| {
                    turn.placeholder("role").literal(": ").placeholder("text")
                })
        })
        .literal("\n\nStudent: ")
        .placeholder("message")
        .build()
});

/// The tutor-chat flow.
pub struct TutorChat;

impl Feature for TutorChat {
    type Input = ChatInput;
    type Output = ChatReply;

    const NAME: &'static str = "tutor_chat";

    fn input_schema() -> Schema {
        let turn = FieldType::Object(Schema::new(
            "chat_turn",
            vec![
                Field::required("role", FieldType::Enumeration(&["student", "tutor"])),
                Field::required("text", FieldType::non_empty_string()),
            ],
        ));
        Schema::new(
            "chat_input",
            vec![
                Field::required("message", FieldType::non_empty_string()),
                Field::optional("grade_level", FieldType::non_empty_string()),
                Field::optional("history", FieldType::array(turn)),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        // Deliberately a plain string: a blank reply is handled by the
        // fallback below, not rejected as malformed output.
        Schema::new(
            "chat_reply",
            vec![Field::required("reply", FieldType::string())],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        if output.reply.trim().is_empty() {
            return Ok(ChatReply {
                reply: CLARIFICATION_FALLBACK.to_string(),
            });
        }
        Ok(output)
    }
}
