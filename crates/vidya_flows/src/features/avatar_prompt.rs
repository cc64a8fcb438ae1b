//! Avatar image prompt generation.
//!
//! The pipeline produces a detailed image-generation prompt; the actual
//! rendering happens downstream in whatever image backend the app uses.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Visual style for the avatar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AvatarStyle {
    Cartoon,
    Anime,
    Realistic,
    Pixel,
}

/// Request for an avatar prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarInput {
    /// The student's description of themselves or their character
    pub description: String,
    /// Desired style
    pub style: AvatarStyle,
}

/// A generated avatar specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarSpec {
    /// Detailed image-generation prompt
    pub image_prompt: String,
    /// Suggested color palette, 3 to 6 entries
    pub palette: Vec<String>,
    /// Things the image generator should avoid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("Write a detailed ")
        .placeholder("style")
        .literal(
            "-style avatar image prompt for a student profile picture based on this \
             description: \"",
        )
        .placeholder("description")
        .literal(
            "\". Keep it friendly and school-appropriate. Also propose a color \
             palette of 3 to 6 hex colors and, optionally, a negative prompt.",
        )
        .build()
});

/// The avatar-prompt flow.
pub struct AvatarPrompt;

impl Feature for AvatarPrompt {
    type Input = AvatarInput;
    type Output = AvatarSpec;

    const NAME: &'static str = "avatar_prompt";

    fn input_schema() -> Schema {
        Schema::new(
            "avatar_input",
            vec![
                Field::required("description", FieldType::non_empty_string()),
                Field::required(
                    "style",
                    FieldType::Enumeration(&["cartoon", "anime", "realistic", "pixel"]),
                ),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        Schema::new(
            "avatar_spec",
            vec![
                Field::required("image_prompt", FieldType::non_empty_string()),
                Field::required(
                    "palette",
                    FieldType::bounded_array(FieldType::non_empty_string(), 3, 6),
                ),
                Field::optional("negative_prompt", FieldType::string()),
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
        if output.image_prompt.trim().is_empty() {
            return Err(FlowError::generation_failed(
                "An avatar prompt could not be generated. Try a richer description.",
            ));
        }
        Ok(output)
    }
}
