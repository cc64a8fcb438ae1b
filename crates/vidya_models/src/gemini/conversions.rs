//! Type conversions between Vidya core types and the Gemini wire format.

use crate::gemini::dto::{GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest};
use crate::gemini::GeminiResponse;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use vidya_core::{GenerateRequest, GenerateResponse, Input, MediaSource, Output, Role};
use vidya_error::{InvocationError, InvocationErrorKind};

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Converts a Vidya GenerateRequest to the Gemini wire format.
///
/// System messages become the request's `systemInstruction`; user and
/// assistant messages map to "user"/"model" contents. Binary media is
/// base64-encoded inline; URL sources are rejected.
pub fn to_gemini_request(req: &GenerateRequest) -> Result<GeminiRequest, InvocationError> {
    let mut contents = Vec::new();
    let mut system_parts = Vec::new();

    for message in &req.messages {
        let mut parts = Vec::new();
        for input in message.content() {
            parts.push(to_part(input)?);
        }

        match message.role() {
            Role::System => system_parts.extend(parts),
            Role::User => contents.push(GeminiContent {
                role: Some("user".to_string()),
                parts,
            }),
            Role::Assistant => contents.push(GeminiContent {
                role: Some("model".to_string()),
                parts,
            }),
        }
    }

    let system_instruction = if system_parts.is_empty() {
        None
    } else {
        Some(GeminiContent {
            role: None,
            parts: system_parts,
        })
    };

    let generation_config = Some(GeminiGenerationConfig {
        temperature: req.temperature,
        max_output_tokens: req.max_tokens,
        response_mime_type: req
            .response_schema
            .as_ref()
            .map(|_| "application/json".to_string()),
        response_schema: req.response_schema.clone(),
    });

    Ok(GeminiRequest {
        contents,
        system_instruction,
        generation_config,
    })
}

fn to_part(input: &Input) -> Result<GeminiPart, InvocationError> {
    match input {
        Input::Text(text) => Ok(GeminiPart::text(text.clone())),
        Input::Image(attachment) => {
            let mime = attachment
                .mime()
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
            let data = match attachment.source() {
                MediaSource::Base64(data) => data.clone(),
                MediaSource::Binary(bytes) => BASE64.encode(bytes),
                MediaSource::Url(_) => {
                    return Err(InvocationError::new(
                        InvocationErrorKind::UrlMediaNotSupported,
                    ));
                }
            };
            Ok(GeminiPart::inline(mime, data))
        }
    }
}

/// Converts a Gemini response to the unified response object.
///
/// Text parts of the first candidate are concatenated into a single
/// `Text` output; an empty candidate list yields an empty output list,
/// which the invoker classifies as `NoOutput`.
pub fn from_gemini_response(response: &GeminiResponse) -> GenerateResponse {
    let mut outputs = Vec::new();

    if let Some(candidate) = response.candidates.first() {
        if let Some(content) = &candidate.content {
            let texts: Vec<&str> = content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect();
            if !texts.is_empty() {
                outputs.push(Output::Text(texts.join("\n")));
            }
        }
    }

    GenerateResponse::new(outputs)
}
