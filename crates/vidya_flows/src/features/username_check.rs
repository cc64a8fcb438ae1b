//! Username availability checking with model-backed suggestions.
//!
//! Two-stage: a deterministic format check runs first and never touches
//! the model. The model is consulted only when the name is well-formed
//! but already taken, to propose alternatives; if that call fails, a
//! hand-written fallback suggestion set is used instead. The "is this
//! name taken" lookup is an injected collaborator so tests (and the app
//! shell) can supply their own directory.

use crate::engine::Feature;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};
use vidya_error::FlowError;
use vidya_models::GenerativeModel;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 20;
const SUGGESTION_COUNT: usize = 4;

/// Lookup collaborator for existing usernames.
pub trait UsernameDirectory: Send + Sync {
    /// True when the candidate is already taken.
    fn exists(&self, candidate: &str) -> bool;
}

impl<T: UsernameDirectory + ?Sized> UsernameDirectory for &T {
    fn exists(&self, candidate: &str) -> bool {
        (**self).exists(candidate)
    }
}

/// Outcome of a username check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UsernameStatus {
    /// The candidate fails the format rules; no lookup or model call
    Invalid {
        /// Which rule failed, in user-facing words
        reason: String,
    },
    /// The candidate is well-formed and free
    Available,
    /// The candidate is taken; alternatives are offered
    Taken {
        /// Up to 4 well-formed, unclaimed alternatives
        suggestions: Vec<String>,
    },
}

/// Deterministic format check. Runs before any directory lookup or
/// model call.
///
/// Rules: 3 to 20 characters after lowercasing and trimming; starts with
/// a letter; only `a-z`, `0-9`, `.` and `_`; no trailing separator and no
/// consecutive separators.
///
/// # Errors
///
/// Returns the violated rule as a user-facing message.
pub fn precheck_username(candidate: &str) -> Result<String, String> {
    let normalized = candidate.trim().to_lowercase();

    if normalized.len() < MIN_LEN {
        return Err(format!("must be at least {} characters long", MIN_LEN));
    }
    if normalized.len() > MAX_LEN {
        return Err(format!("must be at most {} characters long", MAX_LEN));
    }
    if !normalized
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase())
    {
        return Err("must start with a letter".to_string());
    }
    if !normalized
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
    {
        return Err("may only contain letters, digits, '.' and '_'".to_string());
    }
    if normalized.ends_with('.') || normalized.ends_with('_') {
        return Err("must not end with '.' or '_'".to_string());
    }
    let separators = ['.', '_'];
    let mut previous_was_separator = false;
    for c in normalized.chars() {
        let is_separator = separators.contains(&c);
        if is_separator && previous_was_separator {
            return Err("must not contain consecutive '.' or '_'".to_string());
        }
        previous_was_separator = is_separator;
    }

    Ok(normalized)
}

/// Model request for username alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SuggestionInput {
    /// The taken username
    username: String,
}

/// Model response with alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SuggestionOutput {
    /// Proposed usernames
    suggestions: Vec<String>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("The username \"")
        .placeholder("username")
        .literal(
            "\" is taken. Propose 4 alternative usernames a student would like: \
             lowercase letters, digits, '.' or '_' only, starting with a letter, \
             3 to 20 characters, close in spirit to the original.",
        )
        .build()
});

/// Internal feature used only for the suggestion call.
struct UsernameSuggestions;

impl Feature for UsernameSuggestions {
    type Input = SuggestionInput;
    type Output = SuggestionOutput;

    const NAME: &'static str = "username_suggestions";

    fn input_schema() -> Schema {
        Schema::new(
            "suggestion_input",
            vec![Field::required("username", FieldType::non_empty_string())],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        Schema::new(
            "suggestion_output",
            vec![Field::required(
                "suggestions",
                FieldType::fixed_array(FieldType::non_empty_string(), SUGGESTION_COUNT),
            )],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn post_validate(
        _input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        Ok(output)
    }
}

/// Two-stage username checker over a directory and a model driver.
pub struct UsernameChecker<M, D> {
    flow: crate::GenerationFlow<UsernameSuggestions, M>,
    directory: D,
}

impl<M: GenerativeModel, D: UsernameDirectory> UsernameChecker<M, D> {
    /// Creates a checker over the given model driver and directory.
    pub fn new(model: M, directory: D) -> Self {
        Self {
            flow: crate::GenerationFlow::new(model),
            directory,
        }
    }

    /// Checks a candidate username.
    ///
    /// Ill-formed candidates and free candidates resolve without any
    /// model call. Only a conflict triggers the suggestion call, and a
    /// failed suggestion call degrades to the hand-written fallback set
    /// rather than failing the check.
    #[instrument(skip_all, fields(feature = "username_check"))]
    pub async fn check(&self, candidate: &str) -> UsernameStatus {
        let normalized = match precheck_username(candidate) {
            Ok(normalized) => normalized,
            Err(reason) => {
                debug!(reason = %reason, "Candidate rejected by format check");
                return UsernameStatus::Invalid { reason };
            }
        };

        if !self.directory.exists(&normalized) {
            return UsernameStatus::Available;
        }

        let suggestions = match self
            .flow
            .run(SuggestionInput {
                username: normalized.clone(),
            })
            .await
        {
            Ok(output) => self.usable_suggestions(output.suggestions, &normalized),
            Err(e) => {
                warn!(error = %e, "Suggestion call failed; using fallback set");
                Vec::new()
            }
        };

        let suggestions = self.top_up(suggestions, &normalized);
        UsernameStatus::Taken { suggestions }
    }

    /// Keeps only well-formed, unclaimed, non-duplicate suggestions.
    fn usable_suggestions(&self, proposed: Vec<String>, original: &str) -> Vec<String> {
        let mut kept = Vec::new();
        for suggestion in proposed {
            let Ok(normalized) = precheck_username(&suggestion) else {
                continue;
            };
            if normalized == original
                || kept.contains(&normalized)
                || self.directory.exists(&normalized)
            {
                continue;
            }
            kept.push(normalized);
            if kept.len() == SUGGESTION_COUNT {
                break;
            }
        }
        kept
    }

    /// Fills up to the suggestion count from deterministic variants.
    fn top_up(&self, mut suggestions: Vec<String>, base: &str) -> Vec<String> {
        let variants = fallback_variants(base);
        for variant in variants {
            if suggestions.len() >= SUGGESTION_COUNT {
                break;
            }
            if precheck_username(&variant).is_err()
                || suggestions.contains(&variant)
                || self.directory.exists(&variant)
            {
                continue;
            }
            suggestions.push(variant);
        }
        suggestions
    }
}

/// Hand-written fallback variants tried in order.
fn fallback_variants(base: &str) -> Vec<String> {
    let stem: String = base.chars().take(MAX_LEN - 4).collect();
    vec![
        format!("{}_{}", stem, 1),
        format!("{}{}", stem, 7),
        format!("{}{}", stem, 21),
        format!("{}.{}", stem, 9),
        format!("{}{}", stem, 99),
        format!("{}_{}", stem, 42),
        format!("{}{}", stem, 123),
        format!("{}.{}", stem, 77),
    ]
}

#[cfg(test)]
mod tests {
    use super::{fallback_variants, precheck_username};

    #[test]
    fn accepts_and_normalizes_well_formed_names() {
        assert_eq!(precheck_username("  Asha_10 ").unwrap(), "asha_10");
        assert_eq!(precheck_username("rahul.k").unwrap(), "rahul.k");
    }

    #[test]
    fn rejects_too_short_names_with_length_message() {
        let reason = precheck_username("ab").unwrap_err();
        assert!(reason.contains("at least 3"));
    }

    #[test]
    fn rejects_bad_starts_and_charsets() {
        assert!(precheck_username("1abc").is_err());
        assert!(precheck_username("_abc").is_err());
        assert!(precheck_username("ab cd").is_err());
        assert!(precheck_username("ab@cd").is_err());
    }

    #[test]
    fn rejects_separator_abuse() {
        assert!(precheck_username("abc_").is_err());
        assert!(precheck_username("ab..cd").is_err());
        assert!(precheck_username("ab._cd").is_err());
    }

    #[test]
    fn rejects_too_long_names() {
        let long = "a".repeat(21);
        assert!(precheck_username(&long).is_err());
    }

    #[test]
    fn fallback_variants_are_well_formed() {
        for variant in fallback_variants("admin") {
            assert!(precheck_username(&variant).is_ok(), "bad variant {}", variant);
        }
    }

    #[test]
    fn fallback_variants_respect_max_length() {
        let base = "a".repeat(20);
        for variant in fallback_variants(&base) {
            assert!(variant.len() <= 20, "too long: {}", variant);
        }
    }
}
