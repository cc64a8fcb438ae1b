//! Integration tests for the two-stage username checker.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use vidya_core::{GenerateRequest, GenerateResponse, Output};
use vidya_error::{InvocationError, InvocationErrorKind};
use vidya_flows::{UsernameChecker, UsernameDirectory, UsernameStatus};
use vidya_models::GenerativeModel;

/// In-memory directory over a fixed set of taken names.
struct FixedDirectory(HashSet<String>);

impl FixedDirectory {
    fn taken(names: &[&str]) -> Self {
        Self(names.iter().map(|s| s.to_string()).collect())
    }
}

impl UsernameDirectory for FixedDirectory {
    fn exists(&self, candidate: &str) -> bool {
        self.0.contains(candidate)
    }
}

/// Replays a canned suggestion payload and counts calls through a shared
/// handle, since the checker owns the driver.
struct CountingModel {
    output: Value,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GenerativeModel for CountingModel {
    async fn generate(&self, _req: &GenerateRequest) -> Result<GenerateResponse, InvocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(GenerateResponse::new(vec![Output::Json(self.output.clone())]))
    }

    fn model_name(&self) -> &str {
        "counting-stub"
    }
}

struct FailingModel;

#[async_trait]
impl GenerativeModel for FailingModel {
    async fn generate(&self, _req: &GenerateRequest) -> Result<GenerateResponse, InvocationError> {
        Err(InvocationError::new(InvocationErrorKind::Overloaded {
            status: 503,
            message: "overloaded".to_string(),
        }))
    }

    fn model_name(&self) -> &str {
        "failing-stub"
    }
}

#[tokio::test]
async fn ill_formed_names_are_rejected_without_a_model_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let checker = UsernameChecker::new(
        CountingModel {
            output: json!({}),
            calls: calls.clone(),
        },
        FixedDirectory::taken(&[]),
    );

    let status = checker.check("ab").await;

    match status {
        UsernameStatus::Invalid { reason } => assert!(reason.contains("at least 3")),
        other => panic!("expected Invalid, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn free_names_are_available_without_a_model_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let checker = UsernameChecker::new(
        CountingModel {
            output: json!({}),
            calls: calls.clone(),
        },
        FixedDirectory::taken(&["someone_else"]),
    );

    let status = checker.check("Asha_10").await;

    assert_eq!(status, UsernameStatus::Available);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn taken_name_yields_model_suggestions() {
    let calls = Arc::new(AtomicUsize::new(0));
    let checker = UsernameChecker::new(
        CountingModel {
            output: json!({
                "suggestions": ["admin.rao", "admin_x", "adminka", "real_admin"]
            }),
            calls: calls.clone(),
        },
        FixedDirectory::taken(&["admin"]),
    );

    let status = checker.check("admin").await;

    match status {
        UsernameStatus::Taken { suggestions } => {
            assert_eq!(
                suggestions,
                vec!["admin.rao", "admin_x", "adminka", "real_admin"]
            );
        }
        other => panic!("expected Taken, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unusable_model_suggestions_are_filtered_and_topped_up() {
    let checker = UsernameChecker::new(
        CountingModel {
            // One ill-formed, one already taken, one duplicate of the
            // original; only "adminka" survives the filter.
            output: json!({
                "suggestions": ["adminka", "Admin!", "admin_x", "admin"]
            }),
            calls: Arc::new(AtomicUsize::new(0)),
        },
        FixedDirectory::taken(&["admin", "admin_x"]),
    );

    let status = checker.check("admin").await;

    match status {
        UsernameStatus::Taken { suggestions } => {
            assert_eq!(suggestions.len(), 4);
            assert_eq!(suggestions[0], "adminka");
            assert!(!suggestions.contains(&"admin".to_string()));
            assert!(!suggestions.contains(&"admin_x".to_string()));
        }
        other => panic!("expected Taken, got {:?}", other),
    }
}

#[tokio::test]
async fn model_failure_falls_back_to_handwritten_suggestions() {
    let checker = UsernameChecker::new(FailingModel, FixedDirectory::taken(&["admin"]));

    let status = checker.check("admin").await;

    match status {
        UsernameStatus::Taken { suggestions } => {
            assert_eq!(suggestions.len(), 4);
            for suggestion in &suggestions {
                assert!(suggestion.starts_with("admin"), "unexpected: {}", suggestion);
                assert_ne!(suggestion, "admin");
            }
        }
        other => panic!("expected Taken, got {:?}", other),
    }
}
