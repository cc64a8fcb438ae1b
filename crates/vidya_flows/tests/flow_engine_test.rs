//! Integration tests for the generation-flow engine over stub drivers.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use vidya_core::{
    Attachment, GenerateRequest, GenerateResponse, Input, MediaSource, Output,
};
use vidya_error::{FlowErrorKind, InvocationError, InvocationErrorKind};
use vidya_flows::{
    ChatInput, ChatReply, DoubtInput, DoubtResponse, DoubtSolver, Flashcards, FlashcardInput,
    GenerationFlow, RelatedTopics, TopicsInput, TutorChat,
};
use vidya_models::GenerativeModel;

/// Replays a canned JSON output and counts how often it was called.
struct StubModel {
    output: Value,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl StubModel {
    fn returning(output: Value) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, InvocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req.clone());
        Ok(GenerateResponse::new(vec![Output::Json(self.output.clone())]))
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

/// Always fails with the kind built by the given constructor.
struct FailingModel(fn() -> InvocationErrorKind);

#[async_trait]
impl GenerativeModel for FailingModel {
    async fn generate(&self, _req: &GenerateRequest) -> Result<GenerateResponse, InvocationError> {
        Err(InvocationError::new((self.0)()))
    }

    fn model_name(&self) -> &str {
        "failing-stub"
    }
}

fn chat_input(message: &str) -> ChatInput {
    ChatInput {
        message: message.to_string(),
        grade_level: None,
        history: vec![],
    }
}

#[tokio::test]
async fn invalid_input_never_reaches_the_model() {
    let flow = GenerationFlow::<TutorChat, _>::new(StubModel::returning(
        json!({ "reply": "should not be seen" }),
    ));

    let err = flow.run(chat_input("")).await.unwrap_err();

    assert!(matches!(err.kind, FlowErrorKind::InvalidInput { .. }));
    assert_eq!(flow.invoker().model().call_count(), 0);
}

#[tokio::test]
async fn invalid_input_names_the_offending_field() {
    let flow = GenerationFlow::<Flashcards, _>::new(StubModel::returning(json!({ "cards": [] })));

    let err = flow
        .run(FlashcardInput {
            grade_level: "8".to_string(),
            subject: "History".to_string(),
            chapter: "The Mughal Empire".to_string(),
            count: 0,
        })
        .await
        .unwrap_err();

    match err.kind {
        FlowErrorKind::InvalidInput { field, .. } => {
            assert_eq!(field.as_deref(), Some("count"));
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert_eq!(flow.invoker().model().call_count(), 0);
}

#[tokio::test]
async fn transient_failures_surface_as_upstream_unavailable() {
    let flow = GenerationFlow::<TutorChat, _>::new(FailingModel(|| {
        InvocationErrorKind::Overloaded {
            status: 503,
            message: "model overloaded".to_string(),
        }
    }));

    let err = flow.run(chat_input("What is photosynthesis?")).await.unwrap_err();

    match err.kind {
        FlowErrorKind::UpstreamUnavailable { message } => {
            assert!(message.contains("try again"));
        }
        other => panic!("expected UpstreamUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn contract_violations_surface_as_malformed_output() {
    let flow = GenerationFlow::<TutorChat, _>::new(FailingModel(|| {
        InvocationErrorKind::InvalidJson("unexpected token".to_string())
    }));

    let err = flow.run(chat_input("What is photosynthesis?")).await.unwrap_err();

    assert!(matches!(err.kind, FlowErrorKind::MalformedOutput { .. }));
}

#[tokio::test]
async fn transient_and_malformed_messages_differ() {
    let overloaded = GenerationFlow::<TutorChat, _>::new(FailingModel(|| {
        InvocationErrorKind::Overloaded {
            status: 429,
            message: "quota".to_string(),
        }
    }));
    let garbled = GenerationFlow::<TutorChat, _>::new(FailingModel(|| {
        InvocationErrorKind::NoOutput
    }));

    let transient = overloaded
        .run(chat_input("hello"))
        .await
        .unwrap_err()
        .user_message();
    let malformed = garbled
        .run(chat_input("hello"))
        .await
        .unwrap_err()
        .user_message();

    assert_ne!(transient, malformed);
}

#[tokio::test]
async fn empty_flashcard_set_is_a_generation_failure() {
    let flow = GenerationFlow::<Flashcards, _>::new(StubModel::returning(json!({ "cards": [] })));

    let err = flow
        .run(FlashcardInput {
            grade_level: "8".to_string(),
            subject: "History".to_string(),
            chapter: "The Mughal Empire".to_string(),
            count: 10,
        })
        .await
        .unwrap_err();

    assert!(matches!(err.kind, FlowErrorKind::GenerationFailed { .. }));
}

#[tokio::test]
async fn empty_related_topics_is_a_legitimate_success() {
    let flow = GenerationFlow::<RelatedTopics, _>::new(StubModel::returning(
        json!({ "topics": [] }),
    ));

    let output = flow
        .run(TopicsInput {
            subject: "Science".to_string(),
            chapter: "A very obscure chapter".to_string(),
        })
        .await
        .unwrap();

    assert!(output.topics.is_empty());
}

#[tokio::test]
async fn blank_tutor_reply_degrades_to_clarification() {
    let flow = GenerationFlow::<TutorChat, _>::new(StubModel::returning(
        json!({ "reply": "   " }),
    ));

    let ChatReply { reply } = flow.run(chat_input("mitochondria??")).await.unwrap();

    assert!(reply.contains("rephrase"));
}

#[tokio::test]
async fn doubt_attachments_pass_through_in_order() {
    let flow = GenerationFlow::<DoubtSolver, _>::new(StubModel::returning(json!({
        "approach": "Apply the lens formula.",
        "steps": ["Write 1/v - 1/u = 1/f.", "Substitute and solve."],
        "final_answer": "v = 30 cm"
    })));

    let first = Attachment::new(
        Some("image/jpeg".to_string()),
        MediaSource::Base64("Zmlyc3Q=".to_string()),
    );
    let second = Attachment::new(
        Some("image/png".to_string()),
        MediaSource::Base64("c2Vjb25k".to_string()),
    );

    flow.run(DoubtInput {
        question: Some("See the attached problem.".to_string()),
        images: vec![first.clone(), second.clone()],
        hint_only: false,
    })
    .await
    .unwrap();

    let requests = flow.invoker().model().requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let images: Vec<&Attachment> = requests[0].messages[0]
        .content()
        .iter()
        .filter_map(|input| match input {
            Input::Image(attachment) => Some(attachment),
            Input::Text(_) => None,
        })
        .collect();
    assert_eq!(images, vec![&first, &second]);
}

#[tokio::test]
async fn doubt_without_text_or_images_is_invalid() {
    let flow = GenerationFlow::<DoubtSolver, _>::new(StubModel::returning(json!({})));

    let err = flow
        .run(DoubtInput {
            question: None,
            images: vec![],
            hint_only: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err.kind, FlowErrorKind::InvalidInput { .. }));
    assert_eq!(flow.invoker().model().call_count(), 0);
}

#[tokio::test]
async fn hint_mode_returns_only_a_hint() {
    let flow = GenerationFlow::<DoubtSolver, _>::new(StubModel::returning(
        json!({ "hint": "Think about which quantity stays constant." }),
    ));

    let response = flow
        .run(DoubtInput {
            question: Some("Why does the current stay the same in series?".to_string()),
            images: vec![],
            hint_only: true,
        })
        .await
        .unwrap();

    assert!(matches!(response, DoubtResponse::Hint { .. }));
}

#[tokio::test]
async fn hint_mode_requests_a_schema_without_solution_fields() {
    let flow = GenerationFlow::<DoubtSolver, _>::new(StubModel::returning(
        json!({ "hint": "Start from the definition." }),
    ));

    flow.run(DoubtInput {
        question: Some("Prove it.".to_string()),
        images: vec![],
        hint_only: true,
    })
    .await
    .unwrap();

    let requests = flow.invoker().model().requests.lock().unwrap();
    let descriptor = requests[0].response_schema.as_ref().unwrap();
    let properties = descriptor["properties"].as_object().unwrap();
    assert!(properties.contains_key("hint"));
    assert!(!properties.contains_key("final_answer"));
    assert!(!properties.contains_key("steps"));
}

#[tokio::test]
async fn full_mode_returns_a_worked_solution() {
    let flow = GenerationFlow::<DoubtSolver, _>::new(StubModel::returning(json!({
        "approach": "Balance the equation.",
        "steps": ["Count atoms on each side.", "Adjust coefficients."],
        "final_answer": "2H2 + O2 -> 2H2O"
    })));

    let response = flow
        .run(DoubtInput {
            question: Some("Balance H2 + O2 -> H2O".to_string()),
            images: vec![],
            hint_only: false,
        })
        .await
        .unwrap();

    match response {
        DoubtResponse::Solution { steps, final_answer, .. } => {
            assert_eq!(steps.len(), 2);
            assert!(final_answer.contains("H2O"));
        }
        DoubtResponse::Hint { .. } => panic!("expected a full solution"),
    }
}
