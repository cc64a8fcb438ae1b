//! Integration tests for the model invocation adapter over a stub driver.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use vidya_core::{GenerateRequest, GenerateResponse, Output, PromptPayload};
use vidya_error::{InvocationError, InvocationErrorKind, RetryableError};
use vidya_models::{GenerativeModel, ModelInvoker};
use vidya_schema::{Field, FieldType, Schema};

/// Stub driver that replays canned outputs and records requests.
struct StubModel {
    outputs: Vec<Output>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl StubModel {
    fn returning(outputs: Vec<Output>) -> Self {
        Self {
            outputs,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, InvocationError> {
        self.requests.lock().unwrap().push(req.clone());
        Ok(GenerateResponse::new(self.outputs.clone()))
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

/// Stub driver that always fails with the given kind.
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

fn reply_schema() -> Schema {
    Schema::new(
        "reply",
        vec![Field::required("reply", FieldType::non_empty_string())],
    )
}

#[tokio::test]
async fn returns_schema_conformant_output() {
    let stub = StubModel::returning(vec![Output::Json(json!({ "reply": "A lens bends light." }))]);
    let invoker = ModelInvoker::new(stub);
    let payload = PromptPayload::new("What is a lens?".to_string(), vec![]);

    let value = invoker.invoke(&payload, &reply_schema()).await.unwrap();
    assert_eq!(value, json!({ "reply": "A lens bends light." }));
}

#[tokio::test]
async fn forwards_schema_descriptor_and_payload_text() {
    let stub = StubModel::returning(vec![Output::Json(json!({ "reply": "ok" }))]);
    let invoker = ModelInvoker::new(stub);
    let payload = PromptPayload::new("Explain refraction.".to_string(), vec![]);

    invoker.invoke(&payload, &reply_schema()).await.unwrap();

    let requests = invoker.model().requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.response_schema.is_some());
    assert_eq!(
        request.response_schema.as_ref().unwrap()["required"],
        json!(["reply"])
    );
    assert_eq!(request.messages.len(), 1);
}

#[tokio::test]
async fn rejects_output_violating_schema() {
    let stub = StubModel::returning(vec![Output::Json(json!({ "reply": "" }))]);
    let invoker = ModelInvoker::new(stub);
    let payload = PromptPayload::new("hi".to_string(), vec![]);

    let err = invoker.invoke(&payload, &reply_schema()).await.unwrap_err();
    assert!(matches!(err.kind, InvocationErrorKind::SchemaValidation(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn classifies_empty_response_as_no_output() {
    let stub = StubModel::returning(vec![]);
    let invoker = ModelInvoker::new(stub);
    let payload = PromptPayload::new("hi".to_string(), vec![]);

    let err = invoker.invoke(&payload, &reply_schema()).await.unwrap_err();
    assert!(matches!(err.kind, InvocationErrorKind::NoOutput));
}

#[tokio::test]
async fn parses_fenced_text_output() {
    let stub = StubModel::returning(vec![Output::Text(
        "```json\n{ \"reply\": \"fenced\" }\n```".to_string(),
    )]);
    let invoker = ModelInvoker::new(stub);
    let payload = PromptPayload::new("hi".to_string(), vec![]);

    let value = invoker.invoke(&payload, &reply_schema()).await.unwrap();
    assert_eq!(value["reply"], "fenced");
}

#[tokio::test]
async fn overload_failures_stay_retryable() {
    let invoker = ModelInvoker::new(FailingModel(|| InvocationErrorKind::Overloaded {
        status: 503,
        message: "overloaded".to_string(),
    }));
    let payload = PromptPayload::new("hi".to_string(), vec![]);

    let err = invoker.invoke(&payload, &reply_schema()).await.unwrap_err();
    assert!(err.is_retryable());

    let invoker = ModelInvoker::new(FailingModel(|| InvocationErrorKind::Api {
        status: 400,
        message: "bad request".to_string(),
    }));
    let err = invoker.invoke(&payload, &reply_schema()).await.unwrap_err();
    assert!(!err.is_retryable());
}
