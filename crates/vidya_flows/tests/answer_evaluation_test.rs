//! End-to-end answer-evaluation flow tests over a stub driver.

use async_trait::async_trait;
use serde_json::{Value, json};
use vidya_core::{GenerateRequest, GenerateResponse, Output};
use vidya_error::{FlowErrorKind, InvocationError};
use vidya_flows::{AnswerEvaluation, EvaluationInput, GenerationFlow};
use vidya_models::GenerativeModel;

struct StubModel(Value);

#[async_trait]
impl GenerativeModel for StubModel {
    async fn generate(&self, _req: &GenerateRequest) -> Result<GenerateResponse, InvocationError> {
        Ok(GenerateResponse::new(vec![Output::Json(self.0.clone())]))
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn evaluation_input(max_marks: u32) -> EvaluationInput {
    EvaluationInput {
        question: "State the law of reflection.".to_string(),
        student_answer: "The angle of incidence equals the angle of reflection.".to_string(),
        max_marks,
    }
}

fn report(score: f64, feedback: &str) -> Value {
    json!({
        "score": score,
        "feedback": feedback,
        "strengths": ["States the law correctly."],
        "improvements": ["Mention that both angles are measured from the normal."]
    })
}

#[tokio::test]
async fn fair_report_comes_back_typed() {
    let flow = GenerationFlow::<AnswerEvaluation, _>::new(StubModel(report(
        4.5,
        "Accurate and concise.",
    )));

    let output = flow.run(evaluation_input(5)).await.unwrap();

    assert_eq!(output.score, 4.5);
    assert_eq!(output.strengths.len(), 1);
}

#[tokio::test]
async fn score_above_max_marks_fails_the_generation() {
    let flow = GenerationFlow::<AnswerEvaluation, _>::new(StubModel(report(
        12.0,
        "Excellent answer.",
    )));

    let err = flow.run(evaluation_input(10)).await.unwrap_err();

    match err.kind {
        FlowErrorKind::GenerationFailed { message } => {
            assert!(message.contains("score outside 0 to 10"));
        }
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn negative_score_fails_the_generation() {
    let flow = GenerationFlow::<AnswerEvaluation, _>::new(StubModel(report(
        -1.0,
        "Needs work.",
    )));

    let err = flow.run(evaluation_input(10)).await.unwrap_err();

    assert!(matches!(err.kind, FlowErrorKind::GenerationFailed { .. }));
}

#[tokio::test]
async fn blank_feedback_fails_the_generation() {
    let flow = GenerationFlow::<AnswerEvaluation, _>::new(StubModel(report(3.0, "   ")));

    let err = flow.run(evaluation_input(5)).await.unwrap_err();

    match err.kind {
        FlowErrorKind::GenerationFailed { message } => {
            assert!(message.contains("without feedback"));
        }
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
}
