//! End-to-end question-paper flow tests over a stub driver.

use async_trait::async_trait;
use serde_json::{Value, json};
use vidya_core::{GenerateRequest, GenerateResponse, Output};
use vidya_error::{FlowErrorKind, InvocationError};
use vidya_flows::{Difficulty, GenerationFlow, PaperInput, QuestionKind, QuestionPaper};
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

fn light_paper_input(count: u32) -> PaperInput {
    PaperInput {
        grade_level: "10".to_string(),
        subject: "Science".to_string(),
        chapter: "Light".to_string(),
        number_of_questions: count,
        difficulty: Difficulty::Medium,
        question_types: vec![QuestionKind::MultipleChoice],
    }
}

fn mcq(text: &str, options: [&str; 4], answer: &str) -> Value {
    json!({
        "kind": "multiple_choice",
        "text": text,
        "options": options,
        "answer": answer,
        "explanation": "Explained in the chapter."
    })
}

#[tokio::test]
async fn well_formed_paper_comes_back_typed() {
    let paper = json!({
        "questions": [
            mcq(
                "Which mirror is used in vehicle headlights?",
                ["Concave", "Convex", "Plane", "Cylindrical"],
                "Concave",
            ),
            mcq(
                "Which lens always forms a virtual image?",
                ["Concave", "Convex", "Bifocal", "Plano-convex"],
                "Concave",
            ),
            mcq(
                "The splitting of white light is called",
                ["Reflection", "Dispersion", "Diffraction", "Absorption"],
                "Dispersion",
            ),
        ]
    });
    let flow = GenerationFlow::<QuestionPaper, _>::new(StubModel(paper));

    let output = flow.run(light_paper_input(3)).await.unwrap();

    assert_eq!(output.questions.len(), 3);
    assert_eq!(output.questions[0].answer, "Concave");
    assert_eq!(output.questions[2].kind, QuestionKind::MultipleChoice);
}

#[tokio::test]
async fn zero_questions_fails_the_generation() {
    let flow = GenerationFlow::<QuestionPaper, _>::new(StubModel(json!({ "questions": [] })));

    let err = flow.run(light_paper_input(3)).await.unwrap_err();

    match err.kind {
        FlowErrorKind::GenerationFailed { message } => {
            assert!(message.contains("No questions"));
        }
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn mcq_with_three_options_is_rejected() {
    let paper = json!({
        "questions": [{
            "kind": "multiple_choice",
            "text": "Which color bends the most in a prism?",
            "options": ["Red", "Green", "Violet"],
            "answer": "Violet",
            "explanation": "Violet has the shortest wavelength."
        }]
    });
    let flow = GenerationFlow::<QuestionPaper, _>::new(StubModel(paper));

    let err = flow.run(light_paper_input(1)).await.unwrap_err();

    // The 2..=4 bound passes the schema; the exactly-4 rule is a domain
    // rule and lands in GenerationFailed.
    assert!(matches!(err.kind, FlowErrorKind::GenerationFailed { .. }));
}

#[tokio::test]
async fn answer_must_repeat_an_option_verbatim() {
    let paper = json!({
        "questions": [mcq(
            "Which mirror diverges light?",
            ["Concave", "Convex", "Plane", "Cylindrical"],
            "convex mirror",
        )]
    });
    let flow = GenerationFlow::<QuestionPaper, _>::new(StubModel(paper));

    let err = flow.run(light_paper_input(1)).await.unwrap_err();

    assert!(matches!(err.kind, FlowErrorKind::GenerationFailed { .. }));
    assert!(err.user_message().contains("answer"));
}

#[tokio::test]
async fn question_count_out_of_range_is_invalid_input() {
    let flow = GenerationFlow::<QuestionPaper, _>::new(StubModel(json!({ "questions": [] })));

    let err = flow.run(light_paper_input(51)).await.unwrap_err();

    match err.kind {
        FlowErrorKind::InvalidInput { field, .. } => {
            assert_eq!(field.as_deref(), Some("number_of_questions"));
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}
