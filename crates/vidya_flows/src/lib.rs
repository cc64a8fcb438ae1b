//! Per-feature generation flows for Vidya.
//!
//! Every feature follows the same five-step orchestration: validate the
//! typed input against its schema, render the feature's prompt template,
//! invoke the model adapter, post-validate the structured output against
//! domain rules the schema alone cannot express, and return the typed
//! result. The [`GenerationFlow`] engine owns the orchestration; each
//! feature contributes its schemas, template, and post-validation through
//! the [`Feature`] trait.
//!
//! Concurrent invocations are independent: a flow holds no shared mutable
//! state, performs no deduplication, and never retries on its own. A
//! double-submitted request issues two remote calls.

mod engine;
pub mod features;
mod question;

pub use engine::{Feature, GenerationFlow};
pub use question::{Question, QuestionKind, validate_question};

pub use features::answer_evaluation::{AnswerEvaluation, EvaluationInput, EvaluationReport};
pub use features::avatar_prompt::{AvatarInput, AvatarPrompt, AvatarSpec, AvatarStyle};
pub use features::chapter_notes::{ChapterNotes, DetailLevel, NotesInput, NotesOutput};
pub use features::chapter_summary::{ChapterSummary, SummaryInput, SummaryOutput};
pub use features::doubt_solver::{DoubtInput, DoubtResponse, DoubtSolver};
pub use features::flashcards::{Flashcard, FlashcardInput, FlashcardSet, Flashcards};
pub use features::grammar_test::{GrammarTest, GrammarTestInput, GrammarTestOutput};
pub use features::question_paper::{Difficulty, PaperInput, PaperOutput, QuestionPaper};
pub use features::related_topics::{RelatedTopics, Topic, TopicsInput, TopicsOutput};
pub use features::study_plan::{PlanInput, PlanOutput, PlanWeek, StudyPlan};
pub use features::tutor_chat::{ChatInput, ChatReply, ChatTurn, TutorChat, TutorRole};
pub use features::username_check::{
    UsernameChecker, UsernameDirectory, UsernameStatus, precheck_username,
};
