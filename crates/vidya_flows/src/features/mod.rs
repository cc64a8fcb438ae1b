//! The twelve feature flows.

pub mod answer_evaluation;
pub mod avatar_prompt;
pub mod chapter_notes;
pub mod chapter_summary;
pub mod doubt_solver;
pub mod flashcards;
pub mod question_paper;
pub mod related_topics;
pub mod study_plan;
pub mod tutor_chat;
pub mod username_check;
