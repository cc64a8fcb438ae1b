//! Study plan generation.

use crate::engine::Feature;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use vidya_error::FlowError;
use vidya_schema::{Field, FieldType, Schema};
use vidya_template::Template;

/// Request for a week-by-week study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInput {
    /// Grade level
    pub grade_level: String,
    /// Subject
    pub subject: String,
    /// Plan length in weeks
    pub weeks: u32,
    /// Chapters to prioritize
    pub focus_chapters: Vec<String>,
    /// Exam date in ISO `YYYY-MM-DD` form, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<String>,
}

/// One planned week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWeek {
    /// Week number, 1-based and sequential
    pub week: u32,
    /// Theme for the week
    pub theme: String,
    /// Concrete tasks
    pub tasks: Vec<String>,
}

/// A generated study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutput {
    /// Weeks in order
    pub weeks: Vec<PlanWeek>,
}

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::builder()
        .literal("Build a ")
        .placeholder("weeks")
        .literal("-week study plan for a grade ")
        .placeholder("grade_level")
        .literal(" student preparing for ")
        .placeholder("subject")
        .literal(". Prioritize these chapters: ")
        .each("focus_chapters", ", ", |item| item.placeholder("."))
        .literal(".")
        .conditional("exam_date", |body| {
            body.literal(" The exam is on ")
                .placeholder("exam_date")
                .literal("; ramp revision accordingly.")
        })
        .literal(
            " Number the weeks starting at 1 and give each a theme and 3 to 6 \
             concrete tasks.",
        )
        .build()
});

/// The study-plan flow.
pub struct StudyPlan;

impl Feature for StudyPlan {
    type Input = PlanInput;
    type Output = PlanOutput;

    const NAME: &'static str = "study_plan";

    fn input_schema() -> Schema {
        Schema::new(
            "plan_input",
            vec![
                Field::required("grade_level", FieldType::non_empty_string()),
                Field::required("subject", FieldType::non_empty_string()),
                Field::required("weeks", FieldType::integer(Some(1), Some(52))),
                Field::required(
                    "focus_chapters",
                    FieldType::non_empty_array(FieldType::non_empty_string()),
                ),
                Field::optional("exam_date", FieldType::non_empty_string()),
            ],
        )
    }

    fn output_schema(_input: &Self::Input) -> Schema {
        let week = FieldType::Object(Schema::new(
            "plan_week",
            vec![
                Field::required("week", FieldType::positive_integer()),
                Field::required("theme", FieldType::non_empty_string()),
                Field::required(
                    "tasks",
                    FieldType::non_empty_array(FieldType::non_empty_string()),
                ),
            ],
        ));
        Schema::new(
            "plan_output",
            vec![Field::required("weeks", FieldType::array(week))],
        )
    }

    fn template() -> &'static Template {
        &TEMPLATE
    }

    fn check_input(input: &Self::Input) -> Result<(), FlowError> {
        if let Some(exam_date) = &input.exam_date {
            NaiveDate::parse_from_str(exam_date, "%Y-%m-%d").map_err(|_| {
                FlowError::invalid_input(
                    Some("exam_date"),
                    "must be an ISO date like 2026-03-15",
                )
            })?;
        }
        Ok(())
    }

    fn post_validate(
        input: &Self::Input,
        output: Self::Output,
    ) -> Result<Self::Output, FlowError> {
        if output.weeks.is_empty() {
            return Err(FlowError::generation_failed(
                "No study plan could be generated. Try different chapters.",
            ));
        }
        for (index, week) in output.weeks.iter().enumerate() {
            if week.week != (index as u32) + 1 {
                return Err(FlowError::generation_failed(
                    "The plan's weeks came back out of order. Please try again.",
                ));
            }
        }
        if output.weeks.len() != input.weeks as usize {
            return Err(FlowError::generation_failed(format!(
                "The plan has {} weeks instead of the requested {}. Please try again.",
                output.weeks.len(),
                input.weeks
            )));
        }
        Ok(output)
    }
}
