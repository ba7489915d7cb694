use async_graphql::SimpleObject;
use serde::Serialize;

use crate::{errors::AppError, models::domain::question_type::QuestionType};

/// Options accepted by a recipe execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub quantity_override: Option<u32>,
    pub allow_partial_sets: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ExecutionResult {
    pub questions_selected: u32,
    pub selected_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trivia_set_id: Option<String>,
    pub warnings: Vec<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn completed(selected_ids: Vec<String>, trivia_set_id: String, warnings: Vec<String>) -> Self {
        ExecutionResult {
            questions_selected: selected_ids.len() as u32,
            selected_ids,
            trivia_set_id: Some(trivia_set_id),
            warnings,
            success: true,
            error: None,
        }
    }

    pub fn failed(error: &AppError) -> Self {
        ExecutionResult {
            questions_selected: 0,
            selected_ids: Vec::new(),
            trivia_set_id: None,
            warnings: Vec::new(),
            success: false,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct TypeCount {
    pub question_type: QuestionType,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct PreviewResult {
    pub available: u32,
    pub would_select: u32,
    pub target_quantity: u32,
    pub excluded_by_cooldown: u32,
    pub by_type: Vec<TypeCount>,
}

pub fn shortfall_warning(requested: u32, available: u32, scope: &str) -> String {
    format!(
        "Only {} of {} requested questions available for {} after cooldown; set is {} short",
        available,
        requested,
        scope,
        requested.saturating_sub(available)
    )
}
