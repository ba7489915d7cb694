use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::{ParseOutcome, ParsedQuestion, QuestionType};

/// Parse result as returned over the wire.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ParseResponse {
    pub detected_type: QuestionType,
    pub parsed_by: Option<QuestionType>,
    pub used_fallback: bool,
    pub count: u32,
    pub questions: Vec<ParsedQuestion>,
}

impl From<ParseOutcome> for ParseResponse {
    fn from(outcome: ParseOutcome) -> Self {
        ParseResponse {
            detected_type: outcome.detected_type,
            parsed_by: outcome.parsed_by,
            used_fallback: outcome.used_fallback(),
            count: outcome.questions.len() as u32,
            questions: outcome.questions,
        }
    }
}
