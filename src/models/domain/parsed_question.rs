use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::models::domain::question_type::{Difficulty, QuestionType};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct ParsedQuestion {
    pub question_text: String,
    pub correct_answer: String,
    pub wrong_answers: Vec<String>, // 3 for MC, 1 for TF, none for who-am-i
    pub question_type: QuestionType,
    pub theme: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

/// Result of running the parser chain over a piece of raw text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ParseOutcome {
    pub detected_type: QuestionType,
    /// Dialect whose parser produced `questions`; `None` when every parser came back empty.
    pub parsed_by: Option<QuestionType>,
    pub questions: Vec<ParsedQuestion>,
}

impl ParseOutcome {
    pub fn used_fallback(&self) -> bool {
        matches!(self.parsed_by, Some(dialect) if dialect != self.detected_type)
    }
}
