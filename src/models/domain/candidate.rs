use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    parsed_question::ParsedQuestion,
    question_type::{Difficulty, QuestionType},
};

/// A stored question as the selector sees it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct CandidateRecord {
    pub id: String,
    pub category: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub last_used_timestamps: Vec<DateTime<Utc>>,
    pub question_text: String,
    pub correct_answer: String,
    #[serde(default)]
    pub wrong_answers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CandidateRecord {
    pub fn from_parsed(parsed: ParsedQuestion, category: &str) -> Self {
        CandidateRecord {
            id: Uuid::new_v4().to_string(),
            category: category.trim().to_string(),
            question_type: parsed.question_type,
            tags: parsed.tags,
            last_used_timestamps: Vec::new(),
            question_text: parsed.question_text,
            correct_answer: parsed.correct_answer,
            wrong_answers: parsed.wrong_answers,
            theme: parsed.theme,
            difficulty: parsed.difficulty,
            created_at: Some(Utc::now()),
        }
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_timestamps.iter().max().copied()
    }
}

/// Store-side filter: exact category and any of the listed types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateFilter {
    pub category: String,
    pub question_types: Vec<QuestionType>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn last_used_at_is_most_recent_timestamp() {
        let now = Utc::now();
        let parsed = ParsedQuestion {
            question_text: "Is the sky blue?".to_string(),
            correct_answer: "True".to_string(),
            wrong_answers: vec!["False".to_string()],
            question_type: QuestionType::TrueFalse,
            theme: None,
            tags: vec!["sky".to_string()],
            difficulty: None,
        };
        let mut record = CandidateRecord::from_parsed(parsed, " Science ");
        assert_eq!(record.category, "Science");
        assert_eq!(record.last_used_at(), None);

        record.last_used_timestamps = vec![now - Duration::days(9), now, now - Duration::days(2)];
        assert_eq!(record.last_used_at(), Some(now));
    }
}
