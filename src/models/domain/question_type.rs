use std::fmt;

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

/// The three textual dialects a stored question can be written in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, Enum,
)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    WhoAmI,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true-false",
            QuestionType::WhoAmI => "who-am-i",
        }
    }

    /// Number of wrong answers a complete record of this dialect carries.
    pub fn wrong_answer_count(&self) -> usize {
        match self {
            QuestionType::MultipleChoice => 3,
            QuestionType::TrueFalse => 1,
            QuestionType::WhoAmI => 0,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse of a free-form difficulty label; unknown labels yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "beginner" => Some(Difficulty::Easy),
            "medium" | "moderate" | "intermediate" => Some(Difficulty::Medium),
            "hard" | "difficult" | "expert" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_serializes_kebab_case() {
        let json = serde_json::to_string(&QuestionType::WhoAmI).expect("variant should serialize");
        assert_eq!(json, "\"who-am-i\"");

        let parsed: QuestionType =
            serde_json::from_str("\"true-false\"").expect("variant should deserialize");
        assert_eq!(parsed, QuestionType::TrueFalse);
    }

    #[test]
    fn question_type_rejects_unknown_variant() {
        let parsed = serde_json::from_str::<QuestionType>("\"essay\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn wrong_answer_counts_match_dialects() {
        assert_eq!(QuestionType::MultipleChoice.wrong_answer_count(), 3);
        assert_eq!(QuestionType::TrueFalse.wrong_answer_count(), 1);
        assert_eq!(QuestionType::WhoAmI.wrong_answer_count(), 0);
    }

    #[test]
    fn difficulty_parse_is_lenient() {
        assert_eq!(Difficulty::parse(" Medium "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("spicy"), None);
    }
}
