use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    models::domain::QuestionType,
    services::parsing::{block::Block, dialects::parse_true_false},
};

static IDENTITY_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^[\s"'“‘(]*(?:i am|i'm|i’m|i represent)\b"#)
        .expect("IDENTITY_PHRASE is a valid regex pattern")
});

/// A predicate over the first block paired with the dialect it indicates.
#[derive(Clone, Copy)]
pub struct DetectionRule {
    pub dialect: QuestionType,
    pub matches: fn(&Block) -> bool,
}

/// Rules are tried in order; text no rule claims is multiple-choice.
pub fn standard_rules() -> Vec<DetectionRule> {
    vec![
        DetectionRule {
            dialect: QuestionType::WhoAmI,
            matches: looks_like_who_am_i,
        },
        DetectionRule {
            dialect: QuestionType::TrueFalse,
            matches: looks_like_true_false,
        },
    ]
}

pub fn detect(rules: &[DetectionRule], first_block: Option<&Block>) -> QuestionType {
    first_block
        .and_then(|block| rules.iter().find(|rule| (rule.matches)(block)))
        .map(|rule| rule.dialect)
        .unwrap_or(QuestionType::MultipleChoice)
}

pub fn looks_like_who_am_i(block: &Block) -> bool {
    block
        .fields()
        .question
        .map(|q| IDENTITY_PHRASE.is_match(&q))
        .unwrap_or(false)
}

pub fn looks_like_true_false(block: &Block) -> bool {
    let fields = block.fields();
    let boolean_answer = fields
        .answer
        .as_deref()
        .and_then(parse_true_false)
        .is_some();
    boolean_answer && !fields.has_options()
}
