use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    models::domain::{Difficulty, ParsedQuestion, QuestionType},
    services::parsing::block::{split_blocks, Block, BlockFields},
};

// `B`, `B)`, `(B)`, `B) Paris`, `B. Paris`, `Option B`; text after the letter is captured
static ANSWER_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:option\s+)?\(?([A-D])\)?(?:[).:]\s*(.*))?$")
        .expect("ANSWER_LETTER is a valid regex pattern")
});

pub trait DialectParser: Send + Sync {
    fn dialect(&self) -> QuestionType;

    /// Returns `None` when the block fails this dialect's completeness check.
    fn parse_block(&self, block: &Block) -> Option<ParsedQuestion>;

    fn parse(&self, text: &str) -> Vec<ParsedQuestion> {
        split_blocks(text)
            .iter()
            .filter_map(|block| self.parse_block(block))
            .collect()
    }
}

pub struct MultipleChoiceParser;
pub struct TrueFalseParser;
pub struct WhoAmIParser;

impl DialectParser for MultipleChoiceParser {
    fn dialect(&self) -> QuestionType {
        QuestionType::MultipleChoice
    }

    fn parse_block(&self, block: &Block) -> Option<ParsedQuestion> {
        let fields = block.fields();
        let question = fields.question.clone()?;
        let answer = fields.answer.as_deref()?;

        if !has_exactly_four_options(&fields) {
            return None;
        }

        // exact option text wins, so an answer like "A Coruña" is not read as letter A
        let correct_letter = match letter_for_text(&fields, answer) {
            Some(letter) => letter,
            None => resolve_letter(&fields, answer_letter(answer)?)?,
        };
        let correct = fields.option_text(correct_letter)?.to_string();
        let wrong_answers: Vec<String> = fields
            .options
            .iter()
            .filter(|o| o.letter != correct_letter && !o.text.eq_ignore_ascii_case(&correct))
            .map(|o| o.text.clone())
            .collect();
        // a repeated correct option leaves too few distractors
        if wrong_answers.len() != self.dialect().wrong_answer_count() {
            return None;
        }

        Some(build(fields, question, correct, wrong_answers, self.dialect()))
    }
}

impl DialectParser for TrueFalseParser {
    fn dialect(&self) -> QuestionType {
        QuestionType::TrueFalse
    }

    fn parse_block(&self, block: &Block) -> Option<ParsedQuestion> {
        let fields = block.fields();
        let question = fields.question.clone()?;
        let value = parse_true_false(fields.answer.as_deref()?)?;

        let (correct, wrong) = if value {
            ("True", "False")
        } else {
            ("False", "True")
        };
        Some(build(
            fields,
            question,
            correct.to_string(),
            vec![wrong.to_string()],
            self.dialect(),
        ))
    }
}

impl DialectParser for WhoAmIParser {
    fn dialect(&self) -> QuestionType {
        QuestionType::WhoAmI
    }

    fn parse_block(&self, block: &Block) -> Option<ParsedQuestion> {
        let fields = block.fields();
        let question = fields.question.clone()?;
        let answer = fields.answer.as_deref()?;

        let correct = if !fields.has_options() {
            answer.to_string()
        } else if let Some(letter) = letter_for_text(&fields, answer) {
            fields.option_text(letter)?.to_string()
        } else if let Some(reference) = answer_letter(answer) {
            let letter = resolve_letter(&fields, reference)?;
            fields.option_text(letter)?.to_string()
        } else {
            answer.to_string()
        };

        Some(build(fields, question, correct, Vec::new(), self.dialect()))
    }
}

/// Answer token `true`/`false`, case-insensitive.
pub fn parse_true_false(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn has_exactly_four_options(fields: &BlockFields) -> bool {
    fields.options.len() == 4
        && ['A', 'B', 'C', 'D']
            .iter()
            .all(|letter| fields.options.iter().filter(|o| o.letter == *letter).count() == 1)
}

/// An answer written as a letter, with any option text repeated after it.
struct LetterReference {
    letter: char,
    text: Option<String>,
}

fn answer_letter(answer: &str) -> Option<LetterReference> {
    let caps = ANSWER_LETTER.captures(answer.trim())?;
    let letter = caps[1].chars().next()?.to_ascii_uppercase();
    let text = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty());
    Some(LetterReference { letter, text })
}

/// The referenced letter, if it names an option and any repeated text matches that option.
fn resolve_letter(fields: &BlockFields, reference: LetterReference) -> Option<char> {
    let option = fields.option_text(reference.letter)?;
    match reference.text {
        Some(text) if !text.eq_ignore_ascii_case(option) => None,
        _ => Some(reference.letter),
    }
}

fn letter_for_text(fields: &BlockFields, answer: &str) -> Option<char> {
    let answer = answer.trim();
    fields
        .options
        .iter()
        .find(|o| o.text.eq_ignore_ascii_case(answer))
        .map(|o| o.letter)
}

fn build(
    fields: BlockFields,
    question: String,
    correct_answer: String,
    wrong_answers: Vec<String>,
    question_type: QuestionType,
) -> ParsedQuestion {
    ParsedQuestion {
        question_text: question,
        correct_answer,
        wrong_answers,
        question_type,
        theme: fields.theme,
        tags: fields.tags,
        difficulty: fields.difficulty.as_deref().and_then(Difficulty::parse),
    }
}
