use crate::{
    models::domain::{ParseOutcome, QuestionType},
    services::parsing::{
        block::split_blocks,
        detector::{detect, standard_rules, DetectionRule},
        dialects::{DialectParser, MultipleChoiceParser, TrueFalseParser, WhoAmIParser},
    },
};

/// Detection rules plus parsers in fallback priority order.
pub struct ParserChain {
    rules: Vec<DetectionRule>,
    parsers: Vec<Box<dyn DialectParser>>,
}

impl ParserChain {
    pub fn new(rules: Vec<DetectionRule>, parsers: Vec<Box<dyn DialectParser>>) -> Self {
        Self { rules, parsers }
    }

    /// Fallback order is multiple-choice, true-false, who-am-i.
    pub fn standard() -> Self {
        Self::new(
            standard_rules(),
            vec![
                Box::new(MultipleChoiceParser),
                Box::new(TrueFalseParser),
                Box::new(WhoAmIParser),
            ],
        )
    }

    pub fn detect(&self, text: &str) -> QuestionType {
        let blocks = split_blocks(text);
        detect(&self.rules, blocks.first())
    }

    /// The detected dialect's parser first, then the rest in priority order.
    pub fn attempt_order(&self, detected: QuestionType) -> Vec<QuestionType> {
        let primary = self.parsers.iter().filter(|p| p.dialect() == detected);
        let rest = self.parsers.iter().filter(|p| p.dialect() != detected);
        primary.chain(rest).map(|p| p.dialect()).collect()
    }

    pub fn parse(&self, text: &str) -> ParseOutcome {
        let detected_type = self.detect(text);

        for dialect in self.attempt_order(detected_type) {
            let Some(parser) = self.parsers.iter().find(|p| p.dialect() == dialect) else {
                continue;
            };
            let questions = parser.parse(text);
            if !questions.is_empty() {
                if dialect != detected_type {
                    log::warn!(
                        "Detected {} but parsed {} question(s) with the {} fallback parser",
                        detected_type,
                        questions.len(),
                        dialect
                    );
                }
                return ParseOutcome {
                    detected_type,
                    parsed_by: Some(dialect),
                    questions,
                };
            }
        }

        log::info!("No parser produced questions (detected {})", detected_type);
        ParseOutcome {
            detected_type,
            parsed_by: None,
            questions: Vec::new(),
        }
    }
}

impl Default for ParserChain {
    fn default() -> Self {
        Self::standard()
    }
}
