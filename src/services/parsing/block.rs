use once_cell::sync::Lazy;
use regex::Regex;

// A line made only of three or more dashes separates question blocks.
static DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-{3,}\s*$").expect("DELIMITER is a valid regex pattern"));

// `**Answer:** B`, `Answer**: B`, `2. Question: ...`, `Q: ...`
static LABELED_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:\d+[.)]\s*)?\**\s*(question|q|correct answer|answer|theme|tags|difficulty)\s*\**\s*:\s*\**\s*(.*?)\s*\**\s*$",
    )
    .expect("LABELED_FIELD is a valid regex pattern")
});

// `A) Paris`, `(B) Rome`, `- c) Madrid`
static OPTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*]\s*)?\**\(?([A-Da-d])\)\**\s*(.+?)\s*$")
        .expect("OPTION_LINE is a valid regex pattern")
});

/// One delimiter-separated chunk of raw text, blank lines removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn fields(&self) -> BlockFields {
        BlockFields::scan(&self.lines)
    }
}

pub fn split_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in text.lines() {
        if DELIMITER.is_match(line) {
            if !current.is_empty() {
                blocks.push(Block::new(std::mem::take(&mut current)));
            }
            continue;
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            current.push(trimmed.to_string());
        }
    }
    if !current.is_empty() {
        blocks.push(Block::new(current));
    }
    blocks
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine {
    pub letter: char,
    pub text: String,
}

/// Labeled fields found in a block. Later duplicates of a label are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockFields {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub theme: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: Option<String>,
    pub options: Vec<OptionLine>,
}

impl BlockFields {
    fn scan(lines: &[String]) -> Self {
        let mut fields = BlockFields::default();
        let mut unlabeled_question: Option<String> = None;

        for line in lines {
            if let Some(caps) = LABELED_FIELD.captures(line) {
                let label = caps[1].to_ascii_lowercase();
                let value = caps[2].trim().to_string();
                if value.is_empty() {
                    continue;
                }
                match label.as_str() {
                    "question" | "q" => set_once(&mut fields.question, value),
                    "answer" | "correct answer" => set_once(&mut fields.answer, value),
                    "theme" => set_once(&mut fields.theme, value),
                    "difficulty" => set_once(&mut fields.difficulty, value),
                    "tags" => {
                        if fields.tags.is_empty() {
                            fields.tags = split_tags(&value);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if let Some(caps) = OPTION_LINE.captures(line) {
                let letter = caps[1]
                    .chars()
                    .next()
                    .map(|c| c.to_ascii_uppercase())
                    .unwrap_or('A');
                fields.options.push(OptionLine {
                    letter,
                    text: caps[2].to_string(),
                });
                continue;
            }

            if unlabeled_question.is_none() {
                unlabeled_question = Some(line.trim_matches('*').trim().to_string());
            }
        }

        if fields.question.is_none() {
            fields.question = unlabeled_question.filter(|q| !q.is_empty());
        }
        fields
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn option_text(&self, letter: char) -> Option<&str> {
        let letter = letter.to_ascii_uppercase();
        self.options
            .iter()
            .find(|o| o.letter == letter)
            .map(|o| o.text.as_str())
    }
}

fn set_once(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().trim_start_matches('#').trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
