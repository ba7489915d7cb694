use std::sync::Arc;

use async_graphql::SimpleObject;
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult, StoreStep},
    models::domain::{CandidateRecord, ParseOutcome, QuestionType},
    repositories::QuestionRepository,
    services::parsing::ParserChain,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct IngestResult {
    pub detected_type: QuestionType,
    pub parsed_by: Option<QuestionType>,
    pub stored_ids: Vec<String>,
}

pub struct ParseService {
    chain: ParserChain,
    repository: Arc<dyn QuestionRepository>,
}

impl ParseService {
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self {
            chain: ParserChain::standard(),
            repository,
        }
    }

    /// Never fails: unparseable text is an outcome with no questions.
    pub fn parse(&self, raw_text: &str) -> ParseOutcome {
        self.chain.parse(raw_text)
    }

    /// Parses `raw_text` and stores every record as a candidate in `category`.
    pub async fn ingest(&self, raw_text: &str, category: &str) -> AppResult<IngestResult> {
        let category = category.trim();
        if category.is_empty() {
            return Err(AppError::ValidationError(
                "category is required to ingest questions".to_string(),
            ));
        }

        let outcome = self.parse(raw_text);
        let records: Vec<CandidateRecord> = outcome
            .questions
            .into_iter()
            .map(|q| CandidateRecord::from_parsed(q, category))
            .collect();

        let stored_ids = self
            .repository
            .insert_many(records)
            .await
            .map_err(|e| e.at_step(StoreStep::Ingest))?;

        log::info!(
            "Ingested {} question(s) into category '{}' (detected {})",
            stored_ids.len(),
            category,
            outcome.detected_type
        );

        Ok(IngestResult {
            detected_type: outcome.detected_type,
            parsed_by: outcome.parsed_by,
            stored_ids,
        })
    }
}
