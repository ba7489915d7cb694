use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};

use crate::{
    errors::{AppResult, StoreStep},
    models::domain::{CandidateFilter, CandidateRecord, Cooldown, QuestionType, TypeCount},
    repositories::QuestionRepository,
};

/// Eligible candidates for one query, grouped by question type.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    pub partitions: BTreeMap<QuestionType, Vec<CandidateRecord>>,
    pub excluded_by_cooldown: usize,
}

impl CandidatePool {
    pub fn from_records(records: Vec<CandidateRecord>, excluded_by_cooldown: usize) -> Self {
        let mut partitions: BTreeMap<QuestionType, Vec<CandidateRecord>> = BTreeMap::new();
        for record in records {
            partitions.entry(record.question_type).or_default().push(record);
        }
        Self {
            partitions,
            excluded_by_cooldown,
        }
    }

    pub fn available(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    pub fn type_counts(&self) -> Vec<TypeCount> {
        self.partitions
            .iter()
            .map(|(question_type, records)| TypeCount {
                question_type: *question_type,
                count: records.len() as u32,
            })
            .collect()
    }

    pub fn into_records(self) -> Vec<CandidateRecord> {
        self.partitions.into_values().flatten().collect()
    }
}

/// Narrows the store's records to what a recipe may draw from. No randomness here.
pub async fn select_pool(
    repository: &dyn QuestionRepository,
    filter: &CandidateFilter,
    cooldown: Cooldown,
    now: DateTime<Utc>,
) -> AppResult<CandidatePool> {
    let records = repository
        .query(filter)
        .await
        .map_err(|e| e.at_step(StoreStep::PoolQuery))?;

    // only exact category and type matches, whatever the adapter returned
    let records: Vec<CandidateRecord> = records
        .into_iter()
        .filter(|r| r.category == filter.category && filter.question_types.contains(&r.question_type))
        .collect();

    if !cooldown.enabled {
        log::debug!(
            "Pool for '{}': {} candidate(s), cooldown disabled",
            filter.category,
            records.len()
        );
        return Ok(CandidatePool::from_records(records, 0));
    }

    let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    let history = repository
        .get_usage_history(&ids)
        .await
        .map_err(|e| e.at_step(StoreStep::UsageHistory))?;

    let total = records.len();
    let eligible = apply_cooldown(records, &history, cooldown.days, now);
    let excluded = total - eligible.len();

    log::debug!(
        "Pool for '{}': {} candidate(s), {} on cooldown ({} day window)",
        filter.category,
        eligible.len(),
        excluded,
        cooldown.days
    );
    Ok(CandidatePool::from_records(eligible, excluded))
}

/// Drops records whose most recent use falls after `now - days`.
pub fn apply_cooldown(
    records: Vec<CandidateRecord>,
    history: &HashMap<String, Vec<DateTime<Utc>>>,
    days: u32,
    now: DateTime<Utc>,
) -> Vec<CandidateRecord> {
    let cutoff = now - Duration::days(i64::from(days));
    records
        .into_iter()
        .filter(|record| {
            let last_used = history
                .get(&record.id)
                .and_then(|stamps| stamps.iter().max().copied())
                .or_else(|| record.last_used_at());
            match last_used {
                Some(at) => at <= cutoff,
                None => true,
            }
        })
        .collect()
}
