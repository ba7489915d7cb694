use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult, FieldErrors, StoreStep},
    models::{
        domain::{
            execution::shortfall_warning, BagType, CandidateFilter, CandidateRecord,
            ExecuteOptions, ExecutionResult, PreviewResult, QuantityRange, Recipe, TriviaSet,
        },
        dto::request::CollectionRequest,
    },
    repositories::{QuestionRepository, RecipeRepository, TriviaSetRepository},
    services::{
        candidate_pool::{select_pool, CandidatePool},
        recipe_service::load_active_recipe,
        recipe_validation::{validate_policy, MAX_COOLDOWN_DAYS},
        sampler::StratifiedSampler,
    },
};

/// Per-recipe async locks, held for the whole pool-to-usage span of an execution.
#[derive(Default)]
struct RecipeLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RecipeLocks {
    async fn acquire(&self, recipe_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // an entry only the map references has no holder and no waiter
            locks.retain(|id, lock| id == recipe_id || Arc::strong_count(lock) > 1);
            locks.entry(recipe_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.locks.lock().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Ties pool selection, sampling and persistence together.
///
/// Without serialization, two concurrent executions of one recipe may pick
/// overlapping questions: cooldown state only moves once an execution has
/// persisted its own set.
pub struct RecipeExecutionService {
    recipes: Arc<dyn RecipeRepository>,
    questions: Arc<dyn QuestionRepository>,
    sets: Arc<dyn TriviaSetRepository>,
    sampler: StratifiedSampler,
    locks: Option<RecipeLocks>,
}

impl RecipeExecutionService {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        questions: Arc<dyn QuestionRepository>,
        sets: Arc<dyn TriviaSetRepository>,
        sampler: StratifiedSampler,
    ) -> Self {
        Self {
            recipes,
            questions,
            sets,
            sampler,
            locks: None,
        }
    }

    pub fn with_serialized_executions(mut self) -> Self {
        self.locks = Some(RecipeLocks::default());
        self
    }

    pub async fn preview_recipe(&self, recipe_id: &str) -> AppResult<PreviewResult> {
        let recipe = load_active_recipe(self.recipes.as_ref(), recipe_id).await?;
        validate_policy(&recipe)?;

        let pool = self.pool_for(&recipe, Utc::now()).await?;
        let available = pool.available() as u32;
        let target_quantity = resolve_target(&recipe.quantity, None);

        Ok(PreviewResult {
            available,
            would_select: available.min(target_quantity),
            target_quantity,
            excluded_by_cooldown: pool.excluded_by_cooldown as u32,
            by_type: pool.type_counts(),
        })
    }

    pub async fn execute_recipe(
        &self,
        recipe_id: &str,
        options: ExecuteOptions,
    ) -> AppResult<ExecutionResult> {
        let mut recipe = load_active_recipe(self.recipes.as_ref(), recipe_id).await?;
        let _guard = match &self.locks {
            Some(locks) => {
                let guard = locks.acquire(&recipe.id).await;
                // usage stats may have moved while waiting
                recipe = load_active_recipe(self.recipes.as_ref(), recipe_id).await?;
                Some(guard)
            }
            None => None,
        };
        validate_policy(&recipe)?;

        let now = Utc::now();
        let pool = self.pool_for(&recipe, now).await?;
        let available = pool.available() as u32;
        let target = resolve_target(&recipe.quantity, options.quantity_override);

        let mut warnings = Vec::new();
        let quantity = if available < target {
            if !options.allow_partial_sets || available == 0 {
                log::warn!(
                    "Recipe '{}' needs {} question(s) but only {} are available",
                    recipe.id,
                    target,
                    available
                );
                return Err(AppError::InsufficientCandidates {
                    requested: target,
                    available,
                });
            }
            let warning = shortfall_warning(target, available, &format!("recipe '{}'", recipe.name));
            log::warn!("{}", warning);
            warnings.push(warning);
            available
        } else {
            target
        };

        let selected = self.sampler.sample(pool.into_records(), quantity as usize);
        let selected_ids: Vec<String> = selected.into_iter().map(|r| r.id).collect();

        let set = TriviaSet::from_recipe(&recipe, selected_ids.clone(), warnings.clone());
        let set_id = self.commit(set, &selected_ids, now).await?;

        self.recipes
            .save_recipe_usage(&recipe.id, recipe.usage_after_execution(now))
            .await
            .map_err(|e| e.at_step(StoreStep::RecipeUsage))?;

        log::info!(
            "Executed recipe '{}': {} question(s) in set {}",
            recipe.id,
            selected_ids.len(),
            set_id
        );
        Ok(ExecutionResult::completed(selected_ids, set_id, warnings))
    }

    /// Quota-per-category assembly without a stored recipe.
    pub async fn assemble_collection(&self, request: CollectionRequest) -> AppResult<ExecutionResult> {
        validate_collection(&request)?;

        let cooldown = request.cooldown.unwrap_or_default();
        let allow_partial = request.allow_partial_sets.unwrap_or(false);
        let now = Utc::now();

        let mut partitions: BTreeMap<String, Vec<CandidateRecord>> = BTreeMap::new();
        let mut quotas: BTreeMap<String, usize> = BTreeMap::new();
        let mut warnings = Vec::new();
        let mut requested: u32 = 0;
        let mut reachable: u32 = 0;

        for quota in &request.quotas {
            let filter = CandidateFilter {
                category: quota.category.trim().to_string(),
                question_types: request.question_types.clone(),
            };
            let pool = select_pool(self.questions.as_ref(), &filter, cooldown, now).await?;
            let available = pool.available() as u32;

            requested += quota.count;
            reachable += available.min(quota.count);
            if available < quota.count {
                warnings.push(shortfall_warning(
                    quota.count,
                    available,
                    &format!("category '{}'", filter.category),
                ));
            }

            quotas.insert(filter.category.clone(), quota.count as usize);
            partitions.insert(filter.category, pool.into_records());
        }

        if reachable < requested && (!allow_partial || reachable == 0) {
            return Err(AppError::InsufficientCandidates {
                requested,
                available: reachable,
            });
        }
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        let selected = self.sampler.sample_by_quota(partitions, &quotas);
        let selected_ids: Vec<String> = selected.into_iter().map(|r| r.id).collect();

        let set = TriviaSet::collection(
            &request.name,
            BagType::derive(&request.question_types),
            selected_ids.clone(),
            warnings.clone(),
        );
        let set_id = self.commit(set, &selected_ids, now).await?;

        log::info!(
            "Assembled collection '{}': {} question(s) in set {}",
            request.name,
            selected_ids.len(),
            set_id
        );
        Ok(ExecutionResult::completed(selected_ids, set_id, warnings))
    }

    async fn pool_for(&self, recipe: &Recipe, now: DateTime<Utc>) -> AppResult<CandidatePool> {
        let filter = CandidateFilter {
            category: recipe.category.clone(),
            question_types: recipe.question_types.clone(),
        };
        select_pool(self.questions.as_ref(), &filter, recipe.cooldown, now).await
    }

    /// Persists the set, then appends usage. Usage is never written for a set that
    /// failed to persist; a failure after persisting leaves the set without usage.
    async fn commit(
        &self,
        set: TriviaSet,
        selected_ids: &[String],
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        let set_id = self
            .sets
            .create_set(set)
            .await
            .map_err(|e| e.at_step(StoreStep::SetPersist))?;

        if let Err(err) = self.questions.append_usage(selected_ids, now).await {
            log::error!("Set {} persisted but usage append failed: {}", set_id, err);
            return Err(err.at_step(StoreStep::UsageAppend));
        }
        Ok(set_id)
    }
}

/// Override or the recipe default, clamped into `[min, max]`.
pub fn resolve_target(quantity: &QuantityRange, quantity_override: Option<u32>) -> u32 {
    quantity.clamp(quantity_override.unwrap_or(quantity.default))
}

fn validate_collection(request: &CollectionRequest) -> AppResult<()> {
    let mut errors = match request.validate() {
        Ok(()) => FieldErrors::default(),
        Err(err) => FieldErrors::from(err),
    };

    if request.question_types.is_empty() {
        errors.push("question_types", "Select at least one question type");
    }
    if request.quotas.is_empty() {
        errors.push("quotas", "Add at least one category quota");
    }
    let mut categories: Vec<String> = request
        .quotas
        .iter()
        .map(|q| q.category.trim().to_string())
        .collect();
    categories.sort();
    categories.dedup();
    if categories.len() != request.quotas.len() {
        errors.push("quotas", "Each category may appear only once");
    }
    if let Some(cooldown) = request.cooldown {
        if cooldown.days > MAX_COOLDOWN_DAYS {
            errors.push(
                "cooldown.days",
                format!("Cooldown must be at most {} days", MAX_COOLDOWN_DAYS),
            );
        }
    }
    errors.into_result()
}
