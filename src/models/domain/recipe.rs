use async_graphql::{Enum, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::question_type::QuestionType;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,          // exact-match filter on candidates
    pub theme: Option<String>,     // descriptive only, never filters
    pub question_types: Vec<QuestionType>,
    pub quantity: QuantityRange,
    pub cooldown: Cooldown,
    pub execution_mode: ExecutionMode,
    pub bag_type: BagType, // derived from question_types
    pub usage_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[graphql(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject, InputObject)]
#[graphql(input_name = "QuantityRangeInput")]
pub struct QuantityRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl QuantityRange {
    pub fn clamp(&self, requested: u32) -> u32 {
        requested.clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, SimpleObject, InputObject)]
#[graphql(input_name = "CooldownInput")]
pub struct Cooldown {
    pub enabled: bool,
    pub days: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum BagType {
    CategoryBoundMc,
    CategoryBoundTf,
    CategoryBoundMix,
}

impl BagType {
    /// Label only; sampling behaves the same for every bag type.
    pub fn derive(question_types: &[QuestionType]) -> Self {
        let only = |t: QuestionType| {
            !question_types.is_empty() && question_types.iter().all(|q| *q == t)
        };

        if only(QuestionType::MultipleChoice) {
            BagType::CategoryBoundMc
        } else if only(QuestionType::TrueFalse) {
            BagType::CategoryBoundTf
        } else {
            BagType::CategoryBoundMix
        }
    }
}

/// Fields a caller supplies when creating or editing a recipe.
#[derive(Clone, Debug)]
pub struct RecipeDraft {
    pub name: String,
    pub category: String,
    pub theme: Option<String>,
    pub question_types: Vec<QuestionType>,
    pub quantity: QuantityRange,
    pub cooldown: Cooldown,
    pub execution_mode: ExecutionMode,
}

impl Recipe {
    pub fn new(draft: RecipeDraft) -> Self {
        let now = Utc::now();
        let question_types = normalize_types(draft.question_types);
        Recipe {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            theme: draft.theme.filter(|t| !t.trim().is_empty()),
            bag_type: BagType::derive(&question_types),
            question_types,
            quantity: draft.quantity,
            cooldown: draft.cooldown,
            execution_mode: draft.execution_mode,
            usage_count: 0,
            last_used_at: None,
            created_at: Some(now),
            modified_at: Some(now),
            deleted_at: None,
        }
    }

    /// Applies an edit, keeping identity and usage statistics.
    pub fn apply_draft(&mut self, draft: RecipeDraft) {
        let question_types = normalize_types(draft.question_types);
        self.name = draft.name.trim().to_string();
        self.category = draft.category.trim().to_string();
        self.theme = draft.theme.filter(|t| !t.trim().is_empty());
        self.bag_type = BagType::derive(&question_types);
        self.question_types = question_types;
        self.quantity = draft.quantity;
        self.cooldown = draft.cooldown;
        self.execution_mode = draft.execution_mode;
        self.modified_at = Some(Utc::now());
    }

    pub fn is_archived(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn usage_after_execution(&self, at: DateTime<Utc>) -> RecipeUsage {
        RecipeUsage {
            usage_count: self.usage_count.saturating_add(1),
            last_used_at: at,
        }
    }
}

fn normalize_types(mut types: Vec<QuestionType>) -> Vec<QuestionType> {
    types.sort();
    types.dedup();
    types
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecipeUsage {
    pub usage_count: u32,
    pub last_used_at: DateTime<Utc>,
}
