use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::recipe::{BagType, ExecutionMode, Recipe};

/// The persisted artifact of an execution.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct TriviaSet {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>, // None for curated collections
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub question_ids: Vec<String>,
    pub bag_type: BagType,
    pub execution_mode: ExecutionMode,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TriviaSet {
    pub fn from_recipe(recipe: &Recipe, question_ids: Vec<String>, warnings: Vec<String>) -> Self {
        TriviaSet {
            id: Uuid::new_v4().to_string(),
            recipe_id: Some(recipe.id.clone()),
            name: recipe.name.clone(),
            category: Some(recipe.category.clone()),
            question_ids,
            bag_type: recipe.bag_type,
            execution_mode: recipe.execution_mode,
            warnings,
            created_at: Utc::now(),
        }
    }

    pub fn collection(
        name: &str,
        bag_type: BagType,
        question_ids: Vec<String>,
        warnings: Vec<String>,
    ) -> Self {
        TriviaSet {
            id: Uuid::new_v4().to_string(),
            recipe_id: None,
            name: name.to_string(),
            category: None,
            question_ids,
            bag_type,
            execution_mode: ExecutionMode::Manual,
            warnings,
            created_at: Utc::now(),
        }
    }
}
