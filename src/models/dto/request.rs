use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{Cooldown, ExecuteOptions, ExecutionMode, QuantityRange, QuestionType};

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(length(max = 200, message = "Theme must be at most 200 characters"))]
    pub theme: Option<String>,

    pub question_types: Vec<QuestionType>,

    pub quantity: QuantityRange,

    #[serde(default)]
    pub cooldown: Option<Cooldown>,

    #[serde(default)]
    pub execution_mode: Option<ExecutionMode>,
}

#[derive(Debug, Clone, Default, Deserialize, InputObject)]
pub struct ExecuteRecipeInput {
    pub quantity_override: Option<u32>,
    pub allow_partial_sets: Option<bool>,
}

impl From<ExecuteRecipeInput> for ExecuteOptions {
    fn from(input: ExecuteRecipeInput) -> Self {
        ExecuteOptions {
            quantity_override: input.quantity_override,
            allow_partial_sets: input.allow_partial_sets.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct ParseTextRequest {
    #[validate(length(max = 500000, message = "Text is too large to parse"))]
    pub raw_text: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct IngestTextRequest {
    #[validate(length(max = 500000, message = "Text is too large to parse"))]
    pub raw_text: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CategoryQuotaInput {
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = 1, max = 100, message = "Quota must be between 1 and 100"))]
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CollectionRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,

    pub question_types: Vec<QuestionType>,

    #[validate(nested)]
    pub quotas: Vec<CategoryQuotaInput>,

    #[serde(default)]
    pub cooldown: Option<Cooldown>,

    #[serde(default)]
    pub allow_partial_sets: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_input_deserializes_with_optional_policy() {
        let json = r#"{
            "name": "Players weekly",
            "category": "Players",
            "theme": null,
            "question_types": ["multiple-choice", "true-false"],
            "quantity": { "min": 5, "max": 15, "default": 10 }
        }"#;
        let input: RecipeInput = serde_json::from_str(json).expect("recipe input should parse");

        assert_eq!(input.question_types.len(), 2);
        assert_eq!(input.quantity.default, 10);
        assert!(input.cooldown.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn execute_input_defaults_to_strict_sets() {
        let options: ExecuteOptions = ExecuteRecipeInput::default().into();
        assert!(!options.allow_partial_sets);
        assert_eq!(options.quantity_override, None);
    }

    #[test]
    fn collection_request_validates_nested_quotas() {
        let request = CollectionRequest {
            name: "Mixed bag".to_string(),
            question_types: vec![QuestionType::MultipleChoice],
            quotas: vec![CategoryQuotaInput {
                category: "Clubs".to_string(),
                count: 0,
            }],
            cooldown: None,
            allow_partial_sets: None,
        };
        assert!(request.validate().is_err());
    }
}
