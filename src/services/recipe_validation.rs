use validator::Validate;

use crate::{
    errors::{AppResult, FieldErrors},
    models::{
        domain::{Cooldown, QuantityRange, QuestionType, Recipe, RecipeDraft},
        dto::request::RecipeInput,
    },
};

pub const MAX_QUANTITY: u32 = 100;
pub const MAX_COOLDOWN_DAYS: u32 = 365;

/// Checks a submitted recipe form and returns the draft it describes.
/// Runs before any store access; every offending field is reported at once.
pub fn validate_recipe_input(input: &RecipeInput) -> AppResult<RecipeDraft> {
    let mut errors = match input.validate() {
        Ok(()) => FieldErrors::default(),
        Err(err) => FieldErrors::from(err),
    };

    if input.name.trim().is_empty() && !errors.has_field("name") {
        errors.push("name", "Name must not be blank");
    }
    if input.category.trim().is_empty() && !errors.has_field("category") {
        errors.push("category", "Category is required");
    }

    let cooldown = input.cooldown.unwrap_or_default();
    check_policy(&input.question_types, &input.quantity, &cooldown, &mut errors);
    errors.into_result()?;

    Ok(RecipeDraft {
        name: input.name.clone(),
        category: input.category.clone(),
        theme: input.theme.clone(),
        question_types: input.question_types.clone(),
        quantity: input.quantity,
        cooldown,
        execution_mode: input.execution_mode.unwrap_or_default(),
    })
}

/// Re-checks a stored recipe before it drives an execution.
pub fn validate_policy(recipe: &Recipe) -> AppResult<()> {
    let mut errors = FieldErrors::default();
    if recipe.category.trim().is_empty() {
        errors.push("category", "Category is required");
    }
    check_policy(&recipe.question_types, &recipe.quantity, &recipe.cooldown, &mut errors);
    errors.into_result()
}

fn check_policy(
    question_types: &[QuestionType],
    quantity: &QuantityRange,
    cooldown: &Cooldown,
    errors: &mut FieldErrors,
) {
    if question_types.is_empty() {
        errors.push("question_types", "Select at least one question type");
    } else {
        let mut seen = question_types.to_vec();
        seen.sort();
        seen.dedup();
        if seen.len() != question_types.len() {
            errors.push("question_types", "Question types must not repeat");
        }
    }

    if quantity.min < 1 {
        errors.push("quantity.min", "Minimum quantity must be at least 1");
    }
    if quantity.min > quantity.max {
        errors.push("quantity.max", "Maximum quantity must not be below the minimum");
    }
    if quantity.default < quantity.min || quantity.default > quantity.max {
        errors.push(
            "quantity.default",
            format!(
                "Default quantity must be between {} and {}",
                quantity.min, quantity.max
            ),
        );
    }
    if quantity.max > MAX_QUANTITY {
        errors.push(
            "quantity.max",
            format!("Maximum quantity must be at most {}", MAX_QUANTITY),
        );
    }

    if cooldown.days > MAX_COOLDOWN_DAYS {
        errors.push(
            "cooldown.days",
            format!("Cooldown must be at most {} days", MAX_COOLDOWN_DAYS),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::AppError, models::domain::ExecutionMode};

    fn input() -> RecipeInput {
        RecipeInput {
            name: "Players weekly".to_string(),
            category: "Players".to_string(),
            theme: Some("Legends".to_string()),
            question_types: vec![QuestionType::MultipleChoice],
            quantity: QuantityRange { min: 5, max: 15, default: 10 },
            cooldown: Some(Cooldown { enabled: true, days: 7 }),
            execution_mode: None,
        }
    }

    fn field_errors(result: AppResult<RecipeDraft>) -> FieldErrors {
        match result {
            Err(AppError::InvalidFields(fields)) => fields,
            other => panic!("expected field errors, got {:?}", other.map(|d| d.name)),
        }
    }

    #[test]
    fn valid_input_becomes_draft_with_defaults() {
        let mut input = input();
        input.cooldown = None;
        let draft = validate_recipe_input(&input).expect("input should be valid");

        assert_eq!(draft.cooldown, Cooldown { enabled: false, days: 0 });
        assert_eq!(draft.execution_mode, ExecutionMode::Auto);
    }

    #[test]
    fn min_above_max_is_reported_on_the_field() {
        let mut input = input();
        input.quantity = QuantityRange { min: 12, max: 8, default: 10 };
        let fields = field_errors(validate_recipe_input(&input));

        assert!(fields.has_field("quantity.max"));
        assert!(fields.has_field("quantity.default"));
    }

    #[test]
    fn empty_question_types_rejected() {
        let mut input = input();
        input.question_types.clear();
        let fields = field_errors(validate_recipe_input(&input));
        assert!(fields.has_field("question_types"));
    }

    #[test]
    fn duplicate_question_types_rejected() {
        let mut input = input();
        input.question_types = vec![QuestionType::TrueFalse, QuestionType::TrueFalse];
        let fields = field_errors(validate_recipe_input(&input));
        assert!(fields.has_field("question_types"));
    }

    #[test]
    fn blank_fields_and_zero_minimum_reported_together() {
        let mut input = input();
        input.name = "   ".to_string();
        input.category = String::new();
        input.quantity = QuantityRange { min: 0, max: 5, default: 0 };
        let fields = field_errors(validate_recipe_input(&input));

        assert!(fields.has_field("name"));
        assert!(fields.has_field("category"));
        assert!(fields.has_field("quantity.min"));
        assert!(!fields.has_field("quantity.default"));
    }

    #[test]
    fn limits_on_quantity_and_cooldown() {
        let mut input = input();
        input.quantity = QuantityRange { min: 1, max: 500, default: 10 };
        input.cooldown = Some(Cooldown { enabled: true, days: 1000 });
        let fields = field_errors(validate_recipe_input(&input));

        assert!(fields.has_field("quantity.max"));
        assert!(fields.has_field("cooldown.days"));
    }

    #[test]
    fn stored_policy_default_is_always_legal() {
        let draft = validate_recipe_input(&input()).expect("input should be valid");
        let recipe = Recipe::new(draft);
        assert!(validate_policy(&recipe).is_ok());
        assert_eq!(recipe.quantity.clamp(recipe.quantity.default), recipe.quantity.default);
    }

    #[test]
    fn stored_policy_with_broken_range_fails() {
        let mut recipe = Recipe::new(validate_recipe_input(&input()).expect("valid"));
        recipe.quantity.min = 20;
        assert!(matches!(validate_policy(&recipe), Err(AppError::InvalidFields(_))));
    }
}
