#[cfg(test)]
pub mod fixtures {
    use crate::models::{
        domain::{
            CandidateRecord, Cooldown, ExecutionMode, QuantityRange, QuestionType, Recipe,
            RecipeDraft,
        },
        dto::request::RecipeInput,
    };

    /// A stored question with no usage history.
    pub fn candidate(id: &str, category: &str, question_type: QuestionType) -> CandidateRecord {
        let wrong_answers = match question_type {
            QuestionType::TrueFalse => vec!["False".to_string()],
            _ => vec!["Pele".to_string(), "Zidane".to_string(), "Cruyff".to_string()],
        };
        CandidateRecord {
            id: id.to_string(),
            category: category.to_string(),
            question_type,
            tags: vec![],
            last_used_timestamps: vec![],
            question_text: format!("Question {}", id),
            correct_answer: match question_type {
                QuestionType::TrueFalse => "True".to_string(),
                _ => "Maradona".to_string(),
            },
            wrong_answers,
            theme: None,
            difficulty: None,
            created_at: None,
        }
    }

    /// `count` candidates with ids `q0..`.
    pub fn candidates(category: &str, question_type: QuestionType, count: usize) -> Vec<CandidateRecord> {
        (0..count)
            .map(|i| candidate(&format!("q{}", i), category, question_type))
            .collect()
    }

    pub fn recipe_input() -> RecipeInput {
        RecipeInput {
            name: "Players weekly".to_string(),
            category: "Players".to_string(),
            theme: None,
            question_types: vec![QuestionType::MultipleChoice],
            quantity: QuantityRange { min: 5, max: 15, default: 10 },
            cooldown: Some(Cooldown { enabled: true, days: 7 }),
            execution_mode: None,
        }
    }

    /// Multiple choice, quantity 5..=15 defaulting to 10, 7 day cooldown.
    pub fn players_recipe() -> Recipe {
        Recipe::new(RecipeDraft {
            name: "Players weekly".to_string(),
            category: "Players".to_string(),
            theme: None,
            question_types: vec![QuestionType::MultipleChoice],
            quantity: QuantityRange { min: 5, max: 15, default: 10 },
            cooldown: Cooldown { enabled: true, days: 7 },
            execution_mode: ExecutionMode::Auto,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuestionType;

    #[test]
    fn test_fixtures_candidates() {
        let pool = candidates("Players", QuestionType::TrueFalse, 3);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool[2].id, "q2");
        assert!(pool.iter().all(|c| c.last_used_at().is_none()));
    }

    #[test]
    fn test_fixtures_players_recipe() {
        let recipe = players_recipe();
        assert_eq!(recipe.category, "Players");
        assert_eq!(recipe.quantity.default, 10);
        assert!(recipe.cooldown.enabled);
        assert!(!recipe.is_archived());
    }
}
