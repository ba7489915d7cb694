pub mod candidate;
pub mod execution;
pub mod parsed_question;
pub mod question_type;
pub mod recipe;
pub mod trivia_set;
pub use candidate::{CandidateFilter, CandidateRecord};
pub use execution::{ExecuteOptions, ExecutionResult, PreviewResult, TypeCount};
pub use parsed_question::{ParseOutcome, ParsedQuestion};
pub use question_type::{Difficulty, QuestionType};
pub use recipe::{BagType, Cooldown, ExecutionMode, QuantityRange, Recipe, RecipeDraft, RecipeUsage};
pub use trivia_set::TriviaSet;
