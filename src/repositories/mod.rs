pub mod question_repository;
pub mod recipe_repository;
pub mod trivia_set_repository;

pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use recipe_repository::{MongoRecipeRepository, RecipeRepository};
pub use trivia_set_repository::{MongoTriviaSetRepository, TriviaSetRepository};
