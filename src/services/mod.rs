pub mod candidate_pool;
pub mod parse_service;
pub mod parsing;
pub mod recipe_execution_service;
pub mod recipe_service;
pub mod recipe_validation;
pub mod sampler;
