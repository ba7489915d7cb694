use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub questions_collection: String,
    pub recipes_collection: String,
    pub trivia_sets_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    /// Fixed seed for the sampler's random source; `None` uses OS entropy.
    pub sampler_seed: Option<u64>,
    /// Hold a per-recipe lock across an execution so concurrent runs cannot overlap.
    pub serialize_recipe_executions: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "trivia-local".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            recipes_collection: env::var("RECIPES_COLLECTION")
                .unwrap_or_else(|_| "recipes".to_string()),
            trivia_sets_collection: env::var("TRIVIA_SETS_COLLECTION")
                .unwrap_or_else(|_| "trivia_sets".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            sampler_seed: env::var("SAMPLER_SEED").ok().and_then(|s| s.parse().ok()),
            serialize_recipe_executions: env::var("SERIALIZE_RECIPE_EXECUTIONS")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "trivia-test".to_string(),
            questions_collection: "questions".to_string(),
            recipes_collection: "recipes".to_string(),
            trivia_sets_collection: "trivia_sets".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            sampler_seed: Some(7),
            serialize_recipe_executions: false,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
