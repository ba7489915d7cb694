use async_graphql::{ErrorExtensions, ID};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::ExecutionResult,
};

/// Helper to check a GraphQL ID is a UUID and return it as a string
pub fn parse_id(id: &ID) -> AppResult<String> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.to_string())
        .map_err(|_| AppError::ValidationError("Invalid UUID format".to_string()))
}

/// A shortfall comes back as an unsuccessful result; every other error stays a GraphQL error.
pub fn execution_outcome(
    result: AppResult<ExecutionResult>,
) -> async_graphql::Result<ExecutionResult> {
    match result {
        Ok(result) => Ok(result),
        Err(err @ AppError::InsufficientCandidates { .. }) => Ok(ExecutionResult::failed(&err)),
        Err(err) => Err(err.extend()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_non_uuid() {
        assert!(parse_id(&ID::from("recipe-1")).is_err());
        let id = Uuid::new_v4().to_string();
        assert_eq!(parse_id(&ID::from(id.clone())).ok(), Some(id));
    }

    #[test]
    fn shortfall_is_an_unsuccessful_result() {
        let result = execution_outcome(Err(AppError::InsufficientCandidates {
            requested: 10,
            available: 4,
        }))
        .expect("shortfall is not a GraphQL error");
        assert!(!result.success);
        assert!(result.error.is_some());

        let err = execution_outcome(Err(AppError::NotFound("recipe".into())));
        assert!(err.is_err());
    }
}
