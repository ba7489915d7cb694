use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

/// The store round trip an execution was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreStep {
    RecipeLoad,
    PoolQuery,
    UsageHistory,
    SetPersist,
    SetLoad,
    UsageAppend,
    RecipeUsage,
    RecipeSave,
    Ingest,
}

impl fmt::Display for StoreStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreStep::RecipeLoad => "recipe load",
            StoreStep::PoolQuery => "candidate pool query",
            StoreStep::UsageHistory => "usage history lookup",
            StoreStep::SetPersist => "trivia set persistence",
            StoreStep::SetLoad => "trivia set load",
            StoreStep::UsageAppend => "usage append",
            StoreStep::RecipeUsage => "recipe usage update",
            StoreStep::RecipeSave => "recipe save",
            StoreStep::Ingest => "question ingest",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        collect_validation_errors(&err, "", &mut fields);
        fields.0.sort_by(|a, b| a.field.cmp(&b.field));
        fields
    }
}

// Nested structs and lists flatten to `quotas[0].count` style paths.
fn collect_validation_errors(
    err: &validator::ValidationErrors,
    prefix: &str,
    out: &mut FieldErrors,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in err.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errors) => {
                for error in errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(&path, message);
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(
        "Insufficient candidates: requested {requested}, only {available} available (short by {})",
        shortfall(.requested, .available)
    )]
    InsufficientCandidates { requested: u32, available: u32 },

    #[error("Store failure during {step}: {message}")]
    Store { step: StoreStep, message: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

fn shortfall(requested: &u32, available: &u32) -> u32 {
    requested.saturating_sub(*available)
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidFields(_) | AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::InsufficientCandidates { .. } => "INSUFFICIENT_CANDIDATES",
            AppError::Store { .. } => "STORE_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Tags a raw store error with the execution step it happened in.
    pub fn at_step(self, step: StoreStep) -> Self {
        match self {
            AppError::DatabaseError(message) | AppError::InternalError(message) => {
                AppError::Store { step, message }
            }
            other => other,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidFields(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InsufficientCandidates { .. } => StatusCode::CONFLICT,
            AppError::Store { .. } | AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let fields = match self {
            AppError::InvalidFields(fields) => Some(fields.0.clone()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            fields,
        })
    }
}
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::InternalError(format!("BSON serialization error: {}", err))
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidFields(FieldErrors::from(err))
    }
}
impl From<async_graphql::Error> for AppError {
    fn from(err: async_graphql::Error) -> Self {
        AppError::InternalError(err.message)
    }
}
impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
            if let AppError::InvalidFields(fields) = self {
                let list = fields
                    .0
                    .iter()
                    .map(|f| async_graphql::Value::from(format!("{}: {}", f.field, f.message)))
                    .collect::<Vec<_>>();
                e.set("fields", async_graphql::Value::List(list));
            }
            if let AppError::Store { step, .. } = self {
                e.set("step", step.to_string());
            }
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;
