use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, ErrorResponse};
use sea_orm::DbErr;
use thiserror::Error;

use crate::validation::Violation;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Categoria com ID {0} não encontrada.")]
    CategoryNotFound(i32),

    #[error("Nenhuma categoria encontrada.")]
    NoCategories,

    #[error("Produto com ID {0} não encontrado.")]
    ProductNotFound(i32),

    #[error("Nenhum produto encontrado.")]
    NoProducts,

    #[error("Validação falhou: {}", summarize(.0))]
    Validation(Vec<Violation>),

    #[error("O ID {path} da rota não corresponde ao ID {body} do corpo da requisição.")]
    IdentityMismatch { path: i32, body: i32 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let violations = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    Violation::new(field.to_string(), message)
                })
            })
            .collect();

        CatalogError::Validation(violations)
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            e @ (CatalogError::CategoryNotFound(_)
            | CatalogError::NoCategories
            | CatalogError::ProductNotFound(_)
            | CatalogError::NoProducts) => AppError::NotFound(e.to_string()),
            e @ (CatalogError::Validation(_) | CatalogError::IdentityMismatch { .. }) => {
                AppError::BadRequest(e.to_string())
            }
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            // Validation failures carry the structured (field, message) list
            // in `details`; everything else goes through AppError.
            CatalogError::Validation(violations) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    count = violations.len(),
                    "Validation failed"
                );

                let body = Json(ErrorResponse {
                    code: ErrorCode::ValidationError.code(),
                    error: ErrorCode::ValidationError.as_str().to_string(),
                    message: "Validação falhou".to_string(),
                    details: Some(serde_json::json!(violations)),
                });

                (StatusCode::BAD_REQUEST, body).into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}
