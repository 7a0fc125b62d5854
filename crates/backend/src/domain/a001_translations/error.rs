use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a001_translations::ApiErrorBody;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Invalid translation key `{0}`: expected a dot-delimited path like `hero.title`")]
    InvalidKey(String),

    #[error("Key `{key}` conflicts with existing key `{existing}`")]
    KeyConflict { key: String, existing: String },

    #[error("Unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl TranslationError {
    pub fn status(&self) -> StatusCode {
        match self {
            TranslationError::InvalidKey(_) | TranslationError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            TranslationError::KeyConflict { .. } => StatusCode::CONFLICT,
            TranslationError::UnknownLanguage(_) => StatusCode::NOT_FOUND,
            TranslationError::Database(_) | TranslationError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for TranslationError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Translation store failure: {}", self);
        } else {
            tracing::warn!("Rejected translation request: {}", self);
        }
        let body = ApiErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            TranslationError::InvalidKey("a..b".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TranslationError::KeyConflict {
                key: "hero".into(),
                existing: "hero.title".into()
            }
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TranslationError::UnknownLanguage("de".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TranslationError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_response_carries_message_body() {
        let response = TranslationError::UnknownLanguage("de".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ApiErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Unknown language `de`");
    }
}
