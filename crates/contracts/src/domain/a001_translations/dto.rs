use crate::enums::language::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `PUT /api/translations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTranslationRequest {
    pub language: Language,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTranslationResponse {
    pub success: bool,
    pub language: Language,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Completeness report of `GET /api/translations/validate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationValidation {
    pub is_complete: bool,
    pub total_keys: usize,
    pub missing: BTreeMap<Language, Vec<String>>,
    pub empty: BTreeMap<Language, Vec<String>>,
}

impl TranslationValidation {
    pub fn missing_count(&self) -> usize {
        self.missing.values().map(Vec::len).sum()
    }

    pub fn empty_count(&self) -> usize {
        self.empty.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// Body of every non-2xx response of the translation store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
