use contracts::domain::a001_translations::{
    LanguageTree, ResetResponse, TranslationValidation, TranslationsResponse,
    UpdateTranslationRequest, UpdateTranslationResponse,
};
use contracts::enums::language::Language;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::shared::api_utils::{api_url, error_message};

async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(error_message(response, action).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// All languages at once
pub async fn fetch_translations() -> Result<TranslationsResponse, String> {
    let response = Request::get(&api_url("/api/translations"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, "Loading translations failed").await
}

pub async fn fetch_language(language: Language) -> Result<LanguageTree, String> {
    let response = Request::get(&api_url(&format!("/api/translations/{}", language.code())))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, "Loading language failed").await
}

/// Save one value
pub async fn update_translation(
    request: &UpdateTranslationRequest,
) -> Result<UpdateTranslationResponse, String> {
    let response = Request::put(&api_url("/api/translations"))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, "Save failed").await
}

pub async fn validate_translations() -> Result<TranslationValidation, String> {
    let response = Request::get(&api_url("/api/translations/validate"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, "Validation failed").await
}

/// Restore the shipped defaults, dropping every edit
pub async fn reset_translations() -> Result<ResetResponse, String> {
    let response = Request::post(&api_url("/api/translations/reset"))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, "Reset failed").await
}
