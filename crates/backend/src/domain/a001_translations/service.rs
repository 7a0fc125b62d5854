use super::defaults::default_translations;
use super::repository::{self, TranslationRow};
use super::TranslationError;
use chrono::Utc;
use contracts::domain::a001_translations::{
    is_valid_key, LanguageTree, ResetResponse, TranslationValidation, TranslationsResponse,
    UpdateTranslationRequest, UpdateTranslationResponse,
};
use contracts::enums::language::Language;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::collections::{BTreeMap, BTreeSet};

/// Все переводы, сгруппированные по языкам
pub async fn load_all<C: ConnectionTrait>(
    conn: &C,
) -> Result<TranslationsResponse, TranslationError> {
    let mut response = TranslationsResponse::default();
    for row in repository::list_all(conn).await? {
        match Language::from_code(&row.language) {
            Some(language) => response.get_mut(language).set(row.key, row.value),
            None => tracing::warn!(
                "Skipping translation `{}` with unsupported language `{}`",
                row.key,
                row.language
            ),
        }
    }
    Ok(response)
}

pub async fn load_language<C: ConnectionTrait>(
    conn: &C,
    language: Language,
) -> Result<LanguageTree, TranslationError> {
    Ok(repository::list_by_language(conn, language)
        .await?
        .into_iter()
        .map(|row| (row.key, row.value))
        .collect())
}

/// Сохранение одного значения (last write wins)
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    request: UpdateTranslationRequest,
) -> Result<UpdateTranslationResponse, TranslationError> {
    let key = request.key.trim().to_string();
    if !is_valid_key(&key) {
        return Err(TranslationError::InvalidKey(request.key));
    }

    let tree = load_language(conn, request.language).await?;
    if let Some(existing) = tree.conflicting_key(&key) {
        return Err(TranslationError::KeyConflict {
            key,
            existing: existing.to_string(),
        });
    }

    let updated_at = Utc::now();
    repository::upsert(
        conn,
        TranslationRow {
            language: request.language,
            key: key.clone(),
            value: request.value.clone(),
        },
        updated_at,
    )
    .await?;

    tracing::info!(
        "Translation updated: [{}] {} ({} chars)",
        request.language,
        key,
        request.value.chars().count()
    );

    Ok(UpdateTranslationResponse {
        success: true,
        language: request.language,
        key,
        value: request.value,
        updated_at,
    })
}

/// Отчёт о полноте переводов.
///
/// `total_keys` is the union of keys over all languages; a key is missing in a
/// language that lacks it and empty where its value is blank.
pub fn validate(translations: &TranslationsResponse) -> TranslationValidation {
    let all_keys: BTreeSet<&str> = translations
        .iter()
        .flat_map(|(_, tree)| tree.keys())
        .collect();

    let mut missing = BTreeMap::new();
    let mut empty = BTreeMap::new();

    for (language, tree) in translations.iter() {
        let missing_keys: Vec<String> = all_keys
            .iter()
            .filter(|key| !tree.contains_key(key))
            .map(|key| key.to_string())
            .collect();
        let empty_keys: Vec<String> = tree
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| key.to_string())
            .collect();

        missing.insert(language, missing_keys);
        empty.insert(language, empty_keys);
    }

    let is_complete = missing.values().all(Vec::is_empty) && empty.values().all(Vec::is_empty);

    TranslationValidation {
        is_complete,
        total_keys: all_keys.len(),
        missing,
        empty,
    }
}

fn default_rows() -> anyhow::Result<Vec<TranslationRow>> {
    let defaults = default_translations()?;
    Ok(defaults
        .iter()
        .flat_map(|(language, tree)| {
            tree.iter().map(move |(key, value)| TranslationRow {
                language,
                key: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect())
}

/// Сброс к значениям по умолчанию
pub async fn reset(conn: &DatabaseConnection) -> Result<ResetResponse, TranslationError> {
    let rows = default_rows()?;
    let txn = conn.begin().await?;
    let removed = repository::delete_all(&txn).await?;
    let inserted = repository::insert_many(&txn, rows, Utc::now()).await?;
    txn.commit().await?;

    tracing::info!(
        "Translations reset to defaults: {} rows removed, {} rows restored",
        removed,
        inserted
    );

    Ok(ResetResponse {
        success: true,
        message: format!("Restored {} default translations", inserted),
    })
}

/// Seeds the embedded defaults into an empty table. Returns `true` if it did.
pub async fn seed_defaults_if_empty<C: ConnectionTrait>(conn: &C) -> anyhow::Result<bool> {
    if repository::count(conn).await? > 0 {
        return Ok(false);
    }
    let inserted = repository::insert_many(conn, default_rows()?, Utc::now()).await?;
    tracing::info!("Seeded {} default translations", inserted);
    Ok(true)
}
