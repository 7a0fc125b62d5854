//! Default locale files compiled into the binary.
//!
//! Used to seed an empty database and by `POST /api/translations/reset`.

use anyhow::Context;
use contracts::domain::a001_translations::{LanguageTree, TranslationsResponse};
use contracts::enums::language::Language;

const EN_JSON: &str = include_str!("../../../defaults/en.json");
const HY_JSON: &str = include_str!("../../../defaults/hy.json");
const RU_JSON: &str = include_str!("../../../defaults/ru.json");

fn source(language: Language) -> &'static str {
    match language {
        Language::En => EN_JSON,
        Language::Hy => HY_JSON,
        Language::Ru => RU_JSON,
    }
}

pub fn default_tree(language: Language) -> anyhow::Result<LanguageTree> {
    let value: serde_json::Value = serde_json::from_str(source(language))
        .with_context(|| format!("embedded defaults for `{}` are not valid JSON", language))?;
    Ok(LanguageTree::from_nested(&value))
}

pub fn default_translations() -> anyhow::Result<TranslationsResponse> {
    Ok(TranslationsResponse {
        en: default_tree(Language::En)?,
        hy: default_tree(Language::Hy)?,
        ru: default_tree(Language::Ru)?,
    })
}
