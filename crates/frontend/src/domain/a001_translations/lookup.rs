use contracts::domain::a001_translations::TranslationsResponse;
use contracts::enums::language::Language;

/// Resolved text for `key`: the requested language, then English, then the key itself.
pub fn translate(translations: &TranslationsResponse, language: Language, key: &str) -> String {
    translations
        .get(language)
        .get(key)
        .or_else(|| translations.get(Language::En).get(key))
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}
