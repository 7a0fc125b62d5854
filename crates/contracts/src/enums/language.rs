use serde::{Deserialize, Serialize};

/// Поддерживаемые языки сайта
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hy,
    Ru,
}

impl Language {
    /// Код языка (`en`, `hy`, `ru`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hy => "hy",
            Language::Ru => "ru",
        }
    }

    /// Название языка на самом языке
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hy => "Հայերեն",
            Language::Ru => "Русский",
        }
    }

    /// Все поддерживаемые языки
    pub fn all() -> [Language; 3] {
        [Language::En, Language::Hy, Language::Ru]
    }

    /// Парсинг из кода
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "hy" => Some(Language::Hy),
            "ru" => Some(Language::Ru),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("hy"), Some(Language::Hy));
        assert_eq!(Language::from_code(" RU "), Some(Language::Ru));
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Hy).unwrap(), "\"hy\"");
        let lang: Language = serde_json::from_str("\"ru\"").unwrap();
        assert_eq!(lang, Language::Ru);
        assert!(serde_json::from_str::<Language>("\"fr\"").is_err());
    }
}
