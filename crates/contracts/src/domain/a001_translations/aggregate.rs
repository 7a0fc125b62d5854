use crate::enums::language::Language;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Validate a dot-delimited translation key such as `hero.title`.
///
/// Every segment must be non-empty and must not contain whitespace.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.chars().any(char::is_whitespace))
}

/// Flat `key -> value` view of one locale.
///
/// On the wire the tree is nested (`{"hero": {"title": "..."}}`), in memory
/// every leaf is addressed by its full dot path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTree {
    entries: BTreeMap<String, String>,
}

impl LanguageTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an existing key that cannot coexist with `key` in the nested
    /// representation: either a leaf that is a dot-prefix of `key`, or a key
    /// that has `key` as its dot-prefix.
    pub fn conflicting_key(&self, key: &str) -> Option<&str> {
        let as_prefix = format!("{key}.");
        self.entries
            .keys()
            .find(|existing| {
                existing.as_str() != key
                    && (key.starts_with(&format!("{existing}.")) || existing.starts_with(&as_prefix))
            })
            .map(String::as_str)
    }

    /// Build a flat tree from a nested JSON object.
    ///
    /// Strings are leaves, numbers and booleans are stringified, `null` is
    /// skipped and array elements are addressed by index. A non-object root
    /// yields an empty tree.
    pub fn from_nested(value: &Value) -> Self {
        let mut tree = Self::new();
        if value.is_object() {
            flatten_into("", value, &mut tree.entries);
        }
        tree
    }

    /// Render the tree as nested JSON. When a leaf is shadowed by a deeper
    /// key (`a` and `a.b`), the deeper key wins.
    pub fn to_nested(&self) -> Value {
        let mut root = Map::new();
        for (key, value) in &self.entries {
            insert_path(&mut root, key, value);
        }
        Value::Object(root)
    }
}

impl FromIterator<(String, String)> for LanguageTree {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for LanguageTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_nested().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LanguageTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_nested(&value))
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{prefix}.{segment}")
    }
}

fn flatten_into(prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (segment, child) in map {
                flatten_into(&join_path(prefix, segment), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&join_path(prefix, &index.to_string()), child, out);
            }
        }
        Value::String(s) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Number(n) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), n.to_string());
        }
        Value::Bool(b) if !prefix.is_empty() => {
            out.insert(prefix.to_string(), b.to_string());
        }
        _ => {}
    }
}

fn insert_path(root: &mut Map<String, Value>, key: &str, value: &str) {
    let mut segments = key.split('.').peekable();
    let mut current = root;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            // an object already here means a deeper key owns this path
            if !current.get(segment).is_some_and(Value::is_object) {
                current.insert(segment.to_string(), Value::String(value.to_string()));
            }
            return;
        }
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        current = next;
    }
}

/// Full payload of `GET /api/translations`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationsResponse {
    #[serde(default)]
    pub en: LanguageTree,
    #[serde(default)]
    pub hy: LanguageTree,
    #[serde(default)]
    pub ru: LanguageTree,
}

impl TranslationsResponse {
    pub fn get(&self, language: Language) -> &LanguageTree {
        match language {
            Language::En => &self.en,
            Language::Hy => &self.hy,
            Language::Ru => &self.ru,
        }
    }

    pub fn get_mut(&mut self, language: Language) -> &mut LanguageTree {
        match language {
            Language::En => &mut self.en,
            Language::Hy => &mut self.hy,
            Language::Ru => &mut self.ru,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &LanguageTree)> {
        Language::all()
            .into_iter()
            .map(move |language| (language, self.get(language)))
    }
}
