//! Client-side cache of the translation store.
//!
//! Two query groups are kept: `translations` feeds the editor tooling and
//! `live-translations` feeds the rendered preview. Each group has a version
//! counter; bumping it makes the group's fetcher reload.

use super::api;
use contracts::domain::a001_translations::{TranslationsResponse, UpdateTranslationRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;

pub const TRANSLATIONS_QUERY: &str = "translations";
pub const LIVE_TRANSLATIONS_QUERY: &str = "live-translations";

/// Invalidation counters per query group. Unknown groups are at version 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryVersions {
    versions: BTreeMap<String, u64>,
}

impl QueryVersions {
    pub fn version(&self, group: &str) -> u64 {
        self.versions.get(group).copied().unwrap_or(0)
    }

    /// Marks `group` stale and returns its new version.
    pub fn invalidate(&mut self, group: &str) -> u64 {
        let version = self.versions.entry(group.to_string()).or_insert(0);
        *version += 1;
        *version
    }
}

/// A write the store accepted. The reload that follows may still fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Stored, but the cached copy could not be reloaded.
    SavedStale(String),
}

impl SaveOutcome {
    pub fn after_refetch(refetch: Result<(), String>) -> Self {
        match refetch {
            Ok(()) => Self::Saved,
            Err(e) => Self::SavedStale(e),
        }
    }
}

#[derive(Clone, Copy)]
pub struct TranslationCache {
    versions: RwSignal<QueryVersions>,
    pub translations: RwSignal<Option<TranslationsResponse>>,
    pub live_translations: RwSignal<Option<TranslationsResponse>>,
    pub load_error: RwSignal<Option<String>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self {
            versions: RwSignal::new(QueryVersions::default()),
            translations: RwSignal::new(None),
            live_translations: RwSignal::new(None),
            load_error: RwSignal::new(None),
        }
    }

    /// Creates the cache, starts its fetchers and provides it as context.
    pub fn provide() -> Self {
        let cache = Self::new();
        cache.install_fetcher(TRANSLATIONS_QUERY, cache.translations);
        cache.install_fetcher(LIVE_TRANSLATIONS_QUERY, cache.live_translations);
        provide_context(cache);
        cache
    }

    pub fn expect() -> Self {
        use_context::<Self>().expect("TranslationCache context not found")
    }

    pub fn invalidate(&self, group: &str) {
        self.versions.update(|versions| {
            versions.invalidate(group);
        });
    }

    fn install_fetcher(&self, group: &'static str, target: RwSignal<Option<TranslationsResponse>>) {
        let versions = self.versions;
        let load_error = self.load_error;
        Effect::new(move |_| {
            let version = versions.with(|v| v.version(group));
            spawn_local(async move {
                match api::fetch_translations().await {
                    Ok(data) => {
                        log::debug!("Query `{}` loaded (v{})", group, version);
                        let _ = target.try_set(Some(data));
                        let _ = load_error.try_set(None);
                    }
                    Err(e) => {
                        log::error!("Query `{}` failed: {}", group, e);
                        let _ = load_error.try_set(Some(e));
                    }
                }
            });
        });
    }

    /// Reloads both groups now, outside the invalidation cycle.
    pub async fn refetch(&self) -> Result<(), String> {
        let data = api::fetch_translations().await?;
        let _ = self.translations.try_set(Some(data.clone()));
        let _ = self.live_translations.try_set(Some(data));
        Ok(())
    }

    /// PUT the value, invalidate both groups, then refetch explicitly.
    ///
    /// `Err` means the write itself failed. A failed reload after an accepted
    /// write is reported as [`SaveOutcome::SavedStale`].
    pub async fn save(&self, request: UpdateTranslationRequest) -> Result<SaveOutcome, String> {
        let response = api::update_translation(&request).await?;
        log::debug!("Stored [{}] {}", response.language, response.key);
        self.invalidate(TRANSLATIONS_QUERY);
        self.invalidate(LIVE_TRANSLATIONS_QUERY);
        let outcome = SaveOutcome::after_refetch(self.refetch().await);
        if let SaveOutcome::SavedStale(e) = &outcome {
            log::warn!("Reload after saving `{}` failed: {}", response.key, e);
        }
        Ok(outcome)
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_versions_are_independent() {
        let mut versions = QueryVersions::default();
        assert_eq!(versions.version(TRANSLATIONS_QUERY), 0);

        assert_eq!(versions.invalidate(TRANSLATIONS_QUERY), 1);
        assert_eq!(versions.invalidate(TRANSLATIONS_QUERY), 2);
        assert_eq!(versions.invalidate(LIVE_TRANSLATIONS_QUERY), 1);

        assert_eq!(versions.version(TRANSLATIONS_QUERY), 2);
        assert_eq!(versions.version(LIVE_TRANSLATIONS_QUERY), 1);
        assert_eq!(versions.version("unknown"), 0);
    }

    #[test]
    fn test_failed_reload_still_counts_as_saved() {
        assert_eq!(SaveOutcome::after_refetch(Ok(())), SaveOutcome::Saved);
        assert_eq!(
            SaveOutcome::after_refetch(Err("HTTP 502".to_string())),
            SaveOutcome::SavedStale("HTTP 502".to_string())
        );
    }
}
