use crate::domain::a001_translations::cache::TranslationCache;
use crate::domain::a001_translations::ui::editor::TranslationEditorPage;
use crate::shared::toast::Toasts;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Shared translation queries and notifications for the whole app
    TranslationCache::provide();
    Toasts::provide();

    view! {
        <ConfigProvider>
            <TranslationEditorPage />
        </ConfigProvider>
    }
}
