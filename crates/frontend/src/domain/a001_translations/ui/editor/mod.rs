pub mod coverage_panel;
pub mod toolbar;
pub mod validation_panel;

use self::coverage_panel::{CoveragePanel, CoverageSummary};
use self::toolbar::EditorToolbar;
use self::validation_panel::ValidationPanel;
use crate::domain::a001_translations::api;
use crate::domain::a001_translations::cache::{SaveOutcome, TranslationCache};
use crate::domain::a002_landing::ui::{LandingPreview, PREVIEW_ROOT_ID};
use crate::shared::i18n_coverage::highlight::rescan;
use crate::shared::i18n_coverage::{
    clear_highlights, DomTree, EditSink, InlineEditorOverlay, RenderTree, TranslationEdit,
};
use crate::shared::toast::{ToastKind, ToastStack, Toasts};
use contracts::domain::a001_translations::TranslationValidation;
use contracts::enums::language::Language;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::RefCell;
use thaw::*;

const VALIDATION_POLL_MS: u32 = 5_000;

fn save_notice(key: &str, outcome: &Result<SaveOutcome, String>) -> (ToastKind, String) {
    match outcome {
        Ok(SaveOutcome::Saved) => (ToastKind::Success, format!("Saved `{}`", key)),
        Ok(SaveOutcome::SavedStale(e)) => (
            ToastKind::Info,
            format!("Saved `{}`, but the preview could not reload: {}", key, e),
        ),
        Err(e) => (ToastKind::Error, format!("Could not save `{}`: {}", key, e)),
    }
}

/// Committed inline edits go to the store; the outcome is reported as a toast.
#[derive(Clone, Copy)]
pub struct StoreSink {
    cache: TranslationCache,
    toasts: Toasts,
}

impl EditSink for StoreSink {
    fn submit(&self, edit: TranslationEdit) {
        let cache = self.cache;
        let toasts = self.toasts;
        wasm_bindgen_futures::spawn_local(async move {
            let key = edit.key.clone();
            let outcome = cache.save(edit.into()).await;
            let (kind, message) = save_notice(&key, &outcome);
            toasts.push(kind, message);
        });
    }
}

// At most one overlay per page; replaced whenever edit mode or language changes
thread_local! {
    static ACTIVE_OVERLAY: RefCell<Option<InlineEditorOverlay<StoreSink>>> = RefCell::new(None);
}

fn replace_overlay(next: Option<InlineEditorOverlay<StoreSink>>) {
    // Drop the old overlay outside the borrow: its teardown touches the DOM
    let previous = ACTIVE_OVERLAY.with(|slot| slot.replace(next));
    drop(previous);
}

/// Scans the preview. Highlights are refreshed when `highlight` is set.
fn run_scan(highlight: bool) -> Option<CoverageSummary> {
    let tree = DomTree::new()?;
    let root = tree.element_by_id(PREVIEW_ROOT_ID)?;
    let result = rescan(&tree, &root, highlight);
    log::info!(
        "Coverage scan: {}% ({} of {} text nodes)",
        result.coverage_percentage,
        result.translated_nodes,
        result.total_text_nodes
    );
    Some(CoverageSummary::from(&result))
}

#[component]
pub fn TranslationEditorPage() -> impl IntoView {
    let cache = TranslationCache::expect();
    let toasts = Toasts::expect();

    let language = RwSignal::new(Language::En);
    let edit_mode = RwSignal::new(false);
    let highlight = RwSignal::new(false);
    let coverage = RwSignal::new(None::<CoverageSummary>);
    let validation = RwSignal::new(None::<TranslationValidation>);
    let resetting = RwSignal::new(false);

    let sink = StoreSink { cache, toasts };
    Effect::new(move |_| {
        let enabled = edit_mode.get();
        let language = language.get();
        replace_overlay(None);
        if enabled {
            replace_overlay(InlineEditorOverlay::attach(language, sink));
        }
    });
    on_cleanup(|| replace_overlay(None));

    // The preview is re-rendered from scratch on every data or language
    // change, so existing highlights and scan rows go stale. With highlighting
    // on, the new preview is rescanned once it is in the document.
    Effect::new(move |_| {
        cache.live_translations.track();
        language.track();
        coverage.set(None);
        if let Some(tree) = DomTree::new() {
            clear_highlights(&tree);
        }
        if highlight.get_untracked() {
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                if highlight.try_get_untracked().unwrap_or(false) {
                    let _ = coverage.try_set(run_scan(true));
                }
            });
        }
    });

    Effect::new(move |prev: Option<bool>| {
        let on = highlight.get();
        if prev.is_some() {
            if on {
                coverage.set(run_scan(true));
            } else if let Some(tree) = DomTree::new() {
                clear_highlights(&tree);
            }
        }
        on
    });

    // Polling stops once the page is unmounted and `alive` is disposed
    let alive = StoredValue::new(true);
    spawn_local(async move {
        while alive.try_get_value().unwrap_or(false) {
            match api::validate_translations().await {
                Ok(report) => {
                    if validation.try_set(Some(report)).is_some() {
                        break;
                    }
                }
                Err(e) => log::warn!("Validation poll failed: {}", e),
            }
            TimeoutFuture::new(VALIDATION_POLL_MS).await;
        }
    });

    let on_scan = move |_: ()| {
        coverage.set(run_scan(highlight.get_untracked()));
    };

    let on_reset = move |_: ()| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Reset all translations to the shipped defaults? Every edit will be lost.")
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        resetting.set(true);
        spawn_local(async move {
            match api::reset_translations().await {
                Ok(response) => {
                    log::info!("{}", response.message);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().reload();
                    }
                }
                Err(e) => {
                    toasts.error(e);
                    let _ = resetting.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="translation-editor">
            <header class="translation-editor__header">
                <h1>"Translation editor"</h1>
                <EditorToolbar
                    language=language
                    edit_mode=edit_mode
                    highlight=highlight
                    on_scan=on_scan
                    on_reset=on_reset
                    resetting=resetting
                />
                <ValidationPanel validation=validation />
                <CoveragePanel summary=coverage />
                {move || cache.load_error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>{e}</MessageBar>
                })}
            </header>

            <main class="translation-editor__preview">
                {move || match cache.live_translations.get() {
                    Some(translations) => view! {
                        <LandingPreview translations=translations language=language.get() />
                    }.into_any(),
                    None => view! {
                        <Flex justify=FlexJustify::Center>
                            <Spinner />
                        </Flex>
                    }.into_any(),
                }}
            </main>

            <ToastStack />
        </div>
    }
}
