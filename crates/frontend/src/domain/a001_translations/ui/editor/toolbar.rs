use crate::domain::a001_translations::api;
use crate::domain::a001_translations::cache::TranslationCache;
use crate::shared::icons::icon;
use contracts::enums::language::Language;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn LanguageSwitcher(language: RwSignal<Language>) -> impl IntoView {
    let cache = TranslationCache::expect();
    let key_count = RwSignal::new(None::<usize>);

    // Size of the selected language as stored on the server, reloaded with
    // every cache refresh so saved keys show up
    Effect::new(move |_| {
        cache.live_translations.track();
        let current = language.get();
        spawn_local(async move {
            match api::fetch_language(current).await {
                Ok(tree) => {
                    if language.get_untracked() == current {
                        let _ = key_count.try_set(Some(tree.len()));
                    }
                }
                Err(e) => log::warn!("Key count for {} unavailable: {}", current, e),
            }
        });
    });

    let buttons = Language::all()
        .into_iter()
        .map(|option| {
            view! {
                <Button
                    appearance=Signal::derive(move || {
                        if language.get() == option {
                            ButtonAppearance::Primary
                        } else {
                            ButtonAppearance::Secondary
                        }
                    })
                    on_click=move |_| language.set(option)
                >
                    {option.display_name()}
                </Button>
            }
        })
        .collect_view();

    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::Center>
            {icon("globe")}
            {buttons}
            {move || key_count.get().map(|count| view! {
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                    {format!("{} keys", count)}
                </Badge>
            })}
        </Flex>
    }
}

#[component]
pub fn EditorToolbar(
    language: RwSignal<Language>,
    edit_mode: RwSignal<bool>,
    highlight: RwSignal<bool>,
    #[prop(into)] on_scan: Callback<()>,
    #[prop(into)] on_reset: Callback<()>,
    #[prop(into)] resetting: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="editor-toolbar">
            <Flex gap=FlexGap::Large align=FlexAlign::Center>
                <LanguageSwitcher language=language />
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    {icon("edit")}
                    <Switch checked=edit_mode label="Edit in place" />
                </Flex>
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    {icon("highlight")}
                    <Switch checked=highlight label="Highlight missing" />
                </Flex>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_scan.run(())>
                    {icon("scan")}
                    " Scan coverage"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_reset.run(())
                    disabled=resetting
                >
                    {icon("refresh")}
                    {move || if resetting.get() { " Resetting..." } else { " Reset to defaults" }}
                </Button>
            </Flex>
        </div>
    }
}
