use contracts::domain::a001_translations::TranslationValidation;
use contracts::enums::language::Language;
use leptos::prelude::*;
use thaw::*;

/// One line per language that has gaps, e.g. `hy: 2 missing, 1 empty`.
pub fn language_gaps(validation: &TranslationValidation) -> Vec<(Language, usize, usize)> {
    Language::all()
        .into_iter()
        .map(|language| {
            let missing = validation.missing.get(&language).map_or(0, Vec::len);
            let empty = validation.empty.get(&language).map_or(0, Vec::len);
            (language, missing, empty)
        })
        .filter(|(_, missing, empty)| missing + empty > 0)
        .collect()
}

#[component]
pub fn ValidationPanel(validation: RwSignal<Option<TranslationValidation>>) -> impl IntoView {
    view! {
        <div class="validation-panel">
            {move || match validation.get() {
                None => view! { <Spinner size=SpinnerSize::Small /> }.into_any(),
                Some(report) if report.is_complete => view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                        {format!("All {} keys translated", report.total_keys)}
                    </Badge>
                }.into_any(),
                Some(report) => {
                    let lines = language_gaps(&report)
                        .into_iter()
                        .map(|(language, missing, empty)| {
                            view! {
                                <li>{format!("{}: {} missing, {} empty", language.display_name(), missing, empty)}</li>
                            }
                        })
                        .collect_view();
                    view! {
                        <MessageBar intent=MessageBarIntent::Warning>
                            <div>
                                <div>{format!("{} keys total", report.total_keys)}</div>
                                <ul class="validation-panel__list">{lines}</ul>
                            </div>
                        </MessageBar>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_language_gaps_skips_complete_languages() {
        let report = TranslationValidation {
            is_complete: false,
            total_keys: 3,
            missing: BTreeMap::from([
                (Language::En, vec![]),
                (Language::Hy, vec!["hero.cta".to_string(), "footer.rights".to_string()]),
                (Language::Ru, vec![]),
            ]),
            empty: BTreeMap::from([(Language::Ru, vec!["hero.cta".to_string()])]),
        };

        assert_eq!(
            language_gaps(&report),
            vec![(Language::Hy, 2, 0), (Language::Ru, 0, 1)]
        );
    }
}
