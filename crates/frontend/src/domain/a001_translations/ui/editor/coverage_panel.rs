use crate::shared::i18n_coverage::ScanResult;
use leptos::prelude::*;
use thaw::*;

/// Scan outcome without DOM handles, so it can live in a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSummary {
    pub total: usize,
    pub translated: usize,
    pub coverage: u32,
    pub missing: Vec<MissingRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissingRow {
    pub text: String,
    pub xpath: String,
    pub parent_tag: String,
}

impl<N> From<&ScanResult<N>> for CoverageSummary {
    fn from(result: &ScanResult<N>) -> Self {
        Self {
            total: result.total_text_nodes,
            translated: result.translated_nodes,
            coverage: result.coverage_percentage,
            missing: result
                .missing_keys
                .iter()
                .map(|missing| MissingRow {
                    text: missing.text.clone(),
                    xpath: missing.xpath.clone(),
                    parent_tag: missing.parent_tag.clone(),
                })
                .collect(),
        }
    }
}

pub fn coverage_color(coverage: u32) -> BadgeColor {
    match coverage {
        100 => BadgeColor::Success,
        80..=99 => BadgeColor::Warning,
        _ => BadgeColor::Danger,
    }
}

#[component]
pub fn CoveragePanel(summary: RwSignal<Option<CoverageSummary>>) -> impl IntoView {
    view! {
        <div class="coverage-panel">
            {move || match summary.get() {
                None => view! {
                    <span class="coverage-panel__hint">"Run a scan to measure coverage of the preview."</span>
                }.into_any(),
                Some(summary) => {
                    let color = coverage_color(summary.coverage);
                    let rows = summary
                        .missing
                        .iter()
                        .map(|row| {
                            let text = row.text.clone();
                            let xpath = row.xpath.clone();
                            let tag = row.parent_tag.clone();
                            view! {
                                <li class="coverage-panel__item">
                                    <span class="coverage-panel__text">{text}</span>
                                    <code class="coverage-panel__xpath">{xpath}</code>
                                    <span class="coverage-panel__tag">{tag}</span>
                                </li>
                            }
                        })
                        .collect_view();
                    view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <Badge appearance=BadgeAppearance::Tint color=color>
                                {format!("{}% covered", summary.coverage)}
                            </Badge>
                            <span>
                                {format!(
                                    "{} of {} text nodes translated, {} missing",
                                    summary.translated,
                                    summary.total,
                                    summary.missing.len()
                                )}
                            </span>
                        </Flex>
                        <ul class="coverage-panel__list">{rows}</ul>
                    }.into_any()
                }
            }}
        </div>
    }
}
