//! Marketing landing page rendered from the translation store.
//!
//! Every visible string is wrapped in an element carrying `data-i18n-key`,
//! which is what the coverage scanner and the inline editor look for.

use crate::domain::a001_translations::lookup::translate;
use contracts::domain::a001_translations::TranslationsResponse;
use contracts::enums::language::Language;
use leptos::prelude::*;

pub const PREVIEW_ROOT_ID: &str = "landing-preview";

const FEATURES: &[&str] = &["rsvp", "gallery", "timeline", "languages"];
const PLANS: &[(&str, &str)] = &[("basic", "$49"), ("premium", "$99"), ("ultimate", "$149")];
const TEMPLATE_SWATCHES: &[&str] = &["#f3e6d8", "#dfe8e1", "#e6e1f0"];

#[component]
pub fn LandingPreview(translations: TranslationsResponse, language: Language) -> impl IntoView {
    let t = move |key: &str| translate(&translations, language, key);

    let features = FEATURES
        .iter()
        .map(|feature| {
            let title_key = format!("features.{}.title", feature);
            let description_key = format!("features.{}.description", feature);
            view! {
                <div class="landing-feature">
                    <h3 data-i18n-key=title_key.clone()>{t(&title_key)}</h3>
                    <p data-i18n-key=description_key.clone()>{t(&description_key)}</p>
                </div>
            }
        })
        .collect_view();

    let plans = PLANS
        .iter()
        .map(|(plan, price)| {
            let name_key = format!("pricing.{}.name", plan);
            let description_key = format!("pricing.{}.description", plan);
            view! {
                <div class="landing-plan">
                    <h3 data-i18n-key=name_key.clone()>{t(&name_key)}</h3>
                    <div class="landing-plan__price">{*price}</div>
                    <p data-i18n-key=description_key.clone()>{t(&description_key)}</p>
                    <button class="landing-button" data-i18n-key="pricing.choose">
                        {t("pricing.choose")}
                    </button>
                </div>
            }
        })
        .collect_view();

    let swatches = TEMPLATE_SWATCHES
        .iter()
        .map(|color| {
            view! { <div class="landing-template" style=format!("background: {}", color)></div> }
        })
        .collect_view();

    view! {
        <div id=PREVIEW_ROOT_ID class="landing" lang=language.code()>
            <nav class="landing-nav">
                <a href="#templates" data-i18n-key="nav.templates">{t("nav.templates")}</a>
                <a href="#pricing" data-i18n-key="nav.pricing">{t("nav.pricing")}</a>
                <a href="#" data-i18n-key="nav.login">{t("nav.login")}</a>
                <button class="landing-button" data-i18n-key="nav.get_started">
                    {t("nav.get_started")}
                </button>
            </nav>

            <section class="landing-hero">
                <span class="landing-badge" data-i18n-key="hero.badge">{t("hero.badge")}</span>
                <h1 data-i18n-key="hero.title">{t("hero.title")}</h1>
                <p data-i18n-key="hero.subtitle">{t("hero.subtitle")}</p>
                <div class="landing-hero__actions">
                    <button class="landing-button landing-button--primary" data-i18n-key="hero.cta">
                        {t("hero.cta")}
                    </button>
                    <a href="#templates" data-i18n-key="hero.secondary_cta">
                        {t("hero.secondary_cta")}
                    </a>
                </div>
            </section>

            <section class="landing-section">
                <h2 data-i18n-key="features.title">{t("features.title")}</h2>
                <p data-i18n-key="features.subtitle">{t("features.subtitle")}</p>
                <div class="landing-grid">{features}</div>
            </section>

            <section id="templates" class="landing-section">
                <h2 data-i18n-key="templates.title">{t("templates.title")}</h2>
                <p data-i18n-key="templates.subtitle">{t("templates.subtitle")}</p>
                <div class="landing-grid">{swatches}</div>
                <a href="#" data-i18n-key="templates.browse">{t("templates.browse")}</a>
            </section>

            <section id="pricing" class="landing-section">
                <h2 data-i18n-key="pricing.title">{t("pricing.title")}</h2>
                <p data-i18n-key="pricing.subtitle">{t("pricing.subtitle")}</p>
                <div class="landing-grid">{plans}</div>
            </section>

            <footer class="landing-footer">
                <span data-i18n-key="footer.tagline">{t("footer.tagline")}</span>
                <a href="#" data-i18n-key="footer.contact">{t("footer.contact")}</a>
                <span data-i18n-key="footer.rights">{t("footer.rights")}</span>
            </footer>
        </div>
    }
}
