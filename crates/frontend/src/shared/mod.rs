pub mod api_utils;
pub mod i18n_coverage;
pub mod icons;
pub mod toast;
