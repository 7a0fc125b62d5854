pub mod aggregate;
pub mod dto;

pub use aggregate::{is_valid_key, LanguageTree, TranslationsResponse};
pub use dto::{
    ApiErrorBody, ResetResponse, TranslationValidation, UpdateTranslationRequest,
    UpdateTranslationResponse,
};
