//! Translation coverage tooling: scanner, missing-key highlighter and the
//! in-place editor for `data-i18n-key` tagged elements.

pub mod dom_tree;
pub mod editor;
pub mod highlight;
#[cfg(test)]
pub mod memory_tree;
pub mod overlay;
pub mod scanner;
pub mod tree;

pub use dom_tree::DomTree;
pub use editor::{EditSink, InlineEditor, TranslationEdit, I18N_KEY_ATTR};
pub use highlight::{clear_highlights, highlight_missing};
pub use overlay::InlineEditorOverlay;
pub use scanner::{scan, MissingTranslationKey, ScanResult};
pub use tree::RenderTree;
