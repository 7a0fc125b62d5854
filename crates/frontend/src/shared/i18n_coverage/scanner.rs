//! Translation coverage scanner.
//!
//! Walks the visible text of a subtree and sorts every meaningful text node
//! into "translated" (an element carrying `data-i18n-key` sits within
//! [`TRANSLATION_LOOKUP_DEPTH`] levels above it) or "missing".

use super::editor::{EDITOR_UI_CLASS, I18N_KEY_ATTR};
use super::tree::{element_ancestors, parent_element, xpath, NodeKind, RenderTree};

/// Subtrees under these tags never count.
pub const EXCLUDED_TAGS: &[&str] = &["SCRIPT", "STYLE", "SVG", "NOSCRIPT", "TEMPLATE"];
pub const EXCLUDED_CLASSES: &[&str] = &["icon", "emoji", "material-icons", "lucide", EDITOR_UI_CLASS];
pub const TEST_ID_ATTR: &str = "data-testid";
pub const TRANSLATION_LOOKUP_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct MissingTranslationKey<N> {
    /// Element directly containing the text.
    pub element: N,
    pub text: String,
    pub xpath: String,
    pub parent_tag: String,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult<N> {
    pub total_text_nodes: usize,
    pub translated_nodes: usize,
    pub missing_keys: Vec<MissingTranslationKey<N>>,
    pub coverage_percentage: u32,
}

impl<N> ScanResult<N> {
    pub fn untranslated_nodes(&self) -> usize {
        self.total_text_nodes - self.translated_nodes
    }

    pub fn is_fully_covered(&self) -> bool {
        self.missing_keys.is_empty()
    }
}

/// Rounded percentage; an empty page is fully covered.
pub fn coverage_percentage(translated: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((translated as f64 / total as f64) * 100.0).round() as u32
}

/// Latin (with Latin-1 and Extended-A/B), Cyrillic and Armenian letters.
pub fn is_supported_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c,
            '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{024F}'
            | '\u{0400}'..='\u{04FF}'
            | '\u{0531}'..='\u{0556}'
            | '\u{0561}'..='\u{0587}')
}

/// At least two characters after trimming, at least one of them a letter.
pub fn is_meaningful_text(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() >= 2 && trimmed.chars().any(is_supported_letter)
}

pub fn is_excluded_element<T: RenderTree>(tree: &T, element: &T::Node) -> bool {
    let tag = tree.tag_name(element).to_ascii_uppercase();
    if EXCLUDED_TAGS.contains(&tag.as_str()) {
        return true;
    }
    if tree.attribute(element, "aria-hidden").as_deref() == Some("true")
        || tree.attribute(element, TEST_ID_ATTR).is_some()
    {
        return true;
    }
    let classes = tree.class_names(element);
    if EXCLUDED_CLASSES
        .iter()
        .any(|excluded| classes.iter().any(|c| c == excluded))
    {
        return true;
    }
    tree.is_hidden(element)
}

/// `data-i18n-key` on one of the nearest element ancestors of a text node.
pub fn has_translation_key<T: RenderTree>(tree: &T, text_node: &T::Node) -> bool {
    element_ancestors(tree, text_node)
        .iter()
        .take(TRANSLATION_LOOKUP_DEPTH)
        .any(|element| tree.attribute(element, I18N_KEY_ATTR).is_some())
}

/// Scan `root` and everything below it.
///
/// Excluded elements prune their whole subtree, so a text node counts only if
/// no element between it and `root` (both ends included) is excluded.
pub fn scan<T: RenderTree>(tree: &T, root: &T::Node) -> ScanResult<T::Node> {
    let mut total_text_nodes = 0;
    let mut translated_nodes = 0;
    let mut missing_keys = Vec::new();

    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        match tree.kind(&node) {
            NodeKind::Element => {
                if is_excluded_element(tree, &node) {
                    continue;
                }
                stack.extend(tree.children(&node).into_iter().rev());
            }
            NodeKind::Text => {
                let raw = tree.text_content(&node);
                if !is_meaningful_text(&raw) {
                    continue;
                }
                total_text_nodes += 1;
                if has_translation_key(tree, &node) {
                    translated_nodes += 1;
                    continue;
                }
                let Some(element) = parent_element(tree, &node) else {
                    continue;
                };
                missing_keys.push(MissingTranslationKey {
                    text: raw.trim().to_string(),
                    xpath: xpath(tree, &element),
                    parent_tag: tree.tag_name(&element).to_lowercase(),
                    class_name: tree.class_names(&element).join(" "),
                    element,
                });
            }
            NodeKind::Other => {}
        }
    }

    ScanResult {
        coverage_percentage: coverage_percentage(translated_nodes, total_text_nodes),
        total_text_nodes,
        translated_nodes,
        missing_keys,
    }
}
