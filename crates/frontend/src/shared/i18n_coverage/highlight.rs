use super::scanner::{scan, ScanResult};
use super::tree::{descendants, is_element, RenderTree};

pub const MISSING_HIGHLIGHT_CLASS: &str = "i18n-missing-highlight";
pub const STYLE_BLOCK_ID: &str = "i18n-coverage-styles";
/// Author title saved while the tooltip is shown.
pub const PREVIOUS_TITLE_ATTR: &str = "data-i18n-prev-title";

const HIGHLIGHT_CSS: &str = r#"
.i18n-missing-highlight {
  outline: 2px dashed #d64545 !important;
  outline-offset: 2px;
  background-color: rgba(214, 69, 69, 0.12) !important;
  cursor: help;
}
.i18n-editor-ui.i18n-editor-input {
  font: inherit;
  padding: 2px 6px;
  border: 1px solid #c0843d;
  border-radius: 4px;
  min-width: 12em;
}
textarea.i18n-editor-ui.i18n-editor-input {
  width: 100%;
  min-height: 4em;
}
.i18n-editor-ui.i18n-editor-button {
  margin-left: 4px;
  padding: 2px 8px;
  font-size: 12px;
  border-radius: 4px;
  border: 1px solid #c0843d;
  background: #fff;
  cursor: pointer;
}
.i18n-editor-ui.i18n-editor-badge {
  margin-left: 6px;
  font-size: 11px;
  font-family: monospace;
  color: #7a5a2b;
}
"#;

pub fn missing_tooltip(text: &str) -> String {
    format!("Missing translation: \"{}\"", text)
}

/// Installs the highlight stylesheet once per document.
pub fn ensure_styles<T: RenderTree>(tree: &T) {
    if tree.element_by_id(STYLE_BLOCK_ID).is_none() {
        tree.install_style_block(STYLE_BLOCK_ID, HIGHLIGHT_CSS);
    }
}

/// Marks the element of every missing entry. Returns the number of entries.
pub fn highlight_missing<T: RenderTree>(tree: &T, result: &ScanResult<T::Node>) -> usize {
    ensure_styles(tree);
    for missing in &result.missing_keys {
        let element = &missing.element;
        if !tree.has_class(element, MISSING_HIGHLIGHT_CLASS) {
            if let Some(title) = tree.attribute(element, "title") {
                tree.set_attribute(element, PREVIOUS_TITLE_ATTR, &title);
            }
            tree.add_class(element, MISSING_HIGHLIGHT_CLASS);
        }
        tree.set_attribute(element, "title", &missing_tooltip(&missing.text));
    }
    result.missing_keys.len()
}

/// Removes every highlight in the document and restores saved titles.
/// Returns how many elements were cleared; a second call clears nothing.
pub fn clear_highlights<T: RenderTree>(tree: &T) -> usize {
    let Some(root) = tree.root() else {
        return 0;
    };

    let mut cleared = 0;
    for element in std::iter::once(root.clone()).chain(descendants(tree, &root)) {
        if !is_element(tree, &element) || !tree.has_class(&element, MISSING_HIGHLIGHT_CLASS) {
            continue;
        }
        tree.remove_class(&element, MISSING_HIGHLIGHT_CLASS);
        match tree.attribute(&element, PREVIOUS_TITLE_ATTR) {
            Some(previous) => {
                tree.set_attribute(&element, "title", &previous);
                tree.remove_attribute(&element, PREVIOUS_TITLE_ATTR);
            }
            None => tree.remove_attribute(&element, "title"),
        }
        cleared += 1;
    }
    cleared
}

/// Scans `root` and replaces any existing marks. With `highlight` unset the
/// page is only cleared. Call it again after `root` has been re-rendered.
pub fn rescan<T: RenderTree>(tree: &T, root: &T::Node, highlight: bool) -> ScanResult<T::Node> {
    let result = scan(tree, root);
    clear_highlights(tree);
    if highlight {
        highlight_missing(tree, &result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::i18n_coverage::memory_tree::MemoryTree;

    fn page() -> MemoryTree {
        let tree = MemoryTree::new();
        let body = tree.body();
        let a = tree.element(body, "p", &[("title", "Author note")]);
        tree.text(a, "Untagged lead");
        let b = tree.element(body, "h3", &[]);
        tree.text(b, "Untagged heading");
        let c = tree.element(body, "p", &[("data-i18n-key", "hero.subtitle")]);
        tree.text(c, "Tagged");
        tree
    }

    #[test]
    fn test_highlight_marks_missing_elements() {
        let tree = page();
        let result = scan(&tree, &tree.body());
        assert_eq!(highlight_missing(&tree, &result), 2);

        let first = &result.missing_keys[0].element;
        assert!(tree.has_class(first, MISSING_HIGHLIGHT_CLASS));
        assert_eq!(
            tree.attribute(first, "title").as_deref(),
            Some("Missing translation: \"Untagged lead\"")
        );
        assert!(tree.element_by_id(STYLE_BLOCK_ID).is_some());

        // styles are installed once
        highlight_missing(&tree, &result);
        assert_eq!(tree.children(&tree.head()).len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent_and_restores_titles() {
        let tree = page();
        let before = tree.inner_html(tree.body());

        let result = scan(&tree, &tree.body());
        highlight_missing(&tree, &result);
        highlight_missing(&tree, &result);

        assert_eq!(clear_highlights(&tree), 2);
        assert_eq!(tree.inner_html(tree.body()), before);
        assert_eq!(clear_highlights(&tree), 0);

        let first = &result.missing_keys[0].element;
        assert_eq!(tree.attribute(first, "title").as_deref(), Some("Author note"));
        assert!(tree.attribute(first, PREVIOUS_TITLE_ATTR).is_none());
        assert!(tree.attribute(&result.missing_keys[1].element, "title").is_none());
    }

    #[test]
    fn test_rescan_marks_freshly_rendered_content() {
        let tree = page();
        let preview = tree.element(tree.body(), "section", &[("id", "landing-preview")]);
        let old = tree.element(preview, "h2", &[]);
        tree.text(old, "Old heading");
        assert_eq!(rescan(&tree, &preview, true).missing_keys.len(), 1);
        assert!(tree.has_class(&old, MISSING_HIGHLIGHT_CLASS));

        // re-render: the old element is gone, new untagged content appears
        tree.set_text_content(&preview, "");
        let fresh = tree.element(preview, "p", &[]);
        tree.text(fresh, "Fresh paragraph");
        let tagged = tree.element(preview, "span", &[("data-i18n-key", "nav.home")]);
        tree.text(tagged, "Home");

        let result = rescan(&tree, &preview, true);
        assert_eq!(result.total_text_nodes, 2);
        assert_eq!(result.missing_keys.len(), 1);
        assert!(tree.has_class(&fresh, MISSING_HIGHLIGHT_CLASS));
        assert!(!tree.has_class(&tagged, MISSING_HIGHLIGHT_CLASS));

        // highlighting off only clears
        rescan(&tree, &preview, false);
        assert!(!tree.has_class(&fresh, MISSING_HIGHLIGHT_CLASS));
        assert!(tree.attribute(&fresh, "title").is_none());
    }
}
