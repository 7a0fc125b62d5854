//! Inline translation editor.
//!
//! A small state machine: `Disabled`, `Idle` (hover outlines tagged elements),
//! `Editing` (one tagged element has been swapped for an input with Save and
//! Cancel controls). Events are fed in by the overlay; the editor only touches
//! the page through [`RenderTree`] and hands finished edits to an [`EditSink`].

use super::tree::{contains, is_element, parent_element, RenderTree};
use contracts::domain::a001_translations::UpdateTranslationRequest;
use contracts::enums::language::Language;

pub const I18N_KEY_ATTR: &str = "data-i18n-key";
/// Marks editor chrome. The scanner skips anything carrying it.
pub const EDITOR_UI_CLASS: &str = "i18n-editor-ui";
pub const EDITOR_ACTION_ATTR: &str = "data-i18n-editor-action";
/// How long a button or link stays inert after an edit starts on it.
pub const ACTIVATION_SUPPRESS_MS: u32 = 100;
const MULTILINE_HEIGHT_PX: f64 = 50.0;
const MULTILINE_TEXT_LEN: usize = 100;

const HOVER_STYLES: &[(&str, &str)] = &[
    ("outline", "2px dashed #c0843d"),
    ("outline-offset", "2px"),
    ("background-color", "rgba(192, 132, 61, 0.08)"),
    ("cursor", "text"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEdit {
    pub language: Language,
    pub key: String,
    pub value: String,
}

impl From<TranslationEdit> for UpdateTranslationRequest {
    fn from(edit: TranslationEdit) -> Self {
        UpdateTranslationRequest {
            language: edit.language,
            key: edit.key,
            value: edit.value,
        }
    }
}

/// Receives committed edits. Submission is fire-and-forget.
pub trait EditSink {
    fn submit(&self, edit: TranslationEdit);
}

/// What the caller should do with the click that was just handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Stop propagation and the default action.
    Claimed,
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorAction {
    Save,
    Cancel,
}

impl EditorAction {
    fn from_attr(value: &str) -> Option<Self> {
        match value {
            "save" => Some(Self::Save),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditingState<N, S> {
    pub element: N,
    pub key: String,
    pub original_value: String,
    pub original_content: S,
    pub input: N,
    pub multiline: bool,
}

/// Block-level tags, tall elements and long texts get a textarea.
pub fn is_multiline(tag: &str, rendered_height: f64, text_len: usize) -> bool {
    matches!(
        tag.to_ascii_uppercase().as_str(),
        "P" | "DIV" | "TEXTAREA" | "BLOCKQUOTE" | "LI"
    ) || rendered_height > MULTILINE_HEIGHT_PX
        || text_len > MULTILINE_TEXT_LEN
}

/// Nearest element at or above `node` carrying `data-i18n-key`, below `<body>`.
pub fn find_translatable<T: RenderTree>(tree: &T, node: &T::Node) -> Option<T::Node> {
    let mut current = if is_element(tree, node) {
        Some(node.clone())
    } else {
        parent_element(tree, node)
    };
    while let Some(element) = current {
        if tree.tag_name(&element) == "BODY" {
            return None;
        }
        if tree.attribute(&element, I18N_KEY_ATTR).is_some() {
            return Some(element);
        }
        current = parent_element(tree, &element);
    }
    None
}

pub struct InlineEditor<T: RenderTree, S: EditSink> {
    tree: T,
    sink: S,
    language: Language,
    enabled: bool,
    editing: Option<EditingState<T::Node, T::Snapshot>>,
    hovered: Option<T::Node>,
}

impl<T: RenderTree, S: EditSink> InlineEditor<T, S> {
    pub fn new(tree: T, sink: S, language: Language) -> Self {
        Self {
            tree,
            sink,
            language,
            enabled: true,
            editing: None,
            hovered: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_key(&self) -> Option<&str> {
        self.editing.as_ref().map(|state| state.key.as_str())
    }

    pub fn editing_input(&self) -> Option<T::Node> {
        self.editing.as_ref().map(|state| state.input.clone())
    }

    pub fn hovered(&self) -> Option<&T::Node> {
        self.hovered.as_ref()
    }

    /// Disabling drops any open edit and hover outline.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel();
            self.clear_hover();
        }
        self.enabled = enabled;
    }

    /// Switching language cancels an open edit; its value belongs to the old one.
    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            self.cancel();
        }
        self.language = language;
    }

    pub fn handle_mouse_over(&mut self, target: &T::Node) {
        if !self.enabled || self.editing.is_some() {
            return;
        }
        let Some(element) = find_translatable(&self.tree, target) else {
            return;
        };
        if self.hovered.as_ref() == Some(&element) {
            return;
        }
        self.clear_hover();
        for (property, value) in HOVER_STYLES {
            self.tree.set_style(&element, property, value);
        }
        self.hovered = Some(element);
    }

    pub fn handle_mouse_out(&mut self, target: &T::Node) {
        if !self.enabled || self.editing.is_some() {
            return;
        }
        if find_translatable(&self.tree, target).as_ref() == self.hovered.as_ref() {
            self.clear_hover();
        }
    }

    /// Click routing while enabled:
    /// - idle, on a tagged element: start editing it;
    /// - editing, on a Save/Cancel control: commit or revert;
    /// - editing, anywhere outside the edited element: revert and let the click through.
    pub fn handle_click(&mut self, target: &T::Node) -> ClickDisposition {
        if !self.enabled {
            return ClickDisposition::PassThrough;
        }

        if let Some(element) = self.editing.as_ref().map(|state| state.element.clone()) {
            if !contains(&self.tree, &element, target) {
                self.cancel();
                return ClickDisposition::PassThrough;
            }
            return match self.action_at(target, &element) {
                Some(EditorAction::Save) => {
                    self.save();
                    ClickDisposition::Claimed
                }
                Some(EditorAction::Cancel) => {
                    self.cancel();
                    ClickDisposition::Claimed
                }
                None => ClickDisposition::PassThrough,
            };
        }

        match find_translatable(&self.tree, target) {
            Some(element) => self.start_edit(element),
            None => ClickDisposition::PassThrough,
        }
    }

    /// Keyboard contract while editing. Returns `true` when the key was consumed.
    ///
    /// Escape cancels wherever focus is, including the Save and Cancel
    /// buttons. Enter only counts inside the edit input: it saves a
    /// single-line input, a textarea needs Ctrl+Enter (or Cmd+Enter) and plain
    /// Enter inserts a newline.
    pub fn handle_key(&mut self, target: &T::Node, key: &str, ctrl_or_meta: bool) -> bool {
        let Some((multiline, in_input)) = self
            .editing
            .as_ref()
            .map(|state| (state.multiline, &state.input == target))
        else {
            return false;
        };
        match key {
            "Escape" => self.cancel(),
            "Enter" if in_input && (!multiline || ctrl_or_meta) => self.save(),
            _ => false,
        }
    }

    /// Writes the trimmed input value into the element and submits it.
    pub fn save(&mut self) -> bool {
        let Some(state) = self.editing.take() else {
            return false;
        };
        let value = self.tree.value(&state.input).trim().to_string();
        self.tree.set_text_content(&state.element, &value);
        log::debug!("Inline edit saved: [{}] {}", self.language, state.key);
        self.sink.submit(TranslationEdit {
            language: self.language,
            key: state.key,
            value,
        });
        true
    }

    /// Puts the element's original content back, byte for byte.
    pub fn cancel(&mut self) -> bool {
        let Some(state) = self.editing.take() else {
            return false;
        };
        self.tree
            .restore_content(&state.element, &state.original_content);
        log::debug!("Inline edit cancelled: {}", state.key);
        true
    }

    fn clear_hover(&mut self) {
        if let Some(element) = self.hovered.take() {
            for (property, _) in HOVER_STYLES {
                self.tree.remove_style(&element, property);
            }
        }
    }

    fn action_at(&self, target: &T::Node, element: &T::Node) -> Option<EditorAction> {
        let mut current = if is_element(&self.tree, target) {
            Some(target.clone())
        } else {
            parent_element(&self.tree, target)
        };
        while let Some(node) = current {
            if &node == element {
                return None;
            }
            if let Some(action) = self.tree.attribute(&node, EDITOR_ACTION_ATTR) {
                return EditorAction::from_attr(&action);
            }
            current = parent_element(&self.tree, &node);
        }
        None
    }

    fn chrome(&self, tag: &str, modifier: &str) -> Option<T::Node> {
        let node = self.tree.create_element(tag)?;
        self.tree.add_class(&node, EDITOR_UI_CLASS);
        self.tree.add_class(&node, modifier);
        Some(node)
    }

    fn control_button(&self, action: &str, label: &str) -> Option<T::Node> {
        let button = self.chrome("button", "i18n-editor-button")?;
        self.tree.set_attribute(&button, "type", "button");
        self.tree.set_attribute(&button, EDITOR_ACTION_ATTR, action);
        self.tree.set_text_content(&button, label);
        Some(button)
    }

    fn start_edit(&mut self, element: T::Node) -> ClickDisposition {
        let Some(key) = self.tree.attribute(&element, I18N_KEY_ATTR) else {
            return ClickDisposition::PassThrough;
        };
        self.clear_hover();

        let tag = self.tree.tag_name(&element);
        let original_value = self.tree.text_content(&element).trim().to_string();
        let multiline = is_multiline(
            &tag,
            self.tree.rendered_height(&element),
            original_value.chars().count(),
        );

        let Some((input, controls)) = self.build_controls(&key, &original_value, multiline) else {
            log::warn!("Could not build inline editor for {}", key);
            return ClickDisposition::PassThrough;
        };

        if tag == "BUTTON" || tag == "A" {
            self.tree
                .suspend_click_handler(&element, ACTIVATION_SUPPRESS_MS);
        }

        let original_content = self.tree.snapshot_content(&element);
        self.tree.set_text_content(&element, "");
        self.tree.append_child(&element, &input);
        for control in &controls {
            self.tree.append_child(&element, control);
        }
        self.tree.focus_and_select(&input);

        log::debug!("Inline edit started: [{}] {}", self.language, key);
        self.editing = Some(EditingState {
            element,
            key,
            original_value,
            original_content,
            input,
            multiline,
        });
        ClickDisposition::Claimed
    }

    fn build_controls(
        &self,
        key: &str,
        value: &str,
        multiline: bool,
    ) -> Option<(T::Node, Vec<T::Node>)> {
        let input = if multiline {
            let area = self.chrome("textarea", "i18n-editor-input")?;
            self.tree.set_attribute(&area, "rows", "3");
            area
        } else {
            let field = self.chrome("input", "i18n-editor-input")?;
            self.tree.set_attribute(&field, "type", "text");
            field
        };
        self.tree.set_value(&input, value);

        let save = self.control_button("save", "Save")?;
        let cancel = self.control_button("cancel", "Cancel")?;
        let badge = self.chrome("span", "i18n-editor-badge")?;
        self.tree.set_text_content(&badge, key);

        Some((input, vec![save, cancel, badge]))
    }
}
