//! Abstract render tree.
//!
//! Scanner, highlighter and inline editor only talk to the page through
//! [`RenderTree`], so the same code runs against the browser DOM
//! ([`super::dom_tree::DomTree`]) and against the arena used in tests
//! ([`super::memory_tree::MemoryTree`]).

use std::fmt::Debug;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Other,
}

/// Capabilities the coverage tooling needs from a rendered page.
///
/// Every method takes `&self`: implementations are handles onto shared state
/// (the browser document, or a `RefCell` arena). Element-only operations are
/// no-ops when called on text nodes.
pub trait RenderTree {
    type Node: Clone + PartialEq + Debug;
    /// Opaque copy of an element's content, enough to restore it verbatim.
    type Snapshot: Clone + Debug;

    /// Document body.
    fn root(&self) -> Option<Self::Node>;
    fn kind(&self, node: &Self::Node) -> NodeKind;
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Upper-cased tag name, empty for non-elements.
    fn tag_name(&self, node: &Self::Node) -> String;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    fn class_names(&self, node: &Self::Node) -> Vec<String>;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        self.class_names(node).iter().any(|c| c == class)
    }

    fn text_content(&self, node: &Self::Node) -> String;
    /// Replaces all children of `node` with a single text node.
    fn set_text_content(&self, node: &Self::Node, text: &str);

    /// `display: none`, `visibility: hidden` or `opacity: 0` on the element itself.
    fn is_hidden(&self, node: &Self::Node) -> bool;
    fn rendered_height(&self, node: &Self::Node) -> f64;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn remove_style(&self, node: &Self::Node, property: &str);

    fn snapshot_content(&self, node: &Self::Node) -> Self::Snapshot;
    fn restore_content(&self, node: &Self::Node, snapshot: &Self::Snapshot);

    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    /// Current value of an `input` or `textarea`.
    fn value(&self, control: &Self::Node) -> String;
    fn set_value(&self, control: &Self::Node, value: &str);
    fn focus_and_select(&self, control: &Self::Node);

    /// Detaches the element's own click handler for `millis`, then puts it back.
    fn suspend_click_handler(&self, node: &Self::Node, millis: u32);

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// Appends a `<style id=..>` block to the document head.
    fn install_style_block(&self, id: &str, css: &str);
}

impl<T: RenderTree + ?Sized> RenderTree for Rc<T> {
    type Node = T::Node;
    type Snapshot = T::Snapshot;

    fn root(&self) -> Option<Self::Node> {
        (**self).root()
    }
    fn kind(&self, node: &Self::Node) -> NodeKind {
        (**self).kind(node)
    }
    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        (**self).parent(node)
    }
    fn children(&self, node: &Self::Node) -> Vec<Self::Node> {
        (**self).children(node)
    }
    fn tag_name(&self, node: &Self::Node) -> String {
        (**self).tag_name(node)
    }
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String> {
        (**self).attribute(node, name)
    }
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) {
        (**self).set_attribute(node, name, value)
    }
    fn remove_attribute(&self, node: &Self::Node, name: &str) {
        (**self).remove_attribute(node, name)
    }
    fn class_names(&self, node: &Self::Node) -> Vec<String> {
        (**self).class_names(node)
    }
    fn add_class(&self, node: &Self::Node, class: &str) {
        (**self).add_class(node, class)
    }
    fn remove_class(&self, node: &Self::Node, class: &str) {
        (**self).remove_class(node, class)
    }
    fn has_class(&self, node: &Self::Node, class: &str) -> bool {
        (**self).has_class(node, class)
    }
    fn text_content(&self, node: &Self::Node) -> String {
        (**self).text_content(node)
    }
    fn set_text_content(&self, node: &Self::Node, text: &str) {
        (**self).set_text_content(node, text)
    }
    fn is_hidden(&self, node: &Self::Node) -> bool {
        (**self).is_hidden(node)
    }
    fn rendered_height(&self, node: &Self::Node) -> f64 {
        (**self).rendered_height(node)
    }
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) {
        (**self).set_style(node, property, value)
    }
    fn remove_style(&self, node: &Self::Node, property: &str) {
        (**self).remove_style(node, property)
    }
    fn snapshot_content(&self, node: &Self::Node) -> Self::Snapshot {
        (**self).snapshot_content(node)
    }
    fn restore_content(&self, node: &Self::Node, snapshot: &Self::Snapshot) {
        (**self).restore_content(node, snapshot)
    }
    fn create_element(&self, tag: &str) -> Option<Self::Node> {
        (**self).create_element(tag)
    }
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) {
        (**self).append_child(parent, child)
    }
    fn value(&self, control: &Self::Node) -> String {
        (**self).value(control)
    }
    fn set_value(&self, control: &Self::Node, value: &str) {
        (**self).set_value(control, value)
    }
    fn focus_and_select(&self, control: &Self::Node) {
        (**self).focus_and_select(control)
    }
    fn suspend_click_handler(&self, node: &Self::Node, millis: u32) {
        (**self).suspend_click_handler(node, millis)
    }
    fn element_by_id(&self, id: &str) -> Option<Self::Node> {
        (**self).element_by_id(id)
    }
    fn install_style_block(&self, id: &str, css: &str) {
        (**self).install_style_block(id, css)
    }
}

pub fn is_element<T: RenderTree>(tree: &T, node: &T::Node) -> bool {
    tree.kind(node) == NodeKind::Element
}

/// Nearest element strictly above `node`.
pub fn parent_element<T: RenderTree>(tree: &T, node: &T::Node) -> Option<T::Node> {
    let mut current = tree.parent(node);
    while let Some(candidate) = current {
        if is_element(tree, &candidate) {
            return Some(candidate);
        }
        current = tree.parent(&candidate);
    }
    None
}

/// Elements above `node`, nearest first.
pub fn element_ancestors<T: RenderTree>(tree: &T, node: &T::Node) -> Vec<T::Node> {
    let mut ancestors = Vec::new();
    let mut current = parent_element(tree, node);
    while let Some(element) = current {
        current = parent_element(tree, &element);
        ancestors.push(element);
    }
    ancestors
}

/// `true` when `node` is `ancestor` or lies somewhere beneath it.
pub fn contains<T: RenderTree>(tree: &T, ancestor: &T::Node, node: &T::Node) -> bool {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if &candidate == ancestor {
            return true;
        }
        current = tree.parent(&candidate);
    }
    false
}

/// All nodes below `root` in document order, `root` excluded.
pub fn descendants<T: RenderTree>(tree: &T, root: &T::Node) -> Vec<T::Node> {
    let mut out = Vec::new();
    let mut stack: Vec<T::Node> = tree.children(root).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        stack.extend(tree.children(&node).into_iter().rev());
        out.push(node);
    }
    out
}

/// Positional XPath of an element, e.g. `/html/body/div[2]/p[1]`.
///
/// Indexes are 1-based and count same-tag element siblings only. `html` and
/// `body` are unique and carry no index.
pub fn xpath<T: RenderTree>(tree: &T, element: &T::Node) -> String {
    let mut segments = Vec::new();
    let mut current = if is_element(tree, element) {
        Some(element.clone())
    } else {
        parent_element(tree, element)
    };

    while let Some(node) = current {
        let tag = tree.tag_name(&node).to_lowercase();
        let parent = tree.parent(&node);
        let segment = match (&parent, tag.as_str()) {
            (_, "html") | (_, "body") | (None, _) => tag.clone(),
            (Some(parent), _) => {
                let position = tree
                    .children(parent)
                    .iter()
                    .filter(|sibling| is_element(tree, sibling))
                    .filter(|sibling| tree.tag_name(sibling).eq_ignore_ascii_case(&tag))
                    .position(|sibling| sibling == &node)
                    .map(|index| index + 1)
                    .unwrap_or(1);
                format!("{}[{}]", tag, position)
            }
        };
        segments.push(segment);
        current = parent.filter(|p| is_element(tree, p));
    }

    segments.reverse();
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::i18n_coverage::memory_tree::MemoryTree;

    #[test]
    fn test_xpath_counts_same_tag_siblings() {
        let tree = MemoryTree::new();
        let body = tree.body();
        let _first = tree.element(body, "div", &[]);
        let _para = tree.element(body, "p", &[]);
        let second = tree.element(body, "div", &[]);
        let _lead = tree.element(second, "span", &[]);
        let para = tree.element(second, "p", &[]);

        assert_eq!(xpath(&tree, &second), "/html/body/div[2]");
        assert_eq!(xpath(&tree, &para), "/html/body/div[2]/p[1]");
    }

    #[test]
    fn test_xpath_of_text_node_uses_parent_element() {
        let tree = MemoryTree::new();
        let span = tree.element(tree.body(), "span", &[]);
        let text = tree.text(span, "Hello");
        assert_eq!(xpath(&tree, &text), "/html/body/span[1]");
    }

    #[test]
    fn test_ancestors_and_contains() {
        let tree = MemoryTree::new();
        let body = tree.body();
        let section = tree.element(body, "section", &[]);
        let heading = tree.element(section, "h2", &[]);
        let text = tree.text(heading, "Pricing");

        assert_eq!(parent_element(&tree, &text), Some(heading));
        assert_eq!(element_ancestors(&tree, &text)[..2], [heading, section]);
        assert!(contains(&tree, &section, &text));
        assert!(contains(&tree, &heading, &heading));
        assert!(!contains(&tree, &heading, &section));
        assert_eq!(descendants(&tree, &section), vec![heading, text]);
    }
}
