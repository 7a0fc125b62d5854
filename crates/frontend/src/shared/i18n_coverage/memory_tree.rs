//! In-memory render tree.
//!
//! An arena of element and text nodes with just enough layout to drive the
//! coverage tooling outside a browser: inline styles decide visibility,
//! heights are set explicitly, and `inner_html` serializes content the way a
//! browser would for plain markup.

use super::tree::{NodeKind, RenderTree};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        styles: BTreeMap<String, String>,
        value: String,
        height: f64,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Deep copy of a subtree, detached from the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSnapshot(Vec<SubtreeCopy>);

#[derive(Debug, Clone, PartialEq)]
struct SubtreeCopy {
    data: NodeData,
    children: Vec<SubtreeCopy>,
}

const VOID_TAGS: &[&str] = &["INPUT", "BR", "IMG", "HR"];

pub struct MemoryTree {
    slots: RefCell<Vec<Slot>>,
    html: NodeId,
    body: NodeId,
    head: NodeId,
    focused: Cell<Option<NodeId>>,
    suspended_clicks: RefCell<Vec<(NodeId, u32)>>,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    /// Empty document: `<html><head></head><body></body></html>`.
    pub fn new() -> Self {
        let mut tree = Self {
            slots: RefCell::new(Vec::new()),
            html: NodeId(0),
            body: NodeId(0),
            head: NodeId(0),
            focused: Cell::new(None),
            suspended_clicks: RefCell::new(Vec::new()),
        };
        tree.html = tree.alloc(Self::element_data("html", &[]), None);
        tree.head = tree.alloc(Self::element_data("head", &[]), Some(tree.html));
        tree.body = tree.alloc(Self::element_data("body", &[]), Some(tree.html));
        tree
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    /// Appends `<tag attr=..>` under `parent`.
    pub fn element(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        self.alloc(Self::element_data(tag, attributes), Some(parent))
    }

    /// Appends a text node under `parent`.
    pub fn text(&self, parent: NodeId, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_string()), Some(parent))
    }

    pub fn set_height(&self, node: NodeId, value: f64) {
        if let NodeData::Element { height, .. } = &mut self.slots.borrow_mut()[node.0].data {
            *height = value;
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        match &self.slots.borrow()[node.0].data {
            NodeData::Element { styles, .. } => styles.get(property).cloned(),
            NodeData::Text(_) => None,
        }
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    /// Elements whose click handler was suspended, with the duration.
    pub fn suspended_clicks(&self) -> Vec<(NodeId, u32)> {
        self.suspended_clicks.borrow().clone()
    }

    /// Serialized children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let slots = self.slots.borrow();
        let mut out = String::new();
        for child in &slots[node.0].children {
            Self::write_html(&slots, *child, &mut out);
        }
        out
    }

    fn element_data(tag: &str, attributes: &[(&str, &str)]) -> NodeData {
        NodeData::Element {
            tag: tag.to_ascii_uppercase(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            styles: BTreeMap::new(),
            value: String::new(),
            height: 0.0,
        }
    }

    fn alloc(&self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let mut slots = self.slots.borrow_mut();
        let id = NodeId(slots.len());
        slots.push(Slot {
            data,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            slots[parent.0].children.push(id);
        }
        id
    }

    fn detach_children(slots: &mut [Slot], node: NodeId) {
        let children = std::mem::take(&mut slots[node.0].children);
        for child in children {
            slots[child.0].parent = None;
        }
    }

    fn copy_subtree(slots: &[Slot], node: NodeId) -> SubtreeCopy {
        SubtreeCopy {
            data: slots[node.0].data.clone(),
            children: slots[node.0]
                .children
                .iter()
                .map(|child| Self::copy_subtree(slots, *child))
                .collect(),
        }
    }

    fn rebuild(&self, parent: NodeId, copy: &SubtreeCopy) {
        let id = self.alloc(copy.data.clone(), Some(parent));
        for child in &copy.children {
            self.rebuild(id, child);
        }
    }

    fn collect_text(slots: &[Slot], node: NodeId, out: &mut String) {
        match &slots[node.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Element { .. } => {
                for child in &slots[node.0].children {
                    Self::collect_text(slots, *child, out);
                }
            }
        }
    }

    fn write_html(slots: &[Slot], node: NodeId, out: &mut String) {
        match &slots[node.0].data {
            NodeData::Text(text) => out.push_str(&escape(text, false)),
            NodeData::Element {
                tag,
                attributes,
                styles,
                ..
            } => {
                let name = tag.to_lowercase();
                out.push('<');
                out.push_str(&name);
                for (attr, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", attr, escape(value, true)));
                }
                if !styles.is_empty() {
                    let inline: Vec<String> =
                        styles.iter().map(|(p, v)| format!("{}: {};", p, v)).collect();
                    out.push_str(&format!(" style=\"{}\"", escape(&inline.join(" "), true)));
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) {
                    return;
                }
                for child in &slots[node.0].children {
                    Self::write_html(slots, *child, out);
                }
                out.push_str(&format!("</{}>", name));
            }
        }
    }

    fn with_element<R>(
        &self,
        node: &NodeId,
        f: impl FnOnce(&mut Vec<(String, String)>, &mut BTreeMap<String, String>) -> R,
    ) -> Option<R> {
        match &mut self.slots.borrow_mut()[node.0].data {
            NodeData::Element {
                attributes, styles, ..
            } => Some(f(attributes, styles)),
            NodeData::Text(_) => None,
        }
    }
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl RenderTree for MemoryTree {
    type Node = NodeId;
    type Snapshot = ContentSnapshot;

    fn root(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn kind(&self, node: &NodeId) -> NodeKind {
        match self.slots.borrow()[node.0].data {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.slots.borrow()[node.0].parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.slots.borrow()[node.0].children.clone()
    }

    fn tag_name(&self, node: &NodeId) -> String {
        match &self.slots.borrow()[node.0].data {
            NodeData::Element { tag, .. } => tag.clone(),
            NodeData::Text(_) => String::new(),
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        match &self.slots.borrow()[node.0].data {
            NodeData::Element { attributes, .. } => attributes
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value.clone()),
            NodeData::Text(_) => None,
        }
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.with_element(node, |attributes, _| {
            match attributes.iter_mut().find(|(attr, _)| attr == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        });
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.with_element(node, |attributes, _| attributes.retain(|(attr, _)| attr != name));
    }

    fn class_names(&self, node: &NodeId) -> Vec<String> {
        self.attribute(node, "class")
            .map(|classes| classes.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut classes = self.class_names(node);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.set_attribute(node, "class", &classes.join(" "));
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let classes = self.class_names(node);
        if classes.iter().any(|c| c == class) {
            let kept: Vec<String> = classes.into_iter().filter(|c| c != class).collect();
            if kept.is_empty() {
                self.remove_attribute(node, "class");
            } else {
                self.set_attribute(node, "class", &kept.join(" "));
            }
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        let slots = self.slots.borrow();
        let mut out = String::new();
        Self::collect_text(&slots, *node, &mut out);
        out
    }

    fn set_text_content(&self, node: &NodeId, text: &str) {
        Self::detach_children(&mut self.slots.borrow_mut(), *node);
        if !text.is_empty() {
            self.text(*node, text);
        }
    }

    fn is_hidden(&self, node: &NodeId) -> bool {
        let style = |property: &str| self.style(*node, property).unwrap_or_default();
        style("display") == "none"
            || style("visibility") == "hidden"
            || style("opacity").trim().parse::<f64>().map(|o| o == 0.0).unwrap_or(false)
    }

    fn rendered_height(&self, node: &NodeId) -> f64 {
        match self.slots.borrow()[node.0].data {
            NodeData::Element { height, .. } => height,
            NodeData::Text(_) => 0.0,
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_element(node, |_, styles| {
            styles.insert(property.to_string(), value.to_string());
        });
    }

    fn remove_style(&self, node: &NodeId, property: &str) {
        self.with_element(node, |_, styles| {
            styles.remove(property);
        });
    }

    fn snapshot_content(&self, node: &NodeId) -> ContentSnapshot {
        let slots = self.slots.borrow();
        ContentSnapshot(
            slots[node.0]
                .children
                .iter()
                .map(|child| Self::copy_subtree(&slots, *child))
                .collect(),
        )
    }

    fn restore_content(&self, node: &NodeId, snapshot: &ContentSnapshot) {
        Self::detach_children(&mut self.slots.borrow_mut(), *node);
        for copy in &snapshot.0 {
            self.rebuild(*node, copy);
        }
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.alloc(Self::element_data(tag, &[]), None))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        let mut slots = self.slots.borrow_mut();
        if let Some(previous) = slots[child.0].parent.take() {
            slots[previous.0].children.retain(|c| c != child);
        }
        slots[child.0].parent = Some(*parent);
        slots[parent.0].children.push(*child);
    }

    fn value(&self, control: &NodeId) -> String {
        match &self.slots.borrow()[control.0].data {
            NodeData::Element { value, .. } => value.clone(),
            NodeData::Text(_) => String::new(),
        }
    }

    fn set_value(&self, control: &NodeId, new_value: &str) {
        if let NodeData::Element { value, .. } = &mut self.slots.borrow_mut()[control.0].data {
            *value = new_value.to_string();
        }
    }

    fn focus_and_select(&self, control: &NodeId) {
        self.focused.set(Some(*control));
    }

    fn suspend_click_handler(&self, node: &NodeId, millis: u32) {
        self.suspended_clicks.borrow_mut().push((*node, millis));
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.html];
        while let Some(node) = stack.pop() {
            if self.attribute(&node, "id").as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(self.children(&node).into_iter().rev());
        }
        None
    }

    fn install_style_block(&self, id: &str, css: &str) {
        let style = self.element(self.head, "style", &[("id", id)]);
        self.text(style, css);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_html_serializes_markup() {
        let tree = MemoryTree::new();
        let p = tree.element(tree.body(), "p", &[("data-i18n-key", "hero.title")]);
        tree.text(p, "Fish & <chips>");
        let b = tree.element(p, "b", &[("title", "say \"hi\"")]);
        tree.text(b, "!");

        assert_eq!(
            tree.inner_html(tree.body()),
            "<p data-i18n-key=\"hero.title\">Fish &amp; &lt;chips&gt;<b title=\"say &quot;hi&quot;\">!</b></p>"
        );
    }

    #[test]
    fn test_snapshot_restores_content() {
        let tree = MemoryTree::new();
        let div = tree.element(tree.body(), "div", &[]);
        let em = tree.element(div, "em", &[("class", "lead")]);
        tree.text(em, "Hello");
        tree.text(div, " world");
        let before = tree.inner_html(div);

        let snapshot = tree.snapshot_content(&div);
        tree.set_text_content(&div, "replaced");
        assert_eq!(tree.inner_html(div), "replaced");

        tree.restore_content(&div, &snapshot);
        assert_eq!(tree.inner_html(div), before);
        assert_eq!(tree.text_content(&div), "Hello world");
    }

    #[test]
    fn test_inline_styles_drive_visibility() {
        let tree = MemoryTree::new();
        let span = tree.element(tree.body(), "span", &[]);
        assert!(!tree.is_hidden(&span));

        tree.set_style(&span, "opacity", "0");
        assert!(tree.is_hidden(&span));
        tree.remove_style(&span, "opacity");
        tree.set_style(&span, "visibility", "hidden");
        assert!(tree.is_hidden(&span));
    }

    #[test]
    fn test_class_helpers() {
        let tree = MemoryTree::new();
        let span = tree.element(tree.body(), "span", &[("class", "badge")]);
        tree.add_class(&span, "active");
        tree.add_class(&span, "active");
        assert_eq!(tree.class_names(&span), vec!["badge", "active"]);
        tree.remove_class(&span, "badge");
        assert!(tree.has_class(&span, "active"));
        assert!(!tree.has_class(&span, "badge"));
    }
}
