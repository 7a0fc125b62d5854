//! [`RenderTree`] over the live browser document.

use super::tree::{NodeKind, RenderTree};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Node};

#[derive(Clone)]
pub struct DomTree {
    document: Document,
}

impl DomTree {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn as_element(node: &Node) -> Option<&Element> {
    node.dyn_ref::<Element>()
}

fn as_html(node: &Node) -> Option<&HtmlElement> {
    node.dyn_ref::<HtmlElement>()
}

impl RenderTree for DomTree {
    type Node = Node;
    type Snapshot = String;

    fn root(&self) -> Option<Node> {
        self.document.body().map(Node::from)
    }

    fn kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::ELEMENT_NODE => NodeKind::Element,
            Node::TEXT_NODE => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.get(i)).collect()
    }

    fn tag_name(&self, node: &Node) -> String {
        as_element(node)
            .map(|element| element.tag_name().to_uppercase())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        as_element(node)?.get_attribute(name)
    }

    fn set_attribute(&self, node: &Node, name: &str, value: &str) {
        if let Some(element) = as_element(node) {
            let _ = element.set_attribute(name, value);
        }
    }

    fn remove_attribute(&self, node: &Node, name: &str) {
        if let Some(element) = as_element(node) {
            let _ = element.remove_attribute(name);
        }
    }

    fn class_names(&self, node: &Node) -> Vec<String> {
        as_element(node)
            .map(|element| {
                element
                    .class_list()
                    .value()
                    .split_whitespace()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn add_class(&self, node: &Node, class: &str) {
        if let Some(element) = as_element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&self, node: &Node, class: &str) {
        if let Some(element) = as_element(node) {
            let list = element.class_list();
            let _ = list.remove_1(class);
            if list.length() == 0 {
                let _ = element.remove_attribute("class");
            }
        }
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        as_element(node)
            .map(|element| element.class_list().contains(class))
            .unwrap_or(false)
    }

    fn text_content(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, node: &Node, text: &str) {
        node.set_text_content(Some(text));
    }

    fn is_hidden(&self, node: &Node) -> bool {
        let Some(element) = as_element(node) else {
            return false;
        };
        let Some(style) = web_sys::window()
            .and_then(|w| w.get_computed_style(element).ok())
            .flatten()
        else {
            return false;
        };
        let property = |name: &str| style.get_property_value(name).unwrap_or_default();
        property("display") == "none"
            || property("visibility") == "hidden"
            || property("opacity")
                .trim()
                .parse::<f64>()
                .map(|opacity| opacity == 0.0)
                .unwrap_or(false)
    }

    fn rendered_height(&self, node: &Node) -> f64 {
        as_element(node)
            .map(|element| element.get_bounding_client_rect().height())
            .unwrap_or(0.0)
    }

    fn set_style(&self, node: &Node, property: &str, value: &str) {
        if let Some(element) = as_html(node) {
            let _ = element.style().set_property(property, value);
        }
    }

    fn remove_style(&self, node: &Node, property: &str) {
        if let Some(element) = as_html(node) {
            let _ = element.style().remove_property(property);
        }
    }

    fn snapshot_content(&self, node: &Node) -> String {
        as_element(node)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    fn restore_content(&self, node: &Node, snapshot: &String) {
        if let Some(element) = as_element(node) {
            element.set_inner_html(snapshot);
        }
    }

    fn create_element(&self, tag: &str) -> Option<Node> {
        self.document.create_element(tag).ok().map(Node::from)
    }

    fn append_child(&self, parent: &Node, child: &Node) {
        let _ = parent.append_child(child);
    }

    fn value(&self, control: &Node) -> String {
        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, control: &Node, value: &str) {
        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn focus_and_select(&self, control: &Node) {
        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            let _ = input.focus();
            input.select();
        } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
            let _ = area.focus();
            area.select();
        }
    }

    fn suspend_click_handler(&self, node: &Node, millis: u32) {
        let Some(element) = as_html(node).cloned() else {
            return;
        };
        let handler = element.onclick();
        element.set_onclick(None);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            element.set_onclick(handler.as_ref());
        });
    }

    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Node::from)
    }

    fn install_style_block(&self, id: &str, css: &str) {
        let (Some(head), Ok(style)) = (self.document.head(), self.document.create_element("style"))
        else {
            return;
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        let _ = head.append_child(&style);
    }
}
