//! Binds an [`InlineEditor`] to document events.
//!
//! Four listeners go on the document. Click and keydown use the capture
//! phase, so the editor sees them before page handlers do; mouseover and
//! mouseout bubble as usual. Dropping the overlay cancels any open edit and
//! removes every listener.

use super::dom_tree::DomTree;
use super::editor::{ClickDisposition, EditSink, InlineEditor};
use contracts::enums::language::Language;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, KeyboardEvent, Node};

type SharedEditor<S> = Rc<RefCell<InlineEditor<DomTree, S>>>;

pub struct InlineEditorOverlay<S: EditSink + 'static> {
    editor: SharedEditor<S>,
    document: Document,
    on_click: Closure<dyn FnMut(Event)>,
    on_key_down: Closure<dyn FnMut(KeyboardEvent)>,
    on_mouse_over: Closure<dyn FnMut(Event)>,
    on_mouse_out: Closure<dyn FnMut(Event)>,
}

fn event_target(event: &Event) -> Option<Node> {
    event.target().and_then(|target| target.dyn_into::<Node>().ok())
}

impl<S: EditSink + 'static> InlineEditorOverlay<S> {
    /// Starts listening. `None` when there is no document.
    pub fn attach(language: Language, sink: S) -> Option<Self> {
        let tree = DomTree::new()?;
        let document = tree.document().clone();
        let editor: SharedEditor<S> = Rc::new(RefCell::new(InlineEditor::new(tree, sink, language)));

        let on_key_down = {
            let editor = editor.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let Some(target) = event_target(&event) else {
                    return;
                };
                let Ok(mut editor) = editor.try_borrow_mut() else {
                    return;
                };
                if !editor.is_editing() {
                    return;
                }
                if editor.handle_key(&target, &event.key(), event.ctrl_key() || event.meta_key()) {
                    event.prevent_default();
                    event.stop_propagation();
                }
            })
        };

        let on_click = {
            let editor = editor.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(target) = event_target(&event) else {
                    return;
                };
                let Ok(mut editor) = editor.try_borrow_mut() else {
                    return;
                };
                if editor.handle_click(&target) == ClickDisposition::Claimed {
                    event.prevent_default();
                    event.stop_immediate_propagation();
                }
            })
        };

        let on_mouse_over = {
            let editor = editor.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let (Some(target), Ok(mut editor)) = (event_target(&event), editor.try_borrow_mut()) {
                    editor.handle_mouse_over(&target);
                }
            })
        };

        let on_mouse_out = {
            let editor = editor.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let (Some(target), Ok(mut editor)) = (event_target(&event), editor.try_borrow_mut()) {
                    editor.handle_mouse_out(&target);
                }
            })
        };

        let _ = document.add_event_listener_with_callback_and_bool(
            "click",
            on_click.as_ref().unchecked_ref(),
            true,
        );
        let _ = document.add_event_listener_with_callback_and_bool(
            "keydown",
            on_key_down.as_ref().unchecked_ref(),
            true,
        );
        let _ = document
            .add_event_listener_with_callback("mouseover", on_mouse_over.as_ref().unchecked_ref());
        let _ = document
            .add_event_listener_with_callback("mouseout", on_mouse_out.as_ref().unchecked_ref());

        log::info!("Inline editor attached ({})", language);
        Some(Self {
            editor,
            document,
            on_click,
            on_key_down,
            on_mouse_over,
            on_mouse_out,
        })
    }
}

impl<S: EditSink + 'static> Drop for InlineEditorOverlay<S> {
    fn drop(&mut self) {
        if let Ok(mut editor) = self.editor.try_borrow_mut() {
            editor.set_enabled(false);
        }
        let _ = self.document.remove_event_listener_with_callback_and_bool(
            "click",
            self.on_click.as_ref().unchecked_ref(),
            true,
        );
        let _ = self.document.remove_event_listener_with_callback_and_bool(
            "keydown",
            self.on_key_down.as_ref().unchecked_ref(),
            true,
        );
        let _ = self.document.remove_event_listener_with_callback(
            "mouseover",
            self.on_mouse_over.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "mouseout",
            self.on_mouse_out.as_ref().unchecked_ref(),
        );
        log::info!("Inline editor detached");
    }
}
