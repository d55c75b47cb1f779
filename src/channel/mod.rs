//! Cross-context transport.
//!
//! Inbound: `message` events from the editor frame, decoded and routed
//! synchronously — one message is fully applied before the next is
//! looked at. Outbound: `SECTION_CLICKED`, posted to the parent frame
//! when the preview surface is clicked on a section.

use crate::config::PreviewConfig;
use crate::messages::{self, EditorMessage, MessageErrorKind, PreviewEvent};
use crate::util::debug_log;
use crate::{dom, patchers, placeholder, sections, theme};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Elements whose clicks behave natively instead of selecting the
/// section: real links, buttons, form fields, carousel chrome.
const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea", "summary", "label"];

/// Install the message listener and the click-out listener. Called once
/// from the wasm entrypoint; the closures live for the page lifetime.
pub(crate) fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = dom::document() else {
        return;
    };

    let message_doc = doc.clone();
    let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
        match messages::decode(&ev.data()) {
            Ok(msg) => handle(&message_doc, msg),
            Err(e) if e.kind == MessageErrorKind::Payload => {
                debug_log(&format!("channel: dropped message: {e}"));
            }
            // Foreign/odd messages (devtools, extensions) are not ours to
            // report.
            Err(_) => {}
        }
    });
    let _ = window
        .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref());
    on_message.forget();

    let click_doc = doc.clone();
    let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if let Some(section_id) = clicked_section(&target) {
            ev.prevent_default();
            post_event(&PreviewEvent::SectionClicked { section_id });
        }
    });
    let _ = doc.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

/// Route one decoded message. Split out of the listener for tests.
pub(crate) fn handle(doc: &Document, msg: EditorMessage) {
    match msg {
        EditorMessage::SectionContentUpdate {
            section_id,
            updates,
            categories,
        } => {
            patchers::dispatch(doc, &section_id, &updates, categories.as_deref());
        }
        EditorMessage::SectionAdd(init) => {
            placeholder::insert(doc, &init);
        }
        EditorMessage::SectionRemove { section_id } => {
            sections::remove(doc, &section_id);
        }
        EditorMessage::SectionsReorder {
            section_order,
            moved_section_id,
        } => {
            sections::reorder(doc, &section_order, &moved_section_id);
        }
        EditorMessage::ScrollToSection { section_id } => {
            sections::scroll_to(doc, &section_id);
        }
        EditorMessage::HighlightSection { section_id } => {
            sections::highlight(doc, &section_id);
        }
        EditorMessage::ThemeSettingsUpdate { settings } => {
            theme::apply(doc, &settings);
        }
    }
}

/// Climb from a click target to the owning section, unless the click
/// landed on an interactive control first.
pub(crate) fn clicked_section(target: &Element) -> Option<String> {
    let mut cur = Some(target.clone());
    while let Some(el) = cur {
        if let Some(id) = el.get_attribute(dom::SECTION_ID_ATTR) {
            return Some(id);
        }

        let tag = el.tag_name().to_lowercase();
        if INTERACTIVE_TAGS.contains(&tag.as_str())
            || el.has_attribute("data-carousel-arrow")
            || el.has_attribute("data-carousel-dot")
        {
            return None;
        }

        cur = el.parent_element();
    }
    None
}

fn post_event(event: &PreviewEvent) {
    let Some(payload) = event.to_js() else {
        return;
    };
    let Some(parent) = web_sys::window().and_then(|w| w.parent().ok()).flatten() else {
        return;
    };
    let origin = PreviewConfig::new().editor_origin;
    if let Err(e) = parent.post_message(&payload, &origin) {
        debug_log(&format!("channel: postMessage failed: {e:?}"));
    }
}
