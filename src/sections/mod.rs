//! Section-level operations: reorder, remove, scroll, highlight.
//!
//! Reordering re-links existing roots; it never rebuilds them. Removal is
//! the one deliberately deferred mutation in the engine: the node fades
//! first and detaches after the transition window, so it cannot pop out
//! of the layout mid-frame.

use crate::dom;
use crate::styles;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

pub(crate) const REMOVE_TRANSITION_MS: i32 = 300;
const MOVE_FLASH_MS: i32 = 600;
const HIGHLIGHT_MS: i32 = 1500;

/// One-shot timeout. The closure self-drops after firing.
fn defer(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            Closure::once_into_js(f).as_ref().unchecked_ref(),
            ms,
        );
    }
}

/// Re-link section roots to match the explicit id order.
///
/// Each root is placed directly after its predecessor in the list; ids
/// that are not currently rendered are skipped. Fixed regions (header,
/// footer) are never touched — they are not in the list and nothing is
/// inserted around them except between existing sections.
pub(crate) fn reorder(doc: &Document, order: &[String], moved_section_id: &str) {
    let Some(container) = dom::preview_root(doc) else {
        return;
    };

    let mut prev: Option<Element> = None;
    for id in order {
        let Some(el) = dom::find_section_root(doc, id) else {
            continue;
        };
        if let Some(p) = &prev {
            if el.previous_element_sibling().as_ref() != Some(p) {
                let _ = container.insert_before(&el, p.next_sibling().as_ref());
            }
        }
        prev = Some(el);
    }

    // Purely cosmetic: flash the moved node. Independent of the relinking
    // above, which has already happened.
    if let Some(el) = dom::find_section_root(doc, moved_section_id) {
        dom::set_style(&el, "transition", "transform 0.3s ease");
        dom::set_style(&el, "transform", "scale(1.01)");
        let _ = el.class_list().add_1("pv-section--moved");

        let el2 = el.clone();
        defer(MOVE_FLASH_MS, move || {
            let _ = el2.class_list().remove_1("pv-section--moved");
            dom::remove_style(&el2, "transform");
            dom::remove_style(&el2, "transition");
        });
    }
}

/// Fade, then detach after the transition window — never before.
///
/// The root is marked `data-removing` immediately so the dispatcher
/// treats it as gone; a keystroke racing the fade cannot resurrect it.
/// Detachment also disposes every scoped style block the section owns.
pub(crate) fn remove(doc: &Document, section_id: &str) {
    let Some(root) = dom::find_section_root(doc, section_id) else {
        return;
    };
    if root.has_attribute(dom::REMOVING_ATTR) {
        return;
    }
    let _ = root.set_attribute(dom::REMOVING_ATTR, "");

    dom::set_style(
        &root,
        "transition",
        &format!("opacity {REMOVE_TRANSITION_MS}ms ease, transform {REMOVE_TRANSITION_MS}ms ease"),
    );
    dom::set_style(&root, "opacity", "0");
    dom::set_style(&root, "transform", "scale(0.98)");

    let doc = doc.clone();
    let owner = section_id.to_string();
    defer(REMOVE_TRANSITION_MS, move || {
        root.remove();
        styles::dispose_owner(&doc, &owner);
    });
}

pub(crate) fn scroll_to(doc: &Document, section_id: &str) {
    let Some(root) = dom::find_section_root(doc, section_id) else {
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    root.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Temporary selection ring, viewport untouched.
pub(crate) fn highlight(doc: &Document, section_id: &str) {
    let Some(root) = dom::find_section_root(doc, section_id) else {
        return;
    };

    dom::set_style(&root, "outline", "2px solid #3b82f6");
    dom::set_style(&root, "outline-offset", "-2px");

    let root2 = root.clone();
    defer(HIGHLIGHT_MS, move || {
        dom::remove_style(&root2, "outline");
        dom::remove_style(&root2, "outline-offset");
    });
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn sleep(ms: i32) {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            web_sys::window()
                .unwrap()
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .unwrap();
        });
        let _ = JsFuture::from(promise).await;
    }

    fn mount_page(doc: &Document, prefix: &str) -> Element {
        let host = doc.create_element("div").unwrap();
        host.set_attribute("data-preview-root", "").unwrap();
        host.set_inner_html(&format!(
            r#"<header data-fixed-region="header"></header>
               <section data-section-id="{prefix}a" data-section-type="text"></section>
               <section data-section-id="{prefix}b" data-section-type="text"></section>
               <section data-section-id="{prefix}c" data-section-type="text"></section>
               <footer data-fixed-region="footer"></footer>"#
        ));
        doc.body().unwrap().append_child(&host).unwrap();
        host
    }

    fn child_ids(host: &Element) -> Vec<String> {
        let mut out = vec![];
        let mut child = host.first_element_child();
        while let Some(el) = child {
            child = el.next_element_sibling();
            out.push(
                el.get_attribute("data-section-id")
                    .or_else(|| el.get_attribute("data-fixed-region"))
                    .unwrap_or_default(),
            );
        }
        out
    }

    // Scenario: order [b, a, c] on a document currently [a, b, c].
    #[wasm_bindgen_test]
    fn test_reorder_matches_target_and_spares_fixed_regions() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = mount_page(&doc, "ro-");

        let order = vec!["ro-b".to_string(), "ro-a".to_string(), "ro-c".to_string()];
        reorder(&doc, &order, "ro-b");

        assert_eq!(
            child_ids(&host),
            vec!["header", "ro-b", "ro-a", "ro-c", "footer"]
        );

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_reorder_moving_last_to_front() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = mount_page(&doc, "rf-");

        let order = vec!["rf-c".to_string(), "rf-a".to_string(), "rf-b".to_string()];
        reorder(&doc, &order, "rf-c");

        assert_eq!(
            child_ids(&host),
            vec!["header", "rf-c", "rf-a", "rf-b", "footer"]
        );

        host.remove();
    }

    // Scenario: the node stays attached during the transition window,
    // then detaches; a late content update is a no-op.
    #[wasm_bindgen_test]
    async fn test_remove_defers_detach_past_transition() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = mount_page(&doc, "rm-");

        remove(&doc, "rm-b");

        // Still attached mid-transition, but already invisible to the
        // dispatcher.
        let root = crate::dom::find_section_root(&doc, "rm-b").unwrap();
        assert!(root.is_connected());
        assert!(root.has_attribute("data-removing"));

        let u = serde_json::from_value(serde_json::json!({ "title": "late" })).unwrap();
        crate::patchers::dispatch(&doc, "rm-b", &u, None);

        sleep(REMOVE_TRANSITION_MS + 100).await;
        assert!(crate::dom::find_section_root(&doc, "rm-b").is_none());

        // Post-detach update: silent no-op.
        crate::patchers::dispatch(&doc, "rm-b", &u, None);

        host.remove();
    }
}
