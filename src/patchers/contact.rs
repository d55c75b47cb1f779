//! Contact form section.
//!
//! The engine patches labels, placeholders and button chrome only; the
//! form never actually submits inside the preview.

use crate::dom;
use crate::models::{map_str, SectionUpdate};
use crate::patchers::{common, PatchContext};
use serde_json::{Map, Value};
use web_sys::Element;

const LABELS: &[(&str, &str)] = &[
    ("nameLabel", "name-label"),
    ("emailLabel", "email-label"),
    ("messageLabel", "message-label"),
];

const PLACEHOLDERS: &[(&str, &str)] = &[
    ("namePlaceholder", "name-input"),
    ("emailPlaceholder", "email-input"),
    ("messagePlaceholder", "message-input"),
];

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    let Some(settings) = &update.settings else {
        return;
    };

    apply_fields(root, settings);
}

fn apply_fields(root: &Element, settings: &Map<String, Value>) {
    for (key, field) in LABELS {
        if let Some(text) = map_str(settings, key) {
            if let Some(node) = dom::field(root, field) {
                dom::set_text(&node, text);
            }
        }
    }

    for (key, field) in PLACEHOLDERS {
        if let Some(text) = map_str(settings, key) {
            if let Some(node) = dom::field(root, field) {
                dom::set_or_remove_attr(
                    &node,
                    "placeholder",
                    if text.is_empty() { None } else { Some(text) },
                );
            }
        }
    }

    if let Some(submit) = dom::field(root, "submit") {
        if let Some(text) = map_str(settings, "submitText") {
            dom::set_text(&submit, text);
        }
        if let Some(color) = map_str(settings, "submitBgColor") {
            common::set_or_clear_style(&submit, "background-color", color);
        }
        if let Some(color) = map_str(settings, "submitTextColor") {
            common::set_or_clear_style(&submit, "color", color);
        }
    }

    if let Some(text) = map_str(settings, "successText") {
        if let Some(node) = dom::field(root, "success") {
            dom::set_text(&node, text);
        }
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_labels_placeholders_and_submit() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = doc.create_element("div").unwrap();
        host.set_inner_html(
            r#"<section data-section-id="ct1" data-section-type="contact">
                 <label data-field="email-label">Email</label>
                 <input data-field="email-input">
                 <button data-field="submit">Send</button>
               </section>"#,
        );
        doc.body().unwrap().append_child(&host).unwrap();
        let root = host.first_element_child().unwrap();
        let ctx = PatchContext { doc: &doc, categories: None };

        let u: SectionUpdate = serde_json::from_value(json!({
            "settings": {
                "emailLabel": "Your email",
                "emailPlaceholder": "you@example.com",
                "submitText": "Get in touch"
            }
        }))
        .unwrap();
        apply(&ctx, &root, &u);

        assert_eq!(
            dom::field(&root, "email-label").unwrap().text_content().as_deref(),
            Some("Your email")
        );
        assert_eq!(
            dom::field(&root, "email-input").unwrap().get_attribute("placeholder").as_deref(),
            Some("you@example.com")
        );
        assert_eq!(
            dom::field(&root, "submit").unwrap().text_content().as_deref(),
            Some("Get in touch")
        );

        host.remove();
    }
}
