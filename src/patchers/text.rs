//! Rich text section.

use crate::dom;
use crate::models::{map_f64, map_str, SectionUpdate};
use crate::patchers::{common, PatchContext};
use crate::styles;
use web_sys::Element;

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    let section_id = root.get_attribute(dom::SECTION_ID_ATTR).unwrap_or_default();

    if let Some(content) = &update.content {
        // The editor sends sanitized HTML; the preview renders it as-is.
        if let Some(html) = map_str(content, "html") {
            if let Some(body) = dom::field(root, "body") {
                body.set_inner_html(html);
            }
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    let desktop = map_f64(settings, "bodySize");
    let mobile = map_f64(settings, "bodySizeMobile");
    if desktop.is_some() || mobile.is_some() {
        let selector = styles::section_selector(&section_id, "[data-field=\"body\"]");
        styles::apply_size_pair(ctx.doc, &section_id, "body-size", &selector, desktop, mobile);
    }

    if let Some(lines) = map_f64(settings, "lineClamp") {
        let selector = styles::section_selector(&section_id, "[data-field=\"body\"]");
        let css = if lines >= 1.0 {
            styles::line_clamp_css(&selector, lines as u32)
        } else {
            // Explicit zero lifts the clamp; the block stays registered so
            // a later clamp reuses it.
            String::new()
        };
        styles::upsert(ctx.doc, &section_id, "clamp", &css);
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
    fn test_body_html_and_clamp() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = doc.create_element("div").unwrap();
        host.set_inner_html(
            r#"<section data-section-id="t1" data-section-type="text">
                 <div data-field="body"></div>
               </section>"#,
        );
        doc.body().unwrap().append_child(&host).unwrap();
        let root = host.first_element_child().unwrap();
        let ctx = PatchContext { doc: &doc, categories: None };

        let u: SectionUpdate = serde_json::from_value(json!({
            "content": { "html": "<p>Hello <strong>world</strong></p>" },
            "settings": { "lineClamp": 3 }
        }))
        .unwrap();
        apply(&ctx, &root, &u);

        let body = dom::field(&root, "body").unwrap();
        assert!(body.inner_html().contains("<strong>world</strong>"));

        let clamp = doc.get_element_by_id("pv-style-t1-clamp").unwrap();
        assert!(clamp.text_content().unwrap().contains("-webkit-line-clamp: 3"));

        // Zero lifts the clamp but keeps the block.
        let u: SectionUpdate =
            serde_json::from_value(json!({ "settings": { "lineClamp": 0 } })).unwrap();
        apply(&ctx, &root, &u);
        let clamp = doc.get_element_by_id("pv-style-t1-clamp").unwrap();
        assert_eq!(clamp.text_content().as_deref(), Some(""));

        styles::dispose_owner(&doc, "t1");
        host.remove();
    }
}
