//! Legacy generic patcher.
//!
//! Catches section types that never got a registered patcher. It is
//! deliberately composed from the same common-field applier the registry
//! path uses, so the two paths cannot drift on shared fields; only the
//! inline list handling below is extra, covering the item shapes old
//! section types actually used.

use crate::dom;
use crate::models::{map_arr, map_str, SectionUpdate};
use crate::patchers::{common, list, PatchContext};
use serde_json::Value;
use web_sys::{Document, Element};

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    let Some(content) = &update.content else {
        return;
    };

    // Old image-list types (lookbooks, logos, badges) all used an
    // `images` array rendered into the grid container.
    if let Some(images) = map_arr(content, "images") {
        if let Some(grid) = dom::field(root, "grid") {
            list::reconcile(ctx.doc, &grid, images, Some("id"), &build_image, &patch_image);
        }
    }

    // Old text-list types used `items` with title/text pairs.
    if let Some(items) = map_arr(content, "items") {
        if let Some(container) = dom::field(root, "items").or_else(|| dom::field(root, "grid")) {
            list::reconcile(ctx.doc, &container, items, Some("id"), &build_item, &patch_item);
        }
    }

    if let Some(text) = map_str(content, "text") {
        if let Some(body) = dom::field(root, "body") {
            dom::set_text(&body, text);
        }
    }
}

fn build_image(doc: &Document, _index: usize) -> Option<Element> {
    let wrap = doc.create_element("div").ok()?;
    wrap.set_inner_html(r#"<img data-item-field="image" alt="">"#);
    Some(wrap)
}

fn patch_image(el: &Element, entry: &Value) {
    let Some(entry) = entry.as_object() else {
        return;
    };

    if let Some(src) = map_str(entry, "src") {
        if let Some(img) = dom::item_field(el, "image") {
            if src.is_empty() {
                let _ = img.remove_attribute("src");
            } else if img.get_attribute("src").as_deref() != Some(src) {
                let _ = img.set_attribute("src", src);
            }
        }
    }

    if let Some(alt) = map_str(entry, "alt") {
        if let Some(img) = dom::item_field(el, "image") {
            let _ = img.set_attribute("alt", alt);
        }
    }
}

fn build_item(doc: &Document, _index: usize) -> Option<Element> {
    let item = doc.create_element("div").ok()?;
    item.set_inner_html(r#"<h3 data-item-field="title"></h3><p data-item-field="text"></p>"#);
    Some(item)
}

fn patch_item(el: &Element, entry: &Value) {
    let Some(entry) = entry.as_object() else {
        return;
    };

    for (key, field) in [("title", "title"), ("text", "text")] {
        if let Some(text) = map_str(entry, key) {
            if let Some(node) = dom::item_field(el, field) {
                dom::set_text(&node, text);
            }
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
    fn test_legacy_handles_common_fields_and_image_list() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = doc.create_element("div").unwrap();
        host.set_inner_html(
            r#"<section data-section-id="lg1" data-section-type="lookbook">
                 <h2 data-field="title">Old</h2>
                 <div data-field="grid"></div>
               </section>"#,
        );
        doc.body().unwrap().append_child(&host).unwrap();
        let root = host.first_element_child().unwrap();
        let ctx = PatchContext { doc: &doc, categories: None };

        let u: SectionUpdate = serde_json::from_value(json!({
            "title": "Spring lookbook",
            "content": { "images": [{ "src": "1.jpg" }, { "src": "2.jpg" }] }
        }))
        .unwrap();
        apply(&ctx, &root, &u);

        assert_eq!(
            dom::field(&root, "title").unwrap().text_content().as_deref(),
            Some("Spring lookbook")
        );
        let grid = dom::field(&root, "grid").unwrap();
        assert_eq!(dom::item_nodes(&grid).len(), 2);

        host.remove();
    }

    // The two dispatch paths share one common-field implementation; this
    // pins the observable equivalence for a representative update.
    #[wasm_bindgen_test]
    fn test_legacy_matches_registered_for_common_fields() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let markup = |id: &str, ty: &str| {
            format!(
                r#"<section data-section-id="{id}" data-section-type="{ty}">
                     <h2 data-field="title">Old</h2>
                   </section>"#
            )
        };

        let host_a = doc.create_element("div").unwrap();
        host_a.set_inner_html(&markup("eq1", "text"));
        let host_b = doc.create_element("div").unwrap();
        host_b.set_inner_html(&markup("eq2", "unknown-type"));
        doc.body().unwrap().append_child(&host_a).unwrap();
        doc.body().unwrap().append_child(&host_b).unwrap();

        let u: SectionUpdate = serde_json::from_value(json!({
            "title": "Same",
            "settings": { "textAlign": "center", "marginTop": 12 }
        }))
        .unwrap();

        crate::patchers::dispatch(&doc, "eq1", &u, None);
        crate::patchers::dispatch(&doc, "eq2", &u, None);

        let norm = |host: &Element, id: &str| {
            host.first_element_child()
                .unwrap()
                .outer_html()
                .replace(id, "X")
                .replace("data-section-type=\"text\"", "T")
                .replace("data-section-type=\"unknown-type\"", "T")
        };
        assert_eq!(norm(&host_a, "eq1"), norm(&host_b, "eq2"));

        host_a.remove();
        host_b.remove();
    }
}
