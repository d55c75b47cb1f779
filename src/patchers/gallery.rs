//! Image gallery section.
//!
//! Images reconcile against the grid container; columns and gap come from
//! the common grid shorthands. Caption visibility, image fit and aspect
//! ratio are per-instance style blocks so they apply to images added
//! later without revisiting every node.

use crate::dom;
use crate::models::{map_arr, map_bool, map_str, SectionUpdate};
use crate::patchers::{apply_category_chips, common, list, PatchContext};
use crate::styles;
use serde_json::Value;
use web_sys::{Document, Element};

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);
    apply_category_chips(ctx, root);

    let section_id = root.get_attribute(dom::SECTION_ID_ATTR).unwrap_or_default();

    if let Some(content) = &update.content {
        if let Some(images) = map_arr(content, "images") {
            if let Some(grid) = dom::field(root, "grid") {
                list::reconcile(ctx.doc, &grid, images, Some("id"), &build_image, &patch_image);
            }
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    if let Some(show) = map_bool(settings, "showCaptions") {
        let selector = styles::section_selector(&section_id, "[data-item-field=\"caption\"]");
        let css = if show {
            String::new()
        } else {
            format!("{selector} {{ display: none; }}\n")
        };
        styles::upsert(ctx.doc, &section_id, "captions", &css);
    }

    if let Some(fit) = map_str(settings, "imageFit") {
        let selector = styles::section_selector(&section_id, "[data-item-field=\"image\"]");
        let css = if fit.is_empty() {
            String::new()
        } else {
            format!("{selector} {{ object-fit: {fit}; width: 100%; height: 100%; }}\n")
        };
        styles::upsert(ctx.doc, &section_id, "image-fit", &css);
    }

    if let Some(ratio) = map_str(settings, "aspectRatio") {
        let selector = styles::section_selector(&section_id, "[data-item-field=\"image\"]");
        let css = if ratio.is_empty() {
            String::new()
        } else {
            format!("{selector} {{ aspect-ratio: {ratio}; }}\n")
        };
        styles::upsert(ctx.doc, &section_id, "aspect", &css);
    }
}

fn build_image(doc: &Document, _index: usize) -> Option<Element> {
    let figure = doc.create_element("figure").ok()?;
    figure.set_inner_html(
        r#"<a data-item-field="link"><img data-item-field="image" alt=""></a><figcaption data-item-field="caption"></figcaption>"#,
    );
    Some(figure)
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
                // Avoid re-triggering the load on every keystroke.
                let _ = img.set_attribute("src", src);
            }
        }
    }

    if let Some(alt) = map_str(entry, "alt") {
        if let Some(img) = dom::item_field(el, "image") {
            let _ = img.set_attribute("alt", alt);
        }
    }

    if let Some(caption) = map_str(entry, "caption") {
        if let Some(node) = dom::item_field(el, "caption") {
            dom::set_text(&node, caption);
        }
    }

    if let Some(link) = map_str(entry, "link") {
        if let Some(a) = dom::item_field(el, "link") {
            dom::set_or_remove_attr(&a, "href", if link.is_empty() { None } else { Some(link) });
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

    fn mount_gallery(id: &str) -> (Document, Element) {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = doc.create_element("div").unwrap();
        host.set_inner_html(&format!(
            r#"<section data-section-id="{id}" data-section-type="gallery">
                 <div data-field="grid">
                   <figure data-item-index="0"><a data-item-field="link"><img data-item-field="image" src="a.jpg"></a><figcaption data-item-field="caption"></figcaption></figure>
                   <figure data-item-index="1"><a data-item-field="link"><img data-item-field="image" src="b.jpg"></a><figcaption data-item-field="caption"></figcaption></figure>
                 </div>
               </section>"#
        ));
        doc.body().unwrap().append_child(&host).unwrap();
        (doc, host)
    }

    // Scenario: two rendered images, update carries three. Exactly one new
    // node appears; the first two are patched in place.
    #[wasm_bindgen_test]
    fn test_grows_gallery_without_recreating_existing_nodes() {
        let (doc, host) = mount_gallery("g1");
        let root = host.first_element_child().unwrap();
        let ctx = PatchContext { doc: &doc, categories: None };

        let grid = dom::field(&root, "grid").unwrap();
        let before = dom::item_nodes(&grid);
        before[0].set_attribute("data-witness", "keep").unwrap();

        let u: SectionUpdate = serde_json::from_value(json!({
            "content": { "images": [
                { "src": "a.jpg" },
                { "src": "b2.jpg" },
                { "src": "c.jpg", "caption": "new" }
            ]}
        }))
        .unwrap();
        apply(&ctx, &root, &u);

        let after = dom::item_nodes(&grid);
        assert_eq!(after.len(), 3);
        // Node identity preserved for the untouched item.
        assert_eq!(after[0].get_attribute("data-witness").as_deref(), Some("keep"));
        // In-place patch for the second.
        let img1 = dom::item_field(&after[1], "image").unwrap();
        assert_eq!(img1.get_attribute("src").as_deref(), Some("b2.jpg"));
        // Fresh node carries the full marker set.
        let img2 = dom::item_field(&after[2], "image").unwrap();
        assert_eq!(img2.get_attribute("src").as_deref(), Some("c.jpg"));
        assert_eq!(after[2].get_attribute("data-item-index").as_deref(), Some("2"));

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_caption_visibility_block() {
        let (doc, host) = mount_gallery("g2");
        let root = host.first_element_child().unwrap();
        let ctx = PatchContext { doc: &doc, categories: None };

        let u: SectionUpdate =
            serde_json::from_value(json!({ "settings": { "showCaptions": false } })).unwrap();
        apply(&ctx, &root, &u);
        let block = doc.get_element_by_id("pv-style-g2-captions").unwrap();
        assert!(block.text_content().unwrap().contains("display: none"));

        let u: SectionUpdate =
            serde_json::from_value(json!({ "settings": { "showCaptions": true } })).unwrap();
        apply(&ctx, &root, &u);
        let block = doc.get_element_by_id("pv-style-g2-captions").unwrap();
        assert_eq!(block.text_content().as_deref(), Some(""));

        styles::dispose_owner(&doc, "g2");
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_category_chips_render_from_side_channel() {
        let (doc, host) = mount_gallery("g3");
        let chips_host = doc.create_element("div").unwrap();
        chips_host.set_attribute("data-field", "categories").unwrap();
        host.first_element_child().unwrap().append_child(&chips_host).unwrap();

        let root = host.first_element_child().unwrap();
        let cats = vec!["Shoes".to_string(), "Hats".to_string()];
        let ctx = PatchContext { doc: &doc, categories: Some(&cats) };

        let u: SectionUpdate = serde_json::from_value(json!({})).unwrap();
        apply(&ctx, &root, &u);

        assert_eq!(chips_host.child_element_count(), 2);
        assert_eq!(
            chips_host.first_element_child().unwrap().text_content().as_deref(),
            Some("Shoes")
        );

        host.remove();
    }
}
