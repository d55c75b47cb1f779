//! Binding contract between pre-rendered markup and the patchers.
//!
//! Every live-editable node carries a stable marker; the engine locates
//! nodes by marker, never by content or structure. Markers are part of the
//! initial render (or the placeholder synthesizer) and are never
//! regenerated per patch.

use crate::util::escape_attr_value;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

pub(crate) const SECTION_ID_ATTR: &str = "data-section-id";
pub(crate) const SECTION_TYPE_ATTR: &str = "data-section-type";
pub(crate) const SECTION_NAME_ATTR: &str = "data-section-name";
pub(crate) const FIELD_ATTR: &str = "data-field";
pub(crate) const ITEM_FIELD_ATTR: &str = "data-item-field";
pub(crate) const ITEM_INDEX_ATTR: &str = "data-item-index";
pub(crate) const ITEM_ID_ATTR: &str = "data-item-id";
pub(crate) const FIXED_REGION_ATTR: &str = "data-fixed-region";
pub(crate) const PREVIEW_ROOT_ATTR: &str = "data-preview-root";
pub(crate) const HAS_MEDIA_ATTR: &str = "data-has-media";
pub(crate) const REMOVING_ATTR: &str = "data-removing";
pub(crate) const CUSTOM_CLASSES_ATTR: &str = "data-custom-classes";

pub(crate) fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// The container sections live in. Older themes render sections directly
/// into `<body>`, so that is the fallback.
pub(crate) fn preview_root(doc: &Document) -> Option<Element> {
    if let Ok(Some(el)) = doc.query_selector(&format!("[{PREVIEW_ROOT_ATTR}]")) {
        return Some(el);
    }
    doc.body().map(|b| b.into())
}

pub(crate) fn find_section_root(doc: &Document, section_id: &str) -> Option<Element> {
    doc.query_selector(&format!(
        "[{}=\"{}\"]",
        SECTION_ID_ATTR,
        escape_attr_value(section_id)
    ))
    .ok()
    .flatten()
}

/// Section-level field node. Per-item fields use `data-item-field` and are
/// invisible to this lookup, so a section "title" can never collide with an
/// item "title".
pub(crate) fn field(root: &Element, name: &str) -> Option<Element> {
    root.query_selector(&format!("[{}=\"{}\"]", FIELD_ATTR, escape_attr_value(name)))
        .ok()
        .flatten()
}

/// Field node inside one list item.
pub(crate) fn item_field(item: &Element, name: &str) -> Option<Element> {
    item.query_selector(&format!(
        "[{}=\"{}\"]",
        ITEM_FIELD_ATTR,
        escape_attr_value(name)
    ))
    .ok()
    .flatten()
}

/// Direct children of a list container that are item nodes.
///
/// Deliberately not a recursive query: nested lists (pricing plan
/// features) manage their own containers.
pub(crate) fn item_nodes(container: &Element) -> Vec<Element> {
    let mut out = Vec::new();
    let mut child = container.first_element_child();
    while let Some(el) = child {
        child = el.next_element_sibling();
        if el.has_attribute(ITEM_INDEX_ATTR) {
            out.push(el);
        }
    }
    out
}

pub(crate) fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Inline-style write through the `HtmlElement` style declaration.
/// Non-HTML elements (SVG icons) are skipped.
pub(crate) fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().set_property(prop, value);
    }
}

pub(crate) fn remove_style(el: &Element, prop: &str) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().remove_property(prop);
    }
}

pub(crate) fn set_or_remove_attr(el: &Element, name: &str, value: Option<&str>) {
    match value {
        Some(v) => {
            let _ = el.set_attribute(name, v);
        }
        None => {
            let _ = el.remove_attribute(name);
        }
    }
}

pub(crate) fn has_media(root: &Element) -> bool {
    root.has_attribute(HAS_MEDIA_ATTR)
}

pub(crate) fn set_has_media(root: &Element, on: bool) {
    set_or_remove_attr(root, HAS_MEDIA_ATTR, if on { Some("") } else { None });
}

/// Replace the custom classes previously applied through the editor.
///
/// The applied set is recorded on the root so stale classes can be removed
/// cleanly before the new ones go on; theme classes from the initial render
/// are never touched.
pub(crate) fn apply_custom_classes(root: &Element, classes: &str) {
    let class_list = root.class_list();

    if let Some(prev) = root.get_attribute(CUSTOM_CLASSES_ATTR) {
        for c in prev.split_whitespace() {
            let _ = class_list.remove_1(c);
        }
    }

    let mut applied: Vec<&str> = Vec::new();
    for c in classes.split_whitespace() {
        if class_list.add_1(c).is_ok() {
            applied.push(c);
        }
    }

    if applied.is_empty() {
        let _ = root.remove_attribute(CUSTOM_CLASSES_ATTR);
    } else {
        let _ = root.set_attribute(CUSTOM_CLASSES_ATTR, &applied.join(" "));
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixture(html: &str) -> (Document, Element) {
        let doc = document().unwrap();
        let host = doc.create_element("div").unwrap();
        host.set_inner_html(html);
        doc.body().unwrap().append_child(&host).unwrap();
        (doc, host)
    }

    #[wasm_bindgen_test]
    fn test_find_section_root_and_field() {
        let (doc, host) = fixture(
            r#"<section data-section-id="sec-1" data-section-type="hero">
                 <h2 data-field="title">Old</h2>
               </section>"#,
        );

        let root = find_section_root(&doc, "sec-1").expect("root should resolve");
        let title = field(&root, "title").expect("field should resolve");
        assert_eq!(title.text_content().as_deref(), Some("Old"));

        assert!(find_section_root(&doc, "nope").is_none());
        assert!(field(&root, "subtitle").is_none());

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_section_field_does_not_match_item_field() {
        let (doc, host) = fixture(
            r#"<section data-section-id="sec-2" data-section-type="reviews">
                 <div data-field="items">
                   <div data-item-index="0"><span data-item-field="title">per-item</span></div>
                 </div>
               </section>"#,
        );

        let root = find_section_root(&doc, "sec-2").unwrap();
        assert!(field(&root, "title").is_none());

        let items = field(&root, "items").unwrap();
        let nodes = item_nodes(&items);
        assert_eq!(nodes.len(), 1);
        assert!(item_field(&nodes[0], "title").is_some());

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_custom_class_tracking_removes_stale() {
        let (doc, host) = fixture(
            r#"<section data-section-id="sec-3" data-section-type="text" class="theme-dark"></section>"#,
        );
        let root = find_section_root(&doc, "sec-3").unwrap();

        apply_custom_classes(&root, "promo wide");
        assert!(root.class_list().contains("promo"));
        assert!(root.class_list().contains("wide"));

        apply_custom_classes(&root, "narrow");
        assert!(!root.class_list().contains("promo"));
        assert!(!root.class_list().contains("wide"));
        assert!(root.class_list().contains("narrow"));
        // Theme classes from the initial render survive.
        assert!(root.class_list().contains("theme-dark"));

        host.remove();
    }
}
