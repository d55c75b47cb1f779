//! Placeholder synthesizer.
//!
//! A section added in the editor exists in the preview before it is ever
//! persisted. The synthesizer builds the full marker-bearing subtree for
//! the type, inserts it at the right position, and then replays the
//! initial payload through the normal dispatcher — from then on the new
//! section is indistinguishable from server-rendered markup.

use crate::dom;
use crate::models::{SectionInit, SectionType};
use crate::patchers;
use crate::util::escape_html;
use web_sys::{Document, Element};

/// Pure markup builder for a new section. Unknown types get a minimal
/// generic skeleton instead of failing the insert.
pub(crate) fn markup_for(init: &SectionInit) -> String {
    let section_type = init.parsed_type();
    let type_tag = match section_type {
        Some(t) => t.as_ref().to_string(),
        None => escape_html(&init.section_type),
    };

    let title = escape_html(init.title.as_deref().unwrap_or_else(|| default_title(section_type)));
    let subtitle = escape_html(init.subtitle.as_deref().unwrap_or(""));
    let body = body_markup(section_type);

    format!(
        r#"<section data-section-id="{id}" data-section-type="{type_tag}" class="pv-section pv-section--{type_tag}"><div data-field="background-media"></div><div data-field="overlay"></div><div class="pv-section__inner"><h2 data-field="title">{title}</h2><p data-field="subtitle">{subtitle}</p>{body}</div></section>"#,
        id = escape_html(&init.section_id),
    )
}

fn default_title(section_type: Option<SectionType>) -> &'static str {
    match section_type {
        Some(SectionType::Hero) => "Welcome to our store",
        Some(SectionType::Gallery) => "Gallery",
        Some(SectionType::Reviews) => "What customers say",
        Some(SectionType::Slider) => "Featured",
        Some(SectionType::Features) => "Why shop with us",
        Some(SectionType::Faq) => "Frequently asked questions",
        Some(SectionType::Pricing) => "Plans",
        Some(SectionType::Contact) => "Get in touch",
        Some(SectionType::Video) | Some(SectionType::Text) | None => "",
    }
}

fn body_markup(section_type: Option<SectionType>) -> &'static str {
    match section_type {
        Some(SectionType::Hero) => {
            r#"<div class="pv-hero__actions"><a data-field="button"></a><a data-field="secondary-button"></a></div><img data-field="image" alt="">"#
        }
        Some(SectionType::Text) => r#"<div data-field="body"></div>"#,
        Some(SectionType::Gallery) => {
            r#"<div data-field="categories"></div><div data-field="grid" class="pv-grid"></div>"#
        }
        Some(SectionType::Reviews) => r#"<div data-field="grid" class="pv-grid"></div>"#,
        Some(SectionType::Slider) => {
            r#"<button type="button" data-carousel-arrow="prev">‹</button><div data-field="track"></div><button type="button" data-carousel-arrow="next">›</button><div data-field="dots"></div>"#
        }
        Some(SectionType::Features) => r#"<div data-field="grid" class="pv-grid"></div>"#,
        Some(SectionType::Faq) => r#"<div data-field="items"></div>"#,
        Some(SectionType::Pricing) => {
            r#"<div data-field="categories"></div><div data-field="grid" class="pv-grid"></div>"#
        }
        Some(SectionType::Contact) => {
            r#"<form><label data-field="name-label"></label><input data-field="name-input" type="text"><label data-field="email-label"></label><input data-field="email-input" type="email"><label data-field="message-label"></label><textarea data-field="message-input"></textarea><button type="button" data-field="submit"></button><div data-field="success"></div></form>"#
        }
        Some(SectionType::Video) => {
            r#"<div data-field="frame"><iframe data-field="embed" style="display: none;"></iframe><video data-field="player" style="display: none;"></video></div>"#
        }
        None => r#"<div data-field="body"></div>"#,
    }
}

/// Sample content for list types, so a brand-new section shows something
/// editable instead of an empty band. Only used when the add carries no
/// content of its own; the first real edit replaces it wholesale.
pub(crate) fn default_content(section_type: SectionType) -> Option<serde_json::Value> {
    use serde_json::json;

    let content = match section_type {
        SectionType::Gallery => json!({
            "images": [{ "src": "", "caption": "First image" }, { "src": "", "caption": "Second image" }]
        }),
        SectionType::Reviews => json!({
            "reviews": [
                { "author": "A happy customer", "rating": 5, "text": "Tell visitors what people think of your store." }
            ]
        }),
        SectionType::Slider => json!({
            "slides": [{ "heading": "First slide" }, { "heading": "Second slide" }]
        }),
        SectionType::Features => json!({
            "features": [
                { "icon": "★", "title": "A feature", "text": "Describe it here." },
                { "icon": "★", "title": "Another feature", "text": "Describe it here." }
            ]
        }),
        SectionType::Faq => json!({
            "items": [{ "question": "A common question?", "answer": "The answer." }]
        }),
        SectionType::Pricing => json!({
            "plans": [{ "name": "Basic", "price": "$0", "features": ["First perk"] }]
        }),
        _ => return None,
    };
    Some(content)
}

/// The add payload replayed as a normal update, seeded with sample content
/// when the editor sent none.
fn seeded_update(init: &SectionInit) -> crate::models::SectionUpdate {
    let mut update = init.as_update();

    if update.content.is_none() {
        if let Some(defaults) = init.parsed_type().and_then(default_content) {
            update.content = defaults.as_object().cloned();
        }
    }

    update
}

/// Insert the placeholder and replay the initial payload.
///
/// Position: after the given sibling's root, else before the trailing
/// fixed region (footer), never after it. An id that already has a root is
/// treated as a duplicate add and only replays the payload.
pub(crate) fn insert(doc: &Document, init: &SectionInit) {
    if dom::find_section_root(doc, &init.section_id).is_none() {
        let Some(root) = build_element(doc, init) else {
            return;
        };
        let Some(container) = dom::preview_root(doc) else {
            return;
        };

        let after = init
            .after_section_id
            .as_deref()
            .and_then(|id| dom::find_section_root(doc, id));

        match after {
            Some(sibling) => {
                let _ = container.insert_before(&root, sibling.next_sibling().as_ref());
            }
            None => {
                let footer = trailing_fixed_region(&container);
                let _ = container.insert_before(&root, footer.as_ref());
            }
        }
    }

    patchers::dispatch(
        doc,
        &init.section_id,
        &seeded_update(init),
        init.categories.as_deref(),
    );
}

fn build_element(doc: &Document, init: &SectionInit) -> Option<Element> {
    let host = doc.create_element("div").ok()?;
    host.set_inner_html(&markup_for(init));
    host.first_element_child()
}

fn trailing_fixed_region(container: &Element) -> Option<web_sys::Node> {
    let mut child = container.first_element_child();
    while let Some(el) = child {
        if el.get_attribute(dom::FIXED_REGION_ATTR).as_deref() == Some("footer") {
            return Some(el.into());
        }
        child = el.next_element_sibling();
    }
    None
}


// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn init_json(v: serde_json::Value) -> SectionInit {
        serde_json::from_value(v).unwrap()
    }

    fn mount_page(doc: &Document) -> Element {
        let host = doc.create_element("div").unwrap();
        host.set_attribute("data-preview-root", "").unwrap();
        host.set_inner_html(
            r#"<header data-fixed-region="header"></header>
               <section data-section-id="pa" data-section-type="text"></section>
               <footer data-fixed-region="footer"></footer>"#,
        );
        doc.body().unwrap().append_child(&host).unwrap();
        host
    }

    #[wasm_bindgen_test]
    fn test_insert_lands_before_footer_by_default() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = mount_page(&doc);

        insert(
            &doc,
            &init_json(serde_json::json!({
                "sectionId": "pnew",
                "sectionType": "features",
                "title": "Why us"
            })),
        );

        let root = dom::find_section_root(&doc, "pnew").expect("placeholder inserted");
        let next = root.next_element_sibling().unwrap();
        assert_eq!(next.get_attribute("data-fixed-region").as_deref(), Some("footer"));
        assert_eq!(
            dom::field(&root, "title").unwrap().text_content().as_deref(),
            Some("Why us")
        );

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_insert_after_named_sibling() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = mount_page(&doc);

        insert(
            &doc,
            &init_json(serde_json::json!({
                "sectionId": "pnew2",
                "sectionType": "faq",
                "afterSectionId": "pa"
            })),
        );

        let sibling = dom::find_section_root(&doc, "pa").unwrap();
        let next = sibling.next_element_sibling().unwrap();
        assert_eq!(next.get_attribute("data-section-id").as_deref(), Some("pnew2"));

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_updates_flow_through_dispatcher_after_insert() {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = mount_page(&doc);

        insert(
            &doc,
            &init_json(serde_json::json!({
                "sectionId": "pnew3",
                "sectionType": "gallery",
                "content": { "images": [{ "src": "a.jpg" }] }
            })),
        );

        let root = dom::find_section_root(&doc, "pnew3").unwrap();
        let grid = dom::field(&root, "grid").unwrap();
        assert_eq!(dom::item_nodes(&grid).len(), 1);

        // A follow-up keystroke patches the placeholder like any section.
        let u = serde_json::from_value(serde_json::json!({
            "content": { "images": [{ "src": "a.jpg" }, { "src": "b.jpg" }] }
        }))
        .unwrap();
        crate::patchers::dispatch(&doc, "pnew3", &u, None);
        assert_eq!(dom::item_nodes(&grid).len(), 2);

        host.remove();
    }
}
