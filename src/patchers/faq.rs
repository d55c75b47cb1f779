//! FAQ section: a vertical list of disclosure items.

use crate::dom;
use crate::models::{map_arr, map_bool, map_str, SectionUpdate};
use crate::patchers::{common, list, PatchContext};
use crate::styles;
use serde_json::Value;
use web_sys::{Document, Element};

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    let section_id = root.get_attribute(dom::SECTION_ID_ATTR).unwrap_or_default();

    if let Some(content) = &update.content {
        if let Some(items) = map_arr(content, "items") {
            if let Some(container) = dom::field(root, "items") {
                list::reconcile(ctx.doc, &container, items, Some("id"), &build_item, &patch_item);
            }
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    if let Some(open_first) = map_bool(settings, "openFirst") {
        if let Some(container) = dom::field(root, "items") {
            for (i, item) in dom::item_nodes(&container).iter().enumerate() {
                dom::set_or_remove_attr(
                    item,
                    "open",
                    if open_first && i == 0 { Some("") } else { None },
                );
            }
        }
    }

    if let Some(color) = map_str(settings, "dividerColor") {
        let selector =
            styles::section_selector(&section_id, "[data-field=\"items\"] > [data-item-index]");
        let css = if color.is_empty() {
            String::new()
        } else {
            format!("{selector} {{ border-bottom: 1px solid {color}; }}\n")
        };
        styles::upsert(ctx.doc, &section_id, "divider", &css);
    }
}

fn build_item(doc: &Document, _index: usize) -> Option<Element> {
    let details = doc.create_element("details").ok()?;
    details.set_inner_html(
        r#"<summary data-item-field="question"></summary><div data-item-field="answer"></div>"#,
    );
    Some(details)
}

fn patch_item(el: &Element, entry: &Value) {
    let Some(entry) = entry.as_object() else {
        return;
    };

    if let Some(q) = map_str(entry, "question") {
        if let Some(node) = dom::item_field(el, "question") {
            dom::set_text(&node, q);
        }
    }
    if let Some(a) = map_str(entry, "answer") {
        if let Some(node) = dom::item_field(el, "answer") {
            dom::set_text(&node, a);
        }
    }
}
