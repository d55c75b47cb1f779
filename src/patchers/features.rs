//! Feature grid section.

use crate::dom;
use crate::models::{map_arr, map_f64, map_str, SectionUpdate};
use crate::patchers::{common, list, PatchContext};
use crate::styles;
use serde_json::Value;
use web_sys::{Document, Element};

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    let section_id = root.get_attribute(dom::SECTION_ID_ATTR).unwrap_or_default();

    if let Some(content) = &update.content {
        if let Some(features) = map_arr(content, "features") {
            if let Some(grid) = dom::field(root, "grid") {
                list::reconcile(
                    ctx.doc,
                    &grid,
                    features,
                    Some("id"),
                    &build_feature,
                    &patch_feature,
                );
            }
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    if let Some(color) = map_str(settings, "iconColor") {
        let selector = styles::section_selector(&section_id, "[data-item-field=\"icon\"]");
        let css = if color.is_empty() {
            String::new()
        } else {
            format!("{selector} {{ color: {color}; }}\n")
        };
        styles::upsert(ctx.doc, &section_id, "icon-color", &css);
    }

    if let Some(size) = map_f64(settings, "iconSize") {
        let selector = styles::section_selector(&section_id, "[data-item-field=\"icon\"]");
        let css = format!("{selector} {{ font-size: {size}px; }}\n");
        styles::upsert(ctx.doc, &section_id, "icon-size", &css);
    }
}

fn build_feature(doc: &Document, _index: usize) -> Option<Element> {
    let item = doc.create_element("div").ok()?;
    item.set_inner_html(
        r#"<span data-item-field="icon"></span><h3 data-item-field="title"></h3><p data-item-field="text"></p>"#,
    );
    Some(item)
}

fn patch_feature(el: &Element, entry: &Value) {
    let Some(entry) = entry.as_object() else {
        return;
    };

    for (key, field) in [("icon", "icon"), ("title", "title"), ("text", "text")] {
        if let Some(text) = map_str(entry, key) {
            if let Some(node) = dom::item_field(el, field) {
                dom::set_text(&node, text);
            }
        }
    }
}
