//! Pricing table section.
//!
//! Plans reconcile into the grid; each plan owns a nested feature list
//! that reconciles by index (features are plain strings, no stable ids).

use crate::dom;
use crate::models::{map_bool, map_str, SectionUpdate};
use crate::patchers::{apply_category_chips, common, list, PatchContext};
use crate::styles;
use serde_json::Value;
use web_sys::{Document, Element};

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);
    apply_category_chips(ctx, root);

    let section_id = root.get_attribute(dom::SECTION_ID_ATTR).unwrap_or_default();

    if let Some(content) = &update.content {
        if let Some(plans) = content.get("plans").and_then(|v| v.as_array()) {
            if let Some(grid) = dom::field(root, "grid") {
                let doc = ctx.doc;
                let patch = move |el: &Element, entry: &Value| patch_plan(doc, el, entry);
                list::reconcile(doc, &grid, plans, Some("id"), &build_plan, &patch);
            }
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    if let Some(color) = map_str(settings, "accentColor") {
        let highlighted = styles::section_selector(&section_id, ".pv-plan--highlighted");
        let cta = styles::section_selector(&section_id, "[data-item-field=\"cta\"]");
        let css = if color.is_empty() {
            String::new()
        } else {
            format!(
                "{highlighted} {{ border-color: {color}; }}\n{cta} {{ background-color: {color}; }}\n"
            )
        };
        styles::upsert(ctx.doc, &section_id, "accent", &css);
    }
}

fn build_plan(doc: &Document, _index: usize) -> Option<Element> {
    let plan = doc.create_element("div").ok()?;
    plan.set_inner_html(
        r#"<h3 data-item-field="name"></h3><div><span data-item-field="price"></span><span data-item-field="period"></span></div><ul data-item-field="features"></ul><a data-item-field="cta"></a>"#,
    );
    Some(plan)
}

fn patch_plan(doc: &Document, el: &Element, entry: &Value) {
    let Some(entry) = entry.as_object() else {
        return;
    };

    for (key, field) in [("name", "name"), ("price", "price"), ("period", "period")] {
        if let Some(text) = map_str(entry, key) {
            if let Some(node) = dom::item_field(el, field) {
                dom::set_text(&node, text);
            }
        }
    }

    if let Some(cta) = dom::item_field(el, "cta") {
        if let Some(text) = map_str(entry, "ctaText") {
            dom::set_text(&cta, text);
        }
        if let Some(url) = map_str(entry, "ctaUrl") {
            dom::set_or_remove_attr(&cta, "href", if url.is_empty() { None } else { Some(url) });
        }
    }

    if let Some(highlighted) = map_bool(entry, "highlighted") {
        let list = el.class_list();
        if highlighted {
            let _ = list.add_1("pv-plan--highlighted");
        } else {
            let _ = list.remove_1("pv-plan--highlighted");
        }
    }

    if let Some(features) = entry.get("features").and_then(|v| v.as_array()) {
        if let Some(ul) = dom::item_field(el, "features") {
            list::reconcile(doc, &ul, features, None, &build_feature_line, &patch_feature_line);
        }
    }
}

fn build_feature_line(doc: &Document, _index: usize) -> Option<Element> {
    doc.create_element("li").ok()
}

fn patch_feature_line(el: &Element, entry: &Value) {
    if let Some(text) = entry.as_str() {
        dom::set_text(el, text);
    }
}
