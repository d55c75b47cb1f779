//! Document-wide chrome: footer region, global font, link accent.
//!
//! This sits outside the per-section engine; the footer is a fixed region
//! the reorder/remove engine never touches, and document-level style
//! blocks use a reserved owner id in the injector registry.

use crate::dom;
use crate::models::{map_bool, map_str};
use crate::patchers::common::set_or_clear_style;
use crate::styles;
use serde_json::{Map, Value};
use web_sys::{Document, Element};

pub(crate) fn apply(doc: &Document, settings: &Map<String, Value>) {
    if let Some(footer) = footer_region(doc) {
        if let Some(text) = map_str(settings, "footerText") {
            if let Some(node) = dom::field(&footer, "footer-text") {
                dom::set_text(&node, text);
            }
        }
        if let Some(color) = map_str(settings, "footerBackground") {
            set_or_clear_style(&footer, "background-color", color);
        }
        if let Some(color) = map_str(settings, "footerTextColor") {
            set_or_clear_style(&footer, "color", color);
        }
        if let Some(visible) = map_bool(settings, "footerVisible") {
            if visible {
                dom::remove_style(&footer, "display");
            } else {
                dom::set_style(&footer, "display", "none");
            }
        }
    }

    if let Some(family) = map_str(settings, "fontFamily") {
        if let Some(body) = doc.body() {
            set_or_clear_style(&body.into(), "font-family", family);
        }
    }

    if let Some(color) = map_str(settings, "linkColor") {
        let css = if color.is_empty() {
            String::new()
        } else {
            format!("[data-preview-root] a {{ color: {color}; }}\n")
        };
        styles::upsert(doc, styles::DOCUMENT_OWNER, "links", &css);
    }
}

fn footer_region(doc: &Document) -> Option<Element> {
    doc.query_selector(&format!("[{}=\"footer\"]", dom::FIXED_REGION_ATTR))
        .ok()
        .flatten()
}
