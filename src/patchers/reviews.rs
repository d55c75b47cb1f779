//! Customer reviews section.

use crate::dom;
use crate::models::{map_arr, map_f64, map_str, SectionUpdate};
use crate::patchers::{common, list, PatchContext};
use crate::styles;
use serde_json::Value;
use web_sys::{Document, Element};

const MAX_STARS: usize = 5;

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    let section_id = root.get_attribute(dom::SECTION_ID_ATTR).unwrap_or_default();

    if let Some(content) = &update.content {
        if let Some(reviews) = map_arr(content, "reviews") {
            if let Some(grid) = dom::field(root, "grid") {
                list::reconcile(ctx.doc, &grid, reviews, Some("id"), &build_review, &patch_review);
            }
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    if let Some(color) = map_str(settings, "starColor") {
        let selector = styles::section_selector(&section_id, ".pv-star--filled");
        let css = if color.is_empty() {
            String::new()
        } else {
            format!("{selector} {{ color: {color}; }}\n")
        };
        styles::upsert(ctx.doc, &section_id, "stars", &css);
    }

    if let Some(color) = map_str(settings, "cardBackground") {
        let selector =
            styles::section_selector(&section_id, "[data-field=\"grid\"] > [data-item-index]");
        let css = if color.is_empty() {
            String::new()
        } else {
            format!("{selector} {{ background-color: {color}; }}\n")
        };
        styles::upsert(ctx.doc, &section_id, "cards", &css);
    }

    let desktop = map_f64(settings, "textSize");
    let mobile = map_f64(settings, "textSizeMobile");
    if desktop.is_some() || mobile.is_some() {
        let selector = styles::section_selector(&section_id, "[data-item-field=\"text\"]");
        styles::apply_size_pair(ctx.doc, &section_id, "review-text", &selector, desktop, mobile);
    }
}

fn build_review(doc: &Document, _index: usize) -> Option<Element> {
    let card = doc.create_element("article").ok()?;
    let stars = (0..MAX_STARS)
        .map(|_| r#"<span class="pv-star">★</span>"#)
        .collect::<String>();
    card.set_inner_html(&format!(
        r#"<img data-item-field="avatar" alt=""><span data-item-field="author"></span><span data-item-field="date"></span><div data-item-field="stars">{stars}</div><p data-item-field="text"></p>"#
    ));
    Some(card)
}

fn patch_review(el: &Element, entry: &Value) {
    let Some(entry) = entry.as_object() else {
        return;
    };

    for (key, field) in [("author", "author"), ("date", "date"), ("text", "text")] {
        if let Some(text) = map_str(entry, key) {
            if let Some(node) = dom::item_field(el, field) {
                dom::set_text(&node, text);
            }
        }
    }

    if let Some(src) = map_str(entry, "avatar") {
        if let Some(img) = dom::item_field(el, "avatar") {
            if src.is_empty() {
                let _ = img.remove_attribute("src");
                dom::set_style(&img, "display", "none");
            } else {
                let _ = img.set_attribute("src", src);
                dom::remove_style(&img, "display");
            }
        }
    }

    if let Some(rating) = entry.get("rating").and_then(crate::util::as_f64) {
        if let Some(stars) = dom::item_field(el, "stars") {
            set_star_fill(&stars, rating);
        }
    }
}

/// Fill the first `rating` stars; the node count is fixed at five.
fn set_star_fill(stars: &Element, rating: f64) {
    let filled = rating.clamp(0.0, MAX_STARS as f64).round() as usize;
    let mut child = stars.first_element_child();
    let mut i = 0;
    while let Some(star) = child {
        child = star.next_element_sibling();
        if i < filled {
            let _ = star.class_list().add_1("pv-star--filled");
        } else {
            let _ = star.class_list().remove_1("pv-star--filled");
        }
        i += 1;
    }
}
