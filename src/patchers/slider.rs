//! Slider/carousel section.
//!
//! Column math (visible slides, gap) needs a breakpoint rule, so it lives
//! in a per-instance style block. The last-applied knob values are
//! recorded on the track element so a sparse update of one knob does not
//! clobber the others. Playback itself belongs to the theme script; the
//! engine only reflects the flags.

use crate::dom;
use crate::models::{map_arr, map_bool, map_f64, map_str, SectionUpdate};
use crate::patchers::{common, list, PatchContext};
use crate::styles;
use serde_json::{Map, Value};
use web_sys::{Document, Element};

const PER_VIEW_ATTR: &str = "data-per-view";
const GAP_ATTR: &str = "data-gap";
const THEME_ATTRS: &[(&str, &str)] = &[
    ("arrowColor", "data-arrow-color"),
    ("arrowBgColor", "data-arrow-bg"),
    ("dotColor", "data-dot-color"),
    ("dotActiveColor", "data-dot-active-color"),
];

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    let section_id = root.get_attribute(dom::SECTION_ID_ATTR).unwrap_or_default();
    let Some(track) = dom::field(root, "track") else {
        return;
    };

    if let Some(content) = &update.content {
        if let Some(slides) = map_arr(content, "slides") {
            list::reconcile(ctx.doc, &track, slides, Some("id"), &build_slide, &patch_slide);
            sync_dots(ctx.doc, root, slides.len());
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    apply_columns(ctx, &section_id, &track, settings);
    apply_theme(ctx, &section_id, &track, settings);

    if let Some(autoplay) = map_bool(settings, "autoplay") {
        dom::set_or_remove_attr(&track, "data-autoplay", if autoplay { Some("") } else { None });
    }
    if let Some(ms) = map_f64(settings, "autoplaySpeed") {
        let _ = track.set_attribute("data-autoplay-ms", &(ms as u64).to_string());
    }
    if let Some(looping) = map_bool(settings, "loop") {
        dom::set_or_remove_attr(&track, "data-loop", if looping { Some("") } else { None });
    }
}

fn apply_columns(
    ctx: &PatchContext,
    section_id: &str,
    track: &Element,
    settings: &Map<String, Value>,
) {
    let per_view_update = map_f64(settings, "slidesPerView");
    let gap_update = map_f64(settings, "slideGap");
    if per_view_update.is_none() && gap_update.is_none() {
        return;
    }

    let per_view = per_view_update
        .or_else(|| track.get_attribute(PER_VIEW_ATTR).and_then(|v| v.parse().ok()))
        .unwrap_or(1.0)
        .max(1.0) as u32;
    let gap = gap_update
        .or_else(|| track.get_attribute(GAP_ATTR).and_then(|v| v.parse().ok()))
        .unwrap_or(0.0)
        .max(0.0);

    let _ = track.set_attribute(PER_VIEW_ATTR, &per_view.to_string());
    let _ = track.set_attribute(GAP_ATTR, &gap.to_string());

    let css = styles::slider_columns_css(section_id, per_view, gap);
    styles::upsert(ctx.doc, section_id, "columns", &css);
}

fn apply_theme(
    ctx: &PatchContext,
    section_id: &str,
    track: &Element,
    settings: &Map<String, Value>,
) {
    let mut touched = false;
    for (key, attr) in THEME_ATTRS {
        if let Some(color) = map_str(settings, key) {
            touched = true;
            dom::set_or_remove_attr(track, attr, if color.is_empty() { None } else { Some(color) });
        }
    }
    if !touched {
        return;
    }

    let get = |attr: &str| track.get_attribute(attr);
    let css = styles::slider_theme_css(
        section_id,
        get("data-arrow-color").as_deref(),
        get("data-arrow-bg").as_deref(),
        get("data-dot-color").as_deref(),
        get("data-dot-active-color").as_deref(),
    );
    styles::upsert(ctx.doc, section_id, "theme", &css);
}

fn build_slide(doc: &Document, _index: usize) -> Option<Element> {
    let slide = doc.create_element("div").ok()?;
    let _ = slide.set_attribute("class", "pv-slide");
    slide.set_inner_html(
        r#"<img data-item-field="image" alt=""><h3 data-item-field="heading"></h3><p data-item-field="text"></p><a data-item-field="button"></a>"#,
    );
    Some(slide)
}

fn patch_slide(el: &Element, entry: &Value) {
    let Some(entry) = entry.as_object() else {
        return;
    };

    if let Some(src) = map_str(entry, "image") {
        if let Some(img) = dom::item_field(el, "image") {
            if src.is_empty() {
                let _ = img.remove_attribute("src");
            } else if img.get_attribute("src").as_deref() != Some(src) {
                let _ = img.set_attribute("src", src);
            }
        }
    }

    for (key, field) in [("heading", "heading"), ("text", "text")] {
        if let Some(text) = map_str(entry, key) {
            if let Some(node) = dom::item_field(el, field) {
                dom::set_text(&node, text);
            }
        }
    }

    if let Some(button) = dom::item_field(el, "button") {
        if let Some(text) = map_str(entry, "buttonText") {
            dom::set_text(&button, text);
            if text.is_empty() {
                dom::set_style(&button, "display", "none");
            } else {
                dom::remove_style(&button, "display");
            }
        }
        if let Some(url) = map_str(entry, "buttonUrl") {
            dom::set_or_remove_attr(&button, "href", if url.is_empty() { None } else { Some(url) });
        }
    }
}

/// One dot per slide. Dots are stateless chrome except for the active
/// index, which is carried over when it still exists.
fn sync_dots(doc: &Document, root: &Element, count: usize) {
    let Some(dots) = dom::field(root, "dots") else {
        return;
    };

    let active = {
        let mut active = None;
        let mut child = dots.first_element_child();
        let mut i = 0usize;
        while let Some(el) = child {
            child = el.next_element_sibling();
            if el.has_attribute("data-active") {
                active = Some(i);
            }
            i += 1;
        }
        active.unwrap_or(0)
    };

    dots.set_inner_html("");
    for i in 0..count {
        let Ok(dot) = doc.create_element("button") else {
            continue;
        };
        let _ = dot.set_attribute("data-carousel-dot", "");
        let _ = dot.set_attribute("type", "button");
        if i == active.min(count.saturating_sub(1)) {
            let _ = dot.set_attribute("data-active", "");
        }
        let _ = dots.append_child(&dot);
    }
}
