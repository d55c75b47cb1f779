//! Common field applier.
//!
//! The cross-type subset of an update: heading text, visibility,
//! typography, background media and color, spacing, identity, grid and
//! button chrome. Type patchers layer on top of this and only ever touch
//! fields it does not own. Both the registry path and the legacy fallback
//! call this same implementation.

use crate::dom;
use crate::models::{map_bool, map_f64, map_str, SectionUpdate};
use crate::patchers::PatchContext;
use crate::styles;
use crate::util::{clamp01, css_len};
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use web_sys::Element;

const SPACING_KEYS: &[(&str, &str)] = &[
    ("marginTop", "margin-top"),
    ("marginRight", "margin-right"),
    ("marginBottom", "margin-bottom"),
    ("marginLeft", "margin-left"),
    ("paddingTop", "padding-top"),
    ("paddingRight", "padding-right"),
    ("paddingBottom", "padding-bottom"),
    ("paddingLeft", "padding-left"),
];

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    apply_heading_text(root, update);

    if let Some(active) = update.is_active {
        toggle_display(root, active);
    }

    let Some(settings) = &update.settings else {
        return;
    };

    if let Some(hidden) = map_bool(settings, "hidden") {
        toggle_display(root, !hidden);
    }

    apply_typography(ctx, root, settings);
    apply_background(ctx, root, settings);
    apply_spacing(root, settings);
    apply_layout(root, settings);
    apply_identity(root, settings);
    apply_grid(root, settings);
    apply_button(root, settings);
}

fn toggle_display(root: &Element, visible: bool) {
    if visible {
        dom::remove_style(root, "display");
    } else {
        dom::set_style(root, "display", "none");
    }
}

/// Title/subtitle text. An explicit empty string clears the text and hides
/// the node so empty headings do not leave blank rows in the layout.
fn apply_heading_text(root: &Element, update: &SectionUpdate) {
    for (value, field_name) in [(&update.title, "title"), (&update.subtitle, "subtitle")] {
        let Some(text) = value else { continue };
        let Some(el) = dom::field(root, field_name) else {
            continue;
        };
        dom::set_text(&el, text);
        if text.is_empty() {
            dom::set_style(&el, "display", "none");
        } else {
            dom::remove_style(&el, "display");
        }
    }
}

fn apply_typography(ctx: &PatchContext, root: &Element, settings: &Map<String, Value>) {
    let section_id = root
        .get_attribute(dom::SECTION_ID_ATTR)
        .unwrap_or_default();

    for (field_name, color_key, weight_key, size_key, mobile_key, concern) in [
        (
            "title",
            "titleColor",
            "titleWeight",
            "titleSize",
            "titleSizeMobile",
            "title-size",
        ),
        (
            "subtitle",
            "subtitleColor",
            "subtitleWeight",
            "subtitleSize",
            "subtitleSizeMobile",
            "subtitle-size",
        ),
    ] {
        if let Some(el) = dom::field(root, field_name) {
            if let Some(color) = map_str(settings, color_key) {
                set_or_clear_style(&el, "color", color);
            }
            if settings.contains_key(weight_key) {
                match settings.get(weight_key).and_then(|v| css_len(v, "")) {
                    Some(w) => dom::set_style(&el, "font-weight", &w),
                    None => dom::remove_style(&el, "font-weight"),
                }
            }
        }

        // Responsive sizes cannot be inline; they go through the injector
        // even when the field node is currently absent (the rule is scoped
        // by attribute selector and simply matches nothing until it
        // appears).
        let desktop = map_f64(settings, size_key);
        let mobile = map_f64(settings, mobile_key);
        if desktop.is_some() || mobile.is_some() {
            let selector =
                styles::section_selector(&section_id, &format!("[data-field=\"{field_name}\"]"));
            styles::apply_size_pair(ctx.doc, &section_id, concern, &selector, desktop, mobile);
        }
    }
}

fn apply_background(ctx: &PatchContext, root: &Element, settings: &Map<String, Value>) {
    let media = dom::field(root, "background-media");

    if let Some(url) = map_str(settings, "backgroundImage") {
        if let Some(media) = &media {
            if url.is_empty() {
                dom::remove_style(media, "background-image");
            } else {
                dom::set_style(media, "background-image", &format!("url(\"{url}\")"));
            }
        }
    }

    if let Some(url) = map_str(settings, "backgroundVideo") {
        if let Some(media) = &media {
            apply_background_video(ctx, media, url);
        }
    }

    if media.is_some() {
        refresh_has_media(root);
    }

    if let Some(color) = map_str(settings, "backgroundColor") {
        // Sections with background media keep the media visible; the color
        // only applies once the media is cleared.
        if !dom::has_media(root) {
            set_or_clear_style(root, "background-color", color);
        }
    }

    if let Some(opacity) = map_f64(settings, "overlayOpacity") {
        if let Some(overlay) = dom::field(root, "overlay") {
            dom::set_style(&overlay, "opacity", &clamp01(opacity).to_string());
        }
    }
}

fn apply_background_video(ctx: &PatchContext, media: &Element, url: &str) {
    let existing = media.query_selector("video").ok().flatten();

    if url.is_empty() {
        if let Some(v) = existing {
            v.remove();
        }
        return;
    }

    let video = match existing {
        Some(v) => v,
        None => {
            let Ok(v) = ctx.doc.create_element("video") else {
                return;
            };
            let _ = v.set_attribute("autoplay", "");
            let _ = v.set_attribute("muted", "");
            let _ = v.set_attribute("loop", "");
            let _ = v.set_attribute("playsinline", "");
            if media.append_child(&v).is_err() {
                return;
            }
            v
        }
    };

    if video.get_attribute("src").as_deref() != Some(url) {
        let _ = video.set_attribute("src", url);
    }
}

/// Recompute the has-media flag from the media layer's actual state, so
/// image and video updates arriving in any order agree on it.
fn refresh_has_media(root: &Element) {
    let Some(media) = dom::field(root, "background-media") else {
        return;
    };

    let has_image = media
        .dyn_ref::<web_sys::HtmlElement>()
        .map(|h| !h.style().get_property_value("background-image").unwrap_or_default().is_empty())
        .unwrap_or(false);
    let has_video = media.query_selector("video").ok().flatten().is_some();

    let has = has_image || has_video;
    dom::set_has_media(root, has);
    if has {
        // Media covers the section; a stale inline color underneath would
        // flash through while the media loads.
        dom::remove_style(root, "background-color");
    }
}

fn apply_spacing(root: &Element, settings: &Map<String, Value>) {
    let unit = map_str(settings, "spacingUnit").unwrap_or("px");

    for (key, prop) in SPACING_KEYS {
        if let Some(value) = settings.get(*key) {
            match css_len(value, unit) {
                Some(v) => dom::set_style(root, prop, &v),
                None => dom::remove_style(root, prop),
            }
        }
    }
}

fn apply_layout(root: &Element, settings: &Map<String, Value>) {
    if let Some(value) = settings.get("zIndex") {
        match css_len(value, "") {
            Some(v) => dom::set_style(root, "z-index", &v),
            None => dom::remove_style(root, "z-index"),
        }
    }

    if let Some(align) = map_str(settings, "textAlign") {
        set_or_clear_style(root, "text-align", align);
    }
}

fn apply_identity(root: &Element, settings: &Map<String, Value>) {
    if let Some(custom_id) = map_str(settings, "customId") {
        if custom_id.is_empty() {
            let _ = root.remove_attribute("id");
        } else {
            root.set_id(custom_id);
        }
    }

    if let Some(classes) = map_str(settings, "customClass") {
        dom::apply_custom_classes(root, classes);
    }
}

fn apply_grid(root: &Element, settings: &Map<String, Value>) {
    let Some(grid) = dom::field(root, "grid") else {
        return;
    };

    if let Some(cols) = map_f64(settings, "gridColumns") {
        let cols = (cols.max(1.0)) as u32;
        dom::set_style(
            &grid,
            "grid-template-columns",
            &format!("repeat({cols}, minmax(0, 1fr))"),
        );
    }

    if let Some(value) = settings.get("gridGap") {
        match css_len(value, "px") {
            Some(v) => dom::set_style(&grid, "gap", &v),
            None => dom::remove_style(&grid, "gap"),
        }
    }
}

/// Section-level button chrome. Per-item buttons inside lists are marked
/// `data-item-field` and belong to their type patcher.
fn apply_button(root: &Element, settings: &Map<String, Value>) {
    let Some(button) = dom::field(root, "button") else {
        return;
    };

    if let Some(text) = map_str(settings, "buttonText") {
        dom::set_text(&button, text);
        if text.is_empty() {
            dom::set_style(&button, "display", "none");
        } else {
            dom::remove_style(&button, "display");
        }
    }

    if let Some(url) = map_str(settings, "buttonUrl") {
        dom::set_or_remove_attr(&button, "href", if url.is_empty() { None } else { Some(url) });
    }

    if let Some(color) = map_str(settings, "buttonBgColor") {
        set_or_clear_style(&button, "background-color", color);
    }
    if let Some(color) = map_str(settings, "buttonTextColor") {
        set_or_clear_style(&button, "color", color);
    }
    if let Some(value) = settings.get("buttonRadius") {
        match css_len(value, "px") {
            Some(v) => dom::set_style(&button, "border-radius", &v),
            None => dom::remove_style(&button, "border-radius"),
        }
    }
}

pub(crate) fn set_or_clear_style(el: &Element, prop: &str, value: &str) {
    if value.is_empty() {
        dom::remove_style(el, prop);
    } else {
        dom::set_style(el, prop, value);
    }
}
