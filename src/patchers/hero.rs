//! Hero section: heading block, primary/secondary CTA, side image.

use crate::dom;
use crate::models::{map_str, SectionUpdate};
use crate::patchers::{common, PatchContext};
use crate::util::css_len;
use serde_json::{Map, Value};
use web_sys::Element;

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    if let Some(content) = &update.content {
        apply_content(root, content);
    }
    if let Some(settings) = &update.settings {
        apply_settings(root, settings);
    }
}

fn apply_content(root: &Element, content: &Map<String, Value>) {
    if let Some(url) = map_str(content, "image") {
        if let Some(img) = dom::field(root, "image") {
            if url.is_empty() {
                let _ = img.remove_attribute("src");
                dom::set_style(&img, "display", "none");
            } else {
                let _ = img.set_attribute("src", url);
                dom::remove_style(&img, "display");
            }
        }
    }

    if let Some(alt) = map_str(content, "imageAlt") {
        if let Some(img) = dom::field(root, "image") {
            let _ = img.set_attribute("alt", alt);
        }
    }
}

fn apply_settings(root: &Element, settings: &Map<String, Value>) {
    if let Some(pos) = map_str(settings, "imagePosition") {
        let list = root.class_list();
        let _ = list.remove_2("pv-hero--image-left", "pv-hero--image-right");
        match pos {
            "left" => {
                let _ = list.add_1("pv-hero--image-left");
            }
            "right" => {
                let _ = list.add_1("pv-hero--image-right");
            }
            _ => {}
        }
    }

    if let Some(value) = settings.get("minHeight") {
        match css_len(value, "px") {
            Some(v) => dom::set_style(root, "min-height", &v),
            None => dom::remove_style(root, "min-height"),
        }
    }

    // The primary CTA is the common `button` field; only the secondary CTA
    // is hero-specific.
    if let Some(button) = dom::field(root, "secondary-button") {
        if let Some(text) = map_str(settings, "secondaryButtonText") {
            dom::set_text(&button, text);
            if text.is_empty() {
                dom::set_style(&button, "display", "none");
            } else {
                dom::remove_style(&button, "display");
            }
        }
        if let Some(url) = map_str(settings, "secondaryButtonUrl") {
            dom::set_or_remove_attr(&button, "href", if url.is_empty() { None } else { Some(url) });
        }
        if let Some(color) = map_str(settings, "secondaryButtonBgColor") {
            common::set_or_clear_style(&button, "background-color", color);
        }
        if let Some(color) = map_str(settings, "secondaryButtonTextColor") {
            common::set_or_clear_style(&button, "color", color);
        }
    }
}
