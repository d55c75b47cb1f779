//! Scoped style injector.
//!
//! Inline styles cannot express "size A below the breakpoint, size B
//! above it", so responsive properties go through one `<style>` element
//! per `(section, concern)` pair. The element is created lazily, fully
//! overwritten on every relevant update (never appended to), and removed
//! when the owning section is removed. Scoping every rule under the
//! section-id attribute selector keeps sibling sections of the same type
//! from colliding.

use crate::util::escape_attr_value;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

pub(crate) const MOBILE_BREAKPOINT_PX: u32 = 768;
pub(crate) const MOBILE_FALLBACK_RATIO: f64 = 0.75;

/// Owner id for document-level (theme) style blocks.
pub(crate) const DOCUMENT_OWNER: &str = "document";

const OWNER_ATTR: &str = "data-style-owner";
const DESKTOP_PX_ATTR: &str = "data-desktop-px";
const MOBILE_PX_ATTR: &str = "data-mobile-px";

fn style_element_id(owner: &str, concern: &str) -> String {
    format!("pv-style-{owner}-{concern}")
}

/// Create-or-overwrite the singleton block for `(owner, concern)`.
pub(crate) fn upsert(doc: &Document, owner: &str, concern: &str, css: &str) -> Option<Element> {
    let id = style_element_id(owner, concern);

    let el = match doc.get_element_by_id(&id) {
        Some(el) => el,
        None => {
            let el = doc.create_element("style").ok()?;
            el.set_id(&id);
            let _ = el.set_attribute(OWNER_ATTR, owner);
            let head = doc.head()?;
            head.append_child(&el).ok()?;
            el
        }
    };

    el.set_text_content(Some(css));
    Some(el)
}

/// Remove every style block owned by a section. Called on SECTION_REMOVE
/// so long editing sessions do not accumulate orphaned blocks.
pub(crate) fn dispose_owner(doc: &Document, owner: &str) {
    if let Ok(list) =
        doc.query_selector_all(&format!("style[{}=\"{}\"]", OWNER_ATTR, escape_attr_value(owner)))
    {
        for i in 0..list.length() {
            if let Some(node) = list.item(i) {
                if let Some(el) = node.dyn_ref::<Element>() {
                    el.remove();
                }
            }
        }
    }
}

/// Mobile size inferred from desktop when the editor never supplied one.
pub(crate) fn mobile_fallback(desktop_px: f64) -> f64 {
    (desktop_px * MOBILE_FALLBACK_RATIO).round()
}

/// Attribute selector prefix scoping a rule to one section instance.
pub(crate) fn section_selector(section_id: &str, suffix: &str) -> String {
    let base = format!("[data-section-id=\"{}\"]", escape_attr_value(section_id));
    if suffix.is_empty() {
        base
    } else {
        format!("{base} {suffix}")
    }
}

/// Desktop/mobile font-size pair for one selector.
pub(crate) fn size_pair_css(selector: &str, desktop_px: Option<f64>, mobile_px: f64) -> String {
    let mut css = String::new();
    if let Some(d) = desktop_px {
        css.push_str(&format!("{selector} {{ font-size: {d}px; }}\n"));
    }
    css.push_str(&format!(
        "@media (max-width: {MOBILE_BREAKPOINT_PX}px) {{ {selector} {{ font-size: {mobile_px}px; }} }}\n"
    ));
    css
}

/// Slider track column math: item flex-basis from visible-slide count and
/// gap, collapsing to one slide per view below the breakpoint.
pub(crate) fn slider_columns_css(section_id: &str, per_view: u32, gap_px: f64) -> String {
    let per_view = per_view.max(1);
    let track = section_selector(section_id, "[data-field=\"track\"]");
    let item = section_selector(section_id, "[data-field=\"track\"] > [data-item-index]");
    let occupied = gap_px * (per_view.saturating_sub(1)) as f64;

    format!(
        "{track} {{ display: flex; gap: {gap_px}px; overflow: hidden; }}\n\
         {item} {{ flex: 0 0 calc((100% - {occupied}px) / {per_view}); min-width: 0; }}\n\
         @media (max-width: {MOBILE_BREAKPOINT_PX}px) {{ {item} {{ flex-basis: 100%; }} }}\n"
    )
}

/// Arrow/dot color theme for a slider instance. Only provided parts emit
/// rules; an empty result means "leave the block alone".
pub(crate) fn slider_theme_css(
    section_id: &str,
    arrow_color: Option<&str>,
    arrow_bg: Option<&str>,
    dot_color: Option<&str>,
    dot_active_color: Option<&str>,
) -> String {
    let mut css = String::new();

    let arrow = section_selector(section_id, "[data-carousel-arrow]");
    if let Some(c) = arrow_color {
        css.push_str(&format!("{arrow} {{ color: {c}; }}\n"));
    }
    if let Some(c) = arrow_bg {
        css.push_str(&format!("{arrow} {{ background-color: {c}; }}\n"));
    }

    let dot = section_selector(section_id, "[data-carousel-dot]");
    if let Some(c) = dot_color {
        css.push_str(&format!("{dot} {{ background-color: {c}; }}\n"));
    }
    if let Some(c) = dot_active_color {
        css.push_str(&format!(
            "{dot}[data-active] {{ background-color: {c}; }}\n"
        ));
    }

    css
}

pub(crate) fn line_clamp_css(selector: &str, lines: u32) -> String {
    format!(
        "{selector} {{ display: -webkit-box; -webkit-line-clamp: {lines}; \
         -webkit-box-orient: vertical; overflow: hidden; }}\n"
    )
}

/// Upsert a responsive size pair, remembering supplied values on the style
/// element so later sparse updates can fill in the side they omit.
///
/// The fallback ratio applies only when a mobile value was *never*
/// supplied; an explicitly supplied mobile survives desktop-only updates.
pub(crate) fn apply_size_pair(
    doc: &Document,
    owner: &str,
    concern: &str,
    selector: &str,
    desktop_px: Option<f64>,
    mobile_px: Option<f64>,
) {
    let id = style_element_id(owner, concern);
    let existing = doc.get_element_by_id(&id);

    let recorded_desktop = existing
        .as_ref()
        .and_then(|el| el.get_attribute(DESKTOP_PX_ATTR))
        .and_then(|v| v.parse::<f64>().ok());
    let recorded_mobile = existing
        .as_ref()
        .and_then(|el| el.get_attribute(MOBILE_PX_ATTR))
        .and_then(|v| v.parse::<f64>().ok());

    let desktop = desktop_px.or(recorded_desktop);
    let explicit_mobile = mobile_px.or(recorded_mobile);

    let mobile = match (explicit_mobile, desktop) {
        (Some(m), _) => m,
        (None, Some(d)) => mobile_fallback(d),
        (None, None) => return,
    };

    let css = size_pair_css(selector, desktop, mobile);
    if let Some(el) = upsert(doc, owner, concern, &css) {
        if let Some(d) = desktop {
            let _ = el.set_attribute(DESKTOP_PX_ATTR, &d.to_string());
        }
        match explicit_mobile {
            Some(m) => {
                let _ = el.set_attribute(MOBILE_PX_ATTR, &m.to_string());
            }
            None => {
                let _ = el.remove_attribute(MOBILE_PX_ATTR);
            }
        }
    }
}
