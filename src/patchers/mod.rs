//! Handler registry and dispatcher.
//!
//! One patcher per section type; the patcher owns the entire update
//! (common fields first, then its own). Unknown types fall through to the
//! legacy generic patcher so sections that predate the registry keep
//! previewing.

pub(crate) mod common;
pub(crate) mod legacy;
pub(crate) mod list;

mod contact;
mod faq;
mod features;
mod gallery;
mod hero;
mod pricing;
mod reviews;
mod slider;
mod text;
mod video;

use crate::dom;
use crate::models::{SectionType, SectionUpdate};
use crate::util::debug_log;
use web_sys::{Document, Element};

/// Side-channel context passed along with every patch.
pub(crate) struct PatchContext<'a> {
    pub doc: &'a Document,
    /// Available product categories, for patchers that render category
    /// chips. Most patchers ignore this.
    pub categories: Option<&'a [String]>,
}

pub(crate) type Patcher = fn(&PatchContext, &Element, &SectionUpdate);

/// The registry. Every `SectionType` has exactly one entry; string tags
/// outside the enum never reach this table.
pub(crate) fn registered(section_type: SectionType) -> Patcher {
    match section_type {
        SectionType::Hero => hero::apply,
        SectionType::Text => text::apply,
        SectionType::Gallery => gallery::apply,
        SectionType::Reviews => reviews::apply,
        SectionType::Slider => slider::apply,
        SectionType::Features => features::apply,
        SectionType::Faq => faq::apply,
        SectionType::Pricing => pricing::apply,
        SectionType::Contact => contact::apply,
        SectionType::Video => video::apply,
    }
}

/// Apply a sparse update to the section with the given id.
///
/// Silent no-op when the section is not currently rendered or is mid
/// removal transition; the editor naturally re-sends current values on the
/// next keystroke.
pub(crate) fn dispatch(
    doc: &Document,
    section_id: &str,
    update: &SectionUpdate,
    categories: Option<&[String]>,
) {
    let Some(root) = dom::find_section_root(doc, section_id) else {
        debug_log(&format!("dispatch: section {section_id} not rendered, skipping"));
        return;
    };
    if root.has_attribute(dom::REMOVING_ATTR) {
        return;
    }

    let ctx = PatchContext { doc, categories };

    match section_type_of(&root) {
        Some(t) => (registered(t))(&ctx, &root, update),
        None => legacy::apply(&ctx, &root, update),
    }
}

/// Read the type tag from the root marker, falling back to the
/// human-readable name attribute older markup carries.
pub(crate) fn section_type_of(root: &Element) -> Option<SectionType> {
    if let Some(tag) = root.get_attribute(dom::SECTION_TYPE_ATTR) {
        if let Ok(t) = tag.parse() {
            return Some(t);
        }
    }
    root.get_attribute(dom::SECTION_NAME_ATTR)
        .as_deref()
        .and_then(SectionType::from_legacy_name)
}

/// Category chips, shared by the gallery and pricing patchers. Chips carry
/// no state worth preserving, so a full rebuild is fine here.
pub(crate) fn apply_category_chips(ctx: &PatchContext, root: &Element) {
    let Some(categories) = ctx.categories else {
        return;
    };
    let Some(container) = dom::field(root, "categories") else {
        return;
    };

    container.set_inner_html("");
    for name in categories {
        let Ok(chip) = ctx.doc.create_element("span") else {
            continue;
        };
        let _ = chip.set_attribute("class", "pv-chip");
        chip.set_text_content(Some(name));
        let _ = container.append_child(&chip);
    }
}
