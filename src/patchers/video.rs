//! Video section: hosted file playback or a YouTube/Vimeo embed.

use crate::dom;
use crate::models::{map_bool, map_str, SectionUpdate};
use crate::patchers::{common, PatchContext};
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use web_sys::Element;

pub(crate) fn apply(ctx: &PatchContext, root: &Element, update: &SectionUpdate) {
    common::apply(ctx, root, update);

    if let Some(content) = &update.content {
        if let Some(url) = map_str(content, "videoUrl") {
            apply_source(root, url);
        }
    }

    let Some(settings) = &update.settings else {
        return;
    };

    apply_playback(root, settings);

    if let Some(ratio) = map_str(settings, "aspectRatio") {
        if let Some(frame) = dom::field(root, "frame") {
            common::set_or_clear_style(&frame, "aspect-ratio", ratio);
        }
    }
}

/// Hosted providers need an `<iframe>`; direct files use the `<video>`
/// player. Exactly one of the two is visible at a time.
fn apply_source(root: &Element, url: &str) {
    let embed = dom::field(root, "embed");
    let player = dom::field(root, "player");

    if url.is_empty() {
        for el in [&embed, &player] {
            if let Some(el) = el {
                let _ = el.remove_attribute("src");
                dom::set_style(el, "display", "none");
            }
        }
        return;
    }

    match embed_url(url) {
        Some(embed_src) => {
            if let Some(embed) = &embed {
                if embed.get_attribute("src").as_deref() != Some(embed_src.as_str()) {
                    let _ = embed.set_attribute("src", &embed_src);
                }
                dom::remove_style(embed, "display");
            }
            if let Some(player) = &player {
                let _ = player.remove_attribute("src");
                dom::set_style(player, "display", "none");
            }
        }
        None => {
            if let Some(player) = &player {
                if player.get_attribute("src").as_deref() != Some(url) {
                    let _ = player.set_attribute("src", url);
                }
                dom::remove_style(player, "display");
            }
            if let Some(embed) = &embed {
                let _ = embed.remove_attribute("src");
                dom::set_style(embed, "display", "none");
            }
        }
    }
}

fn apply_playback(root: &Element, settings: &Map<String, Value>) {
    let Some(player) = dom::field(root, "player") else {
        return;
    };
    let Some(video) = player.dyn_ref::<web_sys::HtmlVideoElement>() else {
        return;
    };

    if let Some(autoplay) = map_bool(settings, "autoplay") {
        video.set_autoplay(autoplay);
        // Browsers only honor autoplay when muted.
        if autoplay {
            video.set_muted(true);
        }
    }
    if let Some(looping) = map_bool(settings, "loop") {
        video.set_loop(looping);
    }
    if let Some(muted) = map_bool(settings, "muted") {
        video.set_muted(muted);
    }
    if let Some(poster) = map_str(settings, "posterImage") {
        dom::set_or_remove_attr(
            &player,
            "poster",
            if poster.is_empty() { None } else { Some(poster) },
        );
    }
}

/// Canonical embed URL for known hosting providers; `None` means "treat as
/// a direct file".
pub(crate) fn embed_url(url: &str) -> Option<String> {
    let trimmed = url.trim();

    if let Some(rest) = trimmed.split("youtube.com/watch?v=").nth(1) {
        let id: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if !id.is_empty() {
            return Some(format!("https://www.youtube.com/embed/{id}"));
        }
    }

    if let Some(rest) = trimmed.split("youtu.be/").nth(1) {
        let id: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if !id.is_empty() {
            return Some(format!("https://www.youtube.com/embed/{id}"));
        }
    }

    if let Some(rest) = trimmed.split("vimeo.com/").nth(1) {
        let id: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if !id.is_empty() {
            return Some(format!("https://player.vimeo.com/video/{id}"));
        }
    }

    None
}
