use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumIter, EnumString};

/// Tag selecting which patcher applies to a section.
///
/// Serialized lowercase in markup (`data-section-type`) and in messages.
/// Parsing an unknown tag fails and routes dispatch to the legacy generic
/// patcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SectionType {
    Hero,
    Text,
    Gallery,
    Reviews,
    Slider,
    Features,
    Faq,
    Pricing,
    Contact,
    Video,
}

impl SectionType {
    /// Fallback for older markup that only carries a human-readable
    /// `data-section-name`. The table is fixed; anything else is unknown.
    pub fn from_legacy_name(name: &str) -> Option<Self> {
        match name.trim() {
            "Hero Banner" | "Hero" => Some(Self::Hero),
            "Rich Text" | "Text Block" => Some(Self::Text),
            "Image Gallery" | "Gallery" => Some(Self::Gallery),
            "Customer Reviews" | "Reviews" | "Testimonials" => Some(Self::Reviews),
            "Image Slider" | "Slider" | "Carousel" => Some(Self::Slider),
            "Feature Grid" | "Features" => Some(Self::Features),
            "FAQ" | "Frequently Asked Questions" => Some(Self::Faq),
            "Pricing Table" | "Pricing" => Some(Self::Pricing),
            "Contact Form" | "Contact" => Some(Self::Contact),
            "Video Embed" | "Video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Sparse partial section.
///
/// Invariant: an update never specifies a field it does not intend to
/// change — absence means "leave as is". Clearing requires an explicit
/// empty/falsy value (empty string, `0`, `false`). The nested maps are
/// sparse in the same way.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SectionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

/// Full initial payload for a section added before persistence.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SectionInit {
    pub section_id: String,
    pub section_type: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub content: Option<Map<String, Value>>,

    #[serde(default)]
    pub settings: Option<Map<String, Value>>,

    /// Insert after this section's root; absent means "end of document,
    /// before the trailing fixed region".
    #[serde(default)]
    pub after_section_id: Option<String>,

    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl SectionInit {
    pub fn parsed_type(&self) -> Option<SectionType> {
        self.section_type.parse().ok()
    }

    /// The initial payload replayed as a normal sparse update, so a newly
    /// synthesized placeholder is styled through the same dispatch path as
    /// server-rendered markup.
    pub fn as_update(&self) -> SectionUpdate {
        SectionUpdate {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            is_active: None,
            content: self.content.clone(),
            settings: self.settings.clone(),
        }
    }
}

// Sparse-map readers shared by every patcher. All of them treat a missing
// key and a wrong-typed value the same way: `None`, patch skipped.

pub(crate) fn map_str<'a>(m: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    m.get(key).and_then(|v| v.as_str())
}

pub(crate) fn map_f64(m: &Map<String, Value>, key: &str) -> Option<f64> {
    m.get(key).and_then(crate::util::as_f64)
}

pub(crate) fn map_bool(m: &Map<String, Value>, key: &str) -> Option<bool> {
    m.get(key).and_then(|v| match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(s == "1" || s == "true"),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    })
}

pub(crate) fn map_arr<'a>(m: &'a Map<String, Value>, key: &str) -> Option<&'a Vec<Value>> {
    m.get(key).and_then(|v| v.as_array())
}
