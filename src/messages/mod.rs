use crate::models::{SectionInit, SectionUpdate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MessageErrorKind {
    /// `event.data` is not a JSON object (or could not be stringified).
    NotAnObject,
    /// No `type` discriminant.
    MissingType,
    /// `type` present but not one of ours. Other frames post messages too;
    /// these are dropped without logging.
    UnknownType,
    /// Known `type` but the payload is missing required keys.
    Payload,
}

#[derive(Clone, Debug)]
pub(crate) struct MessageError {
    pub kind: MessageErrorKind,
    pub message: String,
}

impl std::fmt::Display for MessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl MessageError {
    fn not_an_object() -> Self {
        Self {
            kind: MessageErrorKind::NotAnObject,
            message: "message data is not a JSON object".to_string(),
        }
    }

    fn missing_type() -> Self {
        Self {
            kind: MessageErrorKind::MissingType,
            message: "message has no type field".to_string(),
        }
    }

    fn unknown_type(t: &str) -> Self {
        Self {
            kind: MessageErrorKind::UnknownType,
            message: format!("unhandled message type: {t}"),
        }
    }

    fn payload(t: &str, e: impl std::fmt::Display) -> Self {
        Self {
            kind: MessageErrorKind::Payload,
            message: format!("bad {t} payload: {e}"),
        }
    }
}

pub(crate) type MessageResult<T> = Result<T, MessageError>;

/// Inbound editor → preview messages.
///
/// Wire shape is a flat JSON object with a `type` discriminant; everything
/// else is the payload. Handling is synchronous: each message is processed
/// to completion before the next one is looked at.
#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "type")]
pub(crate) enum EditorMessage {
    #[serde(rename = "SECTION_CONTENT_UPDATE", rename_all = "camelCase")]
    SectionContentUpdate {
        section_id: String,
        updates: SectionUpdate,
        #[serde(default)]
        categories: Option<Vec<String>>,
    },

    #[serde(rename = "SECTION_ADD")]
    SectionAdd(SectionInit),

    #[serde(rename = "SECTION_REMOVE", rename_all = "camelCase")]
    SectionRemove { section_id: String },

    #[serde(rename = "SECTIONS_REORDER", rename_all = "camelCase")]
    SectionsReorder {
        section_order: Vec<String>,
        moved_section_id: String,
    },

    #[serde(rename = "SCROLL_TO_SECTION", rename_all = "camelCase")]
    ScrollToSection { section_id: String },

    #[serde(rename = "HIGHLIGHT_SECTION", rename_all = "camelCase")]
    HighlightSection { section_id: String },

    #[serde(rename = "THEME_SETTINGS_UPDATE")]
    ThemeSettingsUpdate { settings: Map<String, Value> },
}

const KNOWN_TYPES: &[&str] = &[
    "SECTION_CONTENT_UPDATE",
    "SECTION_ADD",
    "SECTION_REMOVE",
    "SECTIONS_REORDER",
    "SCROLL_TO_SECTION",
    "HIGHLIGHT_SECTION",
    "THEME_SETTINGS_UPDATE",
];

/// Decode a raw `message` event payload.
///
/// Validation order matters for the error kind: object-ness, then the
/// `type` discriminant, then the per-type payload. The caller ignores every
/// error; only `Payload` failures are worth a debug log.
pub(crate) fn decode(data: &JsValue) -> MessageResult<EditorMessage> {
    let text = if let Some(s) = data.as_string() {
        s
    } else {
        js_sys::JSON::stringify(data)
            .ok()
            .and_then(|s| s.as_string())
            .ok_or_else(MessageError::not_an_object)?
    };

    decode_str(&text)
}

/// JSON-text decoding half, kept separate so it tests natively.
pub(crate) fn decode_str(text: &str) -> MessageResult<EditorMessage> {
    let value: Value = serde_json::from_str(text).map_err(|_| MessageError::not_an_object())?;

    let obj = value.as_object().ok_or_else(MessageError::not_an_object)?;
    let t = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(MessageError::missing_type)?;

    if !KNOWN_TYPES.contains(&t) {
        return Err(MessageError::unknown_type(t));
    }

    serde_json::from_value(value.clone()).map_err(|e| MessageError::payload(t, e))
}

/// Outbound preview → editor events.
#[derive(Serialize, Clone, Debug)]
#[serde(tag = "type")]
pub(crate) enum PreviewEvent {
    #[serde(rename = "SECTION_CLICKED", rename_all = "camelCase")]
    SectionClicked { section_id: String },
}

impl PreviewEvent {
    /// Serialize through JSON text so the editor frame receives a plain
    /// structured-clone object, not a wasm-bindgen wrapper.
    pub fn to_js(&self) -> Option<JsValue> {
        let text = serde_json::to_string(self).ok()?;
        js_sys::JSON::parse(&text).ok()
    }
}
