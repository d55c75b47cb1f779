use serde_json::Value;

/// Log to the browser console only when `window.ENV.PREVIEW_DEBUG` is set.
///
/// The engine never surfaces errors to the page; this is the only place
/// dropped messages and skipped patches become visible.
pub(crate) fn debug_log(msg: &str) {
    if crate::config::PreviewConfig::new().debug {
        web_sys::console::log_1(&msg.into());
    }
}

/// Format a sparse-update value as a CSS length.
///
/// Editors send sizes either as bare numbers (unit applied) or as
/// ready-made strings ("1.5rem", "auto"). Strings pass through untouched.
pub(crate) fn css_len(value: &Value, unit: &str) -> Option<String> {
    match value {
        Value::Number(n) => n.as_f64().map(|v| format_len(v, unit)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else if s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
                s.parse::<f64>().ok().map(|v| format_len(v, unit))
            } else {
                Some(s.to_string())
            }
        }
        _ => None,
    }
}

fn format_len(v: f64, unit: &str) -> String {
    if v.fract() == 0.0 {
        format!("{}{}", v as i64, unit)
    } else {
        format!("{}{}", v, unit)
    }
}

/// Numeric value from a sparse update, accepting both numbers and numeric
/// strings (sliders serialize either way depending on the input widget).
pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Escape a value for use inside a double-quoted CSS attribute selector.
pub(crate) fn escape_attr_value(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Minimal HTML text escaping for synthesized markup.
pub(crate) fn escape_html(v: &str) -> String {
    v.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
