use serde::{Deserialize, Serialize};

/// Runtime configuration injected by the host page.
///
/// The preview document is served with a small bootstrap script that sets
/// `window.ENV` before the wasm module loads. Everything here has a safe
/// default so the engine also works standalone (e.g. in tests).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct PreviewConfig {
    /// Target origin for `postMessage` back to the editor frame.
    pub editor_origin: String,
    /// Verbose console logging of dropped messages and skipped patches.
    pub debug: bool,
}

impl PreviewConfig {
    pub fn new() -> Self {
        let mut editor_origin = "*".to_string();
        let mut debug = false;

        // We support BOTH `window.ENV.EDITOR_ORIGIN` (documented) and
        // `window.ENV.editor_origin` (legacy/implementation detail).
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["EDITOR_ORIGIN", "editor_origin"] {
                        if let Ok(v) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(s) = v.as_string() {
                                if !s.trim().is_empty() {
                                    editor_origin = s;
                                    break;
                                }
                            }
                        }
                    }

                    if let Ok(v) = js_sys::Reflect::get(&env, &"PREVIEW_DEBUG".into()) {
                        debug = v.as_bool().unwrap_or(false)
                            || v.as_string().map(|s| s == "1" || s == "true").unwrap_or(false);
                    }
                }
            }
        }

        Self {
            editor_origin,
            debug,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::new()
    }
}
