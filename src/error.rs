use thiserror::Error;

/// Everything that can go wrong while bringing the site up.
///
/// None of these are fatal to the page: the shell turns them into a
/// fallback panel and keeps running.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("element not found: #{0}")]
    MissingElement(String),
    #[error("{0} not available")]
    Unsupported(&'static str),
    #[error("shader compilation error: {0}")]
    Shader(String),
    #[error("program link error: {0}")]
    Link(String),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("input focus already held by {0:?}")]
    FocusHeld(crate::focus::FocusOwner),
}

pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let text = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        SiteError::Js(text)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
