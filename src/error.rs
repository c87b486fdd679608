//! Errors raised while mounting the effect into a page.
//!
//! Event handlers never fail outwardly: a missing element or a rejected style
//! write inside a callback is simply skipped. Only the exported mount path
//! reports problems, as a `JsValue` string.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum EggError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("dom: {0}")]
    Dom(String),
    #[cfg(feature = "serde_json")]
    #[error("invalid config: {0}")]
    Config(serde_json::Error),
    #[error("config overrides need the `serde_json` feature")]
    ConfigUnsupported,
}

impl From<JsValue> for EggError {
    fn from(v: JsValue) -> Self {
        EggError::Dom(v.as_string().unwrap_or_else(|| format!("{v:?}")))
    }
}

impl From<EggError> for JsValue {
    fn from(e: EggError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_piece() {
        assert_eq!(EggError::MissingElement("contact".into()).to_string(), "element #contact not found");
        assert_eq!(EggError::NoWindow.to_string(), "no window");
    }
}
