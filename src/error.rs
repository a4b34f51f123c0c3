//! Failures inside the overlay controller.
//!
//! None of these reach the host through `init`/`toggle`/`close`/`destroy`;
//! those log and carry on. They exist so the DOM plumbing can use `?` and so
//! `HitPay::try_init` can report why the frame could not be mounted.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HitPayError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    /// A DOM call threw.
    #[error("dom error: {0}")]
    Dom(String),
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl From<JsValue> for HitPayError {
    fn from(value: JsValue) -> Self {
        HitPayError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_json::Error> for HitPayError {
    fn from(err: serde_json::Error) -> Self {
        HitPayError::Serialize(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for HitPayError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        HitPayError::Serialize(err.to_string())
    }
}

impl From<HitPayError> for JsValue {
    fn from(err: HitPayError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
