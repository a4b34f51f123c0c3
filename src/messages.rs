//! messages.rs
//!
//! The postMessage protocol spoken between the host page and the hosted
//! checkout frame. Every message is a plain object tagged by `type`.
//!
//! Host → frame:
//! ```json
//! { "type": "toggle",
//!   "props": { "defaultUrl": "...", "scheme": "https", "domain": "hit-pay.com",
//!              "checkoutOptions": { ... } } }
//! ```
//!
//! Frame → host: `loaded`, `toggle`, `close`, `destroy`, `success`, and
//! `error` (which carries an opaque `error` field).
//!
//! Only the `type` tag is decoded here. Payloads the wrapper does not
//! interpret (`checkoutOptions`, the `error` field) stay raw JS values and
//! never pass through serde, so dates, `Error` objects and `undefined`
//! survive the trip.

use gloo_utils::format::JsValueSerdeExt;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;

use crate::error::HitPayError;
use crate::options::InitOptions;

/// Checkout options as accepted by [`crate::HitPay::toggle`].
pub type CheckoutOptions = JsonValue;

/// Messages the hosted checkout posts to the host window.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundMessage {
    /// The frame finished loading and can receive toggles.
    Loaded,
    /// The frame asks the host to flip the overlay.
    Toggle,
    Close,
    Destroy,
    /// Payment completed.
    Success,
    /// Payment failed. The payload is read straight off the event data.
    Error,
}

impl InboundMessage {
    /// Decode a message from its JSON form. Unknown types and non-object
    /// payloads yield `None`.
    pub fn from_json(value: JsonValue) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

/// Messages the host posts into the frame.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Toggle { props: ToggleProps },
}

/// Frame settings sent with every toggle. `checkoutOptions` is attached
/// separately by [`OutboundMessage::to_js`].
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ToggleProps {
    #[serde(rename = "defaultUrl")]
    pub default_url: String,
    pub scheme: String,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl OutboundMessage {
    /// Build the toggle message from the current controller config.
    pub fn toggle(default_url: &str, init_options: &InitOptions) -> Self {
        let path = Some(init_options.path())
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        OutboundMessage::Toggle {
            props: ToggleProps {
                default_url: default_url.to_string(),
                scheme: init_options.scheme().to_string(),
                domain: init_options.domain().to_string(),
                path,
            },
        }
    }

    /// JS object ready for `postMessage`, with `checkout_options` placed
    /// under `props.checkoutOptions` as-is.
    pub fn to_js(&self, checkout_options: &JsValue) -> Result<JsValue, HitPayError> {
        let message = JsValue::from_serde(self)?;
        let props = Reflect::get(&message, &JsValue::from_str("props"))?;
        Reflect::set(&props, &JsValue::from_str("checkoutOptions"), checkout_options)?;
        Ok(message)
    }
}
