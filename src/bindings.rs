//! yew_hitpay/src/bindings.rs
//!
//! wasm-bindgen exports so plain page scripts can drive the overlay
//! without Yew.
//!
//! ```js
//!   import init, { HitPay } from "./pkg/yew_hitpay.js";
//!   await init();
//!
//!   const hitpay = new HitPay();
//!   hitpay.init("https://shop.example.com", { domain: "sandbox.hit-pay.com" });
//!   await hitpay.toggle({ paymentRequestId: "9a1f..." }, {
//!     onSuccess: () => console.log("paid"),
//!     onError: (err) => console.error(err),
//!     onClose: () => console.log("closed"),
//!   });
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::{Function, Object, Promise, Reflect};
use yew::Callback;

use crate::client::{Callbacks, HitPay};
use crate::options::InitOptions;

/// JavaScript-facing wrapper around [`HitPay`].
#[wasm_bindgen(js_name = HitPay)]
pub struct HitPayWidget {
    inner: HitPay,
}

#[wasm_bindgen(js_class = HitPay)]
impl HitPayWidget {
    #[wasm_bindgen(constructor)]
    pub fn new() -> HitPayWidget {
        HitPayWidget { inner: HitPay::new() }
    }

    /// `hitpay.init(defaultUrl, { scheme?, domain?, path?, verifyOrigin? })`
    pub fn init(&self, default_url: &str, options: JsValue) -> Result<(), JsValue> {
        let options: InitOptions = if options.is_undefined() || options.is_null() {
            InitOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        self.inner.init(default_url, options);
        Ok(())
    }

    /// `hitpay.toggle(checkoutOptions, { onClose?, onSuccess?, onError? })`
    ///
    /// Resolves once the toggle message has been posted.
    pub fn toggle(&self, checkout_options: JsValue, callbacks: JsValue) -> Result<Promise, JsValue> {
        let checkout_options = if checkout_options.is_undefined() || checkout_options.is_null() {
            Object::new().into()
        } else {
            checkout_options
        };
        let callbacks = callbacks_from_js(&callbacks)?;
        let inner = self.inner.clone();
        Ok(future_to_promise(async move {
            inner.toggle_js(checkout_options, callbacks).await;
            Ok(JsValue::UNDEFINED)
        }))
    }

    pub fn close(&self) {
        self.inner.close();
    }

    pub fn destroy(&self) {
        self.inner.destroy();
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.inner.is_visible()
    }
}

impl Default for HitPayWidget {
    fn default() -> Self {
        Self::new()
    }
}

fn callbacks_from_js(value: &JsValue) -> Result<Callbacks, JsValue> {
    let mut callbacks = Callbacks::new();
    if !value.is_object() {
        return Ok(callbacks);
    }
    if let Some(f) = js_function(value, "onClose")? {
        callbacks.on_close = Some(Callback::from(move |_| call(&f, &[])));
    }
    if let Some(f) = js_function(value, "onSuccess")? {
        callbacks.on_success = Some(Callback::from(move |_| call(&f, &[])));
    }
    if let Some(f) = js_function(value, "onError")? {
        callbacks.on_error = Some(Callback::from(move |err: JsValue| call(&f, &[err])));
    }
    Ok(callbacks)
}

fn js_function(target: &JsValue, key: &str) -> Result<Option<Function>, JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key))?;
    Ok(value.dyn_into::<Function>().ok())
}

fn call(f: &Function, args: &[JsValue]) {
    let result = match args {
        [] => f.call0(&JsValue::NULL),
        [arg, ..] => f.call1(&JsValue::NULL, arg),
    };
    if let Err(err) = result {
        log::warn!("HitPay callback threw: {:?}", err);
    }
}
