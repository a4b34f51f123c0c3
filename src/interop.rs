//! interop.rs
//!
//! Custom Yew hook that owns a HitPay overlay for the lifetime of a component.
//!
//! # Overview
//! `use_hitpay()` creates one `HitPay` controller per component instance,
//! mounts `<iframe id="hitpay-overlay">` into `<body>` when the component
//! mounts, and removes it again on unmount. The returned handle is the
//! same on every render.
//!
//! # Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use yew_hitpay::{use_hitpay, Callbacks, InitOptions};
//!
//! #[function_component(PayButton)]
//! fn pay_button() -> Html {
//!     let hitpay = use_hitpay("https://shop.example.com".into(), InitOptions::default());
//!     let onclick = Callback::from(move |_| {
//!         let hitpay = hitpay.clone();
//!         wasm_bindgen_futures::spawn_local(async move {
//!             hitpay.toggle(serde_json::json!({ "amount": 100 }), Callbacks::new()).await;
//!         });
//!     });
//!     html! { <button {onclick}>{ "Pay with HitPay" }</button> }
//! }
//! ```

use yew::prelude::*;
use yew::functional::hook; // required for custom hooks marked #[hook]

use crate::client::HitPay;
use crate::options::InitOptions;

/// Custom hook: mount the HitPay overlay on first render and tear it down
/// on unmount.
///
/// `default_url` and `init_options` are read once, on mount. The frame
/// cannot be re-pointed after it has loaded, so later changes are ignored.
#[hook]
pub fn use_hitpay(default_url: String, init_options: InitOptions) -> HitPay {
    let hitpay = use_state(HitPay::new);

    {
        let hitpay = (*hitpay).clone();
        use_effect_with((), move |_| {
            hitpay.init(&default_url, init_options);
            move || hitpay.destroy()
        });
    }

    (*hitpay).clone()
}
