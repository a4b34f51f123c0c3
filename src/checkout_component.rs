//! A drop-in Yew component that opens the HitPay hosted checkout.
//!
//! This component mounts the overlay frame, toggles it open with your
//! checkout options when the pay button is clicked, and forwards the
//! frame's success, error and close events to your app.

use serde_json::Value as JsonValue;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;
use yew::prelude::*;

use crate::client::Callbacks;
use crate::components::PayButton;
use crate::options::InitOptions;
use crate::use_hitpay;

/// Properties for the [`HitPayCheckout`] component.
///
/// # Fields
///
/// * `default_url` – URL of your shop, forwarded to the checkout page.
/// * `init_options` – Where the hosted checkout lives (defaults to production).
/// * `checkout_options` – Opaque payload for the checkout page, e.g.
///   `{ "paymentRequestId": "...", "amount": 100 }`.
/// * `on_success` – Fired when the checkout reports a completed payment.
/// * `on_error` – Fired with the checkout's error payload, untouched.
/// * `on_close` – Fired when the overlay is closed.
/// * `button_label` – Override the button text (default: `"Pay with HitPay"`).
/// * `children` – Extra nodes (order summary etc) rendered above the button.
#[derive(Properties, PartialEq, Clone)]
pub struct HitPayCheckoutProps {
    pub default_url: String,
    #[prop_or_default]
    pub init_options: InitOptions,
    pub checkout_options: JsonValue,
    #[prop_or_default]
    pub on_success: Callback<()>,
    #[prop_or_default]
    pub on_error: Callback<JsValue>,
    #[prop_or_default]
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub button_label: Option<String>,
    #[prop_or_default]
    pub children: Children,
}

/// Yew function component rendering a HitPay pay button.
///
/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use yew_hitpay::HitPayCheckout;
///
/// #[function_component(App)]
/// fn app() -> Html {
///     let on_success = Callback::from(|_| log::info!("Payment succeeded"));
///     let on_error = Callback::from(|err: JsValue| log::error!("Payment failed: {:?}", err));
///
///     html! {
///         <HitPayCheckout
///             default_url="https://shop.example.com"
///             checkout_options={serde_json::json!({ "paymentRequestId": "9a1f...", "amount": 25 })}
///             {on_success}
///             {on_error}
///         >
///             <p>{ "Your order: Awesome T-shirt – $25.00" }</p>
///         </HitPayCheckout>
///     }
/// }
/// ```
#[function_component(HitPayCheckout)]
pub fn hitpay_checkout(props: &HitPayCheckoutProps) -> Html {
    let hitpay = use_hitpay(props.default_url.clone(), props.init_options.clone());
    let pending = use_state(|| false);
    let error = use_state(|| None::<String>);

    let on_click = {
        let pending = pending.clone();
        let error = error.clone();
        let props = props.clone();

        Callback::from(move |_: MouseEvent| {
            if *pending {
                return;
            }
            pending.set(true);
            error.set(None);

            let on_error = {
                let error = error.clone();
                let forward = props.on_error.clone();
                Callback::from(move |err: JsValue| {
                    error.set(Some(describe_error(&err)));
                    forward.emit(err);
                })
            };
            let callbacks = Callbacks::new()
                .on_success(props.on_success.clone())
                .on_close(props.on_close.clone())
                .on_error(on_error);

            let hitpay = hitpay.clone();
            let pending = pending.clone();
            let checkout_options = props.checkout_options.clone();
            wasm_bindgen_futures::spawn_local(async move {
                hitpay.toggle(checkout_options, callbacks).await;
                pending.set(false);
            });
        })
    };

    html! {
        <div class="hitpay-checkout">
            { for props.children.iter() }
            <PayButton
                label={props.button_label.clone().unwrap_or_else(|| "Pay with HitPay".to_string())}
                onclick={on_click}
                pending={*pending}
            />
            {
                if let Some(msg) = &*error {
                    html!{ <div class="hitpay-checkout-error" role="alert">{ msg }</div> }
                } else {
                    Html::default()
                }
            }
        </div>
    }
}

/// Best-effort human text for an opaque checkout error. `Error` objects
/// keep `message` off their enumerable keys, so it is read directly.
fn describe_error(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if err.is_object() {
        let message = Reflect::get(err, &JsValue::from_str("message")).ok();
        if let Some(message) = message.and_then(|m| m.as_string()) {
            return message;
        }
    }
    let json = serde_wasm_bindgen::from_value::<JsonValue>(err.clone()).unwrap_or(JsonValue::Null);
    describe_json(&json)
}

fn describe_json(err: &JsonValue) -> String {
    match err {
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(map) => map
            .get("message")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
        JsonValue::Null => "Payment failed. Please try again.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::describe_json;
    use serde_json::json;

    #[test]
    fn describes_string_and_message_errors() {
        assert_eq!(describe_json(&json!("card declined")), "card declined");
        assert_eq!(
            describe_json(&json!({"message": "expired", "code": "E1"})),
            "expired"
        );
        assert_eq!(describe_json(&json!({"code": 7})), r#"{"code":7}"#);
        assert_eq!(
            describe_json(&json!(null)),
            "Payment failed. Please try again."
        );
    }
}
