// src/lib.rs
use serde_json::json;
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_hitpay::{HitPayCheckout, InitOptions};

#[wasm_bindgen(start)]
pub fn start() {
    console_log::init_with_level(log::Level::Debug).ok();
    yew::Renderer::<BasicCheckout>::new().render();
}

#[function_component(BasicCheckout)]
fn basic_checkout() -> Html {
    let status = use_state(|| "Waiting for payment".to_string());

    let on_success = {
        let status = status.clone();
        Callback::from(move |_| status.set("🎉 Paid".into()))
    };
    let on_error = {
        let status = status.clone();
        Callback::from(move |err: JsValue| status.set(format!("Payment failed: {:?}", err)))
    };
    let on_close = {
        let status = status.clone();
        Callback::from(move |_| log::info!("checkout closed; status: {}", *status))
    };

    // Sandbox host; swap for production by dropping `domain`.
    let init_options = InitOptions {
        domain: Some("sandbox.hit-pay.com".into()),
        verify_origin: true,
        ..Default::default()
    };

    html! {
        <div>
            <HitPayCheckout
                default_url="https://shop.example.com"
                {init_options}
                checkout_options={json!({ "paymentRequestId": "demo-request", "amount": 25 })}
                {on_success}
                {on_error}
                {on_close}
            >
                <p>{ "Your order: Awesome T-shirt – $25.00" }</p>
            </HitPayCheckout>
            <p>{ (*status).clone() }</p>
        </div>
    }
}
