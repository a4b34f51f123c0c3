use yew::prelude::*;

/// Button that opens the HitPay overlay.
#[derive(Properties, PartialEq)]
pub struct PayButtonProps {
    /// Button label text
    pub label: AttrValue,
    /// Click handler
    pub onclick: Callback<MouseEvent>,
    /// Shown instead of `label` while the checkout is opening
    #[prop_or(AttrValue::Static("Opening checkout…"))]
    pub pending_label: AttrValue,
    #[prop_or_default]
    pub pending: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(PayButton)]
pub fn pay_button(props: &PayButtonProps) -> Html {
    let label = if props.pending {
        props.pending_label.clone()
    } else {
        props.label.clone()
    };
    html! {
        <button
            type="button"
            onclick={props.onclick.clone()}
            disabled={props.disabled || props.pending}
            aria-busy={props.pending.to_string()}
            class="hitpay-pay-button"
        >
            { label }
        </button>
    }
}
