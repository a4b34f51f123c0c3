//! options.rs
//!
//! Configuration for the HitPay overlay.
//!
//! `InitOptions` tells the controller where the hosted checkout page lives.
//! Every field is optional; missing values fall back to HitPay's production
//! host. The struct deserializes from the same camel-cased object the
//! JavaScript surface accepts, so it can be built in Rust or passed in
//! from a page script.
//!
//! ```rust
//! use yew_hitpay::InitOptions;
//!
//! let opts = InitOptions { domain: Some("sandbox.hit-pay.com".into()), ..Default::default() };
//! assert_eq!(opts.frame_src(), "https://sandbox.hit-pay.com/hitpay-iframe.html");
//! ```

use serde::{Deserialize, Serialize};

/// Reserved DOM id of the overlay iframe.
pub const OVERLAY_ID: &str = "hitpay-overlay";

/// File served by the hosted checkout that speaks the overlay protocol.
pub const FRAME_FILE: &str = "hitpay-iframe.html";

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_DOMAIN: &str = "hit-pay.com";

/// Delay before posting a toggle that opens the overlay, so the frame is
/// displayed before its CSS transition starts.
pub const SHOW_DELAY_MS: u32 = 500;

/// Delay before posting a toggle that closes the overlay.
pub const HIDE_DELAY_MS: u32 = 0;

/// Where to load the hosted checkout from.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct InitOptions {
    /// URL scheme, `"https"` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// Host serving the checkout, `"hit-pay.com"` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Path prefix in front of the frame file, empty when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Restrict postMessage traffic to the frame's origin.
    ///
    /// Off by default: outbound messages target `*` and inbound messages
    /// are accepted from any window. Never sent to the frame.
    #[serde(rename = "verifyOrigin", skip_serializing)]
    pub verify_origin: bool,
}

impl InitOptions {
    /// Resolved scheme. Empty strings count as unset.
    pub fn scheme(&self) -> &str {
        non_empty(&self.scheme).unwrap_or(DEFAULT_SCHEME)
    }

    /// Resolved domain. Empty strings count as unset.
    pub fn domain(&self) -> &str {
        non_empty(&self.domain).unwrap_or(DEFAULT_DOMAIN)
    }

    pub fn path(&self) -> &str {
        non_empty(&self.path).unwrap_or("")
    }

    /// `{scheme}://{domain}{path}/hitpay-iframe.html`
    pub fn frame_src(&self) -> String {
        format!("{}/{}", self.base_url(), FRAME_FILE)
    }

    /// `{scheme}://{domain}`, the origin the frame document runs in.
    /// Lowercased, as browsers report it in `MessageEvent.origin`.
    pub fn frame_origin(&self) -> String {
        format!("{}://{}", self.scheme(), self.domain()).to_ascii_lowercase()
    }

    /// Target origin for outbound `postMessage` calls.
    pub fn target_origin(&self) -> String {
        if self.verify_origin {
            self.frame_origin()
        } else {
            "*".to_string()
        }
    }

    /// Whether an inbound message from `origin` should be handled.
    pub fn accepts_origin(&self, origin: &str) -> bool {
        !self.verify_origin || origin == self.frame_origin()
    }

    fn base_url(&self) -> String {
        format!("{}{}", self.frame_origin(), self.path())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let opts = InitOptions::default();
        assert_eq!(opts.frame_src(), "https://hit-pay.com/hitpay-iframe.html");
        assert_eq!(opts.target_origin(), "*");
    }

    #[test]
    fn custom_host_and_path() {
        let opts = InitOptions {
            scheme: Some("http".into()),
            domain: Some("localhost:8080".into()),
            path: Some("/checkout".into()),
            verify_origin: false,
        };
        assert_eq!(
            opts.frame_src(),
            "http://localhost:8080/checkout/hitpay-iframe.html"
        );
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let opts = InitOptions {
            scheme: Some(String::new()),
            domain: Some(String::new()),
            path: None,
            verify_origin: false,
        };
        assert_eq!(opts.scheme(), "https");
        assert_eq!(opts.domain(), "hit-pay.com");
    }

    #[test]
    fn verify_origin_narrows_traffic() {
        let opts = InitOptions {
            domain: Some("sandbox.hit-pay.com".into()),
            verify_origin: true,
            ..Default::default()
        };
        assert_eq!(opts.target_origin(), "https://sandbox.hit-pay.com");
        assert!(opts.accepts_origin("https://sandbox.hit-pay.com"));
        assert!(!opts.accepts_origin("https://evil.example"));

        let open = InitOptions::default();
        assert!(open.accepts_origin("https://evil.example"));
    }

    #[test]
    fn origin_match_ignores_configured_case() {
        let opts = InitOptions {
            scheme: Some("HTTPS".into()),
            domain: Some("Sandbox.Hit-Pay.com".into()),
            verify_origin: true,
            ..Default::default()
        };
        assert_eq!(opts.target_origin(), "https://sandbox.hit-pay.com");
        assert!(opts.accepts_origin("https://sandbox.hit-pay.com"));
    }

    #[test]
    fn deserializes_partial_js_object() {
        let opts: InitOptions =
            serde_json::from_str(r#"{"domain":"staging.hit-pay.com","verifyOrigin":true}"#)
                .unwrap();
        assert_eq!(opts.domain(), "staging.hit-pay.com");
        assert_eq!(opts.scheme(), "https");
        assert!(opts.verify_origin);
    }
}
