//! yew_hitpay/src/client.rs
//!
//! High-level Rust API for the HitPay hosted checkout overlay.
//!
//! This module provides:
//! - `HitPay`, a cheaply clonable handle that owns the overlay state and the
//!   window `message` listener relaying events from the checkout frame.
//! - `HitPay::init()` to mount the hidden full-screen `<iframe id="hitpay-overlay">`.
//! - `HitPay::toggle()` to show or hide the overlay and hand the frame its
//!   checkout options, waiting for the frame to announce it has loaded.
//! - `HitPay::close()` / `HitPay::destroy()` to hide or unmount the overlay.
//! - `Callbacks` to receive `on_close`, `on_success` and `on_error` events.
//!
//! # Example Usage
//! ```rust,ignore
//! use yew::Callback;
//! use yew_hitpay::{Callbacks, HitPay, InitOptions};
//!
//! let hitpay = HitPay::new();
//! hitpay.init("https://shop.example.com", InitOptions::default());
//!
//! let callbacks = Callbacks::new()
//!     .on_success(Callback::from(|_| log::info!("paid")))
//!     .on_error(Callback::from(|err: JsValue| log::error!("payment failed: {:?}", err)));
//!
//! wasm_bindgen_futures::spawn_local(async move {
//!     hitpay
//!         .toggle(serde_json::json!({ "paymentRequestId": "9a1f...", "amount": 100 }), callbacks)
//!         .await;
//! });
//! ```
//!
//! `toggle` takes checkout options as JSON; `toggle_js` forwards an
//! arbitrary JS value untouched. Error payloads reach `on_error` exactly as
//! the frame posted them.
//!
//! Note the frame's `close` message unmounts the overlay (`destroy`) while
//! its `destroy` message only hides it (`close`).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use gloo_utils::format::JsValueSerdeExt;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Object, Reflect};
use web_sys::{Document, HtmlElement, HtmlIFrameElement, MessageEvent};
use yew::Callback;

use crate::error::HitPayError;
use crate::messages::{CheckoutOptions, InboundMessage, OutboundMessage};
use crate::options::{InitOptions, HIDE_DELAY_MS, OVERLAY_ID, SHOW_DELAY_MS};

const FRAME_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("border", "0"),
    ("width", "100vw"),
    ("height", "100vh"),
    ("margin", "0"),
    ("padding", "0"),
    ("z-index", "99999999"),
    ("top", "0"),
    ("left", "0"),
    ("display", "none"),
];

/// Host callbacks fired by the overlay. Replaced wholesale on every `toggle`.
#[derive(Clone, Default, PartialEq)]
pub struct Callbacks {
    pub on_close: Option<Callback<()>>,
    pub on_success: Option<Callback<()>>,
    /// Receives the frame's `error` payload as-is (`undefined` when absent).
    pub on_error: Option<Callback<JsValue>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_close(mut self, cb: impl Into<Callback<()>>) -> Self {
        self.on_close = Some(cb.into());
        self
    }

    pub fn on_success(mut self, cb: impl Into<Callback<()>>) -> Self {
        self.on_success = Some(cb.into());
        self
    }

    pub fn on_error(mut self, cb: impl Into<Callback<JsValue>>) -> Self {
        self.on_error = Some(cb.into());
        self
    }
}

/// Where the controller stands with respect to the checkout frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    /// `init` has not run; toggles go straight through.
    Uninitialized,
    /// A frame is mounted but has not posted `loaded`; toggles wait.
    AwaitingReady,
    /// The frame posted `loaded`; `init` becomes a no-op.
    Ready,
}

/// Readiness signal with one single-consumer sender per waiting toggle.
enum ReadySignal {
    Uninitialized,
    AwaitingReady(Vec<oneshot::Sender<()>>),
    Ready,
}

impl ReadySignal {
    /// Returns a receiver to await when the frame has not loaded yet.
    fn wait(&mut self) -> Option<oneshot::Receiver<()>> {
        match self {
            ReadySignal::AwaitingReady(waiters) => {
                let (tx, rx) = oneshot::channel();
                waiters.push(tx);
                Some(rx)
            }
            _ => None,
        }
    }

    /// Re-arm for a freshly mounted frame, keeping anyone already waiting.
    fn arm(&mut self) {
        let waiters = match std::mem::replace(self, ReadySignal::Uninitialized) {
            ReadySignal::AwaitingReady(waiters) => waiters,
            _ => Vec::new(),
        };
        *self = ReadySignal::AwaitingReady(waiters);
    }

    fn fulfil(&mut self) {
        if let ReadySignal::AwaitingReady(waiters) = self {
            let waiters = std::mem::take(waiters);
            *self = ReadySignal::Ready;
            for tx in waiters {
                let _ = tx.send(());
            }
        }
    }

    fn state(&self) -> ReadyState {
        match self {
            ReadySignal::Uninitialized => ReadyState::Uninitialized,
            ReadySignal::AwaitingReady(_) => ReadyState::AwaitingReady,
            ReadySignal::Ready => ReadyState::Ready,
        }
    }
}

struct Config {
    visible: bool,
    default_url: String,
    init_options: InitOptions,
    callbacks: Callbacks,
    checkout_options: JsValue,
}

struct State {
    config: Config,
    frame: Option<HtmlIFrameElement>,
    ready: ReadySignal,
    body_overflow: String,
}

struct Inner {
    state: RefCell<State>,
    // Unregisters itself when the last handle goes away.
    _listener: Option<EventListener>,
}

/// Handle to the HitPay overlay.
///
/// Clones share the same frame, config and listener. The listener only
/// holds a weak reference, so dropping every handle removes it from the
/// window; the mounted frame stays until `destroy` is called.
#[derive(Clone)]
pub struct HitPay {
    inner: Rc<Inner>,
}

impl PartialEq for HitPay {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for HitPay {
    fn default() -> Self {
        Self::new()
    }
}

impl HitPay {
    /// Create a controller and start listening for frame messages.
    pub fn new() -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let listener = match web_sys::window() {
                Some(window) => {
                    let weak = weak.clone();
                    Some(EventListener::new(&window, "message", move |event| {
                        let Some(inner) = weak.upgrade() else {
                            return;
                        };
                        if let Some(event) = event.dyn_ref::<MessageEvent>() {
                            HitPay { inner }.handle_message(event);
                        }
                    }))
                }
                None => {
                    log::warn!("no window available; HitPay messages will not be relayed");
                    None
                }
            };
            Inner {
                state: RefCell::new(State {
                    config: Config {
                        visible: false,
                        default_url: String::new(),
                        init_options: InitOptions::default(),
                        callbacks: Callbacks::default(),
                        checkout_options: Object::new().into(),
                    },
                    frame: None,
                    ready: ReadySignal::Uninitialized,
                    body_overflow: "visible".to_string(),
                }),
                _listener: listener,
            }
        });
        HitPay { inner }
    }

    /// Mount the hidden checkout frame. Failures are logged and dropped.
    pub fn init(&self, default_url: &str, init_options: InitOptions) {
        if let Err(err) = self.try_init(default_url, init_options) {
            log::warn!("failed to mount HitPay overlay: {}", err);
        }
    }

    /// Mount the hidden checkout frame, replacing any existing
    /// `#hitpay-overlay`. Does nothing once the frame has reported `loaded`.
    pub fn try_init(&self, default_url: &str, init_options: InitOptions) -> Result<(), HitPayError> {
        if self.ready_state() == ReadyState::Ready {
            log::debug!("HitPay overlay already loaded; skipping init");
            return Ok(());
        }

        let src = init_options.frame_src();
        {
            let mut state = self.inner.state.borrow_mut();
            state.config.default_url = default_url.to_string();
            state.config.init_options = init_options;
        }

        let document = document()?;
        let body = document.body().ok_or(HitPayError::NoBody)?;
        remove_overlay(&document);
        let frame = create_frame(&document, &src)?;
        body.append_child(&frame)?;
        log::debug!("mounted HitPay overlay at {}", src);

        let mut state = self.inner.state.borrow_mut();
        state.frame = Some(frame);
        state.ready.arm();
        Ok(())
    }

    /// Show or hide the overlay with JSON checkout options.
    ///
    /// See [`HitPay::toggle_js`].
    pub async fn toggle(&self, checkout_options: CheckoutOptions, callbacks: Callbacks) {
        let checkout_options = JsValue::from_serde(&checkout_options).unwrap_or_else(|err| {
            log::warn!("could not convert HitPay checkout options: {}", err);
            Object::new().into()
        });
        self.toggle_js(checkout_options, callbacks).await;
    }

    /// Show or hide the overlay, forwarding `checkout_options` to the frame
    /// without conversion.
    ///
    /// Waits for the frame's `loaded` message if `init` is still pending,
    /// then posts a `toggle` message after 500 ms when opening (0 ms when
    /// closing). Fires `on_close` once the overlay ends up hidden.
    pub async fn toggle_js(&self, checkout_options: JsValue, callbacks: Callbacks) {
        let ready = {
            let mut state = self.inner.state.borrow_mut();
            state.config.callbacks = callbacks;
            state.config.checkout_options = checkout_options.clone();
            state.ready.wait()
        };
        if let Some(ready) = ready {
            if ready.await.is_err() {
                log::debug!("HitPay readiness signal dropped before the frame loaded");
            }
        }

        let was_visible = self.inner.state.borrow().config.visible;
        if let Err(err) = self.swap_page_scroll(was_visible) {
            log::warn!("could not update page scroll for HitPay overlay: {}", err);
        }

        let delay = if was_visible { HIDE_DELAY_MS } else { SHOW_DELAY_MS };
        TimeoutFuture::new(delay).await;

        if let Err(err) = self.post_toggle(&checkout_options) {
            log::warn!("could not post toggle to HitPay frame: {}", err);
        }

        let on_close = {
            let mut state = self.inner.state.borrow_mut();
            state.config.visible = !state.config.visible;
            if state.config.visible {
                None
            } else {
                if let Some(frame) = &state.frame {
                    set_display(frame, "none");
                }
                state.config.callbacks.on_close.clone()
            }
        };
        if let Some(cb) = on_close {
            cb.emit(());
        }
    }

    /// Hide the overlay at once and fire `on_close`. No message is posted.
    pub fn close(&self) {
        let on_close = {
            let mut state = self.inner.state.borrow_mut();
            state.config.visible = false;
            if let Some(frame) = &state.frame {
                set_display(frame, "none");
            }
            state.config.callbacks.on_close.clone()
        };
        if let Some(cb) = on_close {
            cb.emit(());
        }
    }

    /// Remove `#hitpay-overlay` from the document, if present.
    pub fn destroy(&self) {
        if let Ok(document) = document() {
            remove_overlay(&document);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.inner.state.borrow().config.visible
    }

    pub fn ready_state(&self) -> ReadyState {
        self.inner.state.borrow().ready.state()
    }

    /// Checkout options passed to the most recent `toggle`.
    pub fn checkout_options(&self) -> JsValue {
        self.inner.state.borrow().config.checkout_options.clone()
    }

    fn swap_page_scroll(&self, was_visible: bool) -> Result<(), HitPayError> {
        let body = document()?.body().ok_or(HitPayError::NoBody)?;
        let style = body.style();
        let mut state = self.inner.state.borrow_mut();
        if was_visible {
            style.set_property("overflow", &state.body_overflow)?;
        } else {
            state.body_overflow = style.get_property_value("overflow")?;
            style.set_property("overflow", "hidden")?;
            if let Some(frame) = &state.frame {
                set_display(frame, "block");
            }
        }
        Ok(())
    }

    fn post_toggle(&self, checkout_options: &JsValue) -> Result<(), HitPayError> {
        let state = self.inner.state.borrow();
        let Some(target) = state.frame.as_ref().and_then(|frame| frame.content_window()) else {
            log::debug!("HitPay frame has no content window; toggle dropped");
            return Ok(());
        };
        let payload = OutboundMessage::toggle(&state.config.default_url, &state.config.init_options)
            .to_js(checkout_options)?;
        target.post_message(&payload, &state.config.init_options.target_origin())?;
        Ok(())
    }

    fn handle_message(&self, event: &MessageEvent) {
        if !self.accepts(event) {
            log::debug!("ignoring message from untrusted origin {}", event.origin());
            return;
        }
        let data = event.data();
        let Ok(message) = serde_wasm_bindgen::from_value::<InboundMessage>(data.clone()) else {
            return;
        };
        self.dispatch(message, &data);
    }

    /// Origin and source checks, only enforced with `verify_origin`.
    fn accepts(&self, event: &MessageEvent) -> bool {
        let state = self.inner.state.borrow();
        let options = &state.config.init_options;
        if !options.verify_origin {
            return true;
        }
        if !options.accepts_origin(&event.origin()) {
            return false;
        }
        let frame_window = state
            .frame
            .as_ref()
            .and_then(|frame| frame.content_window())
            .map(JsValue::from);
        let source = event.source().map(JsValue::from);
        source.is_some() && source == frame_window
    }

    fn dispatch(&self, message: InboundMessage, data: &JsValue) {
        match message {
            InboundMessage::Loaded => {
                self.inner.state.borrow_mut().ready.fulfil();
            }
            InboundMessage::Toggle => {
                let this = self.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    this.toggle_js(Object::new().into(), Callbacks::default()).await;
                });
            }
            InboundMessage::Close => self.destroy(),
            InboundMessage::Destroy => self.close(),
            InboundMessage::Success => {
                let on_success = self.inner.state.borrow().config.callbacks.on_success.clone();
                if let Some(cb) = on_success {
                    cb.emit(());
                }
            }
            InboundMessage::Error => {
                log::error!("HitPay checkout reported an error");
                let error =
                    Reflect::get(data, &JsValue::from_str("error")).unwrap_or(JsValue::UNDEFINED);
                let on_error = self.inner.state.borrow().config.callbacks.on_error.clone();
                if let Some(cb) = on_error {
                    cb.emit(error);
                }
            }
        }
    }
}

fn document() -> Result<Document, HitPayError> {
    web_sys::window()
        .ok_or(HitPayError::NoWindow)?
        .document()
        .ok_or(HitPayError::NoDocument)
}

fn remove_overlay(document: &Document) {
    if let Some(existing) = document.get_element_by_id(OVERLAY_ID) {
        existing.remove();
    }
}

fn create_frame(document: &Document, src: &str) -> Result<HtmlIFrameElement, HitPayError> {
    let frame: HtmlIFrameElement = document
        .create_element("iframe")?
        .dyn_into()
        .map_err(|_| HitPayError::Dom("created element is not an iframe".into()))?;
    frame.set_src(src);
    frame.set_attribute("allow", "payment")?;
    frame.set_id(OVERLAY_ID);
    let style = frame.style();
    for (property, value) in FRAME_STYLE {
        style.set_property(property, value)?;
    }
    Ok(frame)
}

fn set_display(frame: &HtmlElement, value: &str) {
    if let Err(err) = frame.style().set_property("display", value) {
        log::debug!("could not set overlay display: {:?}", err);
    }
}
