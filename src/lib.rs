mod bindings;
mod checkout_component;
mod client;
mod components;
mod error;
mod interop;
mod messages;
mod options;

pub use bindings::*;
pub use checkout_component::*;
pub use client::*;
pub use components::*;
pub use error::*;
pub use interop::*;
pub use messages::*;
pub use options::*;
