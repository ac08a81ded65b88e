//! Domain core of the EchoWhisper wellness companion.
//!
//! Everything here is free of I/O: persistence sits behind the repository
//! traits and time behind [`clock::Clock`].

pub mod breathing;
pub mod clock;
pub mod config;
pub mod conversation;
pub mod entitlement;
pub mod error;
pub mod mood;
pub mod persona;
pub mod prompt;
pub mod safety;
pub mod throttle;
pub mod validation;
pub mod wellness;

mod bounded;

pub use bounded::prepend_bounded;
pub use error::{EchoError, Result};
