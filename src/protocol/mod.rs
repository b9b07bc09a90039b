//! Link-layer protocol decoding
//!
//! Just enough of Ethernet, 802.1Q and EAPOL to classify captured frames.
//! Frames are never rewritten.

pub mod eapol;
pub mod ethernet;
pub mod types;

pub use eapol::EapolType;
pub use types::*;
