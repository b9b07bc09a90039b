//! PAE relay
//!
//! Bridges an 802.1X/EAPOL conversation between an ISP's optical network
//! terminal and a router on a separate Ethernet segment. EAPOL frames are
//! captured on both interfaces and written verbatim to the other one, so
//! the router authenticates as if it were plugged into the ONT.

pub mod capture;
pub mod config;
pub mod dataplane;
pub mod error;
pub mod protocol;
pub mod telemetry;

pub use error::{Error, Result};
