//! Capture channels
//!
//! One live, inbound-only, EAPOL-filtered capture per relayed interface.
//! The relay loop only sees the [`Channel`] trait, which is implemented by
//! the pcap-backed [`InterfaceHandle`] and by in-memory channels in tests.

pub mod filter;
mod frame;
mod handle;
pub mod multicast;

pub use frame::CapturedFrame;
pub use handle::{InterfaceHandle, SNAPLEN};
pub use multicast::Membership;

use crate::{Error, Result};
use std::ffi::CString;
use std::future::Future;

/// Source and sink of frames on one interface
pub trait Channel: Send {
    /// Interface name, for logging
    fn name(&self) -> &str;

    /// Wait for the next captured frame
    ///
    /// Must be cancel-safe: dropping the future before it completes may not
    /// lose a frame.
    fn recv(&mut self) -> impl Future<Output = Result<CapturedFrame>> + Send;

    /// Emit a frame unmodified
    fn send(&mut self, frame: &CapturedFrame) -> impl Future<Output = Result<()>> + Send;
}

/// Resolve an interface name to its kernel index
pub(crate) fn ifindex(interface: &str) -> Result<u32> {
    let not_found = || Error::InterfaceNotFound {
        name: interface.to_string(),
    };

    let name = CString::new(interface).map_err(|_| not_found())?;
    match unsafe { libc::if_nametoindex(name.as_ptr()) } {
        0 => Err(not_found()),
        index => Ok(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ifindex_unknown_interface() {
        match ifindex("pae-relay-none0") {
            Err(Error::InterfaceNotFound { name }) => assert_eq!(name, "pae-relay-none0"),
            other => panic!("expected InterfaceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_ifindex_rejects_nul() {
        assert!(ifindex("eth\0").is_err());
    }
}
