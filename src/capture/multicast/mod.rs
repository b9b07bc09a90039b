//! Link-layer membership in the PAE multicast group
//!
//! Without promiscuous mode a NIC only hands up frames addressed to it, to
//! broadcast, or to multicast groups the kernel has been asked to accept.
//! 802.1X frames go to `01:80:c2:00:00:03`, so a non-promiscuous capture
//! has to register that group on the interface and keep the registration
//! alive for as long as it captures.
//!
//! How the registration is made is kernel specific and picked at build time:
//! - Linux: `PACKET_ADD_MEMBERSHIP` on an `AF_PACKET` socket
//! - FreeBSD / OpenBSD: `SIOCADDMULTI` on a datagram socket, each with its
//!   own `struct ifreq` layout
//!
//! Every other target gets an implementation that always fails, so
//! promiscuous mode is required there.

#[cfg(target_os = "freebsd")]
mod freebsd;
#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "openbsd")]
mod openbsd;
#[cfg(not(any(target_os = "linux", target_os = "freebsd", target_os = "openbsd")))]
mod unsupported;

#[cfg(target_os = "freebsd")]
use freebsd as imp;
#[cfg(target_os = "linux")]
use linux as imp;
#[cfg(target_os = "openbsd")]
use openbsd as imp;
#[cfg(not(any(target_os = "linux", target_os = "freebsd", target_os = "openbsd")))]
use unsupported as imp;

use crate::Result;
use std::os::fd::{AsRawFd, OwnedFd};
#[cfg(any(target_os = "linux", target_os = "freebsd", target_os = "openbsd"))]
use {crate::Error, std::io};
use tracing::{debug, info};

/// Whether this build can join multicast groups without promiscuous mode
pub const SUPPORTED: bool = cfg!(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd"
));

/// Kernel-side interface name limit, including the terminating NUL
#[cfg(any(target_os = "freebsd", target_os = "openbsd"))]
const IFNAMSIZ: usize = 16;

/// Held membership of an interface in the PAE group
///
/// The socket is never read from or written to; it only pins the
/// membership. Dropping it closes the socket.
#[derive(Debug)]
pub struct Membership {
    interface: String,
    socket: OwnedFd,
}

impl Membership {
    /// Register `interface` in the PAE multicast group
    ///
    /// Joining a group the interface is already a member of succeeds.
    pub fn join(interface: &str) -> Result<Self> {
        let socket = imp::join(interface)?;
        info!(interface, "joined PAE link-layer multicast group");

        Ok(Self {
            interface: interface.to_string(),
            socket,
        })
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl Drop for Membership {
    fn drop(&mut self) {
        debug!(
            interface = %self.interface,
            fd = self.socket.as_raw_fd(),
            "closing multicast membership socket"
        );
    }
}

/// Map the status of the membership request, treating an existing
/// registration as success
#[cfg(any(target_os = "linux", target_os = "freebsd", target_os = "openbsd"))]
fn check_membership(interface: &str, status: io::Result<()>) -> Result<()> {
    match status {
        Ok(()) => Ok(()),
        Err(e) if e.raw_os_error() == Some(libc::EADDRINUSE) => {
            debug!(interface, "already a member of the PAE link-layer multicast group");
            Ok(())
        }
        Err(e) => Err(Error::multicast(interface, e)),
    }
}

/// Result of a libc call that reports failure as a negative return value
#[cfg(any(target_os = "linux", target_os = "freebsd", target_os = "openbsd"))]
fn cvt(ret: libc::c_int) -> io::Result<libc::c_int> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret)
    }
}

/// Fixed-width, NUL-terminated interface name as the kernel expects it
///
/// Names longer than `IFNAMSIZ - 1` bytes are truncated.
#[cfg(any(target_os = "freebsd", target_os = "openbsd"))]
fn ifname(interface: &str) -> [u8; IFNAMSIZ] {
    let mut name = [0u8; IFNAMSIZ];
    let len = interface.len().min(IFNAMSIZ - 1);
    name[..len].copy_from_slice(&interface.as_bytes()[..len]);
    name
}
