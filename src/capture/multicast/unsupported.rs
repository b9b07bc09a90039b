//! Targets without a known way to join link-layer multicast groups

use crate::{Error, Result};
use std::os::fd::OwnedFd;

pub(super) fn join(interface: &str) -> Result<OwnedFd> {
    Err(Error::MulticastUnsupported {
        interface: interface.to_string(),
    })
}
