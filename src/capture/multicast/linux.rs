//! Linux: packet socket membership

use super::{check_membership, cvt};
use crate::capture::ifindex;
use crate::protocol::MacAddr;
use crate::{Error, Result};
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

const ETH_P_PAE: u16 = libc::ETH_P_PAE as u16;

pub(super) fn join(interface: &str) -> Result<OwnedFd> {
    let ifindex = ifindex(interface)? as i32;

    let fd = cvt(unsafe {
        libc::socket(
            libc::AF_PACKET,
            libc::SOCK_RAW | libc::SOCK_CLOEXEC,
            ETH_P_PAE.to_be() as i32,
        )
    })
    .map_err(|e| Error::multicast(interface, e))?;
    let socket = unsafe { OwnedFd::from_raw_fd(fd) };

    let mut address = [0u8; 8];
    address[..6].copy_from_slice(&MacAddr::PAE_GROUP.octets());
    let mreq = libc::packet_mreq {
        mr_ifindex: ifindex,
        mr_type: libc::PACKET_MR_MULTICAST as u16,
        mr_alen: 6,
        mr_address: address,
    };

    let status = cvt(unsafe {
        libc::setsockopt(
            socket.as_raw_fd(),
            libc::SOL_PACKET,
            libc::PACKET_ADD_MEMBERSHIP,
            &mreq as *const _ as *const libc::c_void,
            mem::size_of::<libc::packet_mreq>() as libc::socklen_t,
        )
    });
    check_membership(interface, status.map(drop))?;

    // Membership alone is not enough, the socket must be bound to the
    // interface for the kernel to keep delivering the group to it.
    let sockaddr = libc::sockaddr_ll {
        sll_family: libc::AF_PACKET as u16,
        sll_protocol: ETH_P_PAE.to_be(),
        sll_ifindex: ifindex,
        sll_hatype: 0,
        sll_pkttype: 0,
        sll_halen: 0,
        sll_addr: [0; 8],
    };

    cvt(unsafe {
        libc::bind(
            socket.as_raw_fd(),
            &sockaddr as *const _ as *const libc::sockaddr,
            mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    })
    .map_err(|e| Error::multicast(interface, e))?;

    Ok(socket)
}
