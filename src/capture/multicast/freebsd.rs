//! FreeBSD: `SIOCADDMULTI` with a link-level address in `ifr_addr`

use super::{check_membership, cvt, ifname, IFNAMSIZ};
use crate::protocol::MacAddr;
use crate::{Error, Result};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

/// `_IOW('i', 49, struct ifreq)`
const SIOCADDMULTI: libc::c_ulong = 0x8020_6931;
/// `sizeof(struct sockaddr_dl)`
const SOCKADDR_DL_LEN: u8 = 0x36;

/// `struct ifreq` whose address union holds the head of a `sockaddr_dl`
///
/// With no interface name in `sdl_data`, the link-level address starts at
/// the first data byte.
#[repr(C)]
struct IfReq {
    name: [u8; IFNAMSIZ],
    len: u8,
    family: u8,
    index: u16,
    kind: u8,
    nlen: u8,
    alen: u8,
    slen: u8,
    data: [u8; 8],
}

const _: () = assert!(std::mem::size_of::<IfReq>() == 32);

impl IfReq {
    fn add_multi(interface: &str, group: MacAddr) -> Self {
        let mut data = [0u8; 8];
        data[..6].copy_from_slice(&group.octets());

        Self {
            name: ifname(interface),
            len: SOCKADDR_DL_LEN,
            family: libc::AF_LINK as u8,
            index: 0,
            kind: 0,
            nlen: 0,
            alen: 6,
            slen: 0,
            data,
        }
    }
}

pub(super) fn join(interface: &str) -> Result<OwnedFd> {
    let fd = cvt(unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, libc::IPPROTO_UDP) })
        .map_err(|e| Error::multicast(interface, e))?;
    let socket = unsafe { OwnedFd::from_raw_fd(fd) };

    let mut req = IfReq::add_multi(interface, MacAddr::PAE_GROUP);
    let status = cvt(unsafe { libc::ioctl(socket.as_raw_fd(), SIOCADDMULTI, &mut req) });
    check_membership(interface, status.map(drop))?;

    Ok(socket)
}
