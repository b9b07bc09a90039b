//! OpenBSD: `SIOCADDMULTI` with an `AF_UNSPEC` sockaddr carrying the MAC

use super::{check_membership, cvt, ifname, IFNAMSIZ};
use crate::protocol::MacAddr;
use crate::{Error, Result};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

/// `_IOW('i', 49, struct ifreq)`
const SIOCADDMULTI: libc::c_ulong = 0x8020_6931;
/// `sizeof(struct sockaddr_dl)`
const SOCKADDR_DL_LEN: u8 = 0x20;

/// `struct ifreq` with a plain `struct sockaddr` in `ifr_addr`
#[repr(C)]
struct IfReq {
    name: [u8; IFNAMSIZ],
    len: u8,
    family: u8,
    data: [u8; 14],
}

const _: () = assert!(std::mem::size_of::<IfReq>() == 32);

impl IfReq {
    fn add_multi(interface: &str, group: MacAddr) -> Self {
        let mut data = [0u8; 14];
        data[..6].copy_from_slice(&group.octets());

        Self {
            name: ifname(interface),
            len: SOCKADDR_DL_LEN,
            family: libc::AF_UNSPEC as u8,
            data,
        }
    }
}

pub(super) fn join(interface: &str) -> Result<OwnedFd> {
    let fd = cvt(unsafe { libc::socket(libc::AF_INET, libc::SOCK_DGRAM, 0) })
        .map_err(|e| Error::multicast(interface, e))?;
    let socket = unsafe { OwnedFd::from_raw_fd(fd) };

    let mut req = IfReq::add_multi(interface, MacAddr::PAE_GROUP);
    let status = cvt(unsafe { libc::ioctl(socket.as_raw_fd(), SIOCADDMULTI, &mut req) });
    check_membership(interface, status.map(drop))?;

    Ok(socket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_layout() {
        let req = IfReq::add_multi("em0", MacAddr::PAE_GROUP);
        assert_eq!(&req.name[..4], b"em0\0");
        assert_eq!(req.family, libc::AF_UNSPEC as u8);
        assert_eq!(&req.data[..6], &[0x01, 0x80, 0xc2, 0x00, 0x00, 0x03]);
        assert!(req.data[6..].iter().all(|&b| b == 0));
    }
}
