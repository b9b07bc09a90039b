//! pcap-backed capture channel

use super::filter::admission_filter;
use super::multicast::Membership;
use super::{ifindex, CapturedFrame, Channel};
use crate::config::RelayConfig;
use crate::{Error, Result};
use pcap::{Active, Capture, Direction, Linktype};
use std::os::unix::io::{AsRawFd, RawFd};
use tokio::io::unix::AsyncFd;
use tracing::{debug, info, warn};

/// Bytes captured per frame; enough for jumbo and tagged frames
pub const SNAPLEN: i32 = 9000;

/// Live capture on one interface plus, when not promiscuous, the socket
/// holding its PAE multicast membership
///
/// Both are opened by [`InterfaceHandle::open`] and released together when
/// the handle is dropped.
pub struct InterfaceHandle {
    name: String,
    // Declared before `capture` so the fd is deregistered before pcap closes it
    readiness: AsyncFd<RawFd>,
    capture: Capture<Active>,
    membership: Option<Membership>,
}

impl InterfaceHandle {
    /// Open an inbound-only EAPOL capture on `interface`
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(interface: &str, config: &RelayConfig) -> Result<Self> {
        ifindex(interface)?;

        let mut capture = Capture::from_device(interface)
            .map_err(|e| Error::capture(interface, e))?
            .promisc(config.promiscuous)
            .snaplen(SNAPLEN)
            .immediate_mode(true)
            .open()
            .map_err(|e| Error::capture(interface, e))?;

        // Frames we emit on this interface must not come back to us
        capture
            .direction(Direction::In)
            .map_err(|e| Error::capture(interface, e))?;

        let filter = admission_filter(config.vlan_id);
        capture
            .filter(&filter, true)
            .map_err(|e| Error::capture(interface, e))?;
        debug!(interface, filter = %filter, "installed capture filter");

        let linktype = capture.get_datalink();
        if linktype != Linktype::ETHERNET {
            warn!(interface, ?linktype, "interface is not Ethernet, frames will not be decoded");
        }

        let membership = if config.promiscuous {
            None
        } else {
            Some(Membership::join(interface)?)
        };

        let capture = capture
            .setnonblock()
            .map_err(|e| Error::capture(interface, e))?;
        let readiness = AsyncFd::new(capture.as_raw_fd())?;

        info!(
            interface,
            promiscuous = config.promiscuous,
            vlan = ?config.vlan_id,
            "capture channel open"
        );

        Ok(Self {
            name: interface.to_string(),
            readiness,
            capture,
            membership,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Receive the next frame (async)
    pub async fn recv(&mut self) -> Result<CapturedFrame> {
        loop {
            let mut guard = self.readiness.readable().await?;

            match self.capture.next_packet() {
                Ok(packet) => {
                    if packet.header.caplen < packet.header.len {
                        warn!(
                            interface = %self.name,
                            captured = packet.header.caplen,
                            length = packet.header.len,
                            "frame truncated by snapshot length"
                        );
                    }
                    // Readiness stays set: pcap may hold more buffered frames
                    return Ok(CapturedFrame::new(packet.data.to_vec()));
                }
                Err(pcap::Error::TimeoutExpired) => guard.clear_ready(),
                Err(pcap::Error::NoMorePackets) => {
                    return Err(Error::ChannelClosed {
                        interface: self.name.clone(),
                    })
                }
                Err(e) => return Err(Error::capture(&self.name, e)),
            }
        }
    }

    /// Emit a frame exactly as captured
    pub fn send(&mut self, frame: &CapturedFrame) -> Result<()> {
        self.capture
            .sendpacket(frame.data())
            .map_err(|e| Error::Egress {
                interface: self.name.clone(),
                source: Box::new(e),
            })
    }
}

impl Drop for InterfaceHandle {
    fn drop(&mut self) {
        info!(interface = %self.name, "closing capture channel");
    }
}

impl Channel for InterfaceHandle {
    fn name(&self) -> &str {
        &self.name
    }

    async fn recv(&mut self) -> Result<CapturedFrame> {
        InterfaceHandle::recv(self).await
    }

    async fn send(&mut self, frame: &CapturedFrame) -> Result<()> {
        InterfaceHandle::send(self, frame)
    }
}
