//! Ethernet II / 802.1Q header decoding

use super::{EtherType, MacAddr, VlanTag};
use crate::{Error, Result};

/// Minimum Ethernet header size (without FCS)
pub const MIN_FRAME_SIZE: usize = 14;
/// Size of one 802.1Q/802.1ad tag
const TAG_SIZE: usize = 4;
/// Stacked tags beyond this depth are not unwrapped
const MAX_TAGS: usize = 2;

/// Parsed Ethernet frame (zero-copy reference)
///
/// Up to two stacked VLAN tags are skipped so the inner EtherType is
/// visible; only the outermost tag is reported.
#[derive(Debug)]
pub struct Frame<'a> {
    buffer: &'a [u8],
    vlan_tag: Option<VlanTag>,
    ethertype_offset: usize,
}

impl<'a> Frame<'a> {
    /// Parse an Ethernet frame from a buffer
    pub fn parse(buffer: &'a [u8]) -> Result<Self> {
        if buffer.len() < MIN_FRAME_SIZE {
            return Err(Error::Parse("frame too short".into()));
        }

        let mut ethertype_offset = 12;
        let mut vlan_tag = None;

        for _ in 0..MAX_TAGS {
            let ethertype =
                u16::from_be_bytes([buffer[ethertype_offset], buffer[ethertype_offset + 1]]);
            if !EtherType::is_tag(ethertype) {
                break;
            }
            if buffer.len() < ethertype_offset + TAG_SIZE + 2 {
                return Err(Error::Parse("VLAN frame too short".into()));
            }
            let tci = [buffer[ethertype_offset + 2], buffer[ethertype_offset + 3]];
            vlan_tag.get_or_insert(VlanTag::from_bytes(tci));
            ethertype_offset += TAG_SIZE;
        }

        Ok(Self {
            buffer,
            vlan_tag,
            ethertype_offset,
        })
    }

    pub fn dst_mac(&self) -> MacAddr {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.buffer[0..6]);
        MacAddr(mac)
    }

    pub fn src_mac(&self) -> MacAddr {
        let mut mac = [0u8; 6];
        mac.copy_from_slice(&self.buffer[6..12]);
        MacAddr(mac)
    }

    /// EtherType after any VLAN tags
    pub fn ethertype(&self) -> u16 {
        u16::from_be_bytes([
            self.buffer[self.ethertype_offset],
            self.buffer[self.ethertype_offset + 1],
        ])
    }

    pub fn vlan_tag(&self) -> Option<VlanTag> {
        self.vlan_tag
    }

    pub fn payload(&self) -> &[u8] {
        &self.buffer[self.ethertype_offset + 2..]
    }
}

/// Builder for constructing Ethernet frames
pub struct FrameBuilder {
    buffer: Vec<u8>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn dst_mac(mut self, mac: MacAddr) -> Self {
        self.buffer.extend_from_slice(&mac.0);
        self
    }

    pub fn src_mac(mut self, mac: MacAddr) -> Self {
        self.buffer.extend_from_slice(&mac.0);
        self
    }

    pub fn vlan_tag(mut self, tag: VlanTag) -> Self {
        self.buffer
            .extend_from_slice(&(EtherType::Vlan as u16).to_be_bytes());
        self.buffer.extend_from_slice(&tag.to_bytes());
        self
    }

    pub fn ethertype(mut self, ethertype: u16) -> Self {
        self.buffer.extend_from_slice(&ethertype.to_be_bytes());
        self
    }

    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.buffer.extend_from_slice(payload);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}
