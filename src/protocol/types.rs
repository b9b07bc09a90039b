//! Common link-layer types

use std::fmt;

/// MAC address (6 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Port Access Entity group address (IEEE 802.1X nearest non-TPMR bridge)
    pub const PAE_GROUP: MacAddr = MacAddr([0x01, 0x80, 0xc2, 0x00, 0x00, 0x03]);

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// EtherType values seen on the relayed segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum EtherType {
    Vlan = 0x8100,
    Eapol = 0x888E,
    QinQ = 0x88A8,
}

impl EtherType {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x8100 => Some(EtherType::Vlan),
            0x888E => Some(EtherType::Eapol),
            0x88A8 => Some(EtherType::QinQ),
            _ => None,
        }
    }

    /// Whether this EtherType introduces an 802.1Q/802.1ad tag
    pub fn is_tag(value: u16) -> bool {
        matches!(Self::from_u16(value), Some(EtherType::Vlan | EtherType::QinQ))
    }
}

/// VLAN tag (802.1Q)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlanTag {
    /// Priority Code Point (3 bits)
    pub pcp: u8,
    /// Drop Eligible Indicator (1 bit)
    pub dei: bool,
    /// VLAN ID (12 bits, 0-4095)
    pub vid: u16,
}

impl VlanTag {
    pub fn new(vid: u16) -> Self {
        Self {
            pcp: 0,
            dei: false,
            vid: vid & 0x0FFF,
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        let value =
            ((self.pcp as u16 & 0x07) << 13) | ((self.dei as u16) << 12) | (self.vid & 0x0FFF);
        value.to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let value = u16::from_be_bytes(bytes);
        Self {
            pcp: ((value >> 13) & 0x07) as u8,
            dei: (value >> 12) & 0x01 != 0,
            vid: value & 0x0FFF,
        }
    }
}
