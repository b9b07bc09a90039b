//! EAPOL (IEEE 802.1X) header decoding
//!
//! Only the fixed four byte header is looked at; the body is opaque to the
//! relay and is never interpreted.

use crate::{Error, Result};
use std::fmt;

/// Size of the EAPOL header: version, packet type, body length
pub const HEADER_SIZE: usize = 4;

/// EAPOL packet type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EapolType {
    Eap = 0,
    Start = 1,
    Logoff = 2,
    Key = 3,
    EncapsulatedAsfAlert = 4,
    Mka = 5,
    AnnouncementGeneric = 6,
    AnnouncementSpecific = 7,
    AnnouncementReq = 8,
}

impl EapolType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(EapolType::Eap),
            1 => Some(EapolType::Start),
            2 => Some(EapolType::Logoff),
            3 => Some(EapolType::Key),
            4 => Some(EapolType::EncapsulatedAsfAlert),
            5 => Some(EapolType::Mka),
            6 => Some(EapolType::AnnouncementGeneric),
            7 => Some(EapolType::AnnouncementSpecific),
            8 => Some(EapolType::AnnouncementReq),
            _ => None,
        }
    }
}

impl fmt::Display for EapolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EapolType::Eap => "EAP-Packet",
            EapolType::Start => "Start",
            EapolType::Logoff => "Logoff",
            EapolType::Key => "Key",
            EapolType::EncapsulatedAsfAlert => "ASF-Alert",
            EapolType::Mka => "MKA",
            EapolType::AnnouncementGeneric => "Announcement-Generic",
            EapolType::AnnouncementSpecific => "Announcement-Specific",
            EapolType::AnnouncementReq => "Announcement-Req",
        };
        f.write_str(name)
    }
}

/// Decoded EAPOL header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EapolHeader {
    pub version: u8,
    /// Raw packet type byte; see [`EapolHeader::packet_type`]
    pub raw_type: u8,
    pub body_length: u16,
}

impl EapolHeader {
    /// Parse the header from the EAPOL payload of an Ethernet frame
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::Parse("EAPOL header too short".into()));
        }

        Ok(Self {
            version: data[0],
            raw_type: data[1],
            body_length: u16::from_be_bytes([data[2], data[3]]),
        })
    }

    /// Known packet type, `None` for values this crate has no name for
    pub fn packet_type(&self) -> Option<EapolType> {
        EapolType::from_u8(self.raw_type)
    }
}
