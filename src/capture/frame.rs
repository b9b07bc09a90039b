//! Captured frames and their decoded metadata

use crate::protocol::eapol::EapolHeader;
use crate::protocol::ethernet::Frame;
use crate::protocol::{EapolType, EtherType, MacAddr, VlanTag};
use std::fmt;
use std::fmt::Write as _;

/// A frame read from a capture channel
///
/// The bytes are kept exactly as captured; the decoded fields are derived
/// once at construction and never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    data: Vec<u8>,
    header: Option<Header>,
    eapol: Option<EapolHeader>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    dst: MacAddr,
    src: MacAddr,
    ethertype: u16,
    vlan_tag: Option<VlanTag>,
}

impl CapturedFrame {
    /// Wrap captured bytes, decoding what can be decoded
    ///
    /// Frames too short to carry an Ethernet or EAPOL header are still
    /// accepted; they simply carry no metadata.
    pub fn new(data: Vec<u8>) -> Self {
        let (header, eapol) = match Frame::parse(&data) {
            Ok(frame) => {
                let header = Header {
                    dst: frame.dst_mac(),
                    src: frame.src_mac(),
                    ethertype: frame.ethertype(),
                    vlan_tag: frame.vlan_tag(),
                };
                let eapol = if header.ethertype == EtherType::Eapol as u16 {
                    EapolHeader::parse(frame.payload()).ok()
                } else {
                    None
                };
                (Some(header), eapol)
            }
            Err(_) => (None, None),
        };

        Self {
            data,
            header,
            eapol,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn ethertype(&self) -> Option<u16> {
        self.header.map(|h| h.ethertype)
    }

    pub fn vlan_tag(&self) -> Option<VlanTag> {
        self.header.and_then(|h| h.vlan_tag)
    }

    pub fn eapol_type(&self) -> Option<EapolType> {
        self.eapol.and_then(|h| h.packet_type())
    }

    /// Classic 16-bytes-per-line hex dump, used for packet tracing
    pub fn hex_dump(&self) -> String {
        let mut out = String::with_capacity(self.data.len() * 4);
        for (i, chunk) in self.data.chunks(16).enumerate() {
            let _ = write!(out, "{:08x} ", i * 16);
            for byte in chunk {
                let _ = write!(out, " {:02x}", byte);
            }
            for _ in chunk.len()..16 {
                out.push_str("   ");
            }
            out.push_str("  |");
            out.extend(chunk.iter().map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            }));
            out.push_str("|\n");
        }
        out
    }
}

impl fmt::Display for CapturedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(header) = self.header else {
            return write!(f, "undecodable frame, {} bytes", self.data.len());
        };

        write!(f, "{} > {}", header.src, header.dst)?;
        if let Some(tag) = header.vlan_tag {
            write!(f, " vlan {}", tag.vid)?;
        }
        match self.eapol {
            Some(eapol) => {
                write!(f, " EAPOL v{} ", eapol.version)?;
                match eapol.packet_type() {
                    Some(kind) => write!(f, "{}", kind)?,
                    None => write!(f, "type {}", eapol.raw_type)?,
                }
                write!(f, ", body {} bytes", eapol.body_length)
            }
            None => write!(
                f,
                " ethertype 0x{:04x}, {} bytes",
                header.ethertype,
                self.data.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ethernet::FrameBuilder;

    const ROUTER: MacAddr = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

    fn eapol_frame(kind: EapolType, tag: Option<u16>) -> Vec<u8> {
        let mut builder = FrameBuilder::new().dst_mac(MacAddr::PAE_GROUP).src_mac(ROUTER);
        if let Some(vid) = tag {
            builder = builder.vlan_tag(VlanTag::new(vid));
        }
        builder
            .ethertype(EtherType::Eapol as u16)
            .payload(&[0x02, kind as u8, 0x00, 0x00])
            .build()
    }

    #[test]
    fn test_decodes_eapol_start() {
        let frame = CapturedFrame::new(eapol_frame(EapolType::Start, None));
        assert_eq!(frame.ethertype(), Some(0x888E));
        assert_eq!(frame.eapol_type(), Some(EapolType::Start));
        assert!(frame.vlan_tag().is_none());
        assert_eq!(
            frame.to_string(),
            "00:11:22:33:44:55 > 01:80:c2:00:00:03 EAPOL v2 Start, body 0 bytes"
        );
    }

    #[test]
    fn test_decodes_tagged_logoff() {
        let frame = CapturedFrame::new(eapol_frame(EapolType::Logoff, Some(100)));
        assert_eq!(frame.eapol_type(), Some(EapolType::Logoff));
        assert_eq!(frame.vlan_tag().map(|t| t.vid), Some(100));
        assert!(frame.to_string().contains("vlan 100"));
    }

    #[test]
    fn test_non_eapol_has_no_eapol_header() {
        let data = FrameBuilder::new()
            .dst_mac(MacAddr::PAE_GROUP)
            .src_mac(ROUTER)
            .ethertype(0x0800)
            .payload(&[0x45, 0x00])
            .build();
        let frame = CapturedFrame::new(data.clone());
        assert_eq!(frame.ethertype(), Some(0x0800));
        assert!(frame.eapol_type().is_none());
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_truncated_frame_keeps_bytes() {
        let frame = CapturedFrame::new(vec![0xff; 6]);
        assert_eq!(frame.len(), 6);
        assert!(frame.ethertype().is_none());
        assert_eq!(frame.to_string(), "undecodable frame, 6 bytes");
    }

    #[test]
    fn test_hex_dump() {
        let frame = CapturedFrame::new(eapol_frame(EapolType::Start, None));
        let dump = frame.hex_dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000  01 80 c2 00 00 03"));
        assert!(lines[0].contains("88 8e 02 01"));
        assert!(lines[1].starts_with("00000010  00 00 "));
    }
}
