//! BPF admission filter for the capture channels

/// Matches untagged EAPOL frames
pub const EAPOL_FILTER: &str = "ether proto 0x888e";

/// Build the filter installed on every capture channel
///
/// EAPOL is always matched. With a VLAN id an explicit `vlan` clause is
/// added as an alternative, since some link layers only hand tagged frames
/// to filters that test for the tag.
pub fn admission_filter(vlan_id: Option<u16>) -> String {
    match vlan_id {
        Some(vid) => format!("{0} or (vlan {1} and {0})", EAPOL_FILTER, vid),
        None => EAPOL_FILTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ethernet::FrameBuilder;
    use crate::protocol::{MacAddr, VlanTag};

    #[test]
    fn test_untagged_filter() {
        assert_eq!(admission_filter(None), "ether proto 0x888e");
    }

    #[test]
    fn test_vlan_filter() {
        assert_eq!(
            admission_filter(Some(100)),
            "ether proto 0x888e or (vlan 100 and ether proto 0x888e)"
        );
    }

    #[test]
    fn test_vlan_zero_is_a_real_vlan() {
        assert_eq!(
            admission_filter(Some(0)),
            "ether proto 0x888e or (vlan 0 and ether proto 0x888e)"
        );
    }

    fn eapol_frame(vlan: Option<u16>, ethertype: u16) -> Vec<u8> {
        let mut builder = FrameBuilder::new()
            .dst_mac(MacAddr::PAE_GROUP)
            .src_mac(MacAddr([0x02, 0, 0, 0, 0, 1]));
        if let Some(vid) = vlan {
            builder = builder.vlan_tag(VlanTag::new(vid));
        }
        builder
            .ethertype(ethertype)
            .payload(&[0x02, 0x01, 0x00, 0x00])
            .build()
    }

    fn compile(filter: &str) -> pcap::BpfProgram {
        let capture = pcap::Capture::dead(pcap::Linktype::ETHERNET).unwrap();
        capture.compile(filter, true).unwrap()
    }

    #[test]
    fn test_untagged_filter_matches_eapol_only() {
        let program = compile(&admission_filter(None));
        assert!(program.filter(&eapol_frame(None, 0x888e)));
        assert!(!program.filter(&eapol_frame(None, 0x0800)));
        assert!(!program.filter(&eapol_frame(Some(100), 0x888e)));
    }

    #[test]
    fn test_vlan_filter_matches_configured_tag_only() {
        let program = compile(&admission_filter(Some(100)));
        assert!(program.filter(&eapol_frame(None, 0x888e)));
        assert!(program.filter(&eapol_frame(Some(100), 0x888e)));
        assert!(!program.filter(&eapol_frame(Some(200), 0x888e)));
        assert!(!program.filter(&eapol_frame(Some(100), 0x0800)));
    }
}
