//! E2E tests over veth pairs
//!
//! Need root (or CAP_NET_ADMIN + CAP_NET_RAW) and iproute2.
//! Run with: cargo test --test e2e -- --ignored
//!
//! Topology:
//! ```text
//!   ont side                 relay                  router side
//!   pae-ont1 ---veth--- pae-ont0 | pae-rtr0 ---veth--- pae-rtr1
//! ```

mod veth;

use pae_relay::capture::{InterfaceHandle, Membership};
use pae_relay::config::RelayConfig;
use pae_relay::dataplane::Relay;
use pae_relay::protocol::ethernet::FrameBuilder;
use pae_relay::protocol::{EapolType, EtherType, MacAddr};
use std::thread;
use std::time::{Duration, Instant};
use veth::VethPair;

const PAE_GROUP: &str = "01:80:c2:00:00:03";

fn relay_config(upstream: &str, downstream: &str) -> RelayConfig {
    RelayConfig {
        upstream: upstream.to_string(),
        downstream: downstream.to_string(),
        vlan_id: None,
        promiscuous: false,
        ignore_start: false,
        ignore_logoff: true,
        trace_packets: false,
    }
}

fn eapol(kind: EapolType, tag: u8) -> Vec<u8> {
    FrameBuilder::new()
        .dst_mac(MacAddr::PAE_GROUP)
        .src_mac(MacAddr([0x02, 0, 0, 0, 0, tag]))
        .ethertype(EtherType::Eapol as u16)
        .payload(&[0x01, kind as u8, 0x00, 0x00])
        .payload(&[0u8; 42])
        .build()
}

/// Collect EAPOL frames arriving on `interface` for `window`
fn sink(interface: String, window: Duration) -> thread::JoinHandle<Vec<Vec<u8>>> {
    let mut capture = pcap::Capture::from_device(interface.as_str())
        .expect("sink device")
        .immediate_mode(true)
        .timeout(100)
        .open()
        .expect("sink open");
    capture
        .direction(pcap::Direction::In)
        .expect("sink direction");
    capture
        .filter("ether proto 0x888e", true)
        .expect("sink filter");

    thread::spawn(move || {
        let deadline = Instant::now() + window;
        let mut frames = Vec::new();
        while Instant::now() < deadline {
            match capture.next_packet() {
                Ok(packet) => frames.push(packet.data.to_vec()),
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(e) => panic!("sink capture failed: {}", e),
            }
        }
        frames
    })
}

fn inject(interface: &str, frames: &[Vec<u8>]) {
    let mut capture = pcap::Capture::from_device(interface)
        .expect("inject device")
        .open()
        .expect("inject open");
    for frame in frames {
        capture.sendpacket(frame.as_slice()).expect("inject");
    }
}

/// Joining twice on the same interface is not an error
#[test]
#[ignore] // Requires root
fn test_membership_join_idempotent() {
    let pair = VethPair::create("pae-m0", "pae-m1").expect("Failed to create veth pair");

    let first = Membership::join(&pair.near).expect("first join");
    assert!(
        pair.multicast_groups().contains(PAE_GROUP),
        "PAE group should be registered on {}",
        pair.near
    );

    let second = Membership::join(&pair.near).expect("second join");
    assert_eq!(second.interface(), pair.near);

    drop(second);
    drop(first);
}

#[test]
fn test_open_unknown_interface_fails() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let config = relay_config("pae-none0", "pae-none1");
    let result = rt.block_on(async { InterfaceHandle::open("pae-none0", &config).map(|_| ()) });
    assert!(matches!(
        result,
        Err(pae_relay::Error::InterfaceNotFound { name }) if name == "pae-none0"
    ));
}

/// Router frames reach the ONT side minus logoffs; ONT frames reach the
/// router side untouched
#[test]
#[ignore] // Requires root
fn test_relay_over_veth() {
    let ont = VethPair::create("pae-ont0", "pae-ont1").expect("Failed to create ont pair");
    let rtr = VethPair::create("pae-rtr0", "pae-rtr1").expect("Failed to create router pair");
    let config = relay_config(&ont.near, &rtr.near);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let upstream = rt
        .block_on(async { InterfaceHandle::open(&config.upstream, &config) })
        .expect("open upstream");
    let downstream = rt
        .block_on(async { InterfaceHandle::open(&config.downstream, &config) })
        .expect("open downstream");
    let mut relay = Relay::new(upstream, downstream, &config);

    let at_ont = sink(ont.far.clone(), Duration::from_secs(3));
    let at_router = sink(rtr.far.clone(), Duration::from_secs(3));

    let from_router = vec![
        eapol(EapolType::Start, 1),
        eapol(EapolType::Logoff, 2),
        eapol(EapolType::Eap, 3),
    ];
    let from_ont = vec![eapol(EapolType::Eap, 4), eapol(EapolType::Logoff, 5)];

    let injector = {
        let (ont_far, rtr_far) = (ont.far.clone(), rtr.far.clone());
        let (from_ont, from_router) = (from_ont.clone(), from_router.clone());
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            inject(&rtr_far, &from_router);
            inject(&ont_far, &from_ont);
        })
    };

    let outcome = rt.block_on(async {
        tokio::time::timeout(Duration::from_secs(2), relay.run()).await
    });
    assert!(outcome.is_err(), "relay should still be running: {:?}", outcome);
    injector.join().unwrap();

    let at_ont = at_ont.join().unwrap();
    let at_router = at_router.join().unwrap();
    assert_eq!(at_ont, vec![from_router[0].clone(), from_router[2].clone()]);
    assert_eq!(at_router, from_ont);

    let stats = relay.stats();
    assert_eq!(stats.downstream.suppressed.get(), 1);
    assert_eq!(stats.upstream.relayed.get(), 2);
}
