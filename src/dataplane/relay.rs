//! The relay loop
//!
//! Frames from the ONT side are mirrored to the router side untouched.
//! Frames from the router side pass the admission policy first. Both
//! channels are awaited together; `tokio::select!` polls them in random
//! order, so a busy side cannot starve the other.

use super::policy::AdmissionPolicy;
use crate::capture::{CapturedFrame, Channel};
use crate::config::RelayConfig;
use crate::telemetry::{DirectionStats, RelayStats};
use crate::Result;
use std::convert::Infallible;
use tracing::debug;

/// Relay between the upstream (ONT) and downstream (router) channels
pub struct Relay<U, D> {
    upstream: U,
    downstream: D,
    policy: AdmissionPolicy,
    trace_packets: bool,
    stats: RelayStats,
}

impl<U: Channel, D: Channel> Relay<U, D> {
    pub fn new(upstream: U, downstream: D, config: &RelayConfig) -> Self {
        Self {
            upstream,
            downstream,
            policy: AdmissionPolicy::from_config(config),
            trace_packets: config.trace_packets,
            stats: RelayStats::new(),
        }
    }

    pub fn stats(&self) -> &RelayStats {
        &self.stats
    }

    /// Relay frames until a channel fails
    ///
    /// A closed channel or a failed write ends the loop with the error; the
    /// caller is expected to shut down.
    pub async fn run(&mut self) -> Result<Infallible> {
        loop {
            tokio::select! {
                frame = self.upstream.recv() => {
                    let frame = frame?;
                    Self::observe(self.upstream.name(), &frame, &self.stats.upstream, self.trace_packets);
                    self.downstream.send(&frame).await?;
                    self.stats.upstream.record_relayed();
                }
                frame = self.downstream.recv() => {
                    let frame = frame?;
                    Self::observe(self.downstream.name(), &frame, &self.stats.downstream, self.trace_packets);
                    if self.policy.should_relay(&frame) {
                        self.upstream.send(&frame).await?;
                        self.stats.downstream.record_relayed();
                    } else {
                        self.stats.downstream.record_suppressed();
                    }
                }
            }
        }
    }

    fn observe(interface: &str, frame: &CapturedFrame, stats: &DirectionStats, trace: bool) {
        stats.record_rx(frame.len());
        debug!(
            interface,
            ethertype = frame.ethertype(),
            vlan = frame.vlan_tag().map(|tag| tag.vid),
            frame = %frame,
            "received frame"
        );
        if trace {
            debug!(interface, "frame dump:\n{}", frame.hex_dump());
        }
    }
}
