//! Admission policy for frames coming from the router
//!
//! Some routers keep re-sending EAPOL-Start and EAPOL-Logoff, which makes
//! the ISP side restart authentication. The policy lets those be dropped
//! on the router side; everything else, including traffic that is not
//! EAPOL at all, is admitted.

use crate::capture::CapturedFrame;
use crate::config::RelayConfig;
use crate::protocol::EapolType;
use tracing::debug;

/// Outcome of the admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Relay,
    Suppress(EapolType),
}

/// Which EAPOL packet types to drop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionPolicy {
    pub ignore_start: bool,
    pub ignore_logoff: bool,
}

impl AdmissionPolicy {
    pub fn new(ignore_start: bool, ignore_logoff: bool) -> Self {
        Self {
            ignore_start,
            ignore_logoff,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.ignore_start, config.ignore_logoff)
    }

    pub fn evaluate(&self, frame: &CapturedFrame) -> Verdict {
        match frame.eapol_type() {
            Some(EapolType::Start) if self.ignore_start => Verdict::Suppress(EapolType::Start),
            Some(EapolType::Logoff) if self.ignore_logoff => Verdict::Suppress(EapolType::Logoff),
            _ => Verdict::Relay,
        }
    }

    /// Whether `frame` should be forwarded
    pub fn should_relay(&self, frame: &CapturedFrame) -> bool {
        match self.evaluate(frame) {
            Verdict::Relay => true,
            Verdict::Suppress(kind) => {
                debug!("ignoring EAPOL-{} from router", kind);
                false
            }
        }
    }
}
