//! Configuration validation

use super::{Config, NO_VLAN};
use tracing::{error, warn};

/// Highest usable 802.1Q VLAN identifier
pub const MAX_VLAN_ID: u16 = 4094;

const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn log_diagnostics(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
        for err in &self.errors {
            error!("{}", err);
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate configuration and return warnings/errors
pub fn validate(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    validate_network(config, &mut result);
    validate_logging(config, &mut result);

    result
}

fn validate_network(config: &Config, result: &mut ValidationResult) {
    let network = &config.network;

    if network.wan_interface.is_empty() {
        result.error("network.wan_interface: interface name required");
    }
    if network.router_interface.is_empty() {
        result.error("network.router_interface: interface name required");
    }
    if !network.wan_interface.is_empty() && network.wan_interface == network.router_interface {
        result.error(format!(
            "network: wan_interface and router_interface are both '{}'",
            network.wan_interface
        ));
    }

    if network.vlan_id != NO_VLAN && !(0..=MAX_VLAN_ID as i32).contains(&network.vlan_id) {
        result.error(format!(
            "network.vlan_id: {} out of range (use {} to disable, or 0-{})",
            network.vlan_id, NO_VLAN, MAX_VLAN_ID
        ));
    }

    if !network.promiscuous_mode && !crate::capture::multicast::SUPPORTED {
        result.error(
            "network.promiscuous_mode: multicast group join is not available on this platform, promiscuous mode is required",
        );
    }
}

fn validate_logging(config: &Config, result: &mut ValidationResult) {
    let logging = &config.logging;

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        result.warn(format!(
            "logging.format: unknown format '{}', using pretty",
            logging.format
        ));
    }

    if logging.debug_packets && !logging.debug {
        result.warn("logging.debug_packets: has no effect unless debug is enabled");
    }
}
