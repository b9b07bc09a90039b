//! Configuration types

use serde::Deserialize;

/// Value of `vlan_id` that disables the VLAN-aware filter clause
pub const NO_VLAN: i32 = -1;

/// User-defined configuration (TOML file, overlaid by CLI flags)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Interfaces and capture behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Upstream interface, facing the ONT
    #[serde(default = "default_wan_interface")]
    pub wan_interface: String,
    /// Downstream interface, facing the router
    #[serde(default = "default_router_interface")]
    pub router_interface: String,
    #[serde(default = "default_vlan_id")]
    pub vlan_id: i32,
    #[serde(default)]
    pub promiscuous_mode: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            wan_interface: default_wan_interface(),
            router_interface: default_router_interface(),
            vlan_id: default_vlan_id(),
            promiscuous_mode: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub syslog: bool,
    #[serde(default)]
    pub debug: bool,
    /// Hex dump every received frame (debug level)
    #[serde(default)]
    pub debug_packets: bool,
    /// Output format: pretty, compact, json
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            syslog: false,
            debug: false,
            debug_packets: false,
            format: default_log_format(),
        }
    }
}

/// EAPOL packet types dropped when they arrive from the router
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub start: bool,
    #[serde(default)]
    pub logoff: bool,
}

fn default_wan_interface() -> String {
    "eth1".to_string()
}

fn default_router_interface() -> String {
    "eth2".to_string()
}

fn default_vlan_id() -> i32 {
    NO_VLAN
}

fn default_log_format() -> String {
    "pretty".to_string()
}

// ============================================================================
// Runtime configuration (validated, immutable)
// ============================================================================

/// Parameters consumed by the capture channels and the relay loop
///
/// Built once from a validated [`Config`] and only ever shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub upstream: String,
    pub downstream: String,
    pub vlan_id: Option<u16>,
    pub promiscuous: bool,
    pub ignore_start: bool,
    pub ignore_logoff: bool,
    pub trace_packets: bool,
}

impl RelayConfig {
    /// Convert a configuration that already passed [`super::validate`]
    pub fn from_config(config: &Config) -> Self {
        let vlan_id = u16::try_from(config.network.vlan_id)
            .ok()
            .filter(|&vid| vid <= super::MAX_VLAN_ID);

        Self {
            upstream: config.network.wan_interface.clone(),
            downstream: config.network.router_interface.clone(),
            vlan_id,
            promiscuous: config.network.promiscuous_mode,
            ignore_start: config.ignore.start,
            ignore_logoff: config.ignore.logoff,
            trace_packets: config.logging.debug_packets,
        }
    }
}
