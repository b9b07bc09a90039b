use clap::{Parser, Subcommand};
use pae_relay::capture::InterfaceHandle;
use pae_relay::config::{self, Config, RelayConfig};
use pae_relay::dataplane::Relay;
use pae_relay::telemetry::{init_logging, LogConfig};
use pae_relay::{Error, Result};
use std::path::PathBuf;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pae-relay")]
#[command(version, about = "Relays 802.1X/EAPOL frames between an ONT and a router")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Interface facing the ONT
    #[arg(long = "if-wan", value_name = "IFACE", global = true)]
    if_wan: Option<String>,

    /// Interface facing the router
    #[arg(long = "if-router", value_name = "IFACE", global = true)]
    if_router: Option<String>,

    /// Place interfaces into promiscuous mode instead of joining the PAE group
    #[arg(long, global = true)]
    promiscuous: bool,

    /// Also capture EAPOL tagged with this VLAN id (-1 disables)
    #[arg(long, value_name = "ID", allow_negative_numbers = true, global = true)]
    vlan: Option<i32>,

    /// Drop EAPOL-Start frames sent by the router
    #[arg(long, global = true)]
    ignore_start: bool,

    /// Drop EAPOL-Logoff frames sent by the router
    #[arg(long, global = true)]
    ignore_logoff: bool,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Log to syslog instead of stderr
    #[arg(long, global = true)]
    syslog: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Relay frames until interrupted (default)
    Run,
    /// Check the configuration without opening any interface
    Validate,
}

impl Cli {
    /// Load the config file, if any, and overlay the command line
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load(path)?,
            None => Config::default(),
        };

        if let Some(name) = &self.if_wan {
            config.network.wan_interface = name.clone();
        }
        if let Some(name) = &self.if_router {
            config.network.router_interface = name.clone();
        }
        if let Some(vid) = self.vlan {
            config.network.vlan_id = vid;
        }
        config.network.promiscuous_mode |= self.promiscuous;
        config.ignore.start |= self.ignore_start;
        config.ignore.logoff |= self.ignore_logoff;
        config.logging.debug |= self.debug;
        config.logging.syslog |= self.syslog;

        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(None);
            error!("failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(Some(&LogConfig::from_config(&config.logging)));

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&config),
        Commands::Validate => cmd_validate(&config),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn check(config: &Config) -> Result<()> {
    let validation = config::validate(config);
    validation.log_diagnostics();

    if validation.has_errors() {
        return Err(Error::Config(format!(
            "{} configuration error(s)",
            validation.errors.len()
        )));
    }
    Ok(())
}

fn cmd_validate(config: &Config) -> Result<()> {
    check(config)?;
    info!("configuration is valid");
    Ok(())
}

fn cmd_run(config: &Config) -> Result<()> {
    check(config)?;
    let relay_config = RelayConfig::from_config(config);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let upstream = InterfaceHandle::open(&relay_config.upstream, &relay_config)?;
        let downstream = InterfaceHandle::open(&relay_config.downstream, &relay_config)?;
        let mut relay = Relay::new(upstream, downstream, &relay_config);

        info!(
            wan = %relay_config.upstream,
            router = %relay_config.downstream,
            "relaying EAPOL"
        );

        let outcome = tokio::select! {
            result = relay.run() => match result {
                Ok(never) => match never {},
                Err(e) => Err(e),
            },
            signal = shutdown_signal() => signal.map(|name| info!(signal = name, "shutting down")).map_err(Error::from),
        };

        relay.stats().log_summary();
        // Closes both captures and their membership sockets
        drop(relay);
        outcome
    })
}

async fn shutdown_signal() -> std::io::Result<&'static str> {
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}
