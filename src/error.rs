use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("interface {name} not found")]
    InterfaceNotFound { name: String },

    #[error("capture on {interface} failed: {source}")]
    Capture {
        interface: String,
        #[source]
        source: pcap::Error,
    },

    #[error("could not join the PAE multicast group on {interface}: {source}")]
    Multicast {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("joining link-layer multicast groups is not supported on this platform ({interface}); enable promiscuous mode")]
    MulticastUnsupported { interface: String },

    #[error("capture channel on {interface} closed")]
    ChannelClosed { interface: String },

    #[error("failed to emit frame on {interface}: {source}")]
    Egress {
        interface: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn capture(interface: &str, source: pcap::Error) -> Self {
        Error::Capture {
            interface: interface.to_string(),
            source,
        }
    }

    pub(crate) fn multicast(interface: &str, source: io::Error) -> Self {
        Error::Multicast {
            interface: interface.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
