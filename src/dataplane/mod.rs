//! Data plane: what gets relayed, and the loop that relays it

mod policy;
mod relay;

pub use policy::{AdmissionPolicy, Verdict};
pub use relay::Relay;
