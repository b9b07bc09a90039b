//! Throwaway veth pairs for e2e tests

use std::process::{Command, Output};

/// A veth pair that is deleted again when dropped
pub struct VethPair {
    pub near: String,
    pub far: String,
}

impl VethPair {
    /// Create `near <-> far` and bring both ends up
    pub fn create(near: &str, far: &str) -> Result<Self, String> {
        // Leftover from an aborted run
        let _ = ip(&["link", "del", near]);

        let output = ip(&["link", "add", near, "type", "veth", "peer", "name", far])?;
        if !output.status.success() {
            return Err(format!(
                "ip link add failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ));
        }

        let pair = Self {
            near: near.to_string(),
            far: far.to_string(),
        };
        for end in [near, far] {
            let output = ip(&["link", "set", end, "up"])?;
            if !output.status.success() {
                return Err(format!(
                    "ip link set {} up failed: {}",
                    end,
                    String::from_utf8_lossy(&output.stderr)
                ));
            }
        }
        Ok(pair)
    }

    /// Link-layer multicast groups registered on the near end
    pub fn multicast_groups(&self) -> String {
        ip(&["maddr", "show", "dev", &self.near])
            .map(|o| String::from_utf8_lossy(&o.stdout).into_owned())
            .unwrap_or_default()
    }
}

impl Drop for VethPair {
    fn drop(&mut self) {
        // Deleting one end removes the peer as well
        let _ = ip(&["link", "del", &self.near]);
    }
}

fn ip(args: &[&str]) -> Result<Output, String> {
    Command::new("ip")
        .args(args)
        .output()
        .map_err(|e| format!("Failed to run ip: {}", e))
}
