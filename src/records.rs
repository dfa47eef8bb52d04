//! Display records produced by one normalization pass.
//!
//! Records are rebuilt wholesale on every poll and handed to the dashboard
//! by value; nothing here is ever mutated after the pass that created it.

use serde::Serialize;

/// Marker shown in place of an unspecified or any-address endpoint.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionRecord {
    pub proto: String,
    pub local: String,
    pub remote: String,
    pub state: String,
    pub pid: u32,
    pub process: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortRecord {
    pub port: u16,
    pub proto: String,
    pub addr: String,
    pub pid: u32,
    pub process: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRecord {
    pub name: String,
    pub up: bool,
    pub addrs: Vec<String>,
    pub rx: u64,
    pub tx: u64,
}

impl InterfaceRecord {
    /// Address shown in the table; only the first bound address is displayed.
    pub fn display_addr(&self) -> &str {
        self.addrs.first().map_or("-", String::as_str)
    }
}

/// Result of one acquisition pass, delivered to the coordinator as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub connections: Vec<ConnectionRecord>,
    pub ports: Vec<PortRecord>,
    pub interfaces: Vec<InterfaceRecord>,
}

impl Snapshot {
    /// Render as TOML for `--dump`.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
