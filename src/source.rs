//! Host acquisition capability.
//!
//! Everything the dashboard knows about the host comes through [`NetSource`].
//! Implementations report raw, unnormalized values; the normalizer turns them
//! into display records.

use crate::error::Result;

/// Socket type code for connection-oriented (TCP) sockets.
pub const SOCK_STREAM: u32 = 1;
/// Socket type code for datagram (UDP) sockets.
pub const SOCK_DGRAM: u32 = 2;

/// Address family code for IPv4.
pub const AF_INET: u32 = 2;
/// Address family code for IPv6 (Linux).
pub const AF_INET6: u32 = 10;
/// Address family code for IPv6 (Windows).
pub const AF_INET6_WINDOWS: u32 = 23;

/// One socket as reported by the host connection table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawConnection {
    pub kind: u32,
    pub family: u32,
    pub local_ip: String,
    pub local_port: u16,
    pub remote_ip: String,
    pub remote_port: u16,
    /// Connection-state label; empty when the host could not report one.
    pub status: String,
    /// Owning process, 0 when unknown.
    pub pid: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawInterface {
    pub name: String,
    pub up: bool,
    pub loopback: bool,
    pub addrs: Vec<String>,
}

/// Cumulative byte counters for one interface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IoCounters {
    pub name: String,
    pub bytes_recv: u64,
    pub bytes_sent: u64,
}

pub trait NetSource: Send + Sync {
    fn connections(&self) -> Result<Vec<RawConnection>>;
    fn process_name(&self, pid: u32) -> Result<String>;
    fn interfaces(&self) -> Result<Vec<RawInterface>>;
    fn io_counters(&self) -> Result<Vec<IoCounters>>;
}
