//! Turns one acquisition pass into display records.

use crate::records::{ConnectionRecord, InterfaceRecord, PortRecord, Snapshot, WILDCARD};
use crate::source::{IoCounters, NetSource, RawConnection, AF_INET6, AF_INET6_WINDOWS, SOCK_DGRAM};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Connection-state label of a socket awaiting incoming connections.
pub const LISTEN_STATE: &str = "LISTEN";

/// Process names resolved during a single pass.
///
/// Built at the start of [`normalize`] and dropped when it returns, so a
/// name is never carried from one poll into the next.
struct ProcessNames<'a> {
    source: &'a dyn NetSource,
    cache: HashMap<u32, String>,
}

impl<'a> ProcessNames<'a> {
    fn new(source: &'a dyn NetSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    fn lookup(&mut self, pid: u32) -> String {
        if pid == 0 {
            return String::new();
        }
        let source = self.source;
        self.cache
            .entry(pid)
            .or_insert_with(|| match source.process_name(pid) {
                Ok(name) => name,
                Err(e) => {
                    log::debug!("process name lookup for pid {pid} failed: {e}");
                    String::new()
                }
            })
            .clone()
    }
}

/// Run one full pass against `source`.
///
/// A failing acquisition call empties only the category that depends on it.
pub fn normalize(source: &dyn NetSource) -> Snapshot {
    let started = Instant::now();
    let mut names = ProcessNames::new(source);

    let raw = match source.connections() {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("connection enumeration failed: {e}");
            Vec::new()
        }
    };

    let connections = build_connections(&raw, &mut names);
    let ports = build_ports(&raw, &mut names);
    let interfaces = build_interfaces(source);

    log::debug!(
        "pass finished in {:?}: {} connections, {} ports, {} interfaces, {} pids resolved",
        started.elapsed(),
        connections.len(),
        ports.len(),
        interfaces.len(),
        names.cache.len()
    );

    Snapshot {
        connections,
        ports,
        interfaces,
    }
}

fn build_connections(raw: &[RawConnection], names: &mut ProcessNames) -> Vec<ConnectionRecord> {
    raw.iter()
        .filter(|c| !c.status.is_empty())
        .map(|c| ConnectionRecord {
            proto: proto_label(c.kind, c.family),
            local: format_endpoint(&c.local_ip, c.local_port),
            remote: format_endpoint(&c.remote_ip, c.remote_port),
            state: c.status.clone(),
            pid: c.pid,
            process: names.lookup(c.pid),
        })
        .collect()
}

fn build_ports(raw: &[RawConnection], names: &mut ProcessNames) -> Vec<PortRecord> {
    let mut seen = HashSet::new();
    let mut ports = Vec::new();

    // keyed on socket type, not family: a dual-stack listener is one port
    for c in raw.iter().filter(|c| c.status == LISTEN_STATE) {
        if !seen.insert((c.local_port, c.kind)) {
            continue;
        }
        ports.push(PortRecord {
            port: c.local_port,
            proto: proto_label(c.kind, c.family),
            addr: bind_addr(&c.local_ip),
            pid: c.pid,
            process: names.lookup(c.pid),
        });
    }

    ports.sort_by_key(|p| p.port);
    ports
}

fn build_interfaces(source: &dyn NetSource) -> Vec<InterfaceRecord> {
    let raw = match source.interfaces() {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("interface enumeration failed: {e}");
            return Vec::new();
        }
    };

    let counters: HashMap<String, IoCounters> = match source.io_counters() {
        Ok(counters) => counters.into_iter().map(|c| (c.name.clone(), c)).collect(),
        Err(e) => {
            log::warn!("interface counters unavailable: {e}");
            HashMap::new()
        }
    };

    raw.into_iter()
        .filter(|ifc| !ifc.loopback)
        .map(|ifc| {
            let (rx, tx) = counters
                .get(&ifc.name)
                .map_or((0, 0), |c| (c.bytes_recv, c.bytes_sent));
            InterfaceRecord {
                name: ifc.name,
                up: ifc.up,
                addrs: ifc.addrs,
                rx,
                tx,
            }
        })
        .collect()
}

/// Transport label: `udp` for datagram sockets, `tcp` otherwise, with a `6`
/// suffix for IPv6 families.
pub fn proto_label(kind: u32, family: u32) -> String {
    let base = if kind == SOCK_DGRAM { "udp" } else { "tcp" };
    if family == AF_INET6 || family == AF_INET6_WINDOWS {
        format!("{base}6")
    } else {
        base.to_string()
    }
}

pub fn format_endpoint(ip: &str, port: u16) -> String {
    let ip = if ip.is_empty() { WILDCARD } else { ip };
    format!("{ip}:{port}")
}

/// Collapse every any-address spelling to [`WILDCARD`].
pub fn bind_addr(ip: &str) -> String {
    match ip {
        "" | "0.0.0.0" | "::" => WILDCARD.to_string(),
        other => other.to_string(),
    }
}
