use super::ifaddrs;
use crate::{
    error::{NetTuiError, Result},
    source::{
        IoCounters, NetSource, RawConnection, RawInterface, AF_INET, AF_INET6, SOCK_DGRAM,
        SOCK_STREAM,
    },
};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};

/// Connection tables under `<proc>/net`, with the socket type and family
/// each one reports.
const TABLES: [(&str, u32, u32); 4] = [
    ("tcp", SOCK_STREAM, AF_INET),
    ("tcp6", SOCK_STREAM, AF_INET6),
    ("udp", SOCK_DGRAM, AF_INET),
    ("udp6", SOCK_DGRAM, AF_INET6),
];

/// Reads connection tables, process names and counters from procfs and
/// interfaces from `getifaddrs(3)`.
pub struct LinuxSource {
    root: PathBuf,
}

impl Default for LinuxSource {
    fn default() -> Self {
        Self::new("/proc")
    }
}

impl LinuxSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn is_available(&self) -> bool {
        self.root.join("net").is_dir()
    }

    /// Map socket inode to owning pid by walking `<proc>/<pid>/fd`.
    ///
    /// Processes we may not inspect are skipped; their sockets stay at pid 0.
    fn socket_owners(&self) -> HashMap<u64, u32> {
        let mut owners = HashMap::new();
        let Ok(entries) = fs::read_dir(&self.root) else {
            return owners;
        };

        for entry in entries.flatten() {
            let Some(pid) = entry.file_name().to_str().and_then(|s| s.parse::<u32>().ok()) else {
                continue;
            };
            let Ok(fds) = fs::read_dir(entry.path().join("fd")) else {
                continue;
            };
            for fd in fds.flatten() {
                if let Ok(target) = fs::read_link(fd.path()) {
                    if let Some(inode) = parse_socket_link(&target) {
                        owners.entry(inode).or_insert(pid);
                    }
                }
            }
        }

        owners
    }
}

impl NetSource for LinuxSource {
    fn connections(&self) -> Result<Vec<RawConnection>> {
        let owners = self.socket_owners();
        let mut connections = Vec::new();
        let mut first_error = None;
        let mut readable = 0;

        for (table, kind, family) in TABLES {
            match fs::read_to_string(self.root.join("net").join(table)) {
                Ok(content) => {
                    readable += 1;
                    connections.extend(parse_table(&content, kind, family, &owners));
                }
                Err(e) => {
                    log::debug!("cannot read net/{table}: {e}");
                    first_error.get_or_insert(e);
                }
            }
        }

        match (readable, first_error) {
            (0, Some(e)) => Err(e.into()),
            _ => Ok(connections),
        }
    }

    fn process_name(&self, pid: u32) -> Result<String> {
        let path = self.root.join(pid.to_string()).join("comm");
        match fs::read_to_string(&path) {
            Ok(name) => Ok(name.trim_end().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(NetTuiError::ProcessNotFound(pid)),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Err(NetTuiError::PermissionDenied(path.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn interfaces(&self) -> Result<Vec<RawInterface>> {
        ifaddrs::interfaces()
    }

    fn io_counters(&self) -> Result<Vec<IoCounters>> {
        let content = fs::read_to_string(self.root.join("net").join("dev"))?;
        Ok(parse_net_dev(&content))
    }
}

fn parse_socket_link(target: &Path) -> Option<u64> {
    target
        .to_str()?
        .strip_prefix("socket:[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

/// Parse one `net/{tcp,udp}[6]` table. Malformed lines are skipped.
fn parse_table(
    content: &str,
    kind: u32,
    family: u32,
    owners: &HashMap<u64, u32>,
) -> Vec<RawConnection> {
    let mut connections = Vec::new();

    for line in content.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            continue;
        }

        let (Ok((local_ip, local_port)), Ok((remote_ip, remote_port))) =
            (parse_hex_endpoint(fields[1]), parse_hex_endpoint(fields[2]))
        else {
            log::debug!("skipping malformed socket line: {line}");
            continue;
        };

        let status = if kind == SOCK_STREAM {
            tcp_state_label(fields[3]).to_string()
        } else {
            "NONE".to_string()
        };

        let pid = fields[9]
            .parse::<u64>()
            .ok()
            .and_then(|inode| owners.get(&inode).copied())
            .unwrap_or(0);

        connections.push(RawConnection {
            kind,
            family,
            local_ip,
            local_port,
            remote_ip,
            remote_port,
            status,
            pid,
        });
    }

    connections
}

/// Decode `0100007F:0016` style endpoints. Addresses are stored as
/// host-order 32-bit words.
fn parse_hex_endpoint(field: &str) -> Result<(String, u16)> {
    let (ip_hex, port_hex) = field
        .split_once(':')
        .ok_or_else(|| NetTuiError::Parse(format!("invalid socket address: {field}")))?;

    let port = u16::from_str_radix(port_hex, 16)
        .map_err(|e| NetTuiError::Parse(format!("invalid port {port_hex}: {e}")))?;

    let words = ip_hex
        .as_bytes()
        .chunks(8)
        .map(|chunk| {
            std::str::from_utf8(chunk)
                .ok()
                .and_then(|s| u32::from_str_radix(s, 16).ok())
                .ok_or_else(|| NetTuiError::Parse(format!("invalid address {ip_hex}")))
        })
        .collect::<Result<Vec<u32>>>()?;

    let ip = match words.as_slice() {
        [word] if ip_hex.len() == 8 => Ipv4Addr::from(word.to_le_bytes()).to_string(),
        [a, b, c, d] if ip_hex.len() == 32 => {
            let mut octets = [0u8; 16];
            for (i, word) in [a, b, c, d].into_iter().enumerate() {
                octets[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
            }
            Ipv6Addr::from(octets).to_string()
        }
        _ => return Err(NetTuiError::Parse(format!("invalid address length: {ip_hex}"))),
    };

    Ok((ip, port))
}

fn tcp_state_label(hex: &str) -> &'static str {
    match hex {
        "01" => "ESTABLISHED",
        "02" => "SYN_SENT",
        "03" => "SYN_RECV",
        "04" => "FIN_WAIT1",
        "05" => "FIN_WAIT2",
        "06" => "TIME_WAIT",
        "07" => "CLOSE",
        "08" => "CLOSE_WAIT",
        "09" => "LAST_ACK",
        "0A" => "LISTEN",
        "0B" => "CLOSING",
        _ => "",
    }
}

fn parse_net_dev(content: &str) -> Vec<IoCounters> {
    content
        .lines()
        .skip(2)
        .filter_map(|line| {
            let (name, rest) = line.split_once(':')?;
            let parts: Vec<&str> = rest.split_whitespace().collect();
            Some(IoCounters {
                name: name.trim().to_string(),
                bytes_recv: parts.first().and_then(|v| v.parse().ok()).unwrap_or(0),
                bytes_sent: parts.get(8).and_then(|v| v.parse().ok()).unwrap_or(0),
            })
        })
        .collect()
}
