#![allow(dead_code)]

use net_tui::error::{NetTuiError, Result};
use net_tui::source::{
    IoCounters, NetSource, RawConnection, RawInterface, AF_INET, AF_INET6, SOCK_DGRAM, SOCK_STREAM,
};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;

/// In-memory acquisition source with per-category failure switches.
#[derive(Default)]
pub struct ScriptedSource {
    pub connections: Vec<RawConnection>,
    pub interfaces: Vec<RawInterface>,
    pub counters: Vec<IoCounters>,
    pub fail_connections: bool,
    pub fail_interfaces: bool,
    /// When set, `connections()` blocks until a value arrives.
    pub gate: Option<Mutex<Receiver<()>>>,
}

impl NetSource for ScriptedSource {
    fn connections(&self) -> Result<Vec<RawConnection>> {
        if let Some(gate) = &self.gate {
            let _ = gate.lock().unwrap().recv();
        }
        if self.fail_connections {
            return Err(NetTuiError::PermissionDenied("/proc/net/tcp".to_string()));
        }
        Ok(self.connections.clone())
    }

    fn process_name(&self, pid: u32) -> Result<String> {
        match pid {
            1 => Ok("systemd".to_string()),
            22 => Ok("sshd".to_string()),
            80 => Ok("nginx".to_string()),
            _ => Err(NetTuiError::ProcessNotFound(pid)),
        }
    }

    fn interfaces(&self) -> Result<Vec<RawInterface>> {
        if self.fail_interfaces {
            return Err(NetTuiError::Platform("getifaddrs failed".to_string()));
        }
        Ok(self.interfaces.clone())
    }

    fn io_counters(&self) -> Result<Vec<IoCounters>> {
        Ok(self.counters.clone())
    }
}

pub fn tcp_listen(ip: &str, port: u16, pid: u32) -> RawConnection {
    RawConnection {
        kind: SOCK_STREAM,
        family: if ip.contains(':') { AF_INET6 } else { AF_INET },
        local_ip: ip.to_string(),
        local_port: port,
        remote_ip: String::new(),
        remote_port: 0,
        status: "LISTEN".to_string(),
        pid,
    }
}

pub fn tcp_established(local_port: u16, remote: &str, pid: u32) -> RawConnection {
    RawConnection {
        kind: SOCK_STREAM,
        family: AF_INET,
        local_ip: "10.0.0.2".to_string(),
        local_port,
        remote_ip: remote.to_string(),
        remote_port: 443,
        status: "ESTABLISHED".to_string(),
        pid,
    }
}

pub fn udp_socket(port: u16) -> RawConnection {
    RawConnection {
        kind: SOCK_DGRAM,
        family: AF_INET,
        local_ip: "0.0.0.0".to_string(),
        local_port: port,
        remote_ip: String::new(),
        remote_port: 0,
        status: "NONE".to_string(),
        pid: 0,
    }
}

pub fn ethernet(name: &str, up: bool) -> RawInterface {
    RawInterface {
        name: name.to_string(),
        up,
        loopback: false,
        addrs: vec!["192.168.1.20/24".to_string(), "fe80::1/64".to_string()],
    }
}

pub fn loopback() -> RawInterface {
    RawInterface {
        name: "lo".to_string(),
        up: true,
        loopback: true,
        addrs: vec!["127.0.0.1/8".to_string()],
    }
}

pub fn populated() -> ScriptedSource {
    ScriptedSource {
        connections: vec![
            tcp_listen("0.0.0.0", 80, 80),
            tcp_listen("0.0.0.0", 22, 22),
            tcp_listen("::", 22, 22),
            tcp_listen("127.0.0.1", 22, 22),
            tcp_established(51234, "93.184.216.34", 80),
            udp_socket(68),
        ],
        interfaces: vec![loopback(), ethernet("eth0", true), ethernet("wlan0", false)],
        counters: vec![IoCounters {
            name: "eth0".to_string(),
            bytes_recv: 1_048_576,
            bytes_sent: 1023,
        }],
        ..Default::default()
    }
}
