use crate::{
    error::{NetTuiError, Result},
    source::RawInterface,
};
use std::ffi::CStr;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ptr;

/// Enumerate interfaces with `getifaddrs(3)`, merging the per-address
/// entries into one record per interface name in order of first appearance.
pub fn interfaces() -> Result<Vec<RawInterface>> {
    let mut ifap: *mut libc::ifaddrs = ptr::null_mut();

    // SAFETY: getifaddrs fills `ifap` with a list we release below.
    if unsafe { libc::getifaddrs(&mut ifap) } != 0 {
        return Err(NetTuiError::Platform(format!(
            "getifaddrs failed: {}",
            std::io::Error::last_os_error()
        )));
    }

    let mut result: Vec<RawInterface> = Vec::new();
    let mut current = ifap;

    while !current.is_null() {
        // SAFETY: `current` is a node of the list returned by getifaddrs,
        // which stays valid until freeifaddrs.
        let ifa = unsafe { &*current };
        current = ifa.ifa_next;

        if ifa.ifa_name.is_null() {
            continue;
        }
        // SAFETY: non-null, NUL-terminated name owned by the list.
        let name = unsafe { CStr::from_ptr(ifa.ifa_name) }
            .to_string_lossy()
            .into_owned();

        let index = match result.iter().position(|i| i.name == name) {
            Some(index) => index,
            None => {
                result.push(RawInterface {
                    name,
                    ..Default::default()
                });
                result.len() - 1
            }
        };

        let flags = ifa.ifa_flags as libc::c_int;
        let entry = &mut result[index];
        entry.up |= flags & libc::IFF_UP != 0;
        entry.loopback |= flags & libc::IFF_LOOPBACK != 0;

        // SAFETY: address pointers come from the same live list.
        if let Some(addr) = unsafe { format_cidr(ifa.ifa_addr, ifa.ifa_netmask) } {
            entry.addrs.push(addr);
        }
    }

    // SAFETY: `ifap` came from a successful getifaddrs call.
    unsafe { libc::freeifaddrs(ifap) };
    Ok(result)
}

/// `addr/prefixlen` for IPv4 and IPv6 entries; link-layer entries yield `None`.
unsafe fn format_cidr(addr: *const libc::sockaddr, mask: *const libc::sockaddr) -> Option<String> {
    if addr.is_null() {
        return None;
    }

    let (ip, prefix) = match i32::from(unsafe { (*addr).sa_family }) {
        libc::AF_INET => {
            let sin = unsafe { &*(addr as *const libc::sockaddr_in) };
            let ip = Ipv4Addr::from(sin.sin_addr.s_addr.to_ne_bytes()).to_string();
            let prefix = (!mask.is_null()).then(|| {
                let m = unsafe { &*(mask as *const libc::sockaddr_in) };
                m.sin_addr.s_addr.count_ones()
            });
            (ip, prefix)
        }
        libc::AF_INET6 => {
            let sin6 = unsafe { &*(addr as *const libc::sockaddr_in6) };
            let ip = Ipv6Addr::from(sin6.sin6_addr.s6_addr).to_string();
            let prefix = (!mask.is_null()).then(|| {
                let m = unsafe { &*(mask as *const libc::sockaddr_in6) };
                m.sin6_addr.s6_addr.iter().map(|b| b.count_ones()).sum::<u32>()
            });
            (ip, prefix)
        }
        _ => return None,
    };

    Some(match prefix {
        Some(prefix) => format!("{ip}/{prefix}"),
        None => ip,
    })
}
