//! System getaddrinfo-based resolver
//!
//! Asks for stream-socket addresses of either family and keeps the first
//! one, with the port patched in since the lookup is done without a service.

use std::ffi::CString;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::{io, mem, ptr};

use super::traits::Resolve;
use crate::error::{Error, ErrorCode, Result};

/// Resolver backed by the platform `getaddrinfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaiResolver;

impl GaiResolver {
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, host: &str, port: u16) -> Result<SocketAddr> {
        let c_host = CString::new(host).map_err(|_| Error::own(ErrorCode::Null))?;

        // SAFETY: addrinfo is a plain C struct, all-zero is a valid hints value.
        let mut hints: libc::addrinfo = unsafe { mem::zeroed() };
        hints.ai_family = libc::AF_UNSPEC;
        hints.ai_socktype = libc::SOCK_STREAM;

        let mut res: *mut libc::addrinfo = ptr::null_mut();
        // SAFETY: all pointers are valid for the duration of the call.
        let ret = unsafe { libc::getaddrinfo(c_host.as_ptr(), ptr::null(), &hints, &mut res) };
        if ret != 0 {
            tracing::debug!("getaddrinfo({host}) failed with {ret}");
            if ret == libc::EAI_SYSTEM {
                return Err(Error::system(&io::Error::last_os_error()));
            }
            return Err(Error::resolve(ret));
        }

        let first = AddrInfoList(res).first(port);
        first.ok_or_else(|| Error::resolve(libc::EAI_NONAME))
    }
}

/// Owns a `getaddrinfo` result list and frees it exactly once.
struct AddrInfoList(*mut libc::addrinfo);

impl AddrInfoList {
    fn first(&self, port: u16) -> Option<SocketAddr> {
        let mut cur = self.0;
        while !cur.is_null() {
            // SAFETY: cur is a node of the list returned by getaddrinfo.
            let info = unsafe { &*cur };
            if let Some(addr) = unsafe { sockaddr_to_std(info.ai_addr, port) } {
                return Some(addr);
            }
            cur = info.ai_next;
        }
        None
    }
}

impl Drop for AddrInfoList {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: the pointer came from a successful getaddrinfo.
            unsafe { libc::freeaddrinfo(self.0) };
            self.0 = ptr::null_mut();
        }
    }
}

/// Convert a C socket address, replacing its port.
///
/// # Safety
/// `addr` must be null or point at a socket address whose family field
/// matches its actual layout.
unsafe fn sockaddr_to_std(addr: *const libc::sockaddr, port: u16) -> Option<SocketAddr> {
    if addr.is_null() {
        return None;
    }
    match i32::from(unsafe { (*addr).sa_family }) {
        libc::AF_INET => {
            let sin = unsafe { &*(addr.cast::<libc::sockaddr_in>()) };
            let ip = Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr));
            Some(SocketAddr::V4(SocketAddrV4::new(ip, port)))
        }
        libc::AF_INET6 => {
            let sin6 = unsafe { &*(addr.cast::<libc::sockaddr_in6>()) };
            let ip = Ipv6Addr::from(sin6.sin6_addr.s6_addr);
            Some(SocketAddr::V6(SocketAddrV6::new(
                ip,
                port,
                sin6.sin6_flowinfo,
                sin6.sin6_scope_id,
            )))
        }
        _ => None,
    }
}
