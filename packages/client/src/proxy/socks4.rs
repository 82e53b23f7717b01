//! SOCKS4 / SOCKS4a handshake
//!
//! The 4a form lets the proxy resolve the target name. Proxies answering
//! 4a with "rejected" get one retry in plain SOCKS4 with a locally resolved
//! IPv4 address.

use std::net::{Ipv4Addr, SocketAddr};

use super::io::HandshakeIo;
use super::types::HostInfo;
use crate::dns::Resolve;
use crate::error::{Error, ErrorCode, Result};

pub const VERSION: u8 = 0x04;
pub const CMD_CONNECT: u8 = 0x01;

pub const REPLY_GRANTED: u8 = 0x5a;
pub const REPLY_REJECTED: u8 = 0x5b;
pub const REPLY_NO_IDENTD: u8 = 0x5c;
pub const REPLY_IDENTD_MISMATCH: u8 = 0x5d;

/// Length of a SOCKS4 reply.
pub const REPLY_LEN: usize = 8;

/// How the target is named in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Socks4Target<'a> {
    /// SOCKS4a: placeholder address 0.0.0.1 plus the host name.
    Hostname(&'a str),
    /// Plain SOCKS4 with a resolved address.
    Address(Ipv4Addr),
}

/// Outcome of a well-formed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Socks4Reply {
    Granted,
    Rejected,
}

/// Build a CONNECT request with an empty user id.
#[must_use]
pub fn encode_request(target: Socks4Target<'_>, port: u16) -> Vec<u8> {
    let mut request = Vec::with_capacity(16);
    request.push(VERSION);
    request.push(CMD_CONNECT);
    request.extend_from_slice(&port.to_be_bytes());
    match target {
        Socks4Target::Hostname(_) => request.extend_from_slice(&[0, 0, 0, 1]),
        Socks4Target::Address(ip) => request.extend_from_slice(&ip.octets()),
    }
    request.push(0x00);
    if let Socks4Target::Hostname(host) = target {
        request.extend_from_slice(host.as_bytes());
        request.push(0x00);
    }
    request
}

/// Interpret a reply; `Rejected` is left to the caller to retry or fail.
pub fn parse_reply(reply: &[u8]) -> Result<Socks4Reply> {
    if reply.len() < REPLY_LEN || reply[0] != 0 {
        return Err(Error::own(ErrorCode::ProxyUnexpectedResponse));
    }
    match reply[1] {
        REPLY_GRANTED => Ok(Socks4Reply::Granted),
        REPLY_REJECTED => Ok(Socks4Reply::Rejected),
        REPLY_NO_IDENTD | REPLY_IDENTD_MISMATCH => Err(Error::own(ErrorCode::ProxyAuthFailed)),
        _ => Err(Error::own(ErrorCode::ProxyUnexpectedResponse)),
    }
}

/// Ask the proxy on `io` to connect to `target`.
pub fn negotiate(
    io: &mut dyn HandshakeIo,
    target: &mut HostInfo,
    resolver: &dyn Resolve,
) -> Result<()> {
    let mut try_4a = true;
    loop {
        let request = if try_4a {
            encode_request(Socks4Target::Hostname(target.host()), target.port())
        } else {
            let ip = resolve_ipv4(target, resolver)?;
            encode_request(Socks4Target::Address(ip), target.port())
        };

        io.send(&request, 0)?;
        let mut reply = [0u8; REPLY_LEN];
        let n = io.recv(&mut reply, REPLY_LEN)?;

        match parse_reply(&reply[..n])? {
            Socks4Reply::Granted => {
                tracing::debug!("socks4 tunnel to {target} granted");
                return Ok(());
            }
            Socks4Reply::Rejected if try_4a => {
                tracing::debug!("socks4a rejected for {target}, retrying as socks4");
                try_4a = false;
            }
            Socks4Reply::Rejected => {
                return Err(Error::own(ErrorCode::TargetProxyConnectFailed));
            }
        }
    }
}

fn resolve_ipv4(target: &mut HostInfo, resolver: &dyn Resolve) -> Result<Ipv4Addr> {
    match target.resolve(resolver)? {
        SocketAddr::V4(v4) => Ok(*v4.ip()),
        SocketAddr::V6(_) => Err(Error::own(ErrorCode::Socks4NoIp6)),
    }
}
