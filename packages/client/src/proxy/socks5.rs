//! SOCKS5 handshake
//!
//! Method negotiation, optional username/password sub-negotiation
//! (RFC 1929) and the CONNECT request (RFC 1928).

use super::io::{HANDSHAKE_BUFFER_SIZE, HandshakeIo};
use super::types::HostInfo;
use crate::dns::resolve::parse_ipv4;
use crate::error::{Error, ErrorCode, Result};

pub const VERSION: u8 = 0x05;
pub const CMD_CONNECT: u8 = 0x01;
pub const RESERVED: u8 = 0x00;

pub const METHOD_NO_AUTH: u8 = 0x00;
pub const METHOD_USER_PASS: u8 = 0x02;
pub const METHOD_NO_ACCEPTABLE: u8 = 0xff;

pub const AUTH_VERSION: u8 = 0x01;

pub const ATYP_IPV4: u8 = 0x01;
pub const ATYP_DOMAIN: u8 = 0x03;

/// Longest host name a domain-type address can carry.
pub const MAX_HOSTNAME_LEN: usize = 255;

/// Greeting offering user/pass when credentials exist, else only no-auth.
#[must_use]
pub fn method_request(with_credentials: bool) -> Vec<u8> {
    if with_credentials {
        vec![VERSION, 2, METHOD_NO_AUTH, METHOD_USER_PASS]
    } else {
        vec![VERSION, 1, METHOD_NO_AUTH]
    }
}

/// Username/password sub-negotiation.
///
/// Lengths are masked to one byte, so overlong fields are cut to
/// `len % 256` bytes rather than rejected.
#[must_use]
pub fn auth_request(username: &str, password: &str) -> Vec<u8> {
    let user = masked(username.as_bytes());
    let pass = masked(password.as_bytes());
    let mut request = Vec::with_capacity(3 + user.len() + pass.len());
    request.push(AUTH_VERSION);
    request.push(user.len() as u8);
    request.extend_from_slice(user);
    request.push(pass.len() as u8);
    request.extend_from_slice(pass);
    request
}

fn masked(field: &[u8]) -> &[u8] {
    &field[..field.len() & 0xff]
}

/// CONNECT request; IPv4 literals go out as addresses, anything else as a
/// domain name of at most [`MAX_HOSTNAME_LEN`] bytes.
pub fn connect_request(host: &str, port: u16) -> Result<Vec<u8>> {
    let mut request = vec![VERSION, CMD_CONNECT, RESERVED];
    if let Some(ip) = parse_ipv4(host) {
        request.push(ATYP_IPV4);
        request.extend_from_slice(&ip.octets());
    } else {
        if host.len() > MAX_HOSTNAME_LEN {
            return Err(Error::own(ErrorCode::Socks5AuthExceedSize));
        }
        request.push(ATYP_DOMAIN);
        request.push(host.len() as u8);
        request.extend_from_slice(host.as_bytes());
    }
    request.extend_from_slice(&port.to_be_bytes());
    Ok(request)
}

/// Map the CONNECT reply status onto the library codes.
pub fn parse_connect_reply(reply: &[u8]) -> Result<()> {
    if reply.len() < 2 {
        return Err(Error::own(ErrorCode::ProxyUnexpectedResponse));
    }
    let code = match reply[1] {
        0 => return Ok(()),
        1 => ErrorCode::ProxyGeneralFailure,
        2 => ErrorCode::ProxyAuthFailed,
        3 => ErrorCode::TargetProxyNetUnreachable,
        4 => ErrorCode::TargetProxyHostUnreachable,
        5 => ErrorCode::TargetProxyConnRefused,
        6 => ErrorCode::TargetProxyTtlExpired,
        7 => ErrorCode::ProxyCommandNotSupported,
        8 => ErrorCode::ProxyAddressTypeNotSupported,
        _ => ErrorCode::ProxyUnexpectedResponse,
    };
    Err(Error::own(code))
}

/// Ask the proxy on `io` to connect to `target`.
pub fn negotiate(
    io: &mut dyn HandshakeIo,
    credentials: Option<(&str, &str)>,
    target: &HostInfo,
) -> Result<()> {
    let greeting = method_request(credentials.is_some());
    io.send(&greeting, greeting.len())?;

    let mut reply = [0u8; 2];
    let n = io.recv(&mut reply, 2)?;
    if n < 2 || reply[0] != VERSION {
        return Err(Error::own(ErrorCode::ProxyUnexpectedResponse));
    }

    match reply[1] {
        METHOD_NO_ACCEPTABLE => {
            tracing::debug!("socks5 proxy accepted none of our auth methods");
            return Err(Error::own(ErrorCode::ProxyAuthFailed));
        }
        METHOD_USER_PASS => authenticate(io, credentials)?,
        _ => {}
    }

    let request = connect_request(target.host(), target.port())?;
    io.send(&request, request.len())?;

    let mut buf = [0u8; HANDSHAKE_BUFFER_SIZE];
    let n = io.recv(&mut buf, HANDSHAKE_BUFFER_SIZE)?;
    parse_connect_reply(&buf[..n])?;

    tracing::debug!("socks5 tunnel to {target} established");
    Ok(())
}

fn authenticate(io: &mut dyn HandshakeIo, credentials: Option<(&str, &str)>) -> Result<()> {
    let (username, password) = match credentials {
        Some((u, p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => {
            tracing::debug!("socks5 proxy demands credentials we do not have");
            return Err(Error::own(ErrorCode::ProxyAuthFailed));
        }
    };

    let request = auth_request(username, password);
    io.send(&request, request.len())?;

    let mut reply = [0u8; 2];
    let n = io.recv(&mut reply, 2)?;
    if n < 2 {
        return Err(Error::own(ErrorCode::ProxyUnexpectedResponse));
    }
    if reply[1] != 0 {
        return Err(Error::own(ErrorCode::ProxyAuthFailed));
    }
    Ok(())
}
