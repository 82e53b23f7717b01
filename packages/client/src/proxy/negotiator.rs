//! Proxy chain negotiation
//!
//! With the socket already connected to hop 0, every hop `i` is asked to
//! tunnel to hop `i + 1`, and the last hop to the real target. The first
//! failure aborts the chain and is attributed to the hop that produced it.

use super::chain::ProxyChain;
use super::io::HandshakeIo;
use super::types::{HostInfo, ProxyHop, ProxyType};
use super::{http_connect, socks4, socks5};
use crate::dns::Resolve;
use crate::error::Result;

/// Drive the handshake of every hop in `chain` over `io`.
pub fn negotiate_chain(
    io: &mut dyn HandshakeIo,
    chain: &mut ProxyChain,
    target: &mut HostInfo,
    resolver: &dyn Resolve,
) -> Result<()> {
    let hops = chain.hops_mut();
    for i in 0..hops.len() {
        let (head, tail) = hops.split_at_mut(i + 1);
        let hop = &head[i];
        let next = match tail.first_mut() {
            Some(next_hop) => &mut next_hop.host,
            None => &mut *target,
        };

        tracing::debug!("proxy #{i} ({} {}): negotiating tunnel to {next}", hop.kind, hop.host);
        negotiate_hop(io, hop, next, resolver).map_err(|e| e.with_failed_proxy(i))?;
    }
    Ok(())
}

/// One hop's handshake towards `next`.
pub fn negotiate_hop(
    io: &mut dyn HandshakeIo,
    hop: &ProxyHop,
    next: &mut HostInfo,
    resolver: &dyn Resolve,
) -> Result<()> {
    match hop.kind {
        ProxyType::Socks4 => socks4::negotiate(io, next, resolver),
        ProxyType::Socks5 => socks5::negotiate(io, hop.credentials(), next),
        ProxyType::Http => http_connect::negotiate(io, next),
        ProxyType::None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::LiteralResolver;
    use crate::error::ErrorCode;
    use crate::proxy::io::scripted::ScriptedIo;

    fn chain_of(hops: Vec<ProxyHop>) -> ProxyChain {
        let mut chain = ProxyChain::new();
        for hop in hops {
            chain.push(hop).expect("valid hop");
        }
        chain
    }

    #[test]
    fn each_hop_tunnels_to_the_next() {
        let mut chain = chain_of(vec![
            ProxyHop::new(ProxyType::Socks5, "10.0.0.1", 1080),
            ProxyHop::new(ProxyType::Http, "10.0.0.2", 3128),
        ]);
        let mut target = HostInfo::new("example.com", 443);
        let mut io = ScriptedIo::new([
            &[5u8, 0][..],
            &[5u8, 0, 0, 1, 0, 0, 0, 0, 0, 0][..],
            &b"HTTP/1.1 200 OK\r\n\r\n"[..],
        ]);

        negotiate_chain(&mut io, &mut chain, &mut target, &LiteralResolver::new())
            .expect("chain negotiates");

        assert_eq!(io.sent[1], vec![5, 1, 0, 1, 10, 0, 0, 2, 0x0c, 0x38]);
        assert_eq!(io.sent[2], b"CONNECT example.com:443 HTTP/1.1\r\n\r\n".to_vec());
    }

    #[test]
    fn failure_is_attributed_to_its_hop() {
        let mut chain = chain_of(vec![
            ProxyHop::new(ProxyType::Http, "10.0.0.1", 3128),
            ProxyHop::new(ProxyType::Socks5, "10.0.0.2", 1080),
        ]);
        let mut target = HostInfo::new("example.com", 443);
        let mut io = ScriptedIo::new([
            &b"HTTP/1.1 200 OK\r\n\r\n"[..],
            &[5u8, 0][..],
            &[5u8, 5, 0, 1, 0, 0, 0, 0, 0, 0][..],
        ]);

        let err = negotiate_chain(&mut io, &mut chain, &mut target, &LiteralResolver::new())
            .expect_err("second hop refuses");
        assert_eq!(err.failed_proxy(), Some(1));
        assert_eq!(err.own_code(), Some(ErrorCode::TargetProxyConnRefused));
    }

    #[test]
    fn pass_through_hop_exchanges_nothing() {
        let mut chain = chain_of(vec![ProxyHop::new(ProxyType::None, "10.0.0.1", 1)]);
        let mut target = HostInfo::new("example.com", 443);
        let mut io = ScriptedIo::new(Vec::<Vec<u8>>::new());
        negotiate_chain(&mut io, &mut chain, &mut target, &LiteralResolver::new())
            .expect("nothing to negotiate");
        assert!(io.sent.is_empty());
    }
}
