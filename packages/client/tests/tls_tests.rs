#![cfg(feature = "__rustls")]

mod common;

use std::time::Duration;

use common::*;
use hopsock_client::{Connection, ErrorOrigin, ProxyType};

#[test]
fn test_tls_against_plaintext_server_fails() {
    hopsock_client::init().expect("TLS init");
    let (port, server) = spawn_server(|mut stream| {
        let mut hello = [0u8; 5];
        std::io::Read::read_exact(&mut stream, &mut hello).expect("ClientHello header");
        assert_eq!(hello[0], 0x16, "expected a TLS handshake record");
        write_all(&mut stream, b"HTTP/1.0 400 Bad Request\r\n\r\n");
        let mut rest = Vec::new();
        let _ = std::io::Read::read_to_end(&mut stream, &mut rest);
    });

    let mut conn = Connection::new();
    conn.set_timeout(Some(Duration::from_secs(5)));
    let err = conn
        .connect("127.0.0.1", port, true)
        .expect_err("Server does not speak TLS");
    assert_eq!(err.origin(), ErrorOrigin::Tls);
    assert!(err.is_tls());
    assert!(!conn.is_connected());
    server.join().expect("Server thread panicked");
}

#[test]
fn test_tls_through_proxy_reports_tls_error_without_hop() {
    let (port, server) = spawn_server(|mut stream| {
        serve_socks5_no_auth(&mut stream, 0);
        let mut hello = [0u8; 5];
        std::io::Read::read_exact(&mut stream, &mut hello).expect("ClientHello header");
        write_all(&mut stream, b"garbage garbage garbage\r\n");
        let mut rest = Vec::new();
        let _ = std::io::Read::read_to_end(&mut stream, &mut rest);
    });

    let mut conn = Connection::new();
    conn.set_timeout(Some(Duration::from_secs(5)));
    conn.add_proxy(ProxyType::Socks5, "127.0.0.1", port, None, None)
        .expect("Failed to add proxy");
    let err = conn
        .connect("secure.example", 443, true)
        .expect_err("Tunnel end does not speak TLS");
    assert!(err.is_tls());
    assert_eq!(err.failed_proxy(), None);
    server.join().expect("Server thread panicked");
}

#[test]
fn test_init_and_shutdown_repeat() {
    hopsock_client::init().expect("First init");
    hopsock_client::init().expect("Second init");
    hopsock_client::shutdown();
    hopsock_client::shutdown();
}
