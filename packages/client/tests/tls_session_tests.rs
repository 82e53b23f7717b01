#![cfg(feature = "__rustls")]

mod common;

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use common::spawn_server;
use hopsock_client::{Connection, ErrorCode, ErrorOrigin};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{ClientConfig, RootCertStore, ServerConfig, ServerConnection, StreamOwned};

struct TestPki {
    server: Arc<ServerConfig>,
    client: Arc<ClientConfig>,
}

fn provider() -> Arc<rustls::crypto::CryptoProvider> {
    Arc::new(rustls::crypto::ring::default_provider())
}

/// Self-signed certificate for 127.0.0.1 and configs trusting only it.
fn test_pki() -> TestPki {
    let certified = rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_string()])
        .expect("Failed to generate certificate");
    let cert: CertificateDer<'static> = certified.cert.der().clone();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(
        certified.signing_key.serialize_der(),
    ));

    let server = ServerConfig::builder_with_provider(provider())
        .with_safe_default_protocol_versions()
        .expect("Server protocol versions")
        .with_no_client_auth()
        .with_single_cert(vec![cert.clone()], key)
        .expect("Server certificate");

    let mut roots = RootCertStore::empty();
    roots.add(cert).expect("Failed to trust test certificate");
    let client = ClientConfig::builder_with_provider(provider())
        .with_safe_default_protocol_versions()
        .expect("Client protocol versions")
        .with_root_certificates(roots)
        .with_no_client_auth();

    TestPki {
        server: Arc::new(server),
        client: Arc::new(client),
    }
}

fn accept_tls(config: Arc<ServerConfig>, stream: TcpStream) -> StreamOwned<ServerConnection, TcpStream> {
    let conn = ServerConnection::new(config).expect("Failed to create server session");
    StreamOwned::new(conn, stream)
}

fn tls_connection(pki: &TestPki, port: u16) -> Connection {
    let mut conn = Connection::new();
    conn.set_timeout(Some(Duration::from_secs(5)));
    conn.set_tls_config(Arc::clone(&pki.client));
    conn.connect("127.0.0.1", port, true)
        .expect("Failed to establish TLS connection");
    conn
}

#[test]
fn test_tls_session_data_path() {
    let pki = test_pki();
    let server_config = Arc::clone(&pki.server);
    let (go_tx, go_rx) = mpsc::channel::<()>();
    let (port, server) = spawn_server(move |stream| {
        let mut tls = accept_tls(server_config, stream);
        let mut hello = [0u8; 5];
        tls.read_exact(&mut hello).expect("Failed to read hello");
        assert_eq!(&hello, b"hello");

        tls.write_all(b"line one\nrest").expect("Failed to write first record");
        tls.flush().expect("Failed to flush");
        go_rx.recv().expect("Client should signal");
        tls.write_all(b"\n").expect("Failed to finish line");
        tls.flush().expect("Failed to flush");

        go_rx.recv().expect("Client should signal");
        tls.write_all(b"tail\n").expect("Failed to write tail");
        tls.flush().expect("Failed to flush");

        let mut rest = [0u8; 16];
        let n = tls.read(&mut rest).expect("close_notify ends the session cleanly");
        assert_eq!(n, 0);
    });

    let mut conn = tls_connection(&pki, port);
    assert!(conn.is_tls());
    assert_eq!(conn.send(b"hello", 0).expect("Failed to send"), 5);

    let mut line = [0u8; 32];
    assert_eq!(conn.read_line(&mut line).expect("First line"), 9);
    assert_eq!(&line[..9], b"line one\n");

    // "rest" is decrypted and waiting inside the session
    assert!(conn.peek().expect("Peek with buffered plaintext"));
    go_tx.send(()).expect("Server should be waiting");
    assert_eq!(conn.read_line(&mut line).expect("Second line"), 5);
    assert_eq!(&line[..6], b"rest\n\0");

    assert!(!conn.peek().expect("Peek on idle session"));
    go_tx.send(()).expect("Server should be waiting");
    let deadline = Instant::now() + Duration::from_secs(3);
    while !conn.peek().expect("Peek") {
        assert!(Instant::now() < deadline, "record never became readable");
        thread::sleep(Duration::from_millis(10));
    }
    let mut tail = [0u8; 5];
    assert_eq!(conn.recv(&mut tail, 1).expect("Failed to receive tail"), 5);
    assert_eq!(&tail, b"tail\n");

    conn.set_timeout(Some(Duration::from_millis(300)));
    let started = Instant::now();
    let err = conn.recv(&mut tail, 0).expect_err("Server sends nothing more");
    assert_eq!(err.own_code(), Some(ErrorCode::HitReadTimeout));
    assert!(started.elapsed() >= Duration::from_millis(250));
    assert!(conn.is_connected());

    conn.disconnect().expect("First disconnect");
    conn.disconnect().expect("Second disconnect");
    assert!(!conn.is_connected());
    assert!(!conn.is_tls());
    server.join().expect("Server thread panicked");
}

#[test]
fn test_failed_tls_session_fails_peek() {
    let pki = test_pki();
    let server_config = Arc::clone(&pki.server);
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let (port, server) = spawn_server(move |stream| {
        let mut tls = accept_tls(server_config, stream);
        let mut hello = [0u8; 5];
        tls.read_exact(&mut hello).expect("Failed to read hello");
        tls.sock
            .write_all(b"this is not a TLS record\r\n")
            .expect("Failed to write garbage");
        done_rx.recv().expect("Client should signal");
    });

    let mut conn = tls_connection(&pki, port);
    conn.send(b"hello", 0).expect("Failed to send");

    let mut buf = [0u8; 16];
    let err = conn.recv(&mut buf, 0).expect_err("Garbage is not a TLS record");
    assert_eq!(err.origin(), ErrorOrigin::Tls);

    let err = conn.peek().expect_err("The session is unusable");
    assert!(err.is_tls());
    assert_eq!(conn.last_error(), Some(&err));

    done_tx.send(()).expect("Server should be waiting");
    server.join().expect("Server thread panicked");
}
