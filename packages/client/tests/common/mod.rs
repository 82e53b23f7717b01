//! Loopback servers standing in for proxies and targets

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// Accept one connection on an ephemeral loopback port and hand it to
/// `handler` on a background thread.
pub fn spawn_server<F>(handler: F) -> (u16, JoinHandle<()>)
where
    F: FnOnce(TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
    let port = listener
        .local_addr()
        .expect("Listener should have a local address")
        .port();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Failed to accept test connection");
        handler(stream);
    });
    (port, handle)
}

/// A loopback port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
    listener
        .local_addr()
        .expect("Listener should have a local address")
        .port()
}

pub fn read_exact(stream: &mut TcpStream, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf).expect("Failed to read from client");
    buf
}

/// Read up to and excluding the next NUL.
pub fn read_nul_terminated(stream: &mut TcpStream) -> Vec<u8> {
    let mut field = Vec::new();
    loop {
        let byte = read_exact(stream, 1)[0];
        if byte == 0 {
            return field;
        }
        field.push(byte);
    }
}

/// Read an HTTP request head through the blank line.
pub fn read_http_head(stream: &mut TcpStream) -> String {
    let mut head = Vec::new();
    while !head.ends_with(b"\r\n\r\n") {
        head.push(read_exact(stream, 1)[0]);
    }
    String::from_utf8(head).expect("Request head should be UTF-8")
}

pub fn write_all(stream: &mut TcpStream, data: &[u8]) {
    stream.write_all(data).expect("Failed to write to client");
}

/// Play a SOCKS5 proxy without authentication; returns the CONNECT request.
pub fn serve_socks5_no_auth(stream: &mut TcpStream, status: u8) -> Vec<u8> {
    assert_eq!(read_exact(stream, 3), vec![5, 1, 0]);
    write_all(stream, &[5, 0]);
    let request = read_socks5_connect(stream);
    write_all(stream, &[5, status, 0, 1, 127, 0, 0, 1, 0x1f, 0x90]);
    request
}

/// Read a SOCKS5 CONNECT request of either address type.
pub fn read_socks5_connect(stream: &mut TcpStream) -> Vec<u8> {
    let mut request = read_exact(stream, 4);
    match request[3] {
        1 => request.extend(read_exact(stream, 4 + 2)),
        3 => {
            let len = read_exact(stream, 1)[0];
            request.push(len);
            request.extend(read_exact(stream, usize::from(len) + 2));
        }
        other => panic!("unexpected address type {other}"),
    }
    request
}

/// Play an HTTP proxy answering CONNECT with `status_line`; returns the
/// request head.
pub fn serve_http_connect(stream: &mut TcpStream, status_line: &str) -> String {
    let head = read_http_head(stream);
    write_all(stream, format!("{status_line}\r\n\r\n").as_bytes());
    head
}

/// Answer `ping` with `pong` once the tunnel is up.
pub fn serve_ping(stream: &mut TcpStream) {
    assert_eq!(read_exact(stream, 4), b"ping");
    write_all(stream, b"pong");
}
