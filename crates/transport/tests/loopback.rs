//! Loopback tests for the socket primitives, over TCP and UDP.

#![cfg(unix)]

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream, UdpSocket};
use std::thread;
use std::time::Duration;

use socket2::SockRef;
use transport::{TransportConfig, TransportError, net_recv, net_send, replay_messages};

fn tcp_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
    let (server, _) = listener.accept().unwrap();
    (client, server)
}

#[test]
fn large_payload_survives_partial_writes() {
    let (client, mut server) = tcp_pair();
    let payload: Vec<u8> = (0..512 * 1024u32).map(|i| (i % 253) as u8).collect();
    let expected = payload.clone();

    let reader = thread::spawn(move || {
        let mut received = Vec::new();
        server.read_to_end(&mut received).unwrap();
        received
    });

    let sent = net_send(&client, Duration::from_secs(5), &payload).unwrap();
    assert_eq!(sent, payload.len());
    client.shutdown(Shutdown::Write).unwrap();
    assert_eq!(reader.join().unwrap(), expected);
}

#[test]
fn connected_udp_sockets_exchange_datagrams() {
    let server = UdpSocket::bind("127.0.0.1:0").unwrap();
    let client = UdpSocket::bind("127.0.0.1:0").unwrap();
    client.connect(server.local_addr().unwrap()).unwrap();
    server.connect(client.local_addr().unwrap()).unwrap();

    let record = [22u8, 0xFE, 0xFD, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1];
    assert_eq!(net_send(&client, Duration::from_millis(50), &record).unwrap(), record.len());

    let mut out = Vec::new();
    let received = net_recv(
        &server,
        Duration::from_millis(20),
        Duration::from_millis(500),
        &mut out,
    )
    .unwrap();
    assert_eq!(received, record.len());
    assert_eq!(out, record);
}

/// Writes until the kernel refuses more data and stays refusing it.
fn fill_send_buffer(stream: &TcpStream) {
    let chunk = [0u8; 4096];
    let mut writer = stream;
    stream.set_nonblocking(true).unwrap();
    loop {
        while writer.write(&chunk).is_ok() {}
        // Let in-flight segments be acknowledged before checking again.
        thread::sleep(Duration::from_millis(20));
        match writer.write(&chunk) {
            Ok(_) => continue,
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
            Err(err) => panic!("unexpected write error: {err}"),
        }
    }
    stream.set_nonblocking(false).unwrap();
}

#[test]
fn send_on_full_socket_reports_zero_bytes() {
    let (client, server) = tcp_pair();
    SockRef::from(&client).set_send_buffer_size(4096).unwrap();
    SockRef::from(&server).set_recv_buffer_size(4096).unwrap();
    fill_send_buffer(&client);

    let sent = net_send(&client, Duration::from_millis(50), b"PWD\r\n").unwrap();
    assert_eq!(sent, 0);
    drop(server);
}

#[test]
fn receive_after_reset_is_an_error() {
    let (mut client, server) = tcp_pair();
    client.write_all(b"QUIT\r\n").unwrap();
    thread::sleep(Duration::from_millis(20));
    // Closing with unread data makes the kernel answer with a reset.
    drop(server);
    thread::sleep(Duration::from_millis(20));

    let mut out = Vec::new();
    let err = net_recv(
        &client,
        Duration::from_millis(50),
        Duration::from_millis(500),
        &mut out,
    )
    .unwrap_err();
    assert!(matches!(err, TransportError::Recv { received: 0, .. }), "{err:?}");
    assert_eq!(err.io_error().kind(), io::ErrorKind::ConnectionReset);
    assert!(out.is_empty());
}

#[test]
fn replay_keeps_response_when_peer_resets() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.write_all(b"220 ready\r\n").unwrap();
        let mut user = [0u8; 8];
        stream.read_exact(&mut user).unwrap();
        stream.write_all(b"530 denied\r\n").unwrap();
        // Wait for the next request, then close with it unread.
        let mut pending = [0u8; 1];
        stream.peek(&mut pending).unwrap();
    });

    let client = TcpStream::connect(addr).unwrap();
    let config = TransportConfig::new()
        .with_send_timeout(Duration::from_millis(100))
        .with_recv_timeout(Duration::from_millis(50))
        .with_poll_wait(Duration::from_millis(500));
    let messages: [&[u8]; 4] = [b"USER a\r\n", b"PASS b\r\n", b"SYST\r\n", b"QUIT\r\n"];

    let outcome = replay_messages(&client, messages, &config);
    server.join().unwrap();

    assert_eq!(outcome.response, b"220 ready\r\n530 denied\r\n");
    assert!(!outcome.completed);
    assert_eq!(outcome.messages_sent, 2);
    assert_eq!(outcome.bytes_sent, 16);
    let Some(err) = &outcome.error else {
        panic!("expected the reset to be reported");
    };
    assert!(matches!(err, TransportError::Recv { received: 0, .. }), "{err:?}");
    assert_eq!(err.io_error().kind(), io::ErrorKind::ConnectionReset);
}
