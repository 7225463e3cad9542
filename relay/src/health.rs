//! Minimal plain-text liveness endpoint.
//!
//! Hosting platforms probe a single port to decide whether the process is
//! alive; the reply carries no state beyond "the event loop is running", so
//! a raw listener is all this needs.

use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const OK_RESPONSE: &str =
    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK";
const NOT_FOUND_RESPONSE: &str =
    "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// Binds `addr` and serves liveness probes until the task is dropped.
/// `OK` on `/` and `/health`, 404 anywhere else.
pub async fn serve_health(addr: SocketAddr) -> io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    loop {
        let (stream, _) = listener.accept().await?;
        tokio::spawn(async move {
            // Probe failures are the prober's problem.
            let _ = answer(stream).await;
        });
    }
}

async fn answer(mut stream: TcpStream) -> io::Result<()> {
    let mut buffer = [0_u8; 1024];
    let read = stream.read(&mut buffer).await?;

    let response = if is_known_path(&buffer[..read]) {
        OK_RESPONSE
    } else {
        NOT_FOUND_RESPONSE
    };
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn is_known_path(request: &[u8]) -> bool {
    let head = String::from_utf8_lossy(request);
    let mut parts = head.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("GET") | Some("HEAD"), Some(path)) => matches!(path, "/" | "/health"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_health_paths_are_known() {
        assert!(is_known_path(b"GET / HTTP/1.1\r\n"));
        assert!(is_known_path(b"GET /health HTTP/1.1\r\n"));
        assert!(is_known_path(b"HEAD /health HTTP/1.1\r\n"));
    }

    #[test]
    fn other_paths_and_methods_are_rejected() {
        assert!(!is_known_path(b"GET /metrics HTTP/1.1\r\n"));
        assert!(!is_known_path(b"POST / HTTP/1.1\r\n"));
        assert!(!is_known_path(b""));
    }

    #[tokio::test]
    async fn probe_round_trip_returns_ok() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let _ = answer(stream).await;
            }
        });

        let mut stream = TcpStream::connect(addr).await.expect("connect");
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: probe\r\n\r\n")
            .await
            .expect("write");

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.expect("read");
        let response = String::from_utf8_lossy(&response);
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("OK"));
    }
}
