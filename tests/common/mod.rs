//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;

use naett_testrig::config::ServerConfig;
use naett_testrig::{Shutdown, TestServer};

/// Start a test server on an ephemeral loopback port.
///
/// The listener is bound before this returns, so requests can be sent
/// immediately. Trigger the returned [`Shutdown`] to stop it.
#[allow(dead_code)]
pub async fn start_test_server() -> (SocketAddr, Shutdown) {
    let server = TestServer::new(ServerConfig {
        bind_address: "127.0.0.1:0".into(),
        trace_requests: true,
    });
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, signal).await;
    });

    (addr, shutdown)
}

/// Client that never pools or proxies, like a fresh test binary would.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Send `request` verbatim over a fresh connection and read until the server
/// closes it. The request should carry `Connection: close`.
#[allow(dead_code)]
pub async fn raw_request(addr: SocketAddr, request: &str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

/// Write an executable shell script named `name` into `dir`.
#[allow(dead_code)]
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
