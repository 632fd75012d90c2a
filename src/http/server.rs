//! Test server setup.
//!
//! # Responsibilities
//! - Build an explicit Axum router with the five fixed routes
//! - Wrap traced routes with request logging (`/stress` stays silent)
//! - Bind the listener; a bind failure is fatal to the caller
//! - `[::]` listens on IPv4 and IPv6, falling back to `0.0.0.0` on hosts
//!   without IPv6
//! - Serve until the shutdown signal fires

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::{self, Next},
    response::Response,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::handlers;
use crate::lifecycle::ShutdownSignal;

/// The listener could not be started.
#[derive(Debug, Error)]
#[error("failed to bind test server to {address}: {source}")]
pub struct ServerBindError {
    pub address: String,
    #[source]
    pub source: io::Error,
}

/// Fixed-route HTTP stub targeted by the external test executable.
pub struct TestServer {
    router: Router,
    config: ServerConfig,
}

impl TestServer {
    /// Create a new test server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let router = build_router(&config);
        Self { router, config }
    }

    /// Bind the configured address.
    ///
    /// Once this returns the socket is listening, so clients may connect
    /// before [`TestServer::run`] starts accepting.
    pub async fn bind(&self) -> Result<TcpListener, ServerBindError> {
        let address = self.config.bind_address.clone();
        let addr: SocketAddr = address.parse().map_err(|e| ServerBindError {
            address: address.clone(),
            source: io::Error::new(io::ErrorKind::InvalidInput, e),
        })?;

        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) if is_ipv6_unspecified(&addr) && e.kind() != io::ErrorKind::AddrInUse => {
                let fallback = SocketAddr::from((Ipv4Addr::UNSPECIFIED, addr.port()));
                tracing::warn!(error = %e, fallback = %fallback, "IPv6 unavailable, listening on IPv4 only");
                TcpListener::bind(fallback)
                    .await
                    .map_err(|source| ServerBindError {
                        address: address.clone(),
                        source,
                    })?
            }
            Err(source) => {
                return Err(ServerBindError {
                    address: address.clone(),
                    source,
                })
            }
        };

        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerBindError { address, source })?;

        tracing::info!(address = %local_addr, "Test server bound");
        Ok(listener)
    }

    /// Run the server on an already bound listener until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            trace_requests = self.config.trace_requests,
            "Test server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("Test server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

fn is_ipv6_unspecified(addr: &SocketAddr) -> bool {
    matches!(addr, SocketAddr::V6(v6) if v6.ip().is_unspecified())
}

/// Base URL handed to the test executable for a bound address.
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://localhost:{}", addr.port())
}

/// Build the router with all fixed routes.
///
/// Bodies are buffered without a size limit so that oversized requests still
/// get the ordered validation and its 400, not a 413.
pub fn build_router(config: &ServerConfig) -> Router {
    let traced = Router::new()
        .route("/get", any(handlers::get))
        .route("/post", any(handlers::post))
        .route("/redirect", any(handlers::redirect))
        .route("/redirected", any(handlers::redirected));

    let traced = if config.trace_requests {
        traced.route_layer(middleware::from_fn(trace_request))
    } else {
        traced
    };

    Router::new()
        .route("/stress", any(handlers::get))
        .merge(traced)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::disable())
}

async fn trace_request(request: Request, next: Next) -> Response {
    tracing::info!(
        method = %request.method(),
        uri = %request.uri(),
        "{} - {}",
        request.method(),
        request.uri()
    );
    next.run(request).await
}
