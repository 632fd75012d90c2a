//! naett test rig library.
//!
//! Builds the naett HTTP client, serves a handful of fixed endpoints on a
//! local port and runs the external test executable against them.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod process;

pub use config::schema::RigConfig;
pub use http::TestServer;
pub use lifecycle::{run_rig, serve_only, RigError, Shutdown};
