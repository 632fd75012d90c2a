//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! builder, server, runner
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
