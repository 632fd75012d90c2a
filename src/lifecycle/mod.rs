//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Default mode (startup.rs):
//!     Build → Bind listener → Spawn server → Run tests → Trigger shutdown
//!
//! Serve-only mode (startup.rs, signals.rs):
//!     Bind listener → Serve in foreground → Ctrl+C → Drain → Exit
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{load_rig_config, run_rig, serve_only, RigError};
