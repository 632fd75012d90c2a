//! Process orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! builder.rs: build tool in working dir → CapturedOutput | BuildError
//! runner.rs:  <working dir>/test <base url> → output | TestRunError
//!     both via output.rs (spawn, merge stdout + stderr, wait)
//! ```
//!
//! # Design Decisions
//! - Each step runs exactly once; no retries, no timeouts
//! - Failures carry the child's combined output verbatim

pub mod builder;
pub mod output;
pub mod runner;

pub use builder::{BuildError, Builder};
pub use output::{run_captured, CapturedOutput};
pub use runner::{TestRunError, TestRunner};
