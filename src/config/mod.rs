//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RigConfig (validated, immutable)
//!     → handed to builder, server and runner at startup
//! ```
//!
//! # Design Decisions
//! - Every field has a default; running without a file uses `RigConfig::default()`
//! - Validation separates syntactic (serde) from semantic checks
//! - No reload: the rig runs once and exits

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BuildConfig, ObservabilityConfig, RigConfig, RunnerConfig, ServerConfig};
pub use validation::ValidationError;
