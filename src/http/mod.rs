//! HTTP test server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, request tracing)
//!     → handlers.rs (one handler per fixed path)
//!     → validation.rs (method, body, header checks in fixed order)
//!     → response.rs (200 "OK", 400 with reason, 302, 404)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Routes are registered on an explicitly built router, never a global one
//! - Handlers are stateless; repeating a request repeats the response
//! - Validation failures only shape the response, they never escape

pub mod handlers;
pub mod response;
pub mod server;
pub mod validation;

pub use server::{base_url, build_router, ServerBindError, TestServer};
pub use validation::RequestValidationError;
