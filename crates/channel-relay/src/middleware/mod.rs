//! Middleware for the relay HTTP server.
//!
//! Layer order: Request → Tracing → BodyLimit → Handler

pub mod metrics;
pub mod tracing;

pub use metrics::{RelayMetrics, RequestTimer};
pub use tracing::TracingLayer;
