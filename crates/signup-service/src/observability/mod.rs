//! Observability for the signup service.
//!
//! Prometheus metrics via the `metrics` facade. Logging is plain `tracing`
//! with per-module targets.

pub mod metrics;
