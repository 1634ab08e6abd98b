//! Observability
//!
//! Structured logging for the request pipeline. Events are emitted through
//! `tracing`; install a subscriber with [`init_tracing`] or bring your own.

pub mod tracing;

pub use self::tracing::{
    OutputFormat, RequestTracer, TracingConfig, format_headers_for_logging, init_tracing,
    mask_sensitive_value, set_mask_sensitive_values,
};
