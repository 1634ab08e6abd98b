//! HTTP Utilities
//!
//! This module contains HTTP-related utilities:
//! - Header merging
//! - The transport abstraction
//! - The default reqwest-backed transport

pub mod client;
pub mod headers;
pub mod transport;

// Re-export main types
pub use client::*;
pub use headers::*;
pub use transport::*;
