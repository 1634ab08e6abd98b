//! Error Handling Module
//!
//! This module provides the error type shared by every stage of a request:
//! - Core error type (`ClientError`)
//! - Inspection helpers for callers that branch on error kinds
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use api_fetch_client::error::ClientError;
//!
//! let error = ClientError::MissingPathParam("petId".into());
//! assert!(error.status().is_none());
//! assert!(!error.is_transport_failure());
//! ```

// Module declarations
mod conversions;
pub mod helpers;
pub mod types;

// Re-exports for public API
pub use types::*;
