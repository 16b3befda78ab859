//! Core components for signing API requests.
//!
//! This crate provides the foundational types shared by sigv4-auth signers.
//!
//! ## Overview
//!
//! - [`SignableRequest`]: the boundary trait between signers and http clients.
//!   Implemented for [`http::Request`], [`http::request::Parts`] and, with the
//!   `reqwest` feature enabled, `reqwest::Request`.
//! - [`Error`]: the error type returned by every fallible operation.
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::SignableRequest;
