//! Error types for the Crafter library.
//!
//! This crate provides the foundation error types used throughout the Crafter
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The [`FailureKind`] taxonomy sits on top of the hierarchy: it maps any
//! error into one of a small set of user-facing failure categories so a
//! presentation layer can render a meaningful message without inspecting
//! provider-specific detail.
//!
//! # Examples
//!
//! ```
//! use crafter_error::{CrafterResult, ConfigError};
//!
//! fn load_settings() -> CrafterResult<String> {
//!     Err(ConfigError::new("Missing field"))?
//! }
//!
//! match load_settings() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod failure;
mod history;
mod transform;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{CrafterError, CrafterErrorKind, CrafterResult};
pub use failure::FailureKind;
pub use history::{HistoryError, HistoryErrorKind};
pub use transform::{TransformError, TransformErrorKind};
