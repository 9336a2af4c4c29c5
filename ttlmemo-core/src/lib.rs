//! # ttlmemo Core
//!
//! Core errors, traits, and constants shared by the ttlmemo crates.
//!
//! - **Errors**: construction errors (`MemoError`) and per-fetch errors (`FetchError`)
//! - **Traits**: the `Producer` interface that computes values on a cache miss
//! - **Constants**: configuration defaults and environment variable names
//!
//! ## Example
//!
//! ```rust
//! use ttlmemo_core::{FetchError, MemoError};
//!
//! let err: FetchError<String> = FetchError::Producer("boom".into());
//! assert_eq!(err.producer_error(), Some(&"boom".to_string()));
//!
//! assert!(MemoError::InvalidTtl(-1).is_configuration_error());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{FetchError, MemoError, Result};
pub use traits::*;
