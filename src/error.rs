//! Error handling for Argonaut operations
//!
//! This module defines the error types used throughout the codec. It uses
//! thiserror for ergonomic error handling and provides context-specific
//! error variants.

pub use crate::common::ArgonautError;
pub use crate::common::Result;
