//! # cueplay-core
//!
//! Core types, native handle newtypes, and error handling shared by the
//! cueplay crates.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
