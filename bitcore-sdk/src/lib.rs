#![deny(missing_docs)]

//! Bitcore SDK - Complete SDK.
//!
//! Re-exports all bitcore SDK components for convenient single-crate usage.

pub use bitcore_primitives as primitives;
pub use bitcore_script as script;
