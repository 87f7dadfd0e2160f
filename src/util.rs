//! Shared utilities.

pub mod serialized;
