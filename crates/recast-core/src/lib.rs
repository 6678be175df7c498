//! Core types and trait definitions for recast.
//!
//! This crate has no database or terminal dependencies. Storage backends
//! implement [`store::SentenceStore`]; front ends drive a
//! [`session::Session`] and never touch the store directly.

pub mod error;
pub mod sentence;
pub mod session;
pub mod store;

pub use error::{Error, ImportError, Result};

#[cfg(test)]
mod tests;
