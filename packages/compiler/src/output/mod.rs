//! Output Module
//!
//! The writer contract node emission targets, and its in-memory buffer.

pub mod writer;

pub use writer::{CodeWriter, Writer};
