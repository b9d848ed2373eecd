//! Schema Module
//!
//! Tag schemas: which tags are built-in markup and which attributes a
//! custom tag declares.

pub mod dom_element_schema_registry;
pub mod element_schema_registry;

pub use dom_element_schema_registry::*;
pub use element_schema_registry::*;
