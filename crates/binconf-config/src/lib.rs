//! Decompilation configuration model
//!
//! This crate provides the configuration entities a decompiler records
//! about a binary, and their JSON representation:
//! - Virtual function tables and their slots
//! - A generic id-keyed, ordered container used for every entity list
//! - Tolerant JSON helpers ("safe getters") and address serialization
//! - Reading and writing entity lists inside a configuration document
//!
//! Decoding is tolerant: missing or mistyped fields take default values
//! and only a structurally wrong value is an error. Encoding omits fields
//! that hold defaults.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod container;
pub mod document;
pub mod error;
pub mod serdes;
pub mod vtables;

pub use binconf_common::Address;
pub use container::{DuplicatePolicy, Identified, JsonEntity, KeyedContainer};
pub use document::VTABLES_KEY;
pub use error::ConfigError;
pub use vtables::{Vtable, VtableContainer, VtableItem};
