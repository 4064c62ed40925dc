//! Common value types for binconf
//!
//! This crate provides the small value types the configuration model is
//! built on. Currently that is just [`Address`], a location in a binary's
//! address space which may be undefined when unknown.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod address;

pub use address::{Address, AddressError};
