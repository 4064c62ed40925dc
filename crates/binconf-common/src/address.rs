//! Binary addresses
//!
//! An [`Address`] is a plain 64-bit location with one reserved value that
//! marks it as undefined. Undefined compares greater than every defined
//! address, so collections keyed by address keep unknown entries last.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing an address from text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Input was empty (or whitespace only)
    #[error("Empty address string")]
    Empty,

    /// Input is neither `0x`-prefixed hexadecimal nor decimal
    #[error("Invalid address: '{0}'")]
    Invalid(String),
}

/// Location in a binary's address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address {
    /// The undefined address
    pub const UNDEFINED: Address = Address(u64::MAX);

    /// Create a defined address
    pub const fn new(value: u64) -> Self {
        Address(value)
    }

    /// Check whether this address holds a value
    pub const fn is_defined(&self) -> bool {
        self.0 != u64::MAX
    }

    /// Check whether this address is undefined
    pub const fn is_undefined(&self) -> bool {
        !self.is_defined()
    }

    /// Underlying value, or `None` when undefined
    pub const fn value(&self) -> Option<u64> {
        if self.is_defined() {
            Some(self.0)
        } else {
            None
        }
    }

    /// Address `delta` bytes away from this one.
    ///
    /// Undefined stays undefined, and so does any result that would
    /// overflow or land on the reserved value.
    pub fn offset(self, delta: i64) -> Address {
        self.value()
            .and_then(|v| v.checked_add_signed(delta))
            .map(Address)
            .unwrap_or(Address::UNDEFINED)
    }

    /// Distance from `base` up to this address, if both are defined and
    /// `base` is not above `self`
    pub fn distance_from(self, base: Address) -> Option<u64> {
        self.value()?.checked_sub(base.value()?)
    }

    /// Parse an address string.
    ///
    /// Accepts `0x`/`0X`-prefixed hexadecimal or plain decimal.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressError::Empty);
        }

        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };

        parsed
            .map(Address)
            .map_err(|_| AddressError::Invalid(s.to_string()))
    }
}

impl Default for Address {
    fn default() -> Self {
        Address::UNDEFINED
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address(value)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{:#x}", v),
            None => f.write_str("undefined"),
        }
    }
}

/// Hex digits of the value; undefined prints `undefined` as in `Display`.
impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => fmt::LowerHex::fmt(&v, f),
            None => f.write_str("undefined"),
        }
    }
}
