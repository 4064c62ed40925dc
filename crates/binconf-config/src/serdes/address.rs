//! Address <-> JSON
//!
//! Defined addresses are written as `0x`-prefixed lowercase hex strings.
//! Reading accepts those, decimal strings and unsigned integers; anything
//! else reads back as [`Address::UNDEFINED`].

use binconf_common::Address;
use serde_json::Value;
use tracing::trace;

/// Serialize an address; undefined becomes `null`
pub fn serialize(addr: Address) -> Value {
    if addr.is_defined() {
        Value::String(addr.to_string())
    } else {
        Value::Null
    }
}

/// Deserialize an address, falling back to undefined
pub fn deserialize(val: &Value) -> Address {
    match val {
        Value::String(s) => Address::parse(s).unwrap_or_else(|err| {
            trace!(%err, "unparsable address treated as undefined");
            Address::UNDEFINED
        }),
        Value::Number(n) => n.as_u64().map(Address::new).unwrap_or(Address::UNDEFINED),
        _ => Address::UNDEFINED,
    }
}
