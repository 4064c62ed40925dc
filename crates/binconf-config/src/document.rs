//! Entity lists inside a larger configuration document
//!
//! A configuration document is a JSON object with one field per entity
//! kind (`"vtables"`, ...). These helpers move a single keyed container in
//! and out of such a document without touching its other fields.

use crate::container::{DuplicatePolicy, Identified, JsonEntity, KeyedContainer};
use crate::error::ConfigError;
use crate::serdes;
use serde_json::Value;
use tracing::debug;

/// Document field holding the vtable list
pub const VTABLES_KEY: &str = "vtables";

const DOCUMENT: &str = "configuration document";

/// Read the container stored under `key`.
///
/// The document root must be an object; a missing or mistyped field
/// yields an empty container.
pub fn extract<T>(doc: &Value, key: &str, policy: DuplicatePolicy) -> Result<KeyedContainer<T>, ConfigError>
where
    T: Identified + JsonEntity,
{
    let obj = serdes::check_json_value_is_object(doc, DOCUMENT)?;

    let mut ret = KeyedContainer::with_policy(policy);
    ret.read_json_value(serdes::get_field(obj, key))?;

    debug!(key, entity = T::NAME, count = ret.len(), "entities extracted");
    Ok(ret)
}

/// Store `container` under `key`, removing the field when it is empty
pub fn embed<T>(doc: &mut Value, key: &str, container: &KeyedContainer<T>) -> Result<(), ConfigError>
where
    T: Identified + JsonEntity,
{
    let obj = match doc {
        Value::Object(obj) => obj,
        other => {
            return Err(ConfigError::MalformedInput {
                entity: DOCUMENT.to_string(),
                expected: "object",
                found: serdes::json_type_name(other),
            })
        }
    };

    if container.is_empty() {
        obj.remove(key);
    } else {
        obj.insert(key.to_string(), container.to_json_value());
    }

    debug!(key, entity = T::NAME, count = container.len(), "entities embedded");
    Ok(())
}
