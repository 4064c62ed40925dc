//! Id-keyed ordered containers
//!
//! Most configuration entities are identified by a single key (usually an
//! [`Address`](binconf_common::Address)) and stored in a container that
//! holds at most one entity per key and iterates in ascending key order.
//! [`KeyedContainer`] implements that once for every entity type.

use crate::error::ConfigError;
use crate::serdes::{self, json_type_name};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, trace, warn};

/// An entity with an identity key
///
/// The key must not change after construction: containers index entities
/// by it.
pub trait Identified {
    /// Key type
    type Id: Ord + Clone + fmt::Debug + fmt::Display;

    /// Identity key of this entity
    fn id(&self) -> Self::Id;
}

/// An entity with a JSON object representation
pub trait JsonEntity: Sized {
    /// Entity name used in errors and logs
    const NAME: &'static str;

    /// Decode from a JSON value
    ///
    /// Fails only when the value has the wrong shape; missing or mistyped
    /// fields take their defaults.
    fn from_json_value(val: &Value) -> Result<Self, ConfigError>;

    /// Decode, applying `policy` to any containers nested in the entity
    ///
    /// Entities without nested containers keep the default, which ignores
    /// the policy.
    fn from_json_value_with_policy(
        val: &Value,
        _policy: DuplicatePolicy,
    ) -> Result<Self, ConfigError> {
        Self::from_json_value(val)
    }

    /// Encode to a JSON value, omitting fields that hold defaults
    fn to_json_value(&self) -> Value;
}

/// What [`KeyedContainer::insert`] does when the key is already taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the stored entity and drop the new one
    #[default]
    Keep,
    /// Replace the stored entity with the new one
    Replace,
}

impl FromStr for DuplicatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(DuplicatePolicy::Keep),
            "replace" => Ok(DuplicatePolicy::Replace),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Keep => f.write_str("keep"),
            DuplicatePolicy::Replace => f.write_str("replace"),
        }
    }
}

/// Container of entities unique by id, iterated in ascending id order
#[derive(Debug, Clone)]
pub struct KeyedContainer<T: Identified> {
    data: BTreeMap<T::Id, T>,
    policy: DuplicatePolicy,
}

impl<T: Identified> Default for KeyedContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified> KeyedContainer<T> {
    /// Create an empty container with the default policy
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create an empty container with the given duplicate policy
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            data: BTreeMap::new(),
            policy,
        }
    }

    /// Duplicate policy used by `insert`
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Change the duplicate policy for subsequent inserts
    pub fn set_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
    }

    /// Insert an entity, resolving id collisions with the container policy.
    ///
    /// Returns `true` if `elem` was stored.
    pub fn insert(&mut self, elem: T) -> bool {
        let id = elem.id();
        match self.data.entry(id) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(elem);
                true
            }
            btree_map::Entry::Occupied(mut slot) => match self.policy {
                DuplicatePolicy::Keep => {
                    debug!(id = %slot.key(), "duplicate id, keeping existing entry");
                    false
                }
                DuplicatePolicy::Replace => {
                    trace!(id = %slot.key(), "duplicate id, replacing existing entry");
                    slot.insert(elem);
                    true
                }
            },
        }
    }

    /// Store an entity regardless of policy, returning the one it displaced
    pub fn replace(&mut self, elem: T) -> Option<T> {
        self.data.insert(elem.id(), elem)
    }

    /// Entity with the given id
    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.data.get(id)
    }

    /// Mutable entity with the given id
    pub fn find_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.data.get_mut(id)
    }

    /// Check whether an entity with the given id is stored
    pub fn contains(&self, id: &T::Id) -> bool {
        self.data.contains_key(id)
    }

    /// Remove and return the entity with the given id
    pub fn erase(&mut self, id: &T::Id) -> Option<T> {
        self.data.remove(id)
    }

    /// Remove all entities
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the container is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Entities in ascending id order
    pub fn iter(&self) -> btree_map::Values<'_, T::Id, T> {
        self.data.values()
    }

    /// Mutable entities in ascending id order
    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, T::Id, T> {
        self.data.values_mut()
    }

    /// Ids in ascending order
    pub fn ids(&self) -> btree_map::Keys<'_, T::Id, T> {
        self.data.keys()
    }
}

impl<T: Identified + JsonEntity> KeyedContainer<T> {
    /// Decode a JSON array into a new container with the default policy.
    ///
    /// A value that is not an array (including `null`) yields an empty
    /// container; see [`read_json_value`](Self::read_json_value).
    pub fn from_json_value(val: &Value) -> Result<Self, ConfigError> {
        let mut ret = Self::new();
        ret.read_json_value(val)?;
        Ok(ret)
    }

    /// Decode each element of a JSON array and insert it.
    ///
    /// `null` and non-array values contribute nothing. A malformed element
    /// aborts the read; elements inserted before it stay in the container.
    /// Nested containers of each element are decoded with this container's
    /// policy.
    pub fn read_json_value(&mut self, val: &Value) -> Result<(), ConfigError> {
        let elems = match val {
            Value::Null => return Ok(()),
            Value::Array(elems) => elems,
            other => {
                warn!(
                    entity = T::NAME,
                    found = json_type_name(other),
                    "expected an array of entities, ignoring value"
                );
                return Ok(());
            }
        };

        for elem in elems {
            self.insert(T::from_json_value_with_policy(elem, self.policy)?);
        }
        Ok(())
    }

    /// Encode as a JSON array in ascending id order
    pub fn to_json_value(&self) -> Value {
        Value::Array(self.iter().map(JsonEntity::to_json_value).collect())
    }

    /// Parse a container from JSON text whose root must be an array
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let val: Value = serde_json::from_str(content)?;
        serdes::check_json_value_is_array(&val, &format!("{} list", T::NAME))?;
        Self::from_json_value(&val)
    }

    /// Parse a container from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Pretty-printed JSON text
    pub fn to_json_string_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.to_json_value())?)
    }

    /// Write the container to a JSON file
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json_string_pretty()?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl<'a, T: Identified> IntoIterator for &'a KeyedContainer<T> {
    type Item = &'a T;
    type IntoIter = btree_map::Values<'a, T::Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Identified> IntoIterator for KeyedContainer<T> {
    type Item = T;
    type IntoIter = btree_map::IntoValues<T::Id, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_values()
    }
}

impl<T: Identified> Extend<T> for KeyedContainer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.insert(elem);
        }
    }
}

impl<T: Identified> FromIterator<T> for KeyedContainer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}
