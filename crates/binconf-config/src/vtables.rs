//! Virtual function tables
//!
//! A [`Vtable`] is identified by its address in the binary and owns one
//! [`VtableItem`] per slot. Each item records where the slot is and,
//! when known, which function it points to.

use crate::container::{DuplicatePolicy, Identified, JsonEntity, KeyedContainer};
use crate::error::ConfigError;
use crate::serdes::{self, address};
use binconf_common::Address;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use tracing::trace;

const JSON_NAME: &str = "name";
const JSON_ADDRESS: &str = "address";
const JSON_TARGET_ADDRESS: &str = "targetAddress";
const JSON_TARGET_NAME: &str = "targetName";
const JSON_ITEMS: &str = "items";

/// All vtables of a binary, keyed by vtable address
pub type VtableContainer = KeyedContainer<Vtable>;

/// One slot of a virtual function table
#[derive(Debug, Clone)]
pub struct VtableItem {
    address: Address,
    target_address: Address,
    target_function_name: String,
}

impl VtableItem {
    /// Create a slot at `address` with no known target
    pub fn new(address: Address) -> Self {
        Self {
            address,
            target_address: Address::UNDEFINED,
            target_function_name: String::new(),
        }
    }

    /// Slot address in the binary
    pub fn address(&self) -> Address {
        self.address
    }

    /// Address of the virtual function this slot points to
    pub fn target_function_address(&self) -> Address {
        self.target_address
    }

    /// Name (unique ID) of the function at the target address
    pub fn target_function_name(&self) -> &str {
        &self.target_function_name
    }

    /// Set the target function address; any address is accepted
    pub fn set_target_function_address(&mut self, addr: Address) {
        self.target_address = addr;
    }

    /// Set the target function name; any string is accepted
    pub fn set_target_function_name(&mut self, name: impl Into<String>) {
        self.target_function_name = name.into();
    }
}

impl Identified for VtableItem {
    type Id = Address;

    fn id(&self) -> Address {
        self.address
    }
}

impl JsonEntity for VtableItem {
    const NAME: &'static str = "VtableItem";

    fn from_json_value(val: &Value) -> Result<Self, ConfigError> {
        let obj = serdes::check_json_value_is_object(val, Self::NAME)?;

        let mut ret = VtableItem::new(address::deserialize(serdes::get_field(obj, JSON_ADDRESS)));
        ret.set_target_function_address(address::deserialize(serdes::get_field(
            obj,
            JSON_TARGET_ADDRESS,
        )));
        ret.set_target_function_name(serdes::safe_get_string(obj, JSON_TARGET_NAME));

        Ok(ret)
    }

    fn to_json_value(&self) -> Value {
        let mut val = Map::new();

        if self.address.is_defined() {
            val.insert(JSON_ADDRESS.into(), address::serialize(self.address));
        }
        if self.target_address.is_defined() {
            val.insert(JSON_TARGET_ADDRESS.into(), address::serialize(self.target_address));
        }
        if !self.target_function_name.is_empty() {
            val.insert(
                JSON_TARGET_NAME.into(),
                Value::String(self.target_function_name.clone()),
            );
        }

        Value::Object(val)
    }
}

/// Items are equal when their slot addresses are equal; targets are ignored.
impl PartialEq for VtableItem {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for VtableItem {}

impl PartialOrd for VtableItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Items are ordered by slot address.
impl Ord for VtableItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.address)
    }
}

/// Virtual function table
#[derive(Debug, Clone)]
pub struct Vtable {
    address: Address,
    name: String,
    items: KeyedContainer<VtableItem>,
}

impl Vtable {
    /// Create an unnamed vtable with no items
    pub fn new(address: Address) -> Self {
        Self {
            address,
            name: String::new(),
            items: KeyedContainer::new(),
        }
    }

    /// Vtable address in the binary
    pub fn address(&self) -> Address {
        self.address
    }

    /// Symbolic name, empty if unknown
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the symbolic name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Slots in ascending address order
    pub fn items(&self) -> &KeyedContainer<VtableItem> {
        &self.items
    }

    /// Mutable slots, e.g. to change their duplicate policy
    pub fn items_mut(&mut self) -> &mut KeyedContainer<VtableItem> {
        &mut self.items
    }

    /// Add a slot; returns `false` if the item collection rejected it
    pub fn add_item(&mut self, item: VtableItem) -> bool {
        self.items.insert(item)
    }

    /// Slot at `addr`
    pub fn item(&self, addr: Address) -> Option<&VtableItem> {
        self.items.find(&addr)
    }

    /// Slots whose target function address is still unknown
    pub fn unresolved_items(&self) -> impl Iterator<Item = &VtableItem> + '_ {
        self.items
            .iter()
            .filter(|item| !item.target_function_address().is_defined())
    }
}

impl Identified for Vtable {
    type Id = Address;

    fn id(&self) -> Address {
        self.address
    }
}

impl JsonEntity for Vtable {
    const NAME: &'static str = "Vtable";

    fn from_json_value(val: &Value) -> Result<Self, ConfigError> {
        Self::from_json_value_with_policy(val, DuplicatePolicy::default())
    }

    fn from_json_value_with_policy(
        val: &Value,
        policy: DuplicatePolicy,
    ) -> Result<Self, ConfigError> {
        let obj = serdes::check_json_value_is_object(val, Self::NAME)?;

        let mut ret = Vtable::new(address::deserialize(serdes::get_field(obj, JSON_ADDRESS)));
        ret.set_name(serdes::safe_get_string(obj, JSON_NAME));
        ret.items.set_policy(policy);
        ret.items.read_json_value(serdes::get_field(obj, JSON_ITEMS))?;

        trace!(address = %ret.address, items = ret.items.len(), "vtable decoded");
        Ok(ret)
    }

    fn to_json_value(&self) -> Value {
        let mut val = Map::new();

        if !self.name.is_empty() {
            val.insert(JSON_NAME.into(), Value::String(self.name.clone()));
        }
        if self.address.is_defined() {
            val.insert(JSON_ADDRESS.into(), address::serialize(self.address));
        }
        if !self.items.is_empty() {
            val.insert(JSON_ITEMS.into(), self.items.to_json_value());
        }

        Value::Object(val)
    }
}

/// Vtables are equal when their addresses are equal.
impl PartialEq for Vtable {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Vtable {}

impl PartialOrd for Vtable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Vtables are ordered by address.
impl Ord for Vtable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address.cmp(&other.address)
    }
}
