//! `binconf lookup` — find a vtable by its address or by one of its slots.

use super::Source;
use anyhow::{bail, Context};
use binconf_config::{Address, JsonEntity, Vtable, VtableContainer};

pub fn execute(source: &Source, address: &str) -> anyhow::Result<()> {
    let addr = parse_lookup_address(address)?;
    let doc = source.load_document()?;
    let vtables = source.vtables(&doc)?;

    let Some(vtable) = find_vtable(&vtables, addr) else {
        bail!("No vtable at or containing {}", addr);
    };

    if vtable.address() != addr {
        println!("Slot {} belongs to vtable {}", addr, vtable.address());
    }
    println!("{}", serde_json::to_string_pretty(&vtable.to_json_value())?);

    Ok(())
}

/// Parse a user-supplied address; the reserved undefined value is refused
pub fn parse_lookup_address(address: &str) -> anyhow::Result<Address> {
    let addr = Address::parse(address).with_context(|| format!("Bad address '{}'", address))?;
    if !addr.is_defined() {
        bail!("Address '{}' is reserved for undefined addresses", address);
    }
    Ok(addr)
}

/// Vtable starting at `addr`, else the vtable with a slot at `addr`
pub fn find_vtable(vtables: &VtableContainer, addr: Address) -> Option<&Vtable> {
    vtables
        .find(&addr)
        .or_else(|| vtables.iter().find(|v| v.item(addr).is_some()))
}
