//! CLI commands
//!
//! Implements the commands: normalize, stats, lookup.

pub mod lookup;
pub mod normalize;
pub mod stats;

use anyhow::Context;
use binconf_config::{document, DuplicatePolicy, VtableContainer};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Where a command reads its vtables from
pub struct Source {
    pub path: PathBuf,
    pub key: String,
    pub policy: DuplicatePolicy,
}

impl Source {
    /// Read and parse the input file
    pub fn load_document(&self) -> anyhow::Result<Value> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let doc = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        debug!(path = %self.path.display(), "document loaded");
        Ok(doc)
    }

    /// Decode the vtable list of `doc`
    pub fn vtables(&self, doc: &Value) -> anyhow::Result<VtableContainer> {
        read_vtables(doc, &self.key, self.policy)
    }
}

/// Decode vtables from a configuration document, or from a bare array
pub fn read_vtables(
    doc: &Value,
    key: &str,
    policy: DuplicatePolicy,
) -> anyhow::Result<VtableContainer> {
    let vtables = if doc.is_array() {
        let mut ret = VtableContainer::with_policy(policy);
        ret.read_json_value(doc)?;
        ret
    } else {
        document::extract(doc, key, policy)?
    };
    Ok(vtables)
}
