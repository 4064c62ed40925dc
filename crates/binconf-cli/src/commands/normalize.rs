//! `binconf normalize` — rewrite vtables in canonical form.

use super::{read_vtables, Source};
use anyhow::Context;
use binconf_config::{document, DuplicatePolicy};
use serde_json::Value;
use std::path::Path;
use tracing::info;

pub fn execute(source: &Source, output: Option<&Path>) -> anyhow::Result<()> {
    let doc = source.load_document()?;
    let normalized = normalize_document(doc, &source.key, source.policy)?;
    let text = serde_json::to_string_pretty(&normalized)?;

    match output {
        Some(path) => {
            std::fs::write(path, text + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "normalized document written");
        }
        None => println!("{}", text),
    }

    Ok(())
}

/// Decode and re-encode the vtable list of `doc`, leaving other fields alone
pub fn normalize_document(
    mut doc: Value,
    key: &str,
    policy: DuplicatePolicy,
) -> anyhow::Result<Value> {
    let vtables = read_vtables(&doc, key, policy)?;

    if doc.is_array() {
        return Ok(vtables.to_json_value());
    }

    document::embed(&mut doc, key, &vtables)?;
    Ok(doc)
}
