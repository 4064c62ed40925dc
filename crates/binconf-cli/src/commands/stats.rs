//! `binconf stats` — summarize a vtable list.

use super::Source;
use binconf_config::VtableContainer;

/// Counts reported by `binconf stats`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub vtables: usize,
    pub named_vtables: usize,
    pub slots: usize,
    pub unresolved_slots: usize,
    pub unnamed_targets: usize,
}

impl Stats {
    pub fn collect(vtables: &VtableContainer) -> Self {
        let mut stats = Stats {
            vtables: vtables.len(),
            ..Stats::default()
        };

        for vtable in vtables {
            if !vtable.name().is_empty() {
                stats.named_vtables += 1;
            }
            stats.slots += vtable.items().len();
            stats.unresolved_slots += vtable.unresolved_items().count();
            stats.unnamed_targets += vtable
                .items()
                .iter()
                .filter(|item| {
                    item.target_function_address().is_defined()
                        && item.target_function_name().is_empty()
                })
                .count();
        }

        stats
    }
}

pub fn execute(source: &Source) -> anyhow::Result<()> {
    let doc = source.load_document()?;
    let stats = Stats::collect(&source.vtables(&doc)?);

    println!("Vtables:          {} ({} named)", stats.vtables, stats.named_vtables);
    println!("Slots:            {}", stats.slots);
    println!("Unresolved slots: {}", stats.unresolved_slots);
    println!("Unnamed targets:  {}", stats.unnamed_targets);

    Ok(())
}
