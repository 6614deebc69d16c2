use actionbar_core::{Item, ItemId};
use std::collections::HashSet;

/// Flatten everything the triage pass could not place into overflow order.
///
/// Hidden leaves come first in the order they were processed, followed by the
/// leaves of each hidden group in that group's own order. Group separators
/// are left behind and no item is packed twice. The result lives for one
/// layout pass only.
pub fn pack<'a>(hidden_leaves: &[&'a Item], hidden_groups: &[&'a Item]) -> Vec<&'a Item> {
    let mut seen: HashSet<&ItemId> = HashSet::new();
    let flattened = hidden_groups.iter().copied().flat_map(Item::leaves);

    hidden_leaves
        .iter()
        .copied()
        .chain(flattened)
        .filter(|&item| seen.insert(&item.id))
        .collect()
}
