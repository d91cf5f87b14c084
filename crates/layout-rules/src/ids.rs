//! Widget IDs
//!
//! Picks fresh `@+id/` names for elements pasted next to existing ones.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::attributes::{split_id_reference, AttributeName, XmlAttribute};

/// First free id of the form `base1`, `base2`, ...
///
/// Trailing digits of `base` are dropped first so `button3` yields
/// `button1` when that is free.
pub fn unique_id(base: &str, taken: &HashSet<String>) -> String {
    let stem = base.trim_end_matches(|c: char| c.is_ascii_digit());
    let stem = if stem.is_empty() { "id" } else { stem };

    (1u32..)
        .map(|n| format!("{}{}", stem, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| stem.to_string())
}

/// Id maps for a pasted element set, one per element
///
/// An id that collides with `taken` is renamed in every element's map, so
/// references from siblings follow it. When several pasted elements declare
/// the same id, the first keeps it (or its rename) and each later declarer
/// gets a fresh id in its own map only. Assigned ids are added to `taken`.
pub fn remap_ids(
    elements: &[Vec<XmlAttribute>],
    taken: &mut HashSet<String>,
) -> Vec<HashMap<String, String>> {
    let id_attr = AttributeName::android("id");
    let mut shared = HashMap::new();
    let mut declared_here: HashSet<String> = HashSet::new();
    let mut own = vec![HashMap::new(); elements.len()];

    for (index, attributes) in elements.iter().enumerate() {
        let declared = attributes
            .iter()
            .filter(|attr| attr.name == id_attr)
            .filter_map(|attr| split_id_reference(&attr.value))
            .map(|(_, name)| name);

        for old in declared {
            if declared_here.contains(old) {
                let new = unique_id(old, taken);
                debug!("Id {} declared twice in pasted set, using {}", old, new);
                taken.insert(new.clone());
                own[index].insert(old.to_string(), new);
                continue;
            }
            declared_here.insert(old.to_string());

            if taken.contains(old) {
                let new = unique_id(old, taken);
                debug!("Id {} already used, pasting as {}", old, new);
                taken.insert(new.clone());
                shared.insert(old.to_string(), new);
            } else {
                taken.insert(old.to_string());
            }
        }
    }

    own.into_iter()
        .map(|renames| {
            let mut map = shared.clone();
            map.extend(renames);
            map
        })
        .collect()
}
