//! Nested child resolution
//!
//! Several inner-hit sections can surface the same nested record, so the
//! records of one relation are deduplicated by offset and returned in
//! offset order. Records without a nested identity cannot be deduplicated;
//! they are kept in first-seen order ahead of every identified record.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::response::{NestedHit, SearchHit};

/// Collects the nested records of one relation for a top-level hit
pub struct NestedHitResolver;

impl NestedHitResolver {
    /// Returns the deduplicated, offset-sorted records of `relation`.
    ///
    /// Only sections whose relation equals `relation` exactly contribute.
    /// The first record seen for an offset wins.
    pub fn resolve<'a>(hit: &'a SearchHit, relation: &str) -> Vec<&'a NestedHit> {
        let mut anonymous = Vec::new();
        let mut by_offset: BTreeMap<i32, &'a NestedHit> = BTreeMap::new();

        for section in hit.sections_for(relation) {
            for nested in section.hits() {
                match nested.offset() {
                    Some(offset) => {
                        if let Entry::Vacant(slot) = by_offset.entry(offset) {
                            slot.insert(nested);
                        }
                    }
                    None => anonymous.push(nested),
                }
            }
        }

        anonymous.extend(by_offset.into_values());
        anonymous
    }
}
