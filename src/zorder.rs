//! Z-order manager.
//!
//! Non-exempt entities always hold exactly the indices `1..=N`, where `N` is
//! their count. Exempt entities (`dont_change_z_index`) keep whatever value
//! they were given and are never renumbered. Every operation here preserves
//! the permutation except [`Registry::set_z_index`], which is a deliberate
//! low-level escape hatch.
//!
//! [`Registry::set_z_index`]: crate::registry::Registry::set_z_index

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use std::collections::HashMap;
use std::hash::Hash;

/// Anything that sits in the z-order stack.
pub trait Stacked {
    fn z_index(&self) -> i64;
    fn set_z_index(&mut self, z_index: i64);
    /// Exempt items keep a fixed index and are never renumbered.
    fn is_exempt(&self) -> bool;
}

/// Number of non-exempt items, which is also the topmost index.
#[must_use]
pub fn top_index<K, T: Stacked>(items: &HashMap<K, T>) -> i64 {
    let count = items.values().filter(|item| !item.is_exempt()).count();
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// Index for a newly registered item: on top of the stack when it takes
/// part in it, otherwise one past the registry size.
#[must_use]
pub fn next_index<K, T: Stacked>(items: &HashMap<K, T>, exempt: bool) -> i64 {
    if exempt {
        i64::try_from(items.len()).unwrap_or(i64::MAX).saturating_add(1)
    } else {
        top_index(items).saturating_add(1)
    }
}

/// Raise `id` to the top of the stack, shifting down everything that was
/// above it. Returns `false` when nothing changed.
pub fn bring_to_front<K: Eq + Hash, T: Stacked>(items: &mut HashMap<K, T>, id: &K) -> bool {
    let Some(target) = items.get(id) else {
        return false;
    };
    if target.is_exempt() {
        return false;
    }
    let old = target.z_index();
    let top = top_index(items);
    if old >= top {
        return false;
    }

    for (key, item) in items.iter_mut() {
        if item.is_exempt() {
            continue;
        }
        if key == id {
            item.set_z_index(top);
        } else if item.z_index() > old {
            item.set_z_index(item.z_index() - 1);
        }
    }
    true
}

/// Close the hole an item left at `vacated` when it was removed from the
/// stack.
pub fn close_gap<K, T: Stacked>(items: &mut HashMap<K, T>, vacated: i64) {
    for item in items.values_mut() {
        if !item.is_exempt() && item.z_index() > vacated {
            item.set_z_index(item.z_index() - 1);
        }
    }
}
