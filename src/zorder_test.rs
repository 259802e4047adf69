use super::*;

#[derive(Debug, Clone, Copy)]
struct Item {
    z: i64,
    exempt: bool,
}

impl Stacked for Item {
    fn z_index(&self) -> i64 {
        self.z
    }

    fn set_z_index(&mut self, z_index: i64) {
        self.z = z_index;
    }

    fn is_exempt(&self) -> bool {
        self.exempt
    }
}

fn stack(zs: &[(u32, i64, bool)]) -> HashMap<u32, Item> {
    zs.iter().map(|&(k, z, exempt)| (k, Item { z, exempt })).collect()
}

fn z(items: &HashMap<u32, Item>, k: u32) -> i64 {
    items[&k].z
}

fn sorted_non_exempt(items: &HashMap<u32, Item>) -> Vec<i64> {
    let mut v: Vec<i64> = items.values().filter(|i| !i.exempt).map(|i| i.z).collect();
    v.sort_unstable();
    v
}

// =============================================================
// next_index / top_index
// =============================================================

#[test]
fn next_index_on_empty_is_one() {
    let items: HashMap<u32, Item> = HashMap::new();
    assert_eq!(next_index(&items, false), 1);
    assert_eq!(next_index(&items, true), 1);
}

#[test]
fn next_index_skips_exempt_for_stacked_items() {
    let items = stack(&[(1, 1, false), (2, 2, true), (3, 2, false)]);
    assert_eq!(top_index(&items), 2);
    assert_eq!(next_index(&items, false), 3);
    assert_eq!(next_index(&items, true), 4);
}

// =============================================================
// bring_to_front
// =============================================================

#[test]
fn bring_to_front_shifts_items_above_down() {
    let mut items = stack(&[(1, 1, false), (2, 2, false), (3, 3, false)]);
    assert!(bring_to_front(&mut items, &1));
    assert_eq!(z(&items, 1), 3);
    assert_eq!(z(&items, 2), 1);
    assert_eq!(z(&items, 3), 2);
}

#[test]
fn bring_to_front_middle_leaves_lower_alone() {
    let mut items = stack(&[(1, 1, false), (2, 2, false), (3, 3, false)]);
    assert!(bring_to_front(&mut items, &2));
    assert_eq!(z(&items, 1), 1);
    assert_eq!(z(&items, 2), 3);
    assert_eq!(z(&items, 3), 2);
}

#[test]
fn bring_to_front_top_is_noop() {
    let mut items = stack(&[(1, 1, false), (2, 2, false)]);
    assert!(!bring_to_front(&mut items, &2));
    assert_eq!(z(&items, 1), 1);
    assert_eq!(z(&items, 2), 2);
}

#[test]
fn bring_to_front_twice_is_idempotent() {
    let mut items = stack(&[(1, 1, false), (2, 2, false), (3, 3, false)]);
    bring_to_front(&mut items, &1);
    let after_first: Vec<i64> = [1, 2, 3].iter().map(|k| z(&items, *k)).collect();
    assert!(!bring_to_front(&mut items, &1));
    let after_second: Vec<i64> = [1, 2, 3].iter().map(|k| z(&items, *k)).collect();
    assert_eq!(after_first, after_second);
}

#[test]
fn bring_to_front_unknown_is_noop() {
    let mut items = stack(&[(1, 1, false)]);
    assert!(!bring_to_front(&mut items, &9));
}

#[test]
fn bring_to_front_ignores_exempt() {
    let mut items = stack(&[(1, 1, false), (2, 7, true), (3, 2, false)]);
    assert!(!bring_to_front(&mut items, &2));
    assert!(bring_to_front(&mut items, &1));
    assert_eq!(z(&items, 2), 7);
    assert_eq!(sorted_non_exempt(&items), vec![1, 2]);
    assert_eq!(z(&items, 1), 2);
}

// =============================================================
// close_gap
// =============================================================

#[test]
fn close_gap_keeps_permutation_dense() {
    let mut items = stack(&[(1, 1, false), (2, 2, false), (3, 3, false), (4, 9, true)]);
    items.remove(&2);
    close_gap(&mut items, 2);
    assert_eq!(sorted_non_exempt(&items), vec![1, 2]);
    assert_eq!(z(&items, 3), 2);
    assert_eq!(z(&items, 4), 9);
}
