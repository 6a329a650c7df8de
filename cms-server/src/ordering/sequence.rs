//! In-memory ordering engine
//!
//! Pure positional arithmetic over a slice of ordered records. This is the
//! single source of truth for the shift rules; the SurrealDB-backed
//! [`collection`](super::collection) manager applies the same rules as range
//! updates, and the embedded-array adapters (season board members and
//! highlights) call these functions directly on the loaded vector before
//! persisting the whole parent document.

use thiserror::Error;

/// A record carrying a `sort_order` position within its sibling set.
pub trait Sequenced {
    fn sort_order(&self) -> i64;
    fn set_sort_order(&mut self, order: i64);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("target position {target} is outside 0..{len}")]
    TargetOutOfRange { target: i64, len: usize },

    #[error("sort_order values are not dense: {0}")]
    NotDense(String),
}

/// Position for a record appended at the end of the sequence.
pub fn next_order<T: Sequenced>(items: &[T]) -> i64 {
    items.iter().map(Sequenced::sort_order).max().map_or(0, |m| m + 1)
}

/// Sort ascending by `sort_order`.
pub fn sort<T: Sequenced>(items: &mut [T]) {
    items.sort_by_key(Sequenced::sort_order);
}

/// Reassign `sort_order = 0..n` following the current slice positions.
///
/// Used when adopting client-supplied arrays (e.g. a season created with
/// board members inline) whose positions are meaningful but whose order
/// values are not.
pub fn renumber<T: Sequenced>(items: &mut [T]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.set_sort_order(i as i64);
    }
}

/// Close the gap left by a record that held `removed_order`.
///
/// Call after the record has been removed from the slice (or parked outside
/// it): every sibling above the vacated position moves down one.
pub fn compact_after<T: Sequenced>(items: &mut [T], removed_order: i64) {
    for item in items.iter_mut() {
        if item.sort_order() > removed_order {
            item.set_sort_order(item.sort_order() - 1);
        }
    }
}

/// Move the record at slice index `mover` to position `target`.
///
/// Exactly the records strictly between the old and new position shift by
/// ±1; everything else is untouched. `target` must lie in `[0, len - 1]`;
/// a no-op move is accepted.
pub fn move_to<T: Sequenced>(items: &mut [T], mover: usize, target: i64) -> Result<(), SequenceError> {
    let len = items.len();
    if target < 0 || target as usize >= len {
        return Err(SequenceError::TargetOutOfRange { target, len });
    }

    let from = items[mover].sort_order();
    if target == from {
        return Ok(());
    }

    for (i, item) in items.iter_mut().enumerate() {
        if i == mover {
            continue;
        }
        let order = item.sort_order();
        if target < from {
            if order >= target && order < from {
                item.set_sort_order(order + 1);
            }
        } else if order > from && order <= target {
            item.set_sort_order(order - 1);
        }
    }
    items[mover].set_sort_order(target);
    Ok(())
}

/// Set a boolean flag on `target` and clear it on every other sibling.
pub fn set_exclusive<T>(items: &mut [T], target: usize, set_flag: impl Fn(&mut T, bool)) {
    for (i, item) in items.iter_mut().enumerate() {
        set_flag(item, i == target);
    }
}

/// Verify the density invariant: `sort_order` values form exactly `0..n-1`.
pub fn check_dense<T: Sequenced>(items: &[T]) -> Result<(), SequenceError> {
    let mut orders: Vec<i64> = items.iter().map(Sequenced::sort_order).collect();
    orders.sort_unstable();
    for (expected, actual) in orders.iter().enumerate() {
        if *actual != expected as i64 {
            return Err(SequenceError::NotDense(format!(
                "expected {expected}, found {actual} in {orders:?}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        name: &'static str,
        order: i64,
        leader: bool,
    }

    impl Rec {
        fn new(name: &'static str, order: i64) -> Self {
            Self { name, order, leader: false }
        }
    }

    impl Sequenced for Rec {
        fn sort_order(&self) -> i64 {
            self.order
        }
        fn set_sort_order(&mut self, order: i64) {
            self.order = order;
        }
    }

    fn seq(n: i64) -> Vec<Rec> {
        (0..n).map(|i| Rec::new("", i)).collect()
    }

    fn orders(items: &[Rec]) -> Vec<i64> {
        items.iter().map(|r| r.order).collect()
    }

    #[test]
    fn append_gets_next_position() {
        assert_eq!(next_order(&seq(0)), 0);
        assert_eq!(next_order(&seq(3)), 3);
    }

    #[test]
    fn delete_compacts_higher_siblings() {
        // three records, drop the middle one
        let mut items = vec![Rec::new("a", 0), Rec::new("b", 1), Rec::new("c", 2)];
        let removed = items.remove(1);
        compact_after(&mut items, removed.order);
        assert_eq!(orders(&items), vec![0, 1]);
        assert_eq!(items[1].name, "c");
        check_dense(&items).unwrap();
    }

    #[test]
    fn delete_leaves_lower_siblings_untouched() {
        let mut items: Vec<Rec> = seq(5);
        let removed = items.remove(3);
        compact_after(&mut items, removed.order);
        assert_eq!(orders(&items), vec![0, 1, 2, 3]);
    }

    #[test]
    fn move_toward_front_shifts_range_up() {
        // [a b c d], move d to 0 -> [d a b c]
        let mut items = vec![
            Rec::new("a", 0),
            Rec::new("b", 1),
            Rec::new("c", 2),
            Rec::new("d", 3),
        ];
        move_to(&mut items, 3, 0).unwrap();
        assert_eq!(items[3].order, 0);
        assert_eq!(items[0].order, 1);
        assert_eq!(items[1].order, 2);
        assert_eq!(items[2].order, 3);
        check_dense(&items).unwrap();
    }

    #[test]
    fn move_toward_back_shifts_range_down() {
        // [a b c d], move a to 2 -> [b c a d]
        let mut items = vec![
            Rec::new("a", 0),
            Rec::new("b", 1),
            Rec::new("c", 2),
            Rec::new("d", 3),
        ];
        move_to(&mut items, 0, 2).unwrap();
        assert_eq!(items[0].order, 2);
        assert_eq!(items[1].order, 0);
        assert_eq!(items[2].order, 1);
        assert_eq!(items[3].order, 3);
        check_dense(&items).unwrap();
    }

    #[test]
    fn move_only_shifts_records_between_positions() {
        let mut items = seq(6);
        move_to(&mut items, 4, 1).unwrap();
        // 0 and 5 are outside [1, 4) and must not move
        assert_eq!(items[0].order, 0);
        assert_eq!(items[5].order, 5);
        check_dense(&items).unwrap();
    }

    #[test]
    fn move_to_current_position_is_noop() {
        let mut items = seq(4);
        let before = orders(&items);
        move_to(&mut items, 2, 2).unwrap();
        assert_eq!(orders(&items), before);
    }

    #[test]
    fn move_round_trip_restores_ordering() {
        let mut items = seq(5);
        let before = orders(&items);
        move_to(&mut items, 1, 4).unwrap();
        move_to(&mut items, 1, 1).unwrap();
        assert_eq!(orders(&items), before);
    }

    #[test]
    fn move_rejects_out_of_range_target() {
        let mut items = seq(3);
        // one past the end is rejected, not clamped
        assert_eq!(
            move_to(&mut items, 0, 3),
            Err(SequenceError::TargetOutOfRange { target: 3, len: 3 })
        );
        assert_eq!(
            move_to(&mut items, 0, -1),
            Err(SequenceError::TargetOutOfRange { target: -1, len: 3 })
        );
        // rejected moves leave the sequence untouched
        assert_eq!(orders(&items), vec![0, 1, 2]);
    }

    #[test]
    fn renumber_follows_slice_positions() {
        let mut items = vec![Rec::new("a", 7), Rec::new("b", 7), Rec::new("c", 0)];
        renumber(&mut items);
        assert_eq!(orders(&items), vec![0, 1, 2]);
    }

    #[test]
    fn exclusive_flag_clears_all_other_siblings() {
        let mut items = vec![Rec::new("a", 0), Rec::new("b", 1), Rec::new("c", 2)];
        items[0].leader = true;
        set_exclusive(&mut items, 2, |r, v| r.leader = v);
        let leaders: Vec<bool> = items.iter().map(|r| r.leader).collect();
        assert_eq!(leaders, vec![false, false, true]);
        // array positions unaffected
        assert_eq!(orders(&items), vec![0, 1, 2]);
    }

    #[test]
    fn check_dense_detects_gap_and_duplicate() {
        let gap = vec![Rec::new("a", 0), Rec::new("b", 2)];
        assert!(check_dense(&gap).is_err());
        let dup = vec![Rec::new("a", 0), Rec::new("b", 0)];
        assert!(check_dense(&dup).is_err());
    }

    #[test]
    fn random_operation_sequence_stays_dense() {
        let mut items = seq(8);
        let moves = [(3usize, 6i64), (0, 7), (5, 0), (2, 2), (7, 1)];
        for (mover, target) in moves {
            move_to(&mut items, mover, target).unwrap();
            check_dense(&items).unwrap();
        }
        let removed = items.remove(4);
        compact_after(&mut items, removed.order);
        check_dense(&items).unwrap();
        let order = next_order(&items);
        assert_eq!(order, 7);
    }
}
