//! Bounded flood fill over a single height plane
//!
//! Collects the blocks connected to an origin through horizontal neighbours
//! while a predicate holds. The result is capped so a flat field of matching
//! blocks cannot make a single trigger explore an unbounded area.

use ahash::AHashSet;

use crate::core::types::BlockPos;

/// Positions collected by a region search
pub type PositionSet = AHashSet<BlockPos>;

/// Collect up to `cap` positions connected to `origin` on its height plane
///
/// Returns an empty set when the predicate fails at `origin`. Callers must not
/// assume the full connected component is returned once `cap` is reached.
pub fn find_connected<F>(origin: BlockPos, cap: usize, predicate: F) -> PositionSet
where
    F: Fn(BlockPos) -> bool,
{
    let mut found = PositionSet::default();
    if cap == 0 {
        return found;
    }

    let mut visited = AHashSet::new();
    let mut stack = vec![origin];
    visited.insert(origin);

    while let Some(pos) = stack.pop() {
        if !predicate(pos) {
            continue;
        }

        found.insert(pos);
        if found.len() >= cap {
            break;
        }

        // Pushed in reverse so +X is explored first
        for neighbor in pos.horizontal_neighbors().into_iter().rev() {
            if visited.insert(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    found
}
