//! Theorem producers: each proposes candidate relationships among
//! registered objects, using only the symbolic [`ContextualPicture`] index
//! (never the numeric pictures — candidates are proposals, not verified
//! facts; the [`crate::runner::Runner`] checks them against every picture).
//!
//! Every producer restricts itself to tuples that touch at least one
//! object new since the last extension step (`touches_new`); re-proposing
//! relationships among only-old objects would just repeat work the
//! previous step's run already covered.

pub mod collinear;
pub mod concurrent;
pub mod concyclic;
pub mod equal_segments;
pub mod incidence;
pub mod parallel;
pub mod perpendicular;
pub mod tangent;

use crate::contextual::{ContextualPicture, HandleId};

/// True if any id in `ids` was added in the most recent extension step.
pub(crate) fn touches_new(ctx: &ContextualPicture, ids: &[HandleId]) -> bool {
    ids.iter().any(|id| ctx.is_new(*id))
}

/// All `k`-element combinations of `items`, order-preserved and
/// duplicate-free (assumes `items` itself has no duplicates).
pub(crate) fn combinations(items: &[HandleId], k: usize) -> Vec<Vec<HandleId>> {
    if k == 0 || k > items.len() {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    combinations_rec(items, k, 0, &mut current, &mut result);
    result
}

fn combinations_rec(
    items: &[HandleId],
    k: usize,
    start: usize,
    current: &mut Vec<HandleId>,
    result: &mut Vec<Vec<HandleId>>,
) {
    if current.len() == k {
        result.push(current.clone());
        return;
    }
    for i in start..items.len() {
        current.push(items[i]);
        combinations_rec(items, k, i + 1, current, result);
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_of_three_from_four() {
        let items = vec![1, 2, 3, 4];
        let combos = combinations(&items, 3);
        assert_eq!(combos.len(), 4);
        assert!(combos.contains(&vec![1, 2, 3]));
        assert!(combos.contains(&vec![2, 3, 4]));
    }
}
