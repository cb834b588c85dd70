//! Candidate `EqualSegments`: two point-pairs (segments) of equal length.

use crate::contextual::{ContextualPicture, NewnessFilter};
use crate::producers::{combinations, touches_new};
use crate::theorem::{PotentialTheorem, TheoremKind};

pub fn produce(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
    let segments = combinations(&ctx.points(NewnessFilter::All), 2);
    let segment_indices: Vec<u64> = (0..segments.len() as u64).collect();
    combinations(&segment_indices, 2)
        .into_iter()
        .filter_map(|pair_of_indices| {
            let seg_a = &segments[pair_of_indices[0] as usize];
            let seg_b = &segments[pair_of_indices[1] as usize];
            let objects = vec![seg_a[0], seg_a[1], seg_b[0], seg_b[1]];
            touches_new(ctx, &objects).then_some(PotentialTheorem::new(
                TheoremKind::EqualSegments,
                objects,
            ))
        })
        .collect()
}
