//! Candidate `Concyclic`: four points lying on a single circle.

use crate::contextual::{ContextualPicture, NewnessFilter};
use crate::producers::{combinations, touches_new};
use crate::theorem::{PotentialTheorem, TheoremKind};

pub fn produce(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
    combinations(&ctx.points(NewnessFilter::All), 4)
        .into_iter()
        .filter(|four| touches_new(ctx, four))
        .map(|four| PotentialTheorem::new(TheoremKind::Concyclic, four))
        .collect()
}
