//! Candidate `Collinear`: three points lying on a single line.

use crate::contextual::{ContextualPicture, NewnessFilter};
use crate::producers::{combinations, touches_new};
use crate::theorem::{PotentialTheorem, TheoremKind};

pub fn produce(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
    combinations(&ctx.points(NewnessFilter::All), 3)
        .into_iter()
        .filter(|triple| touches_new(ctx, triple))
        .map(|triple| PotentialTheorem::new(TheoremKind::Collinear, triple))
        .collect()
}
