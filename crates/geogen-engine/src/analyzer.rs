//! The gradual analyzer (§4.8): the top-level contract a configuration
//! driver calls once per extension step. It registers the step's new
//! objects (§4.5 via [`crate::constructor`], §4.6 via
//! [`ContextualPicture::add`]), and either runs every producer and the
//! runner, or — if any new object turned out to be a duplicate of an
//! already-registered one, or inconstructible — reports that without
//! running producers at all (an ambiguous configuration isn't one the
//! generator should keep).

use std::collections::HashMap;

use geogen_analytic::{ConfigurationObject, ObjectId, PictureManager};

use crate::contextual::ContextualPicture;
use crate::producers;
use crate::runner::Runner;
use crate::theorem::{PotentialTheorem, Theorem, TheoremKind};
use crate::Result;

/// Everything the analyzer found for one extension step.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub theorems: Vec<Theorem>,
    /// `false` whenever the step produced a duplicate or an inconstructible
    /// object — the signal the generator uses to prune this configuration.
    pub unambiguously_constructible: bool,
    /// The first new object that could not be realized in every picture,
    /// if any.
    pub inconstructible_object: Option<ObjectId>,
    /// `new_id -> existing_id` for every new object that coincided, in
    /// every picture, with an already-registered one.
    pub duplicates: HashMap<ObjectId, ObjectId>,
}

pub struct Analyzer;

impl Analyzer {
    /// Register `new_objects` one at a time (realizing each across every
    /// picture in `manager`), then either report duplicates/
    /// inconstructibility or run the full producer/runner pipeline and
    /// close out the step.
    pub fn analyze(
        ctx: &mut ContextualPicture,
        manager: &mut PictureManager,
        new_objects: &[ConfigurationObject],
    ) -> Result<AnalysisResult> {
        let mut duplicates = HashMap::new();
        let mut inconstructible_object = None;

        for object in new_objects {
            match object {
                ConfigurationObject::Loose { id, kind } => {
                    manager.add_loose(*id, *kind);
                    let realized = Self::realized_values(manager, *id);
                    ctx.add(object, &realized)?;
                }
                ConfigurationObject::Constructed { id, construction, args } => {
                    let outcome =
                        crate::constructor::construct(manager, *id, construction.clone(), args.clone())?;
                    if outcome.inconstructible {
                        inconstructible_object = Some(*id);
                        break;
                    }
                    if let Some(existing) = outcome.duplicate_of {
                        let realized = Self::realized_values(manager, *id);
                        ctx.mirror_duplicate(*id, &realized);
                        duplicates.insert(*id, existing);
                        continue;
                    }
                    let realized = Self::realized_values(manager, *id);
                    ctx.add(object, &realized)?;
                }
            }
        }

        if inconstructible_object.is_some() {
            ctx.commit_step();
            return Ok(AnalysisResult {
                theorems: Vec::new(),
                unambiguously_constructible: false,
                inconstructible_object,
                duplicates,
            });
        }

        if !duplicates.is_empty() {
            let mut theorems: Vec<Theorem> = duplicates
                .iter()
                .filter_map(|(&new_id, &existing_id)| {
                    let existing_handle = ctx.handle_of(existing_id)?;
                    Some(Theorem { kind: TheoremKind::SameObjects, objects: vec![new_id, existing_handle] })
                })
                .collect();
            theorems.sort();
            ctx.commit_step();
            return Ok(AnalysisResult {
                theorems,
                unambiguously_constructible: false,
                inconstructible_object: None,
                duplicates,
            });
        }

        let candidates = Self::all_candidates(ctx);
        let mut theorems: Vec<Theorem> =
            candidates.into_iter().filter_map(|c| Runner::verify(ctx, &c)).collect();
        theorems.sort();
        theorems.dedup();
        ctx.commit_step();
        Ok(AnalysisResult {
            theorems,
            unambiguously_constructible: true,
            inconstructible_object: None,
            duplicates,
        })
    }

    fn realized_values(manager: &PictureManager, id: ObjectId) -> Vec<geogen_analytic::AnalyticObject> {
        manager
            .pictures()
            .iter()
            .map(|p| p.get(id).expect("object was just realized in every picture"))
            .collect()
    }

    /// Run all producers without committing the step, for callers that
    /// want to inspect candidates (e.g. tests) without advancing the
    /// new/old partition.
    pub fn all_candidates(ctx: &ContextualPicture) -> Vec<PotentialTheorem> {
        let mut candidates = Vec::new();
        candidates.extend(producers::incidence::produce(ctx));
        candidates.extend(producers::parallel::produce(ctx));
        candidates.extend(producers::perpendicular::produce(ctx));
        candidates.extend(producers::equal_segments::produce(ctx));
        candidates.extend(producers::tangent::produce(ctx));
        candidates.extend(producers::concurrent::produce(ctx));
        candidates.extend(producers::collinear::produce(ctx));
        candidates.extend(producers::concyclic::produce(ctx));
        candidates
    }
}
