//! `PictureManager`: owns the N independently-randomized numeric
//! instantiations ("pictures") of one configuration as it is built up one
//! object at a time.
//!
//! Each picture gets its own seeded RNG, derived deterministically from a
//! single top-level seed so a run is fully reproducible. When realizing a
//! construction in some picture hits a degenerate input (three random
//! points that happened to be collinear, two random lines that happened to
//! come out parallel, ...), the manager doesn't give up on that picture: it
//! replays the picture's whole build log from scratch with freshly
//! randomized loose objects, up to a bounded number of attempts, before
//! reporting the picture as unrealizable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::construction::{ConstructionKind, ObjectId, ObjectKind};
use crate::constructors;
use crate::picture::Picture;
use crate::point::Point;
use crate::{AnalyticObject, Error, Result};

pub const DEFAULT_N_PICTURES: usize = 5;
pub const DEFAULT_RESEED_BUDGET: u32 = 50;

const LOOSE_COORDINATE_RANGE: std::ops::Range<f64> = -10.0..10.0;
const LOOSE_RADIUS_RANGE: std::ops::Range<f64> = 0.5..5.0;

/// One entry in a picture's build log, replayed in order to rebuild a
/// picture from scratch during a reseed attempt.
#[derive(Debug, Clone)]
enum Step {
    Loose {
        id: ObjectId,
        kind: ObjectKind,
    },
    Constructed {
        id: ObjectId,
        construction: ConstructionKind,
        args: Vec<ObjectId>,
    },
}

pub struct PictureManager {
    pictures: Vec<Picture>,
    rngs: Vec<StdRng>,
    steps: Vec<Step>,
    reseed_budget: u32,
}

impl PictureManager {
    pub fn new(seed: u64, n_pictures: usize) -> Self {
        let rngs = (0..n_pictures)
            .map(|i| StdRng::seed_from_u64(seed.wrapping_add(i as u64)))
            .collect();
        Self {
            pictures: vec![Picture::new(); n_pictures],
            rngs,
            steps: Vec::new(),
            reseed_budget: DEFAULT_RESEED_BUDGET,
        }
    }

    pub fn with_default_pictures(seed: u64) -> Self {
        Self::new(seed, DEFAULT_N_PICTURES)
    }

    pub fn n_pictures(&self) -> usize {
        self.pictures.len()
    }

    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    pub fn picture(&self, index: usize) -> &Picture {
        &self.pictures[index]
    }

    /// Clone this manager's pictures and build log into a fresh manager
    /// that shares no further mutable state — the cheap path for
    /// speculatively extending a configuration (§ incremental extension).
    pub fn fork(&self) -> Self {
        Self {
            pictures: self.pictures.clone(),
            rngs: self.rngs.iter().map(|rng| rng.clone()).collect(),
            steps: self.steps.clone(),
            reseed_budget: self.reseed_budget,
        }
    }

    fn random_value(rng: &mut StdRng, kind: ObjectKind) -> AnalyticObject {
        match kind {
            ObjectKind::Point => AnalyticObject::Point(Self::random_point(rng)),
            ObjectKind::Line => {
                let p = Self::random_point(rng);
                let mut q = Self::random_point(rng);
                while crate::line::Line::through(p, q).is_err() {
                    q = Self::random_point(rng);
                }
                AnalyticObject::Line(
                    crate::line::Line::through(p, q).expect("retried until non-degenerate"),
                )
            }
            ObjectKind::Circle => {
                let center = Self::random_point(rng);
                let radius = rng.gen_range(LOOSE_RADIUS_RANGE);
                AnalyticObject::Circle(crate::circle::Circle::new(center, radius))
            }
        }
    }

    fn random_point(rng: &mut StdRng) -> Point {
        Point::new(
            rng.gen_range(LOOSE_COORDINATE_RANGE),
            rng.gen_range(LOOSE_COORDINATE_RANGE),
        )
    }

    /// Register a loose object and randomize it independently in every
    /// picture.
    pub fn add_loose(&mut self, id: ObjectId, kind: ObjectKind) {
        for (picture, rng) in self.pictures.iter_mut().zip(self.rngs.iter_mut()) {
            let value = Self::random_value(rng, kind);
            picture.insert(id, value);
        }
        self.steps.push(Step::Loose { id, kind });
    }

    /// Replay `steps` from scratch into a brand-new picture, drawing fresh
    /// loose-object values from `rng`. A free function (rather than a
    /// method) so callers can hold a mutable borrow of one RNG alongside
    /// an immutable borrow of the build log without conflict.
    fn rebuild_picture(steps: &[Step], rng: &mut StdRng) -> Result<Picture> {
        let mut picture = Picture::new();
        for step in steps {
            match step {
                Step::Loose { id, kind } => {
                    picture.insert(*id, Self::random_value(rng, *kind));
                }
                Step::Constructed {
                    id,
                    construction,
                    args,
                } => {
                    let inputs: Vec<AnalyticObject> = args
                        .iter()
                        .map(|parent| {
                            picture
                                .get(*parent)
                                .expect("parent realized earlier in the build log")
                        })
                        .collect();
                    let value = constructors::construct(construction, &inputs)?;
                    picture.insert(*id, value);
                }
            }
        }
        Ok(picture)
    }

    /// Apply `construction` to `args` in every picture, producing `id`.
    /// A picture whose current state makes the construction degenerate is
    /// reseeded (whole build log replayed with fresh loose values) up to
    /// the reseed budget before that picture is reported unrealizable.
    pub fn add_construction(
        &mut self,
        id: ObjectId,
        construction: ConstructionKind,
        args: Vec<ObjectId>,
    ) -> Result<()> {
        for i in 0..self.pictures.len() {
            let inputs: Vec<AnalyticObject> = args
                .iter()
                .map(|parent| {
                    self.pictures[i]
                        .get(*parent)
                        .expect("parent was realized by an earlier add_* call")
                })
                .collect();

            match constructors::construct(&construction, &inputs) {
                Ok(value) => {
                    self.pictures[i].insert(id, value);
                }
                Err(Error::Inconstructible(_)) => {
                    let rebuilt = self.reseed_picture(i, &construction, &args, id)?;
                    self.pictures[i] = rebuilt;
                }
                Err(other) => return Err(other),
            }
        }
        self.steps.push(Step::Constructed {
            id,
            construction,
            args,
        });
        Ok(())
    }

    fn reseed_picture(
        &mut self,
        index: usize,
        construction: &ConstructionKind,
        args: &[ObjectId],
        id: ObjectId,
    ) -> Result<Picture> {
        for _ in 0..self.reseed_budget {
            let Ok(mut candidate) = Self::rebuild_picture(&self.steps, &mut self.rngs[index]) else {
                continue;
            };
            let inputs: Vec<AnalyticObject> = args
                .iter()
                .map(|parent| {
                    candidate
                        .get(*parent)
                        .expect("parent realized during rebuild")
                })
                .collect();
            if let Ok(value) = constructors::construct(construction, &inputs) {
                candidate.insert(id, value);
                return Ok(candidate);
            }
        }
        Err(Error::InconstructiblePictures {
            attempts: self.reseed_budget,
        })
    }
}
