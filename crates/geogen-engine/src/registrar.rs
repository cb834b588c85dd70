//! The registrar: the only place that compares objects *across* pictures.
//!
//! Realizing a construction is the analytic layer's job (one picture at a
//! time, with reseeding on failure); deciding whether the realized object
//! is secretly the same geometric object as one already registered is a
//! cross-picture question — two symbolic objects are "the same" only if
//! their numeric values coincide in *every* picture, not just one (a
//! single picture's coincidence could be an artifact of that picture's
//! particular random placement).

use geogen_analytic::{ConstructionKind, ObjectId, PictureManager};

use crate::{Error, Result};

/// Outcome of registering one new construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// `Some(id)` if the new object coincided, in every picture, with the
    /// already-registered object `id` — a `SameObjects` candidate.
    pub duplicate_of: Option<ObjectId>,
}

pub struct Registrar;

impl Registrar {
    /// Realize `construction(args)` as `id` in every picture managed by
    /// `manager`, then check whether it is a cross-picture duplicate of an
    /// existing object. Propagates analytic errors (inconstructible input,
    /// exhausted reseed budget) unchanged.
    pub fn check_and_register(
        manager: &mut PictureManager,
        id: ObjectId,
        construction: ConstructionKind,
        args: Vec<ObjectId>,
    ) -> Result<RegistrationOutcome> {
        manager.add_construction(id, construction, args)?;

        let mut agreed: Option<Option<ObjectId>> = None;
        for picture in manager.pictures() {
            let value = picture
                .get(id)
                .expect("add_construction just realized this object in every picture");
            let dup = picture.duplicate_of(&value, id);
            match &agreed {
                None => agreed = Some(dup),
                Some(prev) if *prev == dup => {}
                Some(prev) => {
                    tracing::warn!(
                        object_id = id,
                        first = ?prev,
                        other = ?dup,
                        "pictures disagree on duplicate status"
                    );
                    return Err(Error::InconsistentPictures(format!(
                        "object {id} is a duplicate of {prev:?} in one picture but {dup:?} in another"
                    )));
                }
            }
        }

        let duplicate_of = agreed.flatten();
        tracing::debug!(object_id = id, duplicate_of = ?duplicate_of, "object registered");

        Ok(RegistrationOutcome { duplicate_of })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogen_analytic::ObjectKind;

    #[test]
    fn registering_a_loose_point_has_no_duplicate() {
        let mut mgr = PictureManager::new(1, 3);
        mgr.add_loose(0, ObjectKind::Point);
        let outcome =
            Registrar::check_and_register(&mut mgr, 1, ConstructionKind::Midpoint, vec![0, 0]);
        // Midpoint(p, p) == p in every picture: this *is* a genuine duplicate.
        let outcome = outcome.unwrap();
        assert_eq!(outcome.duplicate_of, Some(0));
    }
}
