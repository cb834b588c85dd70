//! Top-level construction interface: the entry point a caller uses to add
//! one object to a configuration, realize it across every picture, and
//! learn whether it turned out to be inconstructible or a duplicate of an
//! existing object. [`construct_configuration`] is the whole-configuration
//! "build from scratch" contract (§6.1); the per-object functions below it
//! are the "extend" and "probe" contracts the gradual analyzer drives one
//! step at a time.

use std::collections::HashMap;

use geogen_analytic::{Configuration, ConfigurationObject, ConstructionKind, ObjectId, PictureManager};

use crate::registrar::Registrar;
use crate::{Error, Result};

/// Outcome of building a whole [`Configuration`] from scratch: which object
/// (if any) turned out inconstructible, and the new-id -> existing-id map
/// for every duplicate found while realizing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructionData {
    pub inconstructible_object: Option<ObjectId>,
    pub duplicates: HashMap<ObjectId, ObjectId>,
}

/// Build a brand-new [`PictureManager`] with `n_pictures` independently
/// randomized pictures and realize every object of `configuration` into it,
/// in order. Validates the configuration's shape (unique ids, parents
/// precede children, argument kinds matching each construction's
/// signature) before touching the numeric layer at all, so a malformed
/// configuration is rejected with `Error::InvalidInput` rather than
/// surfacing as a construction-time panic or a misleading
/// `Inconstructible`.
///
/// Realization stops at the first inconstructible object — later objects
/// in the configuration that depend on it could not be realized either,
/// and the caller (the configuration driver) discards the whole
/// configuration on `inconstructible_object.is_some()` per §7's recovery
/// policy.
pub fn construct_configuration(
    configuration: &Configuration,
    n_pictures: usize,
    seed: u64,
) -> Result<(PictureManager, ConstructionData)> {
    configuration.validate()?;

    let mut manager = PictureManager::new(seed, n_pictures);
    let mut data = ConstructionData::default();

    for object in &configuration.objects {
        match object {
            ConfigurationObject::Loose { id, kind } => {
                manager.add_loose(*id, *kind);
            }
            ConfigurationObject::Constructed { id, construction, args } => {
                let outcome = construct(&mut manager, *id, construction.clone(), args.clone())?;
                if outcome.inconstructible {
                    data.inconstructible_object = Some(*id);
                    break;
                }
                if let Some(existing) = outcome.duplicate_of {
                    data.duplicates.insert(*id, existing);
                }
            }
        }
    }

    Ok((manager, data))
}

/// Outcome of attempting to construct one new object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionOutcome {
    /// The construction failed in at least one picture and could not be
    /// rescued by reseeding; the object was not added.
    pub inconstructible: bool,
    /// The object coincided, in every picture, with this already-registered
    /// object.
    pub duplicate_of: Option<ObjectId>,
}

impl ConstructionOutcome {
    fn ok(duplicate_of: Option<ObjectId>) -> Self {
        Self {
            inconstructible: false,
            duplicate_of,
        }
    }

    fn failed() -> Self {
        Self {
            inconstructible: true,
            duplicate_of: None,
        }
    }
}

fn is_inconstructible(err: &Error) -> bool {
    matches!(
        err,
        Error::Analytic(geogen_analytic::Error::Inconstructible(_))
            | Error::Analytic(geogen_analytic::Error::InconstructiblePictures { .. })
    )
}

/// Construct `id` in place, mutating `manager` directly.
pub fn construct(
    manager: &mut PictureManager,
    id: ObjectId,
    construction: ConstructionKind,
    args: Vec<ObjectId>,
) -> Result<ConstructionOutcome> {
    match Registrar::check_and_register(manager, id, construction, args) {
        Ok(outcome) => Ok(ConstructionOutcome::ok(outcome.duplicate_of)),
        Err(e) if is_inconstructible(&e) => {
            tracing::debug!(object_id = id, "construction inconstructible");
            Ok(ConstructionOutcome::failed())
        }
        Err(e) => Err(e),
    }
}

/// Construct `id` against a cloned copy of `manager`, leaving the original
/// untouched. Cheap: `PictureManager::fork` shares structure with the
/// original via persistent collections.
pub fn construct_by_cloning(
    manager: &PictureManager,
    id: ObjectId,
    construction: ConstructionKind,
    args: Vec<ObjectId>,
) -> Result<(PictureManager, ConstructionOutcome)> {
    let mut forked = manager.fork();
    let outcome = construct(&mut forked, id, construction, args)?;
    Ok((forked, outcome))
}

/// A sentinel id reserved for [`construct_probe`]; never assign a real
/// configuration object this id.
pub const PROBE_OBJECT_ID: ObjectId = ObjectId::MAX;

/// Test whether `construction(args)` would succeed, without permanently
/// registering anything — `manager` is left untouched.
pub fn construct_probe(
    manager: &PictureManager,
    construction: ConstructionKind,
    args: Vec<ObjectId>,
) -> Result<ConstructionOutcome> {
    construct_by_cloning(manager, PROBE_OBJECT_ID, construction, args).map(|(_, outcome)| outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogen_analytic::{ConfigurationObject, ObjectKind};

    #[test]
    fn construct_configuration_realizes_every_object_from_scratch() {
        let config = Configuration::new(vec![
            ConfigurationObject::Loose { id: 0, kind: ObjectKind::Point },
            ConfigurationObject::Loose { id: 1, kind: ObjectKind::Point },
            ConfigurationObject::Constructed {
                id: 2,
                construction: ConstructionKind::Midpoint,
                args: vec![0, 1],
            },
        ])
        .unwrap();

        let (manager, data) = construct_configuration(&config, 3, 42).unwrap();
        assert_eq!(manager.n_pictures(), 3);
        assert!(data.inconstructible_object.is_none());
        assert!(data.duplicates.is_empty());
        for picture in manager.pictures() {
            assert!(picture.get(2).is_some());
        }
    }

    #[test]
    fn construct_configuration_reports_a_duplicate_without_panicking() {
        let config = Configuration::new(vec![
            ConfigurationObject::Loose { id: 0, kind: ObjectKind::Point },
            ConfigurationObject::Constructed {
                id: 1,
                construction: ConstructionKind::Midpoint,
                args: vec![0, 0],
            },
        ])
        .unwrap();

        let (_, data) = construct_configuration(&config, 3, 7).unwrap();
        assert_eq!(data.duplicates.get(&1), Some(&0));
    }

    #[test]
    fn construct_configuration_rejects_a_malformed_configuration_before_realizing_anything() {
        // `Configuration::new` itself would already catch this, so build
        // the malformed value directly to exercise `construct_configuration`'s
        // own validation call.
        let config = Configuration { objects: vec![ConfigurationObject::Constructed {
            id: 0,
            construction: ConstructionKind::Midpoint,
            args: vec![1, 2],
        }] };

        assert!(construct_configuration(&config, 2, 1).is_err());
    }

    #[test]
    fn probing_leaves_the_manager_untouched() {
        let mut mgr = PictureManager::new(3, 2);
        mgr.add_loose(0, ObjectKind::Point);
        mgr.add_loose(1, ObjectKind::Point);
        let outcome =
            construct_probe(&mgr, ConstructionKind::Midpoint, vec![0, 1]).unwrap();
        assert!(!outcome.inconstructible);
        assert_eq!(mgr.picture(0).len(), 2);
    }

    #[test]
    fn construct_by_cloning_does_not_mutate_the_original() {
        let mut mgr = PictureManager::new(3, 2);
        mgr.add_loose(0, ObjectKind::Point);
        mgr.add_loose(1, ObjectKind::Point);
        let (forked, outcome) =
            construct_by_cloning(&mgr, 2, ConstructionKind::Midpoint, vec![0, 1]).unwrap();
        assert!(!outcome.inconstructible);
        assert_eq!(mgr.picture(0).len(), 2);
        assert_eq!(forked.picture(0).len(), 3);
    }
}
