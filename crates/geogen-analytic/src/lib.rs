//! # geogen-analytic
//!
//! Tolerance-aware 2D analytic geometry: points, lines, circles, their
//! incidence/intersection/tangency predicates, the symbolic-to-numeric
//! `Picture` bimap, and the `PictureManager` that owns the N independently
//! randomized instantiations ("pictures") of one configuration.
//!
//! This crate knows nothing about theorems or symbolic construction
//! catalogs beyond the predefined construction signatures themselves; that
//! reasoning lives one layer up, in `geogen-engine`.

pub mod analytic;
pub mod circle;
pub mod construction;
pub mod constructors;
pub mod intersect;
pub mod line;
pub mod manager;
pub mod picture;
pub mod point;
pub mod tolerance;

pub use analytic::AnalyticObject;
pub use circle::Circle;
pub use construction::{Configuration, ConfigurationObject, ConstructionKind, ObjectId, ObjectKind};
pub use line::Line;
pub use manager::PictureManager;
pub use picture::Picture;
pub use point::Point;

/// Result type for analytic-layer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the analytic primitives and the picture manager.
///
/// This is a strict subset of the full taxonomy: the analytic layer never
/// observes more than one picture at a time, so it can only ever report
/// that a *single* construction step failed, never that pictures disagree
/// with each other (that's `geogen_engine::Error::InconsistentPictures`).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A construction step could not produce a value from degenerate
    /// inputs (coincident points, collinear triple, parallel lines, ...).
    #[error("cannot construct: {0}")]
    Inconstructible(String),

    /// Too many reseed attempts failed for a loose object in a picture.
    #[error("could not realize a consistent picture after {attempts} reseed attempts")]
    InconstructiblePictures { attempts: u32 },

    /// A configuration is malformed independent of any numeric instance:
    /// duplicate ids, a parent referencing an object defined later, or an
    /// argument list whose kinds don't match the construction's signature.
    #[error("invalid configuration: {0}")]
    InvalidInput(String),
}

/// Trait for tolerance-based equality, used in place of [`PartialEq`]
/// wherever two analytic values are compared as "the same geometric
/// object" rather than "bit-identical floats".
pub trait ToleranceEq {
    fn tol_eq(&self, other: &Self) -> bool;
}
