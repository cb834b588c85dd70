//! # geogen-engine
//!
//! The contextual picture — the cross-picture symbolic index that knows,
//! for every registered object, whether it is "new" since the last
//! extension step — the registrar that checks a candidate construction's
//! consistency across all pictures before admitting it, the theorem
//! producers that propose candidate relationships among registered
//! objects, the runner that verifies a candidate against every picture
//! simultaneously, and the gradual analyzer that ties producers and runner
//! together one configuration-extension step at a time.
//!
//! Built on top of `geogen_analytic`'s tolerance-aware primitives and
//! `PictureManager`; this crate adds no numeric geometry of its own.

pub mod analyzer;
pub mod constructor;
pub mod contextual;
pub mod producers;
pub mod registrar;
pub mod runner;
pub mod theorem;

pub use analyzer::{AnalysisResult, Analyzer};
pub use constructor::{
    construct, construct_by_cloning, construct_configuration, construct_probe, ConstructionData,
    ConstructionOutcome,
};
pub use contextual::{ContextualPicture, HandleId, NewnessFilter};
pub use registrar::{RegistrationOutcome, Registrar};
pub use runner::Runner;
pub use theorem::{Theorem, TheoremKind, TheoremMap, TheoremObject};

/// Result type for engine-layer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised above the analytic layer: everything that requires seeing
/// more than one picture at once, plus the analytic layer's own errors
/// passed through.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lower-layer analytic failure (degenerate construction, exhausted
    /// reseed budget, malformed configuration).
    #[error(transparent)]
    Analytic(#[from] geogen_analytic::Error),

    /// Pictures disagree about some cross-picture fact that is supposed to
    /// be picture-independent (e.g. one picture reports a duplicate object
    /// that another does not).
    #[error("pictures disagree: {0}")]
    InconsistentPictures(String),

    /// A request to the engine referenced an object id that does not exist
    /// in the contextual picture, or a kind mismatch at the engine layer.
    #[error("invalid request: {0}")]
    InvalidInput(String),

    /// An internal bookkeeping invariant was violated; reaching this means
    /// a bug in the engine itself, not bad input.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}
