//! Kinematics and force normalization for a hovering flapping-wing case.
//!
//! This library provides:
//! - Rigid-body kinematics of a wing under sinusoidal stroke and pitch
//! - A quasi-steady drag/lift model evaluated along the body profile
//! - Non-dimensionalization of solver force histories by the peak
//!   quasi-steady force, for comparison with published data
//! - Readers and writers for the solver's force and body files
//!
//! Time is always a one-dimensional `ndarray` array; a single instant is a
//! length-1 array.

#![warn(missing_docs)]

pub mod aerodynamics;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod io;
pub mod kinematics;
pub mod normalize;
pub mod reference;

// Re-export key types and functions for easy use
pub use aerodynamics::{AerodynamicModel, QuasiSteady};
pub use config::CaseConfig;
pub use constants::{KinematicConfig, KinematicParameters};
pub use error::{CalcError, Result};
pub use geometry::{ellipse, regularize, BodyPoints};
pub use kinematics::{rotate, Flapping};
pub use normalize::{ForceSeries, NormalizedForceSeries, TimeSeries};
pub use reference::{CoefficientSource, ReferenceDataset};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
