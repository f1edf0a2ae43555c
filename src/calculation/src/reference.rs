//! Published coefficient histories used for cross-comparison, and the
//! dispatch between them and the present simulation.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Result;
use crate::io;
use crate::kinematics::Flapping;
use crate::normalize::NormalizedForceSeries;

/// Literature datasets for the hovering ellipse case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceDataset {
    /// Immersed-boundary computation of Li, Dong & Liu (2015).
    LiEtAl2015,
    /// Experiment of Wang, Birch & Dickinson (2004), as digitized by Li et al.
    WangEtAl2004,
    /// Viscous vortex particle computation of Eldredge (2007), as digitized by Li et al.
    Eldredge2007,
}

impl ReferenceDataset {
    /// Every dataset, in legend order.
    pub const ALL: [ReferenceDataset; 3] = [
        ReferenceDataset::LiEtAl2015,
        ReferenceDataset::WangEtAl2004,
        ReferenceDataset::Eldredge2007,
    ];

    /// Label used in legends and case files.
    pub fn label(self) -> &'static str {
        match self {
            ReferenceDataset::LiEtAl2015 => "Li et al. (2015)",
            ReferenceDataset::WangEtAl2004 => "Wang et al. (2004)",
            ReferenceDataset::Eldredge2007 => "Eldredge (2007)",
        }
    }

    /// Look a dataset up by its label.
    ///
    /// Unknown labels are reported and yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let found = Self::ALL.into_iter().find(|d| d.label() == label);
        if found.is_none() {
            warn!("Label \"{label}\" is unknown label.");
        }
        found
    }

    /// File names of the drag and lift histories in the data directory.
    pub fn file_names(self) -> (&'static str, &'static str) {
        match self {
            ReferenceDataset::LiEtAl2015 => ("CD_current.dat", "CL_current.dat"),
            ReferenceDataset::WangEtAl2004 => ("CD_EXP.dat", "CL_EXP.dat"),
            ReferenceDataset::Eldredge2007 => ("CD_VVPM.dat", "CL_VVPM.dat"),
        }
    }

    /// Short file-system friendly name.
    pub fn slug(self) -> &'static str {
        match self {
            ReferenceDataset::LiEtAl2015 => "li-et-al-2015",
            ReferenceDataset::WangEtAl2004 => "wang-et-al-2004",
            ReferenceDataset::Eldredge2007 => "eldredge-2007",
        }
    }

    /// Load the drag and lift histories from `data_dir`.
    pub fn load(self, data_dir: &Path) -> Result<NormalizedForceSeries> {
        let (cd_name, cl_name) = self.file_names();
        let drag = io::read_coefficient_file(data_dir.join(cd_name))?;
        let lift = io::read_coefficient_file(data_dir.join(cl_name))?;
        info!(
            "loaded {} ({} CD / {} CL samples)",
            self.label(),
            drag.len(),
            lift.len()
        );
        Ok(NormalizedForceSeries { drag, lift })
    }
}

impl fmt::Display for ReferenceDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a set of coefficient histories comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum CoefficientSource {
    /// Solver output, normalized with the quasi-steady model.
    Simulation {
        /// Solver force history `(t, fx, fy)`.
        force_file: PathBuf,
        /// Body whose x-profile sets the reference force.
        body_file: PathBuf,
    },
    /// A published dataset, read from the data directory.
    Reference(ReferenceDataset),
}

impl CoefficientSource {
    /// Label used in legends and log messages.
    pub fn label(&self) -> &str {
        match self {
            CoefficientSource::Simulation { .. } => "PetIBM",
            CoefficientSource::Reference(dataset) => dataset.label(),
        }
    }

    /// Prefix of the output file names.
    pub fn slug(&self) -> &str {
        match self {
            CoefficientSource::Simulation { .. } => "petibm",
            CoefficientSource::Reference(dataset) => dataset.slug(),
        }
    }

    /// Drag and lift coefficient histories against `t / T`.
    pub fn coefficients(&self, model: &Flapping, data_dir: &Path) -> Result<NormalizedForceSeries> {
        match self {
            CoefficientSource::Simulation {
                force_file,
                body_file,
            } => {
                let forces = io::read_force_file(force_file)?;
                let body = io::read_body_file(body_file)?;
                model.normalize(&forces, body.x())
            }
            CoefficientSource::Reference(dataset) => dataset.load(data_dir),
        }
    }
}
