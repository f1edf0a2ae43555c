//! TOML case description.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{KinematicConfig, KinematicParameters};
use crate::error::Result;
use crate::reference::{CoefficientSource, ReferenceDataset};

/// Input and output locations of a case.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CasePaths {
    /// Solver force history.
    pub force_file: PathBuf,
    /// Body file, written by `flapping body` and read for normalization.
    pub body_file: PathBuf,
    /// Directory holding the published datasets.
    pub data_dir: PathBuf,
    /// Directory the coefficient histories are written to.
    pub output_dir: PathBuf,
    /// Labels of the literature datasets to compare against.
    pub references: Vec<String>,
}

impl Default for CasePaths {
    fn default() -> Self {
        Self {
            force_file: PathBuf::from("forces-0.txt"),
            body_file: PathBuf::from("ellipse.body"),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            references: ReferenceDataset::ALL
                .iter()
                .map(|d| d.label().to_string())
                .collect(),
        }
    }
}

/// Ellipse generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Points on each side of the raw ellipse, edges included.
    pub points_per_side: usize,
    /// Target distance between consecutive boundary points.
    pub spacing: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            points_per_side: 100,
            spacing: 0.025,
        }
    }
}

/// A complete case file; every table and key is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    /// `[kinematics]` table.
    pub kinematics: KinematicConfig,
    /// `[case]` table.
    pub case: CasePaths,
    /// `[body]` table.
    pub body: BodyConfig,
}

impl CaseConfig {
    /// Parse a case from TOML text; paths are kept as written.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a case file; relative paths in it are resolved against the
    /// directory that contains it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::from_toml(&fs::read_to_string(path)?)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.resolve_paths(base);
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for p in [
            &mut self.case.force_file,
            &mut self.case.body_file,
            &mut self.case.data_dir,
            &mut self.case.output_dir,
        ] {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }

    /// Kinematic parameters of the case.
    pub fn parameters(&self) -> KinematicParameters {
        KinematicParameters::new(self.kinematics)
    }

    /// The simulation followed by every recognized reference dataset.
    pub fn sources(&self) -> Vec<CoefficientSource> {
        let simulation = CoefficientSource::Simulation {
            force_file: self.case.force_file.clone(),
            body_file: self.case.body_file.clone(),
        };
        std::iter::once(simulation)
            .chain(
                self.case
                    .references
                    .iter()
                    .filter_map(|label| ReferenceDataset::from_label(label))
                    .map(CoefficientSource::Reference),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_case_uses_defaults() {
        let config = CaseConfig::from_toml("").unwrap();
        assert_eq!(config, CaseConfig::default());
        assert_eq!(config.parameters(), KinematicParameters::default());
        assert_eq!(config.sources().len(), 4);
    }

    #[test]
    fn test_full_case() {
        let text = r#"
            [kinematics]
            frequency = 0.5
            stroke_amplitude = 2.0

            [case]
            force_file = "run/forces.txt"
            references = ["Eldredge (2007)", "Unknown (2020)"]

            [body]
            spacing = 0.01
        "#;
        let config = CaseConfig::from_toml(text).unwrap();
        assert_eq!(config.kinematics.frequency, 0.5);
        assert_eq!(config.body.spacing, 0.01);
        assert_eq!(config.body.points_per_side, 100);
        let sources = config.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1], CoefficientSource::Reference(ReferenceDataset::Eldredge2007));
    }

    #[test]
    fn test_relative_paths_resolved() {
        let mut config = CaseConfig::default();
        config.case.output_dir = PathBuf::from("/abs/out");
        config.resolve_paths(Path::new("cases/run1"));
        assert_eq!(config.case.force_file, PathBuf::from("cases/run1/forces-0.txt"));
        assert_eq!(config.case.output_dir, PathBuf::from("/abs/out"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(CaseConfig::from_toml("[kinematics]\nfrequency = \"fast\"").is_err());
    }
}
