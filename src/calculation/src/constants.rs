//! Physical parameters of the flapping-wing case.
//!
//! `KinematicConfig` is the user-facing, serde-friendly description read from
//! a case file. `KinematicParameters` is the immutable form the model works
//! with: it is built once per analysis run and carries the derived angular
//! frequency and maximum translational velocity.

use std::f64::consts::PI;

use serde::Deserialize;

/// Kinematic parameters as written in a case file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct KinematicConfig {
    /// Reynolds number
    pub reynolds: f64,

    /// Fluid density
    pub density: f64,

    /// Chord length
    pub chord: f64,

    /// Thickness-to-chord ratio
    pub thickness_ratio: f64,

    /// Stroke amplitude (peak-to-peak), in units of length
    pub stroke_amplitude: f64,

    /// Flapping frequency (1/s)
    pub frequency: f64,

    /// Mean angle of attack (rad)
    pub alpha0: f64,

    /// Amplitude of the pitching motion (rad)
    pub pitch_amplitude: f64,

    /// Phase difference between translation and rotation (rad)
    pub phase: f64,
}

impl KinematicConfig {
    /// Symmetric hovering case at Re = 75: an ellipse with 10% thickness
    /// flapping over 2.8 chords at a quarter hertz, pitching by +/- 45 deg
    /// around the vertical.
    pub const fn hovering() -> Self {
        Self {
            reynolds: 75.0,
            density: 1.0,
            chord: 1.0,
            thickness_ratio: 0.10,
            stroke_amplitude: 2.8,
            frequency: 0.25,
            alpha0: PI / 2.0,
            pitch_amplitude: PI / 4.0,
            phase: 0.0,
        }
    }
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self::hovering()
    }
}

/// Immutable kinematic parameters with derived quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicParameters {
    reynolds: f64,
    density: f64,
    chord: f64,
    thickness_ratio: f64,
    stroke_amplitude: f64,
    frequency: f64,
    max_velocity: f64,
    alpha0: f64,
    pitch_amplitude: f64,
    phase: f64,
}

impl KinematicParameters {
    /// Freeze a case description, deriving `Umax = A0 * pi * f`.
    pub fn new(config: KinematicConfig) -> Self {
        Self {
            reynolds: config.reynolds,
            density: config.density,
            chord: config.chord,
            thickness_ratio: config.thickness_ratio,
            stroke_amplitude: config.stroke_amplitude,
            frequency: config.frequency,
            max_velocity: config.stroke_amplitude * PI * config.frequency,
            alpha0: config.alpha0,
            pitch_amplitude: config.pitch_amplitude,
            phase: config.phase,
        }
    }

    /// Reynolds number.
    pub fn reynolds(&self) -> f64 {
        self.reynolds
    }

    /// Fluid density.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Chord length.
    pub fn chord(&self) -> f64 {
        self.chord
    }

    /// Thickness-to-chord ratio.
    pub fn thickness_ratio(&self) -> f64 {
        self.thickness_ratio
    }

    /// Peak-to-peak stroke amplitude `A0`.
    pub fn stroke_amplitude(&self) -> f64 {
        self.stroke_amplitude
    }

    /// Flapping frequency `f`.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Maximum translational velocity, `A0 * pi * f`.
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// Mean orientation angle (rad).
    pub fn alpha0(&self) -> f64 {
        self.alpha0
    }

    /// Pitch amplitude `beta` (rad).
    pub fn pitch_amplitude(&self) -> f64 {
        self.pitch_amplitude
    }

    /// Phase of the pitch relative to the stroke (rad).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Angular frequency of the stroke, `2 * pi * f`.
    #[inline(always)]
    pub fn omega(&self) -> f64 {
        2.0 * PI * self.frequency
    }

    /// Flapping period, `1 / f`.
    pub fn period(&self) -> f64 {
        1.0 / self.frequency
    }

    /// Get a summary of the parameters for reporting.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Re", format!("{:.1}", self.reynolds)),
            ("rho", format!("{:.3}", self.density)),
            ("chord", format!("{:.3}", self.chord)),
            ("thickness ratio", format!("{:.3}", self.thickness_ratio)),
            ("A0", format!("{:.3}", self.stroke_amplitude)),
            ("f", format!("{:.4}", self.frequency)),
            ("Umax", format!("{:.4}", self.max_velocity)),
            ("alpha0 (deg)", format!("{:.1}", self.alpha0.to_degrees())),
            ("beta (deg)", format!("{:.1}", self.pitch_amplitude.to_degrees())),
            ("phi (deg)", format!("{:.1}", self.phase.to_degrees())),
        ]
    }
}

impl From<KinematicConfig> for KinematicParameters {
    fn from(config: KinematicConfig) -> Self {
        Self::new(config)
    }
}

impl Default for KinematicParameters {
    fn default() -> Self {
        Self::new(KinematicConfig::hovering())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hovering_defaults() {
        let p = KinematicParameters::default();
        assert_eq!(p.reynolds(), 75.0);
        assert_eq!(p.stroke_amplitude(), 2.8);
        assert_eq!(p.frequency(), 0.25);
        assert_relative_eq!(p.alpha0(), PI / 2.0);
    }

    #[test]
    fn test_derived_max_velocity() {
        let p = KinematicParameters::default();
        assert_relative_eq!(p.max_velocity(), 2.8 * PI * 0.25, epsilon = 1e-12);
        assert_relative_eq!(p.omega(), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.period(), 4.0);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: KinematicConfig = toml::from_str("frequency = 0.5\nstroke_amplitude = 2.0").unwrap();
        let p = KinematicParameters::from(config);
        assert_eq!(p.reynolds(), 75.0);
        assert_relative_eq!(p.max_velocity(), 2.0 * PI * 0.5, epsilon = 1e-12);
    }
}
