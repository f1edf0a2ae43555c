//! Quasi-steady aerodynamic model of the flapping wing.
//!
//! Instantaneous forces are estimated from the current kinematic state as if
//! the flow were steady: an empirical drag/lift correlation in the angle of
//! attack, scaled by the local dynamic pressure `0.5 * rho * |u|^2`.
//!
//! # Angle of attack
//!
//! The correlation is only symmetric under stroke reversal once the angle is
//! measured against the direction of travel, so the orientation angle is
//! flipped to `pi - alpha` whenever the stroke velocity is non-positive.

use std::f64::consts::PI;

use log::debug;
use ndarray::{s, Array1, ArrayView1, Zip};

use crate::error::{ensure_len, CalcError, Result};
use crate::kinematics::{rotate, time_samples, Flapping};

/// Drag and lift coefficients as a function of the angle of attack.
pub trait AerodynamicModel {
    /// Returns `(CD, CL)` at angle of attack `alpha` (rad).
    fn coefficients(&self, alpha: f64) -> (f64, f64);
}

/// Translational quasi-steady correlation for a thin flapping plate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuasiSteady;

impl QuasiSteady {
    const CD_MEAN: f64 = 1.4;
    const CD_AMPLITUDE: f64 = 1.0;
    const CL_AMPLITUDE: f64 = 1.2;
}

impl AerodynamicModel for QuasiSteady {
    #[inline(always)]
    fn coefficients(&self, alpha: f64) -> (f64, f64) {
        let two_alpha = 2.0 * alpha;
        (
            Self::CD_MEAN - Self::CD_AMPLITUDE * two_alpha.cos(),
            Self::CL_AMPLITUDE * two_alpha.sin(),
        )
    }
}

impl Flapping {
    /// Angle of attack seen by the wing, measured against the stroke direction.
    pub fn angle_of_attack(&self, t: ArrayView1<f64>) -> Array1<f64> {
        let mut alpha = self.orientation_angle(t);
        let (u0, _) = self.translational_velocity(t);
        Zip::from(&mut alpha).and(&u0).for_each(|a, &u| {
            if u <= 0.0 {
                *a = PI - *a;
            }
        });
        alpha
    }

    /// Quasi-steady drag and lift coefficients `(CD, CL)` at each instant.
    pub fn quasi_steady_coefficients(&self, t: ArrayView1<f64>) -> (Array1<f64>, Array1<f64>) {
        let alpha = self.angle_of_attack(t);
        let mut cd = Array1::zeros(alpha.len());
        let mut cl = Array1::zeros(alpha.len());
        Zip::from(&mut cd)
            .and(&mut cl)
            .and(&alpha)
            .for_each(|d, l, &a| {
                let (cdi, cli) = QuasiSteady.coefficients(a);
                *d = cdi;
                *l = cli;
            });
        (cd, cl)
    }

    /// Quasi-steady drag and lift at the points `(x, y)` of the body, paired
    /// elementwise with the time samples `t`. A length-1 `t` evaluates every
    /// point at that instant.
    pub fn quasi_steady_forces(
        &self,
        t: ArrayView1<f64>,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
        xc: f64,
        yc: f64,
        rho: f64,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        ensure_len(x.len(), y.len())?;
        let t = time_samples(&t, x.len())?;
        let (ux, uy) = self.velocity_at_point(t, x, y, xc, yc)?;
        let (cd, cl) = self.quasi_steady_coefficients(t);
        let q = Zip::from(&ux)
            .and(&uy)
            .map_collect(|&u, &v| 0.5 * rho * (u * u + v * v));
        Ok((&q * &cd, &q * &cl))
    }

    /// Peak quasi-steady force magnitudes along the body at each instant.
    ///
    /// `body_x` is the chordwise profile of the body in its reference frame
    /// (`y = 0`). At every time sample the profile is rotated about the origin
    /// to the current orientation and the largest drag and lift magnitudes
    /// over its points are kept.
    pub fn peak_quasi_steady_forces(
        &self,
        t: ArrayView1<f64>,
        body_x: ArrayView1<f64>,
        rho: f64,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        if body_x.is_empty() {
            return Err(CalcError::Empty("body profile"));
        }
        let body_y = Array1::zeros(body_x.len());
        let alpha = self.orientation_angle(t);

        let mut drag = Array1::zeros(t.len());
        let mut lift = Array1::zeros(t.len());
        for i in 0..t.len() {
            let (x, y) = rotate(body_x, body_y.view(), (0.0, 0.0), alpha[i])?;
            let instant = t.slice(s![i..i + 1]);
            let (d, l) = self.quasi_steady_forces(instant, x.view(), y.view(), 0.0, 0.0, rho)?;
            drag[i] = max_magnitude(d.view());
            lift[i] = max_magnitude(l.view());
        }
        debug!(
            "peak quasi-steady forces over {} instants x {} body points",
            t.len(),
            body_x.len()
        );
        Ok((drag, lift))
    }
}

/// Largest absolute value over the finite entries, `-inf` if there are none.
pub(crate) fn max_magnitude(values: ArrayView1<f64>) -> f64 {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v.abs()))
}
