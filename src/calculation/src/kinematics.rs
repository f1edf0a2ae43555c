//! Rigid-body kinematics of the flapping wing.
//!
//! The wing translates sinusoidally along x (the stroke) while pitching
//! sinusoidally about its rotation center. Every function of time takes a
//! one-dimensional array of samples and applies the same formula elementwise;
//! a single instant is simply a length-1 array.

use ndarray::{Array1, ArrayView1, Zip};

use crate::constants::KinematicParameters;
use crate::error::{ensure_len, CalcError, Result};

/// Counter-clockwise rotation of a single point about `(xc, yc)`.
#[inline(always)]
pub fn rotate_point(x: f64, y: f64, xc: f64, yc: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    let dx = x - xc;
    let dy = y - yc;
    (xc + dx * cos - dy * sin, yc + dx * sin + dy * cos)
}

/// Rotate a set of points about a common center by a common angle (rad).
pub fn rotate(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    center: (f64, f64),
    angle: f64,
) -> Result<(Array1<f64>, Array1<f64>)> {
    ensure_len(x.len(), y.len())?;
    let (xc, yc) = center;
    let mut x_new = Array1::zeros(x.len());
    let mut y_new = Array1::zeros(x.len());
    Zip::from(&mut x_new)
        .and(&mut y_new)
        .and(&x)
        .and(&y)
        .for_each(|xn, yn, &xi, &yi| {
            let (xr, yr) = rotate_point(xi, yi, xc, yc, angle);
            *xn = xr;
            *yn = yr;
        });
    Ok((x_new, y_new))
}

/// Time samples paired with `n` points: either one per point, or a single
/// instant broadcast over all of them.
pub(crate) fn time_samples<'a>(t: &'a ArrayView1<f64>, n: usize) -> Result<ArrayView1<'a, f64>> {
    if t.len() == n {
        return Ok(t.view());
    }
    match t.len() {
        1 => t.broadcast(n).ok_or(CalcError::LengthMismatch {
            expected: n,
            found: t.len(),
        }),
        found => Err(CalcError::LengthMismatch { expected: n, found }),
    }
}

/// Kinematic model of the flapping wing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flapping {
    params: KinematicParameters,
}

impl Flapping {
    /// Model for the given parameter set.
    pub fn new(params: KinematicParameters) -> Self {
        Self { params }
    }

    /// Parameters the model was built with.
    pub fn params(&self) -> &KinematicParameters {
        &self.params
    }

    /// Orientation angle `alpha0 + beta * sin(w t + phi)` (rad).
    pub fn orientation_angle(&self, t: ArrayView1<f64>) -> Array1<f64> {
        let p = &self.params;
        let w = p.omega();
        t.mapv(|ti| p.alpha0() + p.pitch_amplitude() * (w * ti + p.phase()).sin())
    }

    /// Displacement of the rotation center, `(A0/2 cos(w t), 0)`.
    pub fn displacement(&self, t: ArrayView1<f64>) -> (Array1<f64>, Array1<f64>) {
        let p = &self.params;
        let w = p.omega();
        let half_amplitude = 0.5 * p.stroke_amplitude();
        let xd = t.mapv(|ti| half_amplitude * (w * ti).cos());
        (xd, Array1::zeros(t.len()))
    }

    /// Position at time `t` of the body points `(x0, y0)` given in the
    /// reference frame (rotation center at the origin, zero incidence).
    ///
    /// The point is first translated with the rotation center and then
    /// rotated about it by the orientation angle. `t`, `x0` and `y0` are
    /// paired elementwise; a length-1 `t` applies to every point.
    pub fn position(
        &self,
        t: ArrayView1<f64>,
        x0: ArrayView1<f64>,
        y0: ArrayView1<f64>,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        ensure_len(x0.len(), y0.len())?;
        let t = time_samples(&t, x0.len())?;
        let (xd, yd) = self.displacement(t);
        let alpha = self.orientation_angle(t);

        let mut x = Array1::zeros(t.len());
        let mut y = Array1::zeros(t.len());
        for i in 0..t.len() {
            let (xc, yc) = (xd[i], yd[i]);
            let (xr, yr) = rotate_point(x0[i] + xc, y0[i] + yc, xc, yc, alpha[i]);
            x[i] = xr;
            y[i] = yr;
        }
        Ok((x, y))
    }

    /// Translational velocity of the rotation center, `(-Umax sin(w t), 0)`.
    pub fn translational_velocity(&self, t: ArrayView1<f64>) -> (Array1<f64>, Array1<f64>) {
        let p = &self.params;
        let w = p.omega();
        let umax = p.max_velocity();
        let ux = t.mapv(|ti| -umax * (w * ti).sin());
        (ux, Array1::zeros(t.len()))
    }

    /// Angular velocity `w beta cos(w t + phi)` (rad/s).
    pub fn angular_velocity(&self, t: ArrayView1<f64>) -> Array1<f64> {
        let p = &self.params;
        let w = p.omega();
        t.mapv(|ti| w * p.pitch_amplitude() * (w * ti + p.phase()).cos())
    }

    /// Rigid-body velocity at the points `(x, y)`, rotating about `(xc, yc)`.
    ///
    /// `t` has one sample per point, or a single instant shared by all.
    pub fn velocity_at_point(
        &self,
        t: ArrayView1<f64>,
        x: ArrayView1<f64>,
        y: ArrayView1<f64>,
        xc: f64,
        yc: f64,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        ensure_len(x.len(), y.len())?;
        let t = time_samples(&t, x.len())?;
        let (u0, v0) = self.translational_velocity(t);
        let w0 = self.angular_velocity(t);

        let ux = Zip::from(&u0)
            .and(&w0)
            .and(&y)
            .map_collect(|&u, &w, &yi| u - w * (yi - yc));
        let uy = Zip::from(&v0)
            .and(&w0)
            .and(&x)
            .map_collect(|&v, &w, &xi| v + w * (xi - xc));
        Ok((ux, uy))
    }
}
