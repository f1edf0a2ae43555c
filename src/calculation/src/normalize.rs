//! Non-dimensionalization of solver force histories.
//!
//! Time is scaled by the flapping period and forces by the peak quasi-steady
//! force on the wing over the whole record, so that histories from different
//! sources can be overlaid.

use log::{debug, warn};
use ndarray::{Array1, ArrayView1, Zip};

use crate::aerodynamics::max_magnitude;
use crate::error::{ensure_len, CalcError, Result};
use crate::kinematics::Flapping;

/// Dimensional force history `(t, fx, fy)` as written by the flow solver.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceSeries {
    t: Array1<f64>,
    fx: Array1<f64>,
    fy: Array1<f64>,
}

impl ForceSeries {
    /// Force history from equally long time and component arrays.
    pub fn new(t: Array1<f64>, fx: Array1<f64>, fy: Array1<f64>) -> Result<Self> {
        ensure_len(t.len(), fx.len())?;
        ensure_len(t.len(), fy.len())?;
        Ok(Self { t, fx, fy })
    }

    /// Sample times.
    pub fn t(&self) -> ArrayView1<f64> {
        self.t.view()
    }

    /// Force along the stroke.
    pub fn fx(&self) -> ArrayView1<f64> {
        self.fx.view()
    }

    /// Force normal to the stroke.
    pub fn fy(&self) -> ArrayView1<f64> {
        self.fy.view()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// A `(time, value)` pair of equally long sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    t: Array1<f64>,
    values: Array1<f64>,
}

impl TimeSeries {
    /// Series from equally long time and value arrays.
    pub fn new(t: Array1<f64>, values: Array1<f64>) -> Result<Self> {
        ensure_len(t.len(), values.len())?;
        Ok(Self { t, values })
    }

    /// Sample times.
    pub fn t(&self) -> ArrayView1<f64> {
        self.t.view()
    }

    /// Sampled values.
    pub fn values(&self) -> ArrayView1<f64> {
        self.values.view()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Minimum and maximum over the finite values, `None` if there are none.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Largest finite magnitude, `-inf` if no value is finite.
    pub fn peak_magnitude(&self) -> f64 {
        max_magnitude(self.values.view())
    }
}

/// Drag-like and lift-like coefficient histories against `t / T`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedForceSeries {
    /// Drag coefficient, positive when opposing the stroke.
    pub drag: TimeSeries,
    /// Lift coefficient.
    pub lift: TimeSeries,
}

impl Flapping {
    /// Convert a dimensional force history into coefficient histories.
    ///
    /// `fx` is made positive when opposing the stroke by multiplying with
    /// `-U0 / |U0|`; samples taken exactly at stroke reversal (`U0 == 0`)
    /// become `NaN`. Both components are then divided by the global maximum
    /// of the per-instant peak quasi-steady forces along `body_x`.
    pub fn normalize(
        &self,
        forces: &ForceSeries,
        body_x: ArrayView1<f64>,
    ) -> Result<NormalizedForceSeries> {
        if forces.is_empty() {
            return Err(CalcError::Empty("force series"));
        }
        let t = forces.t();
        let t_nodim = t.mapv(|ti| self.params().frequency() * ti);

        let (u0, _) = self.translational_velocity(t);
        let fx = Zip::from(&forces.fx())
            .and(&u0)
            .map_collect(|&f, &u| f * (-u / u.abs()));
        let reversals = fx.iter().filter(|v| v.is_nan()).count();
        if reversals > 0 {
            warn!("{reversals} force sample(s) at stroke reversal normalized to NaN");
        }

        let (drag_peaks, lift_peaks) =
            self.peak_quasi_steady_forces(t, body_x, self.params().density())?;
        let drag_ref = max_magnitude(drag_peaks.view());
        let lift_ref = max_magnitude(lift_peaks.view());
        debug!("reference quasi-steady forces: drag {drag_ref:.6}, lift {lift_ref:.6}");

        let cd = fx / drag_ref;
        let cl = forces.fy().mapv(|f| f / lift_ref);
        Ok(NormalizedForceSeries {
            drag: TimeSeries::new(t_nodim.clone(), cd)?,
            lift: TimeSeries::new(t_nodim, cl)?,
        })
    }
}
