//! Body geometry: the ellipse cross-section and boundary regularization.

use ndarray::{Array1, ArrayView1};

use crate::error::{ensure_len, CalcError, Result};

/// Points on the body surface in its reference frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPoints {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl BodyPoints {
    /// Points from equally long coordinate arrays.
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Result<Self> {
        ensure_len(x.len(), y.len())?;
        Ok(Self { x, y })
    }

    /// Chordwise coordinates.
    pub fn x(&self) -> ArrayView1<f64> {
        self.x.view()
    }

    /// Normal coordinates.
    pub fn y(&self) -> ArrayView1<f64> {
        self.y.view()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Length of the closed polygon through the points.
    pub fn perimeter(&self) -> f64 {
        segment_lengths(self.x.view(), self.y.view()).sum()
    }
}

/// Closed ellipse with semi-axes `a` (along x) and `b`, centered at `center`.
///
/// The upper side runs from the leading edge `(xc + a, yc)` to the trailing
/// edge `(xc - a, yc)` with `num` points, both edges included; the lower side
/// comes back without repeating them, for `2 * (num - 1)` points in total.
pub fn ellipse(a: f64, b: f64, center: (f64, f64), num: usize) -> Result<BodyPoints> {
    if num < 2 {
        return Err(CalcError::TooFewPoints {
            what: "ellipse side",
            required: 2,
            found: num,
        });
    }
    let (xc, yc) = center;
    let half_height = |x: f64| {
        let dx = (x - xc) / a;
        b * (1.0 - dx * dx).max(0.0).sqrt()
    };

    let upper = Array1::linspace(xc + a, xc - a, num);
    let lower = Array1::linspace(xc - a, xc + a, num);
    let lower = lower.slice(ndarray::s![1..num - 1]);

    let x: Array1<f64> = upper.iter().chain(lower.iter()).copied().collect();
    let y: Array1<f64> = upper
        .iter()
        .map(|&xi| yc + half_height(xi))
        .chain(lower.iter().map(|&xi| yc - half_height(xi)))
        .collect();
    BodyPoints::new(x, y)
}

/// Resample a closed curve so consecutive points are `ds` apart in arc length.
///
/// The number of points is `round(perimeter / ds)` (at least 3); the first
/// output point coincides with the first input point and the rest follow the
/// input orientation, linearly interpolated along each segment. `ds` must be
/// finite and positive.
pub fn regularize(x: ArrayView1<f64>, y: ArrayView1<f64>, ds: f64) -> Result<BodyPoints> {
    ensure_len(x.len(), y.len())?;
    if !(ds.is_finite() && ds > 0.0) {
        return Err(CalcError::InvalidParameter {
            name: "spacing",
            value: ds,
        });
    }
    if x.len() < 2 {
        return Err(CalcError::TooFewPoints {
            what: "boundary",
            required: 2,
            found: x.len(),
        });
    }
    let lengths = segment_lengths(x, y);
    let perimeter: f64 = lengths.sum();
    let n = ((perimeter / ds).round() as usize).max(3);
    let step = perimeter / n as f64;

    let mut xs = Array1::zeros(n);
    let mut ys = Array1::zeros(n);
    let mut segment = 0;
    let mut start = 0.0;
    for k in 0..n {
        let s = k as f64 * step;
        while segment + 1 < lengths.len() && start + lengths[segment] < s {
            start += lengths[segment];
            segment += 1;
        }
        let next = (segment + 1) % x.len();
        let frac = if lengths[segment] > 0.0 {
            ((s - start) / lengths[segment]).clamp(0.0, 1.0)
        } else {
            0.0
        };
        xs[k] = x[segment] + frac * (x[next] - x[segment]);
        ys[k] = y[segment] + frac * (y[next] - y[segment]);
    }
    BodyPoints::new(xs, ys)
}

/// Lengths of the segments of the closed polygon, the closing one last.
fn segment_lengths(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
    let n = x.len();
    Array1::from_iter((0..n).map(|i| {
        let j = (i + 1) % n;
        (x[j] - x[i]).hypot(y[j] - y[i])
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    #[test]
    fn test_ellipse_point_count_and_edges() {
        let body = ellipse(0.5, 0.05, (0.0, 0.0), 100).unwrap();
        assert_eq!(body.len(), 2 * (100 - 1));
        assert_relative_eq!(body.x()[0], 0.5);
        assert_abs_diff_eq!(body.y()[0], 0.0);
        assert_relative_eq!(body.x()[99], -0.5, epsilon = 1e-12);
        assert!(body.y().iter().all(|&v| v.abs() <= 0.05 + 1e-12));
    }

    #[test]
    fn test_ellipse_lies_on_curve() {
        let (a, b) = (0.5, 0.05);
        let body = ellipse(a, b, (1.0, -2.0), 30).unwrap();
        for (&x, &y) in body.x().iter().zip(body.y().iter()) {
            let r = ((x - 1.0) / a).powi(2) + ((y + 2.0) / b).powi(2);
            assert_relative_eq!(r, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_regularize_square() {
        let x = array![0.0, 1.0, 1.0, 0.0];
        let y = array![0.0, 0.0, 1.0, 1.0];
        let body = regularize(x.view(), y.view(), 0.25).unwrap();
        assert_eq!(body.len(), 16);
        assert_abs_diff_eq!(body.x()[0], 0.0);
        assert_abs_diff_eq!(body.x()[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(body.x()[4], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(body.y()[6], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_regularize_uniform_spacing() {
        let e = ellipse(0.5, 0.05, (0.0, 0.0), 100).unwrap();
        let body = regularize(e.x(), e.y(), 0.025).unwrap();
        let lengths = segment_lengths(body.x(), body.y());
        let mean = lengths.sum() / lengths.len() as f64;
        assert_relative_eq!(mean, 0.025, max_relative = 0.05);
        assert!(lengths.iter().all(|&l| l < 0.03));
    }

    #[test]
    fn test_ellipse_needs_two_points_per_side() {
        let err = ellipse(0.5, 0.05, (0.0, 0.0), 1).unwrap_err();
        assert!(matches!(
            err,
            CalcError::TooFewPoints {
                required: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_regularize_rejects_bad_spacing() {
        let e = ellipse(0.5, 0.05, (0.0, 0.0), 100).unwrap();
        for ds in [0.0, -0.025, f64::NAN, f64::INFINITY] {
            let err = regularize(e.x(), e.y(), ds).unwrap_err();
            assert!(matches!(err, CalcError::InvalidParameter { name: "spacing", .. }));
        }
    }

    #[test]
    fn test_regularize_mismatched_lengths() {
        let x = array![0.0, 1.0, 1.0];
        let y = array![0.0, 0.0];
        assert!(regularize(x.view(), y.view(), 0.1).is_err());
    }
}
