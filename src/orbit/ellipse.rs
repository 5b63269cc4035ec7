//! # Keplerian orbit ellipse
//!
//! The ellipse is first sampled in its own plane, with the focus (the Sun) at
//! the origin and periapsis on the +x axis. It is then placed in the ecliptic
//! frame by three successive 2-D rotations:
//!
//! 1. by ω in the (x, y) plane (argument of periapsis),
//! 2. by i in the (y, z) plane (inclination),
//! 3. by Ω in the (x, y) plane (longitude of the ascending node).
//!
//! The result is expressed in the heliocentric ecliptic of epoch (HAE). Moving
//! it to HCI is a matter for the ephemeris service, see
//! [`BodyQuery::orbit_hci`](crate::query::BodyQuery::orbit_hci).
use nalgebra::{Matrix3, Vector2, Vector3};

use crate::constants::{Kilometer, Radian, ELLIPSE_SAMPLES, RADEG};
use crate::orbit::elements::OrbitalElements;

/// Rotate the point `(u, v)` counter-clockwise by `theta`.
///
/// `(u', v') = (u·cos θ − v·sin θ, u·sin θ + v·cos θ)`
#[inline]
pub fn rot_trans(u: f64, v: f64, theta: Radian) -> (f64, f64) {
    let (sin_t, cos_t) = theta.sin_cos();
    (u * cos_t - v * sin_t, u * sin_t + v * cos_t)
}

/// Apply the ω, i, Ω rotation sequence to a point of the orbital plane.
///
/// Arguments
/// ---------
/// * `x0`, `y0`: coordinates in the orbital plane, focus at the origin and
///   periapsis along +x
/// * `elements`: the orbit providing ω, i and Ω
///
/// Return
/// ------
/// * the point in the reference frame of the elements
pub fn rotate_orbital_plane(x0: f64, y0: f64, elements: &OrbitalElements) -> Vector3<Kilometer> {
    let (x1, y1) = rot_trans(x0, y0, elements.periapsis_argument());
    let (y2, z2) = rot_trans(y1, 0.0, elements.inclination());
    let (x3, y3) = rot_trans(x1, y2, elements.ascending_node_longitude());
    Vector3::new(x3, y3, z2)
}

/// Closed ellipse sampled at 1° steps of the eccentric anomaly, in its own plane.
///
/// Always holds [`ELLIPSE_SAMPLES`] points, the first and the last being identical.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarEllipse(Vec<Vector2<Kilometer>>);

impl PlanarEllipse {
    pub fn points(&self) -> &[Vector2<Kilometer>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Place the ellipse in the frame of `elements` (HAE for the reference orbits).
    pub fn to_frame(&self, elements: &OrbitalElements) -> SpatialCurve {
        SpatialCurve(
            self.0
                .iter()
                .map(|p| rotate_orbital_plane(p.x, p.y, elements))
                .collect(),
        )
    }
}

/// Ordered 3-D points of a curve, in km.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpatialCurve(Vec<Vector3<Kilometer>>);

impl SpatialCurve {
    pub fn new(points: Vec<Vector3<Kilometer>>) -> Self {
        SpatialCurve(points)
    }

    pub fn points(&self) -> &[Vector3<Kilometer>] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Vector3<Kilometer>> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Undo [`PlanarEllipse::to_frame`]: apply −Ω, −i and −ω in reverse order and
    /// drop the (then null) z component.
    pub fn to_planar(&self, elements: &OrbitalElements) -> PlanarEllipse {
        PlanarEllipse(
            self.0
                .iter()
                .map(|p| {
                    let (x2, y2) = rot_trans(p.x, p.y, -elements.ascending_node_longitude());
                    let (y1, _z1) = rot_trans(y2, p.z, -elements.inclination());
                    let (x0, y0) = rot_trans(x2, y1, -elements.periapsis_argument());
                    Vector2::new(x0, y0)
                })
                .collect(),
        )
    }

    /// Multiply every point by the same rotation matrix.
    pub fn transform(&self, rotation: &Matrix3<f64>) -> SpatialCurve {
        SpatialCurve(self.0.iter().map(|p| rotation * p).collect())
    }
}

impl From<SpatialCurve> for Vec<Vector3<Kilometer>> {
    fn from(curve: SpatialCurve) -> Self {
        curve.0
    }
}

/// Sample the ellipse of `elements` in its own plane.
///
/// With `b = a·√(1 − e²)` and `rp = (1 − e)·a`, point k (k = 0..=360) is
///
/// ```text
/// t  = k·π/180
/// x0 = a·cos t − (a − rp)
/// y0 = b·sin t
/// ```
///
/// so that the Sun sits at the origin and point 0 is the periapsis.
pub fn build_ellipse(elements: &OrbitalElements) -> PlanarEllipse {
    let a = elements.semi_major_axis();
    let b = elements.semi_minor_axis();
    let focus_shift = a - elements.periapsis_distance();

    PlanarEllipse(
        (0..ELLIPSE_SAMPLES)
            .map(|k| {
                let t = k as f64 * RADEG;
                Vector2::new(a * t.cos() - focus_shift, b * t.sin())
            })
            .collect(),
    )
}
