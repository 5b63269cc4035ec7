use std::fmt;

use crate::constants::{Kilometer, Radian, RADEG};
use crate::heliorbit_errors::HeliorbitError;

/// Classical orbital elements of a bound heliocentric orbit.
///
/// Units:
/// - a: km
/// - e: dimensionless, `0 ≤ e < 1`
/// - i, Ω, ω: radians
///
/// Fields are private so that a value of this type is always a valid ellipse;
/// use [`OrbitalElements::new`] or [`OrbitalElements::from_degrees`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis: Kilometer,
    eccentricity: f64,
    inclination: Radian,
    ascending_node_longitude: Radian,
    periapsis_argument: Radian,
}

impl OrbitalElements {
    /// Validate and build a set of elements.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis`: a in km, must be positive
    /// * `eccentricity`: e, must lie in `[0, 1)`
    /// * `inclination`, `ascending_node_longitude`, `periapsis_argument`: i, Ω, ω in radians
    ///
    /// Return
    /// ------
    /// * the elements, or a precondition error ([`HeliorbitError::InvalidSemiMajorAxis`],
    ///   [`HeliorbitError::InvalidEccentricity`])
    pub fn new(
        semi_major_axis: Kilometer,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
    ) -> Result<Self, HeliorbitError> {
        if !(semi_major_axis > 0.0) || !semi_major_axis.is_finite() {
            return Err(HeliorbitError::InvalidSemiMajorAxis(semi_major_axis));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(HeliorbitError::InvalidEccentricity(eccentricity));
        }

        Ok(OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_argument,
        })
    }

    /// Same as [`OrbitalElements::new`] with the three angles given in degrees.
    pub fn from_degrees(
        semi_major_axis: Kilometer,
        eccentricity: f64,
        inclination: f64,
        ascending_node_longitude: f64,
        periapsis_argument: f64,
    ) -> Result<Self, HeliorbitError> {
        Self::new(
            semi_major_axis,
            eccentricity,
            inclination * RADEG,
            ascending_node_longitude * RADEG,
            periapsis_argument * RADEG,
        )
    }

    /// Elements known at compile time to be valid.
    pub(crate) const fn from_validated(
        semi_major_axis: Kilometer,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
    ) -> Self {
        OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_argument,
        }
    }

    pub fn semi_major_axis(&self) -> Kilometer {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn inclination(&self) -> Radian {
        self.inclination
    }

    pub fn ascending_node_longitude(&self) -> Radian {
        self.ascending_node_longitude
    }

    pub fn periapsis_argument(&self) -> Radian {
        self.periapsis_argument
    }

    /// b = a·√(1 − e²)
    pub fn semi_minor_axis(&self) -> Kilometer {
        self.semi_major_axis * (1.0 - self.eccentricity.powi(2)).sqrt()
    }

    /// rp = (1 − e)·a
    pub fn periapsis_distance(&self) -> Kilometer {
        (1.0 - self.eccentricity) * self.semi_major_axis
    }

    /// ra = (1 + e)·a
    pub fn apoapsis_distance(&self) -> Kilometer {
        (1.0 + self.eccentricity) * self.semi_major_axis
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbital elements:")?;
        writeln!(f, "  a = {:.3} km", self.semi_major_axis)?;
        writeln!(f, "  e = {:.7}", self.eccentricity)?;
        writeln!(f, "  i = {:.5}°", self.inclination / RADEG)?;
        writeln!(f, "  Ω = {:.5}°", self.ascending_node_longitude / RADEG)?;
        write!(f, "  ω = {:.5}°", self.periapsis_argument / RADEG)
    }
}
