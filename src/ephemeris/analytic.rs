//! # Analytic mean-element ephemeris
//!
//! Heliocentric planet positions from the Keplerian elements of Standish
//! (*Keplerian Elements for Approximate Positions of the Major Planets*,
//! JPL, Table 1, valid 1800 AD – 2050 AD). Each element varies linearly with
//! time and the position follows from a two-body solution of Kepler's
//! equation in the J2000 ecliptic.
//!
//! Accuracy is of the order of an arcminute in heliocentric longitude, which
//! is plenty for Carrington calendars (the Sun turns 0.6° per hour).
//! Spacecraft have no analytic model and the planet-centred frames are not
//! defined here: both are reported as upstream errors.
use nalgebra::{Matrix3, Vector3};

use crate::body::Body;
use crate::constants::{EphemerisTime, Kilometer, AU, RADEG};
use crate::ephemeris::EphemerisService;
use crate::frames::{self, julian_centuries, Frame};
use crate::heliorbit_errors::HeliorbitError;
use crate::kepler::{principal_angle, solve_kepler_equation};
use crate::orbit::{rotate_orbital_plane, OrbitalElements};

/// J2000 value and rate per Julian century of one set of mean elements.
///
/// Order: a (AU), e, I (°), L (°), ϖ (°), Ω (°).
struct MeanElements {
    at_j2000: [f64; 6],
    rate: [f64; 6],
}

const MERCURY: MeanElements = MeanElements {
    at_j2000: [0.38709927, 0.20563593, 7.00497902, 252.25032350, 77.45779628, 48.33076593],
    rate: [0.00000037, 0.00001906, -0.00594749, 149472.67411175, 0.16047689, -0.12534081],
};

const VENUS: MeanElements = MeanElements {
    at_j2000: [0.72333566, 0.00677672, 3.39467605, 181.97909950, 131.60246718, 76.67984255],
    rate: [0.00000390, -0.00004107, -0.00078890, 58517.81538729, 0.00268329, -0.27769418],
};

const EARTH_MOON_BARYCENTER: MeanElements = MeanElements {
    at_j2000: [1.00000261, 0.01671123, -0.00001531, 100.46457166, 102.93768193, 0.0],
    rate: [0.00000562, -0.00004392, -0.01294668, 35999.37244981, 0.32327364, 0.0],
};

const MARS: MeanElements = MeanElements {
    at_j2000: [1.52371034, 0.09339410, 1.84969142, -4.55343205, -23.94362959, 49.55953891],
    rate: [0.00001847, 0.00007882, -0.00813131, 19140.30268499, 0.44441088, -0.29257343],
};

/// Mean-element ephemeris of Mercury, Venus, Earth and Mars.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        AnalyticEphemeris
    }

    fn table(body: Body) -> Option<&'static MeanElements> {
        match body {
            Body::Mercury => Some(&MERCURY),
            Body::Venus => Some(&VENUS),
            Body::Earth => Some(&EARTH_MOON_BARYCENTER),
            Body::Mars => Some(&MARS),
            _ => None,
        }
    }

    /// Osculating-like elements of `body` at `et` and its mean anomaly.
    ///
    /// Return
    /// ------
    /// * `Some((elements, M))` with the elements in the J2000 ecliptic and M in
    ///   radians, or `None` for bodies without a mean-element model
    pub fn mean_elements(
        &self,
        body: Body,
        et: EphemerisTime,
    ) -> Option<Result<(OrbitalElements, f64), HeliorbitError>> {
        let table = Self::table(body)?;
        let t = julian_centuries(et);
        let el: Vec<f64> = table
            .at_j2000
            .iter()
            .zip(table.rate.iter())
            .map(|(x0, dx)| x0 + dx * t)
            .collect();
        let (a, e, incl, mean_lon, peri_lon, node) = (el[0], el[1], el[2], el[3], el[4], el[5]);

        let mean_anomaly = principal_angle((mean_lon - peri_lon) * RADEG);
        Some(
            OrbitalElements::from_degrees(a * AU, e, incl, node, peri_lon - node)
                .map(|elements| (elements, mean_anomaly)),
        )
    }

    /// Heliocentric position of `body` in the J2000 ecliptic, in km.
    pub fn heliocentric_ecliptic(
        &self,
        body: Body,
        et: EphemerisTime,
    ) -> Result<Vector3<Kilometer>, HeliorbitError> {
        if body == Body::Sun {
            return Ok(Vector3::zeros());
        }

        let (elements, mean_anomaly) = self
            .mean_elements(body, et)
            .ok_or(HeliorbitError::EphemerisUnavailable { body, et })??;

        let e = elements.eccentricity();
        let ecc_anomaly = solve_kepler_equation(mean_anomaly, e)?;
        let x0 = elements.semi_major_axis() * (ecc_anomaly.cos() - e);
        let y0 = elements.semi_minor_axis() * ecc_anomaly.sin();

        Ok(rotate_orbital_plane(x0, y0, &elements))
    }
}

impl EphemerisService for AnalyticEphemeris {
    fn position(
        &self,
        target: Body,
        et: EphemerisTime,
        frame: Frame,
        observer: Body,
    ) -> Result<Vector3<Kilometer>, HeliorbitError> {
        let relative =
            self.heliocentric_ecliptic(target, et)? - self.heliocentric_ecliptic(observer, et)?;
        let rotation = self.frame_rotation(Frame::Hae, frame, et)?;
        Ok(rotation * relative)
    }

    fn frame_rotation(
        &self,
        from: Frame,
        to: Frame,
        et: EphemerisTime,
    ) -> Result<Matrix3<f64>, HeliorbitError> {
        match (frames::from_j2000(from, et), frames::from_j2000(to, et)) {
            (Some(from_j2000), Some(to_j2000)) => Ok(to_j2000 * from_j2000.transpose()),
            _ => Err(HeliorbitError::FrameUnavailable { from, to }),
        }
    }
}
