//! # Reference frames
//!
//! The frames in which positions are requested and the analytic rotations
//! between the heliocentric ones.
//!
//! ## Frames
//!
//! | Variant            | Name         | Definition                                                     |
//! |--------------------|--------------|----------------------------------------------------------------|
//! | [`Frame::J2000`]   | `J2000`      | Earth mean equator and equinox of J2000                        |
//! | [`Frame::Hae`]     | `ECLIPDATE`  | Heliocentric Aries ecliptic                                    |
//! | [`Frame::Hci`]     | `HCI`        | Z along the solar spin axis, X toward the solar ascending node |
//! | [`Frame::IauSun`]  | `IAU_SUN`    | Sun body-fixed (Carrington) rotating frame                     |
//! | [`Frame::MercuryMso`] | `MERCURYMSO` | Mercury-centred solar orbital                               |
//! | [`Frame::VenusVso`]   | `VENUSVSO`   | Venus-centred solar orbital                                 |
//!
//! All matrices returned here are **passive** (they change the frame, not the
//! vector): `v_to = M · v_from`.
//!
//! ## Approximations
//!
//! * The ecliptic is the J2000 mean ecliptic (no precession of the equinox).
//! * The solar pole and prime meridian follow the IAU rotational elements
//!   (α₀ = 286.13°, δ₀ = 63.87°, W = 84.176° + 14.1844°·d).
//! * The solar ascending node drifts at 1.3958333° per Julian century, with a
//!   solar equator inclined by 7.25° on the ecliptic.
use std::fmt;

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, EphemerisTime, Radian, DAYS_PER_CENTURY, RADEG, SECONDS_PER_DAY, T2000,
};

/// Inclination of the solar equator on the ecliptic
const SOLAR_EQUATOR_INCLINATION: Degree = 7.25;
/// Longitude of the solar ascending node at J2000
const SOLAR_NODE_J2000: Degree = 75.76;
/// Drift of the solar ascending node per Julian century
const SOLAR_NODE_RATE: Degree = 1.3958333;
/// Right ascension of the solar north pole (J2000)
const SOLAR_POLE_RA: Degree = 286.13;
/// Declination of the solar north pole (J2000)
const SOLAR_POLE_DEC: Degree = 63.87;
/// Solar prime meridian at J2000
const SOLAR_W0: Degree = 84.176;
/// Sidereal rotation rate of the solar prime meridian per day
const SOLAR_W_RATE: Degree = 14.1844;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    J2000,
    Hae,
    Hci,
    IauSun,
    MercuryMso,
    VenusVso,
}

impl Frame {
    /// Frame name as understood by SPICE-like toolkits.
    pub fn name(&self) -> &'static str {
        match self {
            Frame::J2000 => "J2000",
            Frame::Hae => "ECLIPDATE",
            Frame::Hci => "HCI",
            Frame::IauSun => "IAU_SUN",
            Frame::MercuryMso => "MERCURYMSO",
            Frame::VenusVso => "VENUSVSO",
        }
    }

    /// True for the frames centred on the Sun.
    pub fn is_heliocentric(&self) -> bool {
        matches!(self, Frame::Hae | Frame::Hci | Frame::IauSun)
    }

    /// True for frames defined by a dynamic or text frame kernel.
    pub fn needs_frame_kernel(&self) -> bool {
        matches!(self, Frame::Hci | Frame::MercuryMso | Frame::VenusVso)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Principal axis of a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Passive rotation of the coordinate axes by `angle` about a principal axis.
///
/// The vector is fixed and the frame turns counter-clockwise, which is the
/// transpose of the active rotation by the same angle.
///
/// Arguments
/// ---------
/// * `axis`: rotation axis
/// * `angle`: rotation angle in radians
///
/// Return
/// ------
/// * the 3×3 matrix `M` such that `v_new = M · v_old`
pub fn axis_rotation(axis: Axis, angle: Radian) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&axis, -angle).into()
}

/// Julian centuries of TDB elapsed since J2000
pub fn julian_centuries(et: EphemerisTime) -> f64 {
    et / SECONDS_PER_DAY / DAYS_PER_CENTURY
}

/// Mean obliquity of the ecliptic (IAU 1976).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT)
///
/// Return
/// ------
/// * the obliquity in radians
pub fn obleq(tjm: f64) -> Radian {
    let radsec = RADEG / 3600.0;
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * radsec;
    let ob1 = -46.815 * radsec;
    let ob2 = -0.0006 * radsec;
    let ob3 = 0.00181 * radsec;

    let t = (tjm - T2000) / DAYS_PER_CENTURY;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Rotation from the J2000 ecliptic to the J2000 equator.
pub fn ecliptic_to_equatorial() -> Matrix3<f64> {
    axis_rotation(Axis::X, -obleq(T2000))
}

/// Longitude of the ascending node of the solar equator on the ecliptic, in radians.
pub fn solar_node_longitude(et: EphemerisTime) -> Radian {
    (SOLAR_NODE_J2000 + SOLAR_NODE_RATE * julian_centuries(et)) * RADEG
}

/// Rotation HAE → HCI: bring X onto the solar ascending node, then tilt by the
/// inclination of the solar equator.
pub fn hae_to_hci(et: EphemerisTime) -> Matrix3<f64> {
    axis_rotation(Axis::X, SOLAR_EQUATOR_INCLINATION * RADEG)
        * axis_rotation(Axis::Z, solar_node_longitude(et))
}

/// Solar prime meridian angle W, in radians.
pub fn solar_prime_meridian(et: EphemerisTime) -> Radian {
    (SOLAR_W0 + SOLAR_W_RATE * et / SECONDS_PER_DAY) * RADEG
}

/// Rotation J2000 → IAU_SUN, `R3(W) · R1(90° − δ₀) · R3(90° + α₀)`.
pub fn j2000_to_iau_sun(et: EphemerisTime) -> Matrix3<f64> {
    axis_rotation(Axis::Z, solar_prime_meridian(et))
        * axis_rotation(Axis::X, (90.0 - SOLAR_POLE_DEC) * RADEG)
        * axis_rotation(Axis::Z, (90.0 + SOLAR_POLE_RA) * RADEG)
}

/// Rotation from J2000 to a heliocentric frame, or `None` for the planet-centred frames.
pub fn from_j2000(frame: Frame, et: EphemerisTime) -> Option<Matrix3<f64>> {
    let to_ecliptic = ecliptic_to_equatorial().transpose();
    match frame {
        Frame::J2000 => Some(Matrix3::identity()),
        Frame::Hae => Some(to_ecliptic),
        Frame::Hci => Some(hae_to_hci(et) * to_ecliptic),
        Frame::IauSun => Some(j2000_to_iau_sun(et)),
        Frame::MercuryMso | Frame::VenusVso => None,
    }
}

/// Rotation HCI → IAU_SUN.
pub fn hci_to_iau_sun(et: EphemerisTime) -> Matrix3<f64> {
    let hci_from_j2000 = hae_to_hci(et) * ecliptic_to_equatorial().transpose();
    j2000_to_iau_sun(et) * hci_from_j2000.transpose()
}

/// Latitude and longitude of a direction, in degrees.
///
/// The longitude lies in `(−180°, 180°]`; the null vector maps to `(0, 0)`.
pub fn latitude_longitude(v: &Vector3<f64>) -> (Degree, Degree) {
    let r = v.norm();
    if r == 0.0 {
        return (0.0, 0.0);
    }
    let lat = (v.z / r).clamp(-1.0, 1.0).asin() / RADEG;
    let lon = v.y.atan2(v.x) / RADEG;
    (lat, lon)
}

#[cfg(test)]
mod frames_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_rotation_is_passive() {
        // turning the axes by +90° about Z moves the old +Y onto the new +X
        let m = axis_rotation(Axis::Z, 90.0 * RADEG);
        let v = m * Vector3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(v, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn test_obliquity_at_j2000() {
        assert_relative_eq!(obleq(T2000) / RADEG, 23.439291, epsilon = 1e-6);
    }

    #[test]
    fn test_equatorial_pole_in_ecliptic() {
        let eps = obleq(T2000);
        let pole = ecliptic_to_equatorial().transpose() * Vector3::z();
        assert_relative_eq!(pole, Vector3::new(0.0, eps.sin(), eps.cos()), epsilon = 1e-15);
    }

    #[test]
    fn test_hci_axes() {
        let m = hae_to_hci(0.0);
        // the solar ascending node lies on the HCI X axis
        let node = SOLAR_NODE_J2000 * RADEG;
        let x = m * Vector3::new(node.cos(), node.sin(), 0.0);
        assert_relative_eq!(x, Vector3::x(), epsilon = 1e-12);

        // the ecliptic pole is tilted by 7.25° from the solar spin axis
        let ecl_pole = m * Vector3::z();
        assert_relative_eq!(ecl_pole.z, (7.25 * RADEG).cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_solar_pole_consistency() {
        // both routes place the solar spin axis on the IAU_SUN Z axis
        let hci_pole_in_j2000 = from_j2000(Frame::Hci, 0.0).unwrap().transpose() * Vector3::z();
        let iau_pole_in_j2000 = j2000_to_iau_sun(0.0).transpose() * Vector3::z();
        let angle = hci_pole_in_j2000.angle(&iau_pole_in_j2000);
        assert!(angle < 0.2 * RADEG, "pole mismatch {} deg", angle / RADEG);

        let (lat, lon) = latitude_longitude(&(hci_to_iau_sun(0.0) * Vector3::z()));
        assert!(lat > 89.8, "lat = {lat}, lon = {lon}");
    }

    #[test]
    fn test_iau_sun_rotates_westward_in_longitude() {
        let p = Vector3::new(1.0, 0.0, 0.0);
        let (_, lon0) = latitude_longitude(&(hci_to_iau_sun(0.0) * p));
        let (_, lon1) = latitude_longitude(&(hci_to_iau_sun(3600.0) * p));
        let mut dlon = lon1 - lon0;
        if dlon > 180.0 {
            dlon -= 360.0;
        }
        assert_relative_eq!(dlon, -14.1844 / 24.0, epsilon = 1e-3);
    }

    #[test]
    fn test_latitude_longitude() {
        let (lat, lon) = latitude_longitude(&Vector3::new(0.0, 1.0, 1.0));
        assert_relative_eq!(lat, 45.0, epsilon = 1e-12);
        assert_relative_eq!(lon, 90.0, epsilon = 1e-12);
        assert_eq!(latitude_longitude(&Vector3::zeros()), (0.0, 0.0));
    }

    #[test]
    fn test_names() {
        assert_eq!(Frame::Hae.to_string(), "ECLIPDATE");
        assert_eq!(Frame::IauSun.to_string(), "IAU_SUN");
        assert!(Frame::Hci.needs_frame_kernel());
        assert!(!Frame::J2000.is_heliocentric());
    }
}
