use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::constants::{Radian, DPI};
use crate::heliorbit_errors::HeliorbitError;

/// Return the principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Wrap an angle in radians into (−π, π].
pub fn signed_angle(a: Radian) -> Radian {
    let w = principal_angle(a);
    if w > std::f64::consts::PI {
        w - DPI
    } else {
        w
    }
}

/// Solve Kepler's equation `E − e·sin E = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: M in radians (any value, it is reduced to [0, 2π))
/// * `eccentricity`: e in [0, 1)
///
/// Return
/// ------
/// * E in [0, 2π), or a [`HeliorbitError::RootFindingError`] if Newton-Raphson did not converge
pub fn solve_kepler_equation(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, HeliorbitError> {
    let m = principal_angle(mean_anomaly);

    let f = |e_anom: f64| -> f64 { e_anom - eccentricity * e_anom.sin() - m };
    let df = |e_anom: f64| -> f64 { 1.0 - eccentricity * e_anom.cos() };

    // starting at π converges for every e < 1
    let x0 = if eccentricity > 0.8 { std::f64::consts::PI } else { m };

    let mut tol = SimpleConvergency {
        eps: f64::EPSILON * 1e2,
        max_iter: 25,
    };

    Ok(principal_angle(find_root_newton_raphson(x0, &f, &df, &mut tol)?))
}

/// True anomaly ν from the eccentric anomaly E.
pub fn true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    let y = (1.0 - eccentricity.powi(2)).sqrt() * sin_e;
    let x = cos_e - eccentricity;
    principal_angle(y.atan2(x))
}
