#![allow(dead_code)]

use std::f64::consts::PI;

use camino::Utf8PathBuf;
use heliorbit::config::HeliorbitConfig;
use heliorbit::ephemeris::AnalyticEphemeris;
use heliorbit::heliorbit::Heliorbit;
use heliorbit::time::CalendarDate;
use tempfile::TempDir;

pub fn date(yyyymmdd: u32) -> CalendarDate {
    CalendarDate::new(yyyymmdd).unwrap()
}

/// Analytic context writing under a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn analytic_ctx() -> (Heliorbit<AnalyticEphemeris>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let config = HeliorbitConfig::new(root.join("kernels"), root.join("output"));
    (Heliorbit::analytic(config), dir)
}

/// Sawtooth longitude in (−π, π] decreasing through zero at `offset` hours
/// past midnight of every day, the way a body's longitude does in a rotating frame.
pub fn daily_sawtooth(hour: f64, offset: f64) -> f64 {
    let phase = -2.0 * PI * (hour - offset) / 24.0;
    let wrapped = (phase + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}
