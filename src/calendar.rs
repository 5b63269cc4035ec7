//! # Rotation calendars
//!
//! * **Carrington calendar** of a body: the epochs at which the body crosses
//!   the solar prime meridian, i.e. its longitude in IAU_SUN goes through zero.
//!   The longitude is sampled hourly and every downward crossing is refined
//!   with the cubic interpolant of [`find_zero_crossings`].
//! * **Solar rotation calendar**: the epochs at which a point fixed in HCI
//!   (on the X axis, 1 AU out) crosses the solar prime meridian. The longitude
//!   is sampled daily at 00:00 and refined linearly within the day.
//!
//! Both produce [`CrossingEpoch`] values in chronological order.
use itertools::Itertools;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::body::Body;
use crate::constants::{EphemerisTime, Hours, AU_RECORD_KM, HOURS_PER_DAY, RADEG, SECONDS_PER_HOUR};
use crate::crossing::{find_zero_crossings, CrossingRule};
use crate::ephemeris::EphemerisService;
use crate::frames::Frame;
use crate::heliorbit::Heliorbit;
use crate::heliorbit_errors::HeliorbitError;
use crate::progress_bar::Progress;
use crate::records::CrossingRecord;
use crate::time::{continuous_time, list_dates, CalendarDate, TimeService};

/// A refined crossing, on both time scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingEpoch {
    pub et: EphemerisTime,
    pub date: CalendarDate,
    pub ut: Hours,
    /// Hours since 1950-01-01T00:00 UTC
    pub continuous_time: f64,
}

impl CrossingEpoch {
    /// Epoch from an ephemeris time; the UTC side is rounded to the second.
    pub fn from_et<T: TimeService + ?Sized>(time: &T, et: EphemerisTime) -> Result<Self, HeliorbitError> {
        let (date, ut) = time.et_to_utc(et)?;
        Ok(CrossingEpoch {
            et,
            date,
            ut,
            continuous_time: continuous_time(date, ut),
        })
    }

    pub fn from_utc<T: TimeService + ?Sized>(
        time: &T,
        date: CalendarDate,
        ut: Hours,
    ) -> Result<Self, HeliorbitError> {
        Ok(CrossingEpoch {
            et: time.utc_to_et(date, ut)?,
            date,
            ut,
            continuous_time: continuous_time(date, ut),
        })
    }

    pub fn record(&self) -> CrossingRecord {
        CrossingRecord {
            date: self.date,
            ut: self.ut,
            continuous_time: self.continuous_time,
        }
    }
}

/// Carrington epochs of `body` between 00:00 UTC on `start` and 24:00 UTC on `end`.
///
/// Arguments
/// ---------
/// * `ctx`: ephemeris, time service and kernels
/// * `body`: any body the ephemeris service knows
/// * `start`, `end`: first and last date sampled
///
/// Return
/// ------
/// * the crossings in chronological order (possibly none), or the first
///   upstream or precondition error met. A spacecraft date outside its mission
///   window fails before any kernel is loaded.
pub fn carrington_epochs<S: EphemerisService, T: TimeService>(
    ctx: &Heliorbit<S, T>,
    body: Body,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<CrossingEpoch>, HeliorbitError> {
    let dates = list_dates(start, end)?;
    dates
        .iter()
        .try_for_each(|date| body.check_mission_window(*date))?;
    let ndays = dates.len();
    let _scope = ctx.session(&body.kernel_set(Frame::IauSun))?;

    let et0 = ctx.time().utc_to_et(start, 0.0)?;
    let hours_per_day = HOURS_PER_DAY as usize;
    let ets: Vec<EphemerisTime> = (0..hours_per_day * ndays)
        .map(|h| et0 + h as f64 * SECONDS_PER_HOUR)
        .collect();

    let query = ctx.body(body);
    let mut progress = Progress::new("solar longitude", ndays as u64);
    let mut longitudes = Vec::with_capacity(ets.len());
    for day in ets.chunks(hours_per_day) {
        longitudes.extend(query.solar_longitude_at(day)?);
        progress.inc();
    }
    progress.finish();

    let crossings = find_zero_crossings(&ets, &longitudes)?;
    info!(%body, %start, %end, count = crossings.len(), "Carrington epochs found");

    crossings
        .into_iter()
        .map(|et| CrossingEpoch::from_et(ctx.time(), et))
        .collect()
}

/// Solar rotation epochs between `start` and `end`.
///
/// The point (1 AU, 0, 0) of HCI is moved to IAU_SUN at 00:00 of every date.
/// A rotation is counted between two consecutive days when the longitude goes
/// from `≥ 0` to `< 0` ([`CrossingRule::Inclusive`]); the hour of the crossing
/// is `ut = −lon₀ / ((lon₁ − lon₀) / 24)`.
pub fn solar_rotations<S: EphemerisService, T: TimeService>(
    ctx: &Heliorbit<S, T>,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<CrossingEpoch>, HeliorbitError> {
    let dates = list_dates(start, end)?;
    let points = vec![Vector3::new(AU_RECORD_KM, 0.0, 0.0); dates.len()];
    let iau = ctx.transform_points(&dates, &[0.0], &points, Frame::Hci, Frame::IauSun)?;

    let longitudes: Vec<f64> = iau.iter().map(|p| p.y.atan2(p.x) / RADEG).collect();
    debug!(days = dates.len(), "solar longitudes sampled");

    let rule = CrossingRule::Inclusive;
    let rotations = longitudes
        .iter()
        .tuple_windows()
        .positions(|(lon0, lon1)| rule.is_crossing(*lon0, *lon1))
        .map(|k| {
            let (lon0, lon1) = (longitudes[k], longitudes[k + 1]);
            let slope = (lon1 - lon0) / HOURS_PER_DAY;
            CrossingEpoch::from_utc(ctx.time(), dates[k], -lon0 / slope)
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(%start, %end, count = rotations.len(), "solar rotations found");
    Ok(rotations)
}

#[cfg(test)]
mod calendar_test {
    use super::*;
    use crate::config::HeliorbitConfig;
    use crate::constants::SECONDS_PER_DAY;

    fn date(d: u32) -> CalendarDate {
        CalendarDate::new(d).unwrap()
    }

    #[test]
    fn test_crossing_epoch_conversions() {
        let time = crate::time::HifitimeService;
        let epoch = CrossingEpoch::from_utc(&time, date(20150317), 6.5).unwrap();
        let back = CrossingEpoch::from_et(&time, epoch.et).unwrap();
        assert_eq!(back.date, epoch.date);
        assert!((back.ut - 6.5).abs() < 1e-9);
        assert_eq!(back.record().continuous_time, epoch.continuous_time);
    }

    #[test]
    fn test_solar_rotations_period() {
        let ctx = Heliorbit::analytic(HeliorbitConfig::new("/k", "/o"));
        let rotations = solar_rotations(&ctx, date(20150101), date(20151231)).unwrap();

        // sidereal period 360 / 14.1844 = 25.38 days
        assert!(rotations.len() == 14 || rotations.len() == 15, "{}", rotations.len());
        for (a, b) in rotations.iter().tuple_windows() {
            let days = (b.et - a.et) / SECONDS_PER_DAY;
            assert!((days - 25.38).abs() < 0.05, "{days}");
            assert!((0.0..24.0).contains(&b.ut));
        }
    }

    #[test]
    fn test_carrington_earth_short() {
        let ctx = Heliorbit::analytic(HeliorbitConfig::new("/k", "/o"));
        let epochs = carrington_epochs(&ctx, Body::Earth, date(20150101), date(20150331)).unwrap();
        assert!(epochs.len() == 3 || epochs.len() == 4, "{}", epochs.len());
        assert!(epochs.windows(2).all(|w| w[1].et > w[0].et));
        assert!(ctx.kernels().loaded_kernels().is_empty());
    }

    #[test]
    fn test_carrington_outside_mission_window() {
        let ctx = Heliorbit::analytic(HeliorbitConfig::new("/k", "/o"));
        let err = carrington_epochs(&ctx, Body::VenusExpress, date(20141230), date(20150102))
            .unwrap_err();
        assert!(matches!(
            err,
            HeliorbitError::OutsideMissionWindow { date, .. } if date == CalendarDate::new(20150101).unwrap()
        ));
        assert!(ctx.kernels().loaded_kernels().is_empty());
    }
}
