//! # Calendar dates and the UTC / ephemeris-time bridge
//!
//! Dates travel through the crate as [`CalendarDate`] values (`yyyymmdd`, always
//! valid once constructed) paired with a decimal hour of day. Lookups in the
//! ephemeris service need **ephemeris time** (TDB seconds past J2000); the
//! conversion is provided by a [`TimeService`], with [`HifitimeService`] as the
//! default implementation (leap seconds come from [hifitime](https://docs.rs/hifitime)).
//!
//! The **continuous time** written in output records counts hours since
//! 1950-01-01T00:00 UTC, ignoring leap seconds.
use std::collections::HashMap;
use std::fmt;

use hifitime::{Epoch, TimeScale, Unit};
use serde::{Deserialize, Serialize};

use crate::constants::{EphemerisTime, Hours, HOURS_PER_DAY, MJD_1950, SECONDS_PER_HOUR};
use crate::heliorbit_errors::HeliorbitError;

/// A valid Gregorian calendar date stored as `yyyymmdd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CalendarDate(u32);

impl CalendarDate {
    /// Build a date from its `yyyymmdd` integer form.
    ///
    /// Return
    /// ------
    /// * the date, or [`HeliorbitError::InvalidDate`] when the month/day do not exist
    ///   (e.g. `20230229`).
    pub fn new(yyyymmdd: u32) -> Result<Self, HeliorbitError> {
        let year = (yyyymmdd / 10_000) as i32;
        let month = ((yyyymmdd % 10_000) / 100) as u8;
        let day = (yyyymmdd % 100) as u8;

        Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
            .map(|_| CalendarDate(yyyymmdd))
            .map_err(|_| HeliorbitError::InvalidDate(yyyymmdd))
    }

    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, HeliorbitError> {
        if !(0..=9999).contains(&year) {
            return Err(HeliorbitError::InvalidDate(0));
        }
        Self::new(year as u32 * 10_000 + month as u32 * 100 + day as u32)
    }

    /// Date of a UTC epoch (the time of day is dropped).
    pub fn from_epoch(epoch: &Epoch) -> Result<Self, HeliorbitError> {
        let (year, month, day, ..) = epoch.to_gregorian_utc();
        Self::from_ymd(year, month, day)
    }

    /// Only for literals that are known to be valid dates.
    pub(crate) const fn from_validated(yyyymmdd: u32) -> Self {
        CalendarDate(yyyymmdd)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn year(&self) -> i32 {
        (self.0 / 10_000) as i32
    }

    pub fn month(&self) -> u8 {
        ((self.0 % 10_000) / 100) as u8
    }

    pub fn day(&self) -> u8 {
        (self.0 % 100) as u8
    }

    /// Midnight UTC at the start of this date.
    pub fn to_epoch(&self) -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(self.year(), self.month(), self.day())
    }

    /// Modified Julian Date (UTC) of midnight on this date.
    pub fn mjd(&self) -> f64 {
        self.to_epoch().to_mjd_utc_days().round()
    }

    pub fn next_day(&self) -> Self {
        let (year, month, day, ..) = (self.to_epoch() + Unit::Day * 1).to_gregorian_utc();
        CalendarDate(year as u32 * 10_000 + month as u32 * 100 + day as u32)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

impl TryFrom<u32> for CalendarDate {
    type Error = HeliorbitError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        CalendarDate::new(value)
    }
}

impl From<CalendarDate> for u32 {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

/// List every date between `start` and `end`, both included.
///
/// Return
/// ------
/// * the ordered dates, or [`HeliorbitError::InvalidDateRange`] if `start > end`
pub fn list_dates(
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<CalendarDate>, HeliorbitError> {
    if start > end {
        return Err(HeliorbitError::InvalidDateRange { start, end });
    }

    let mut dates = Vec::with_capacity((end.mjd() - start.mjd()) as usize + 1);
    let mut date = start;
    while date <= end {
        dates.push(date);
        date = date.next_day();
    }
    Ok(dates)
}

/// Hours elapsed since 1950-01-01T00:00 UTC.
///
/// Arguments
/// ---------
/// * `date`: calendar date
/// * `ut`: decimal hours since the start of `date`
pub fn continuous_time(date: CalendarDate, ut: Hours) -> f64 {
    (date.mjd() - MJD_1950) * HOURS_PER_DAY + ut
}

/// Split decimal hours into `(hours, minutes, seconds)`.
pub fn decimal_hours_to_hms(ut: Hours) -> (u32, u32, f64) {
    let total_seconds = ut * SECONDS_PER_HOUR;
    let hours = (total_seconds / SECONDS_PER_HOUR).floor();
    let minutes = ((total_seconds - hours * SECONDS_PER_HOUR) / 60.0).floor();
    let seconds = total_seconds - hours * SECONDS_PER_HOUR - minutes * 60.0;
    (hours as u32, minutes as u32, seconds)
}

pub fn hms_to_decimal_hours(hours: u32, minutes: u32, seconds: f64) -> Hours {
    hours as f64 + minutes as f64 / 60.0 + seconds / SECONDS_PER_HOUR
}

/// Conversion between UTC calendar time and ephemeris time.
pub trait TimeService {
    /// Ephemeris time of `hour` decimal hours after midnight UTC on `date`.
    fn utc_to_et(&self, date: CalendarDate, hour: Hours) -> Result<EphemerisTime, HeliorbitError>;

    /// UTC date and decimal hour of an ephemeris time, rounded to the nearest second.
    fn et_to_utc(&self, et: EphemerisTime) -> Result<(CalendarDate, Hours), HeliorbitError>;
}

/// [`TimeService`] backed by hifitime's built-in leap second table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HifitimeService;

impl TimeService for HifitimeService {
    fn utc_to_et(&self, date: CalendarDate, hour: Hours) -> Result<EphemerisTime, HeliorbitError> {
        Ok((date.to_epoch() + Unit::Hour * hour).to_et_seconds())
    }

    fn et_to_utc(&self, et: EphemerisTime) -> Result<(CalendarDate, Hours), HeliorbitError> {
        // round in UTC: the TDB - UTC offset is not a whole number of seconds
        let epoch = Epoch::from_et_seconds(et)
            .to_time_scale(TimeScale::UTC)
            .round(Unit::Second * 1);
        let (year, month, day, hour, minute, second, _) = epoch.to_gregorian_utc();
        let date = CalendarDate::from_ymd(year, month, day)?;
        Ok((
            date,
            hms_to_decimal_hours(hour as u32, minute as u32, second as f64),
        ))
    }
}

/// Ephemeris times for a list of `(date, ut)` pairs.
///
/// The service is asked once per distinct date (at 00:00); each sample is then
/// offset by `ut · 3600` seconds. A single date is broadcast over all `uts`.
/// The periodic TDB − TT term is thus frozen at its midnight value within a day,
/// an error of a few tens of microseconds.
///
/// Return
/// ------
/// * one ephemeris time per `ut`, or [`HeliorbitError::LengthMismatch`] if
///   `dates` is neither of length 1 nor of the same length as `uts`.
pub fn ephemeris_times<T: TimeService + ?Sized>(
    time: &T,
    dates: &[CalendarDate],
    uts: &[Hours],
) -> Result<Vec<EphemerisTime>, HeliorbitError> {
    if dates.len() != 1 && dates.len() != uts.len() {
        return Err(HeliorbitError::LengthMismatch {
            expected: uts.len(),
            found: dates.len(),
        });
    }

    let mut midnights: HashMap<CalendarDate, EphemerisTime> = HashMap::new();
    uts.iter()
        .enumerate()
        .map(|(i, ut)| {
            let date = if dates.len() == 1 { dates[0] } else { dates[i] };
            let et0 = match midnights.get(&date) {
                Some(et0) => *et0,
                None => {
                    let et0 = time.utc_to_et(date, 0.0)?;
                    midnights.insert(date, et0);
                    et0
                }
            };
            Ok(et0 + ut * SECONDS_PER_HOUR)
        })
        .collect()
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    fn date(d: u32) -> CalendarDate {
        CalendarDate::new(d).unwrap()
    }

    #[test]
    fn test_calendar_date_validation() {
        assert!(CalendarDate::new(20240229).is_ok());
        assert!(matches!(
            CalendarDate::new(20230229),
            Err(HeliorbitError::InvalidDate(20230229))
        ));
        assert!(CalendarDate::new(20231301).is_err());
        assert!(CalendarDate::new(20230100).is_err());

        let d = date(20150317);
        assert_eq!((d.year(), d.month(), d.day()), (2015, 3, 17));
        assert_eq!(d.to_string(), "20150317");
    }

    #[test]
    fn test_next_day() {
        assert_eq!(date(20150131).next_day(), date(20150201));
        assert_eq!(date(20151231).next_day(), date(20160101));
        assert_eq!(date(20160228).next_day(), date(20160229));
        assert_eq!(date(20160229).next_day(), date(20160301));
    }

    #[test]
    fn test_list_dates() {
        let dates = list_dates(date(20161230), date(20170102)).unwrap();
        assert_eq!(
            dates,
            vec![
                date(20161230),
                date(20161231),
                date(20170101),
                date(20170102)
            ]
        );

        assert_eq!(
            list_dates(date(20170102), date(20170102)).unwrap(),
            vec![date(20170102)]
        );
        assert!(matches!(
            list_dates(date(20170103), date(20170102)),
            Err(HeliorbitError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_mjd_and_continuous_time() {
        assert_eq!(date(20210101).mjd(), 59215.0);
        assert_eq!(date(19500101).mjd(), MJD_1950);
        assert_eq!(continuous_time(date(19500101), 0.0), 0.0);
        assert_eq!(continuous_time(date(19500102), 12.0), 36.0);
    }

    #[test]
    fn test_hms_conversion() {
        let (h, m, s) = decimal_hours_to_hms(13.5125);
        assert_eq!((h, m), (13, 30));
        assert_relative_eq!(s, 45.0, epsilon = 1e-9);
        assert_relative_eq!(hms_to_decimal_hours(13, 30, 45.0), 13.5125, epsilon = 1e-12);
    }

    #[test]
    fn test_utc_to_et_at_j2000() {
        // 2000-01-01 12:00 UTC is 64.184 s before J2000 (TT - UTC = 64.184 s).
        let et = HifitimeService.utc_to_et(date(20000101), 12.0).unwrap();
        assert_relative_eq!(et, 64.184, epsilon = 1e-2);
    }

    #[test]
    fn test_et_to_utc_round_trip() {
        let service = HifitimeService;
        let et = service.utc_to_et(date(20150317), 6.25).unwrap();
        let (d, ut) = service.et_to_utc(et).unwrap();
        assert_eq!(d, date(20150317));
        assert_relative_eq!(ut, 6.25, epsilon = 1e-9);
    }

    #[test]
    fn test_et_to_utc_whole_hours() {
        let service = HifitimeService;
        for ut in [0.0, 3.0, 12.0, 23.0] {
            let et = service.utc_to_et(date(20150317), ut).unwrap();
            let (d, back) = service.et_to_utc(et).unwrap();
            assert_eq!(d, date(20150317), "ut = {ut}");
            assert_eq!(back, ut);
        }

        // 0.4 s before midnight rounds up to midnight
        let et = service.utc_to_et(date(20150317), 0.0).unwrap() - 0.4;
        assert_eq!(service.et_to_utc(et).unwrap(), (date(20150317), 0.0));
    }

    #[test]
    fn test_ephemeris_times_per_unique_date() {
        let service = HifitimeService;
        let dates = [date(20150101), date(20150101), date(20150102)];
        let uts = [0.0, 1.0, 0.0];
        let ets = ephemeris_times(&service, &dates, &uts).unwrap();
        assert_relative_eq!(ets[1] - ets[0], 3600.0, epsilon = 1e-6);
        // midnights are converted separately and include the periodic TDB term
        assert_relative_eq!(ets[2] - ets[0], 86400.0, epsilon = 1e-3);

        let ets = ephemeris_times(&service, &[date(20150101)], &[0.0, 12.0]).unwrap();
        assert_eq!(ets.len(), 2);

        assert!(matches!(
            ephemeris_times(&service, &dates, &[0.0, 1.0]),
            Err(HeliorbitError::LengthMismatch { .. })
        ));
    }
}
