//! # Per-body position queries
//!
//! A [`BodyQuery`] answers every question the crate asks about one body:
//! positions in any frame, daily samples, longitude in the Sun-fixed frame,
//! planet-centred positions of spacecraft, orbital speed and the reference
//! orbit. Each call acquires the kernels it needs for its duration.
//!
//! Dates and hours are paired element-wise; a single date is broadcast over
//! all hours.
use nalgebra::Vector3;

use crate::body::Body;
use crate::constants::{
    Degree, EphemerisTime, Hours, Kilometer, Radian, MSM_DIPOLE_OFFSET_KM, RADEG,
    SECONDS_PER_HOUR,
};
use crate::ephemeris::{EphemerisService, KernelSet};
use crate::frames::Frame;
use crate::heliorbit::Heliorbit;
use crate::heliorbit_errors::HeliorbitError;
use crate::orbit::{build_ellipse, SpatialCurve};
use crate::time::{ephemeris_times, list_dates, CalendarDate, TimeService};

/// Default reference date of [`BodyQuery::orbit_hci`]
pub const DEFAULT_ORBIT_DATE: CalendarDate = CalendarDate::from_validated(20150101);

/// Hours of day bracketing the finite difference used for the orbital speed.
const SPEED_HOURS: (Hours, Hours) = (11.95, 12.05);

pub struct BodyQuery<'a, S: EphemerisService, T: TimeService> {
    ctx: &'a Heliorbit<S, T>,
    body: Body,
}

impl<'a, S: EphemerisService, T: TimeService> BodyQuery<'a, S, T> {
    pub(crate) fn new(ctx: &'a Heliorbit<S, T>, body: Body) -> Self {
        BodyQuery { ctx, body }
    }

    pub fn body(&self) -> Body {
        self.body
    }

    fn kernel_set(&self, frame: Frame, observer: Body) -> KernelSet {
        self.body
            .kernel_set(frame)
            .merge(&observer.kernel_set(frame))
    }

    fn check_mission_window(&self, dates: &[CalendarDate]) -> Result<(), HeliorbitError> {
        if self.body.mission_window().is_none() {
            return Ok(());
        }
        dates
            .iter()
            .try_for_each(|date| self.body.check_mission_window(*date))
    }

    /// Positions of the body relative to `observer` in `frame`.
    ///
    /// Arguments
    /// ---------
    /// * `dates`: one date per sample, or a single date for all samples
    /// * `uts`: decimal hours since the start of each date
    /// * `frame`: output frame
    /// * `observer`: origin of the vectors, usually [`Body::Sun`]
    ///
    /// Return
    /// ------
    /// * one vector in km per entry of `uts`
    ///
    /// Errors
    /// ------
    /// * [`HeliorbitError::OutsideMissionWindow`] for spacecraft dates not covered
    ///   by their kernels
    /// * any error of the ephemeris or time service
    pub fn positions(
        &self,
        dates: &[CalendarDate],
        uts: &[Hours],
        frame: Frame,
        observer: Body,
    ) -> Result<Vec<Vector3<Kilometer>>, HeliorbitError> {
        self.check_mission_window(dates)?;
        let _scope = self.ctx.session(&self.kernel_set(frame, observer))?;
        let ets = ephemeris_times(self.ctx.time(), dates, uts)?;
        self.ctx
            .ephemeris()
            .positions(self.body, &ets, frame, observer)
    }

    /// Positions at given ephemeris times. No mission window check is done.
    pub fn positions_at(
        &self,
        ets: &[EphemerisTime],
        frame: Frame,
        observer: Body,
    ) -> Result<Vec<Vector3<Kilometer>>, HeliorbitError> {
        let _scope = self.ctx.session(&self.kernel_set(frame, observer))?;
        self.ctx
            .ephemeris()
            .positions(self.body, ets, frame, observer)
    }

    /// Heliocentric position at 00:00 UTC of every date from `start` to `end`.
    pub fn daily_positions(
        &self,
        start: CalendarDate,
        end: CalendarDate,
        frame: Frame,
    ) -> Result<Vec<(CalendarDate, Vector3<Kilometer>)>, HeliorbitError> {
        let dates = list_dates(start, end)?;
        let uts = vec![0.0; dates.len()];
        let positions = self.positions(&dates, &uts, frame, Body::Sun)?;
        Ok(dates.into_iter().zip(positions).collect())
    }

    /// Longitude of the body in the IAU_SUN frame, `atan2(y, x)` in radians.
    pub fn solar_longitude(
        &self,
        dates: &[CalendarDate],
        uts: &[Hours],
    ) -> Result<Vec<Radian>, HeliorbitError> {
        Ok(self
            .positions(dates, uts, Frame::IauSun, Body::Sun)?
            .iter()
            .map(|p| p.y.atan2(p.x))
            .collect())
    }

    /// [`BodyQuery::solar_longitude`] at given ephemeris times.
    pub fn solar_longitude_at(&self, ets: &[EphemerisTime]) -> Result<Vec<Radian>, HeliorbitError> {
        Ok(self
            .positions_at(ets, Frame::IauSun, Body::Sun)?
            .iter()
            .map(|p| p.y.atan2(p.x))
            .collect())
    }

    /// Position of a spacecraft around its host planet.
    ///
    /// MSO for the Mercury missions, shifted to the magnetic dipole centre
    /// (z − 478 km, i.e. MSM); VSO for Venus Express.
    ///
    /// Return
    /// ------
    /// * the positions in km, or [`HeliorbitError::NotASpacecraft`] for a planet
    pub fn planet_centred(
        &self,
        dates: &[CalendarDate],
        uts: &[Hours],
    ) -> Result<Vec<Vector3<Kilometer>>, HeliorbitError> {
        let (frame, host) = self
            .body
            .planet_centred_frame()
            .zip(self.body.host())
            .ok_or(HeliorbitError::NotASpacecraft(self.body))?;

        let mut positions = self.positions(dates, uts, frame, host)?;
        if host == Body::Mercury {
            positions
                .iter_mut()
                .for_each(|p| p.z -= MSM_DIPOLE_OFFSET_KM);
        }
        Ok(positions)
    }

    /// Orbital speed around midday, in km/s.
    ///
    /// Finite difference of the HCI positions at 11:57 and 12:03 UTC.
    pub fn speed(&self, date: CalendarDate) -> Result<f64, HeliorbitError> {
        self.speeds(&[date])?
            .pop()
            .ok_or(HeliorbitError::LengthMismatch {
                expected: 1,
                found: 0,
            })
    }

    /// [`BodyQuery::speed`] for several dates.
    pub fn speeds(&self, dates: &[CalendarDate]) -> Result<Vec<f64>, HeliorbitError> {
        let (h0, h1) = SPEED_HOURS;
        let p0 = self.positions(dates, &vec![h0; dates.len()], Frame::Hci, Body::Sun)?;
        let p1 = self.positions(dates, &vec![h1; dates.len()], Frame::Hci, Body::Sun)?;
        let dt = (h1 - h0) * SECONDS_PER_HOUR;
        Ok(p0
            .iter()
            .zip(p1.iter())
            .map(|(a, b)| (b - a).norm() / dt)
            .collect())
    }

    /// Angle between the radial solar wind and the wind seen by the body, in degrees.
    ///
    /// `atan2(v, v_sw)` with `v` from [`BodyQuery::speed`] and `v_sw` in km/s,
    /// typically [`DEFAULT_SOLAR_WIND_SPEED`](crate::constants::DEFAULT_SOLAR_WIND_SPEED).
    pub fn aberration_angle(&self, date: CalendarDate, v_sw: f64) -> Result<Degree, HeliorbitError> {
        let v = self.speed(date)?;
        Ok(v.atan2(v_sw) / RADEG)
    }

    /// Reference orbit of the body in HAE.
    pub fn orbit_hae(&self) -> Result<SpatialCurve, HeliorbitError> {
        let elements = self
            .body
            .reference_elements()
            .ok_or(HeliorbitError::NoReferenceOrbit(self.body))?;
        Ok(build_ellipse(&elements).to_frame(&elements))
    }

    /// Reference orbit of the body in HCI, rotated at 00:00 UTC of `date`
    /// ([`DEFAULT_ORBIT_DATE`] when `None`).
    pub fn orbit_hci(&self, date: Option<CalendarDate>) -> Result<SpatialCurve, HeliorbitError> {
        let hae = self.orbit_hae()?;
        let date = date.unwrap_or(DEFAULT_ORBIT_DATE);
        let points = self
            .ctx
            .transform_points(&[date], &[0.0], hae.points(), Frame::Hae, Frame::Hci)?;
        Ok(SpatialCurve::new(points))
    }
}

impl<S: EphemerisService, T: TimeService> Heliorbit<S, T> {
    /// Rotate each point from `from` to `to` at its own epoch.
    ///
    /// Arguments
    /// ---------
    /// * `dates`: one date per point, or a single date for all points
    /// * `uts`: one hour per point, or a single hour for all points
    /// * `points`: vectors expressed in `from`
    ///
    /// Return
    /// ------
    /// * the vectors expressed in `to`
    pub fn transform_points(
        &self,
        dates: &[CalendarDate],
        uts: &[Hours],
        points: &[Vector3<f64>],
        from: Frame,
        to: Frame,
    ) -> Result<Vec<Vector3<f64>>, HeliorbitError> {
        let n = points.len();
        let uts: Vec<Hours> = match uts {
            [ut] => vec![*ut; n],
            _ if uts.len() == n => uts.to_vec(),
            _ => {
                return Err(HeliorbitError::LengthMismatch {
                    expected: n,
                    found: uts.len(),
                })
            }
        };

        let mut set = KernelSet::base();
        set.push_frame(from);
        set.push_frame(to);
        let _scope = self.session(&set)?;

        let ets = ephemeris_times(self.time(), dates, &uts)?;

        let mut cached: Option<(EphemerisTime, nalgebra::Matrix3<f64>)> = None;
        points
            .iter()
            .zip(ets)
            .map(|(p, et)| {
                let rotation = match cached {
                    Some((cached_et, m)) if cached_et == et => m,
                    _ => {
                        let m = self.ephemeris().frame_rotation(from, to, et)?;
                        cached = Some((et, m));
                        m
                    }
                };
                Ok(rotation * p)
            })
            .collect()
    }
}
