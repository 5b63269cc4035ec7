//! # Batch exports
//!
//! Compute calendars, positions and speeds over date ranges and store them
//! under the output directory of the [`HeliorbitConfig`], following the
//! layout described in [`config`](crate::config). Every `save_*`/`export_*`
//! function has a `read_*` counterpart.
use camino::Utf8PathBuf;
use tracing::{debug, info};

use crate::body::Body;
use crate::calendar::{carrington_epochs, solar_rotations, CrossingEpoch};
use crate::config::HeliorbitConfig;
use crate::ephemeris::EphemerisService;
use crate::frames::Frame;
use crate::heliorbit::Heliorbit;
use crate::heliorbit_errors::HeliorbitError;
use crate::progress_bar::Progress;
use crate::records::{
    read_crossing_file, read_position_file, read_speed_file, thin_to_daily, write_crossing_file,
    write_position_file, write_speed_file, CrossingRecord, PositionRecord, SpeedRecord,
};
use crate::time::{list_dates, CalendarDate, TimeService};

/// Hourly samples written for each date
const POSITION_HOURS: [f64; 24] = [
    0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
    17.0, 18.0, 19.0, 20.0, 21.0, 22.0, 23.0,
];

/// Compute the Carrington calendar of `body` and write it to `<Body>/0long.dat`.
///
/// Return
/// ------
/// * the epochs written
pub fn save_carrington_epochs<S: EphemerisService, T: TimeService>(
    ctx: &Heliorbit<S, T>,
    body: Body,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<CrossingEpoch>, HeliorbitError> {
    let epochs = carrington_epochs(ctx, body, start, end)?;
    let path = ctx.config().carrington_file(body);
    let records: Vec<CrossingRecord> = epochs.iter().map(CrossingEpoch::record).collect();
    write_crossing_file(&path, &records)?;
    info!(%body, %path, count = records.len(), "Carrington calendar saved");
    Ok(epochs)
}

pub fn read_carrington_epochs(
    config: &HeliorbitConfig,
    body: Body,
) -> Result<Vec<CrossingRecord>, HeliorbitError> {
    read_crossing_file(&config.carrington_file(body))
}

/// Compute the solar rotation calendar and write it to `Sun/SunRotations.dat`.
pub fn save_solar_rotations<S: EphemerisService, T: TimeService>(
    ctx: &Heliorbit<S, T>,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<CrossingEpoch>, HeliorbitError> {
    let rotations = solar_rotations(ctx, start, end)?;
    let path = ctx.config().solar_rotation_file();
    let records: Vec<CrossingRecord> = rotations.iter().map(CrossingEpoch::record).collect();
    write_crossing_file(&path, &records)?;
    info!(%path, count = records.len(), "solar rotations saved");
    Ok(rotations)
}

pub fn read_solar_rotations(config: &HeliorbitConfig) -> Result<Vec<CrossingRecord>, HeliorbitError> {
    read_crossing_file(&config.solar_rotation_file())
}

/// Hourly position records of `body` for one date.
pub fn daily_records<S: EphemerisService, T: TimeService>(
    ctx: &Heliorbit<S, T>,
    body: Body,
    date: CalendarDate,
) -> Result<Vec<PositionRecord>, HeliorbitError> {
    let query = ctx.body(body);
    let hci = query.positions(&[date], &POSITION_HOURS, Frame::Hci, Body::Sun)?;
    let iau = query.positions(&[date], &POSITION_HOURS, Frame::IauSun, Body::Sun)?;

    Ok(POSITION_HOURS
        .iter()
        .zip(hci.iter().zip(iau.iter()))
        .map(|(ut, (h, i))| PositionRecord::from_positions(date, *ut, h, i))
        .collect())
}

/// Write one file of 24 hourly records per date, `<Body>Pos/yyyymmdd.bin`.
///
/// Return
/// ------
/// * the number of files written
pub fn export_daily_positions<S: EphemerisService, T: TimeService>(
    ctx: &Heliorbit<S, T>,
    body: Body,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<usize, HeliorbitError> {
    let dates = list_dates(start, end)?;
    let kernels = body.kernel_set(Frame::Hci).merge(&body.kernel_set(Frame::IauSun));
    let _scope = ctx.session(&kernels)?;

    let mut progress = Progress::new("daily positions", dates.len() as u64);
    for date in &dates {
        let records = daily_records(ctx, body, *date)?;
        write_position_file(&ctx.config().daily_position_file(body, *date), &records)?;
        progress.inc();
    }
    progress.finish();

    info!(%body, %start, %end, files = dates.len(), "daily positions exported");
    Ok(dates.len())
}

/// Read the daily position files of `body` from `start` to `end`.
///
/// Dates without a file are skipped.
pub fn read_positions(
    config: &HeliorbitConfig,
    body: Body,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<PositionRecord>, HeliorbitError> {
    let mut records = Vec::new();
    for date in list_dates(start, end)? {
        let path = config.daily_position_file(body, date);
        if !path.exists() {
            debug!(%path, "no position file, skipped");
            continue;
        }
        records.extend(read_position_file(&path)?);
    }
    Ok(records)
}

/// Gather the daily files from `start` to `end` into `<Body>Pos.bin`.
///
/// Return
/// ------
/// * the path written and the number of records in it
pub fn combine_positions(
    config: &HeliorbitConfig,
    body: Body,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<(Utf8PathBuf, usize), HeliorbitError> {
    let records = read_positions(config, body, start, end)?;
    let path = config.combined_position_file(body, false);
    write_position_file(&path, &records)?;
    info!(%body, %path, count = records.len(), "positions combined");
    Ok((path, records.len()))
}

/// Keep the first record of each date of `<Body>Pos.bin` in `<Body>PosSmall.bin`.
pub fn combine_positions_small(
    config: &HeliorbitConfig,
    body: Body,
) -> Result<(Utf8PathBuf, usize), HeliorbitError> {
    let daily = thin_to_daily(&read_combined_positions(config, body, false)?);
    let path = config.combined_position_file(body, true);
    write_position_file(&path, &daily)?;
    info!(%body, %path, count = daily.len(), "daily positions combined");
    Ok((path, daily.len()))
}

pub fn read_combined_positions(
    config: &HeliorbitConfig,
    body: Body,
    small: bool,
) -> Result<Vec<PositionRecord>, HeliorbitError> {
    read_position_file(&config.combined_position_file(body, small))
}

/// Compute the midday orbital speed of every date and write `<Body>Speed.dat`.
pub fn export_speeds<S: EphemerisService, T: TimeService>(
    ctx: &Heliorbit<S, T>,
    body: Body,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<SpeedRecord>, HeliorbitError> {
    let dates = list_dates(start, end)?;
    let speeds = ctx.body(body).speeds(&dates)?;
    let records: Vec<SpeedRecord> = dates
        .into_iter()
        .zip(speeds)
        .map(|(date, v)| SpeedRecord::new(date, v))
        .collect();

    let path = ctx.config().speed_file(body);
    write_speed_file(&path, &records)?;
    info!(%body, %path, count = records.len(), "speeds exported");
    Ok(records)
}

pub fn read_speeds(config: &HeliorbitConfig, body: Body) -> Result<Vec<SpeedRecord>, HeliorbitError> {
    read_speed_file(&config.speed_file(body))
}
