//! Binary position records.
//!
//! A position file starts with the number of records as a little-endian
//! `i32`, followed by the packed records (88 bytes each, little-endian):
//!
//! | Field         | Type | Unit  |
//! |---------------|------|-------|
//! | date          | i32  | yyyymmdd |
//! | ut            | f32  | hours |
//! | continuous time | f64 | hours since 1950-01-01 |
//! | x, y, z HCI   | 3×f64 | AU   |
//! | x, y, z IAU_SUN | 3×f64 | AU |
//! | distance to the Sun | f64 | AU |
//! | lat, lon HCI  | 2×f32 | degrees |
//! | lat, lon IAU_SUN | 2×f32 | degrees |
//!
//! The AU used here is the rounded [`AU_RECORD_KM`].
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};

use camino::Utf8Path;
use itertools::Itertools;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Hours, Kilometer, AU_RECORD_KM};
use crate::frames::latitude_longitude;
use crate::heliorbit_errors::HeliorbitError;
use crate::time::{continuous_time, CalendarDate};

/// Size in bytes of one packed record
pub const RECORD_SIZE: usize = 88;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub date: i32,
    pub ut: f32,
    pub continuous_time: f64,
    pub x_hci: f64,
    pub y_hci: f64,
    pub z_hci: f64,
    pub x_iau_sun: f64,
    pub y_iau_sun: f64,
    pub z_iau_sun: f64,
    pub r_sun: f64,
    pub lat_hci: f32,
    pub lon_hci: f32,
    pub lat_iau_sun: f32,
    pub lon_iau_sun: f32,
}

impl PositionRecord {
    /// Build a record from the HCI and IAU_SUN positions (km) at `date`, `ut`.
    pub fn from_positions(
        date: CalendarDate,
        ut: Hours,
        hci: &Vector3<Kilometer>,
        iau_sun: &Vector3<Kilometer>,
    ) -> Self {
        let hci_au = hci / AU_RECORD_KM;
        let iau_au = iau_sun / AU_RECORD_KM;
        let (lat_hci, lon_hci) = latitude_longitude(&hci_au);
        let (lat_iau_sun, lon_iau_sun) = latitude_longitude(&iau_au);

        PositionRecord {
            date: date.as_u32() as i32,
            ut: ut as f32,
            continuous_time: continuous_time(date, ut),
            x_hci: hci_au.x,
            y_hci: hci_au.y,
            z_hci: hci_au.z,
            x_iau_sun: iau_au.x,
            y_iau_sun: iau_au.y,
            z_iau_sun: iau_au.z,
            r_sun: hci_au.norm(),
            lat_hci: lat_hci as f32,
            lon_hci: lon_hci as f32,
            lat_iau_sun: lat_iau_sun as f32,
            lon_iau_sun: lon_iau_sun as f32,
        }
    }

    pub fn hci(&self) -> Vector3<f64> {
        Vector3::new(self.x_hci, self.y_hci, self.z_hci)
    }

    pub fn iau_sun(&self) -> Vector3<f64> {
        Vector3::new(self.x_iau_sun, self.y_iau_sun, self.z_iau_sun)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.date.to_le_bytes())?;
        writer.write_all(&self.ut.to_le_bytes())?;
        for v in [
            self.continuous_time,
            self.x_hci,
            self.y_hci,
            self.z_hci,
            self.x_iau_sun,
            self.y_iau_sun,
            self.z_iau_sun,
            self.r_sun,
        ] {
            writer.write_all(&v.to_le_bytes())?;
        }
        for v in [
            self.lat_hci,
            self.lon_hci,
            self.lat_iau_sun,
            self.lon_iau_sun,
        ] {
            writer.write_all(&v.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(PositionRecord {
            date: read_i32_le(reader)?,
            ut: read_f32_le(reader)?,
            continuous_time: read_f64_le(reader)?,
            x_hci: read_f64_le(reader)?,
            y_hci: read_f64_le(reader)?,
            z_hci: read_f64_le(reader)?,
            x_iau_sun: read_f64_le(reader)?,
            y_iau_sun: read_f64_le(reader)?,
            z_iau_sun: read_f64_le(reader)?,
            r_sun: read_f64_le(reader)?,
            lat_hci: read_f32_le(reader)?,
            lon_hci: read_f32_le(reader)?,
            lat_iau_sun: read_f32_le(reader)?,
            lon_iau_sun: read_f32_le(reader)?,
        })
    }
}

fn read_f64_le<R: Read>(reader: &mut R) -> io::Result<f64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

fn read_f32_le<R: Read>(reader: &mut R) -> io::Result<f32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

fn read_i32_le<R: Read>(reader: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Write a count-prefixed position file, creating the parent directories.
pub fn write_position_file(path: &Utf8Path, records: &[PositionRecord]) -> Result<(), HeliorbitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&(records.len() as i32).to_le_bytes())?;
    for record in records {
        record.write_to(&mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a count-prefixed position file.
///
/// A negative count or a file shorter than announced is reported as
/// [`HeliorbitError::MalformedRecord`].
pub fn read_position_file(path: &Utf8Path) -> Result<Vec<PositionRecord>, HeliorbitError> {
    let mut reader = BufReader::new(File::open(path)?);
    let malformed = |line: String| HeliorbitError::MalformedRecord {
        path: path.to_owned(),
        line,
    };

    let count = read_i32_le(&mut reader)?;
    let count = usize::try_from(count).map_err(|_| malformed(format!("record count {count}")))?;

    (0..count)
        .map(|i| {
            PositionRecord::read_from(&mut reader).map_err(|err| match err.kind() {
                io::ErrorKind::UnexpectedEof => malformed(format!("record {i} of {count} is truncated")),
                _ => HeliorbitError::IoError(err),
            })
        })
        .collect()
}

/// Keep the first record of each date, in the order of `records`.
pub fn thin_to_daily(records: &[PositionRecord]) -> Vec<PositionRecord> {
    records
        .iter()
        .dedup_by(|a, b| a.date == b.date)
        .copied()
        .collect()
}
