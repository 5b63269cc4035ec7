//! Daily orbital speed, one text line per date:
//! `yyyymmdd continuous_time speed_km_s`.
use std::fs;
use std::io::{BufWriter, Write};

use camino::Utf8Path;
use nom::{
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map_res},
    number::complete::double,
    sequence::{delimited, terminated},
    IResult, Parser,
};
use serde::{Deserialize, Serialize};

use crate::heliorbit_errors::HeliorbitError;
use crate::time::{continuous_time, CalendarDate};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRecord {
    pub date: CalendarDate,
    pub continuous_time: f64,
    /// km/s
    pub speed: f64,
}

impl SpeedRecord {
    /// Speed sampled on `date`, time-stamped at 00:00.
    pub fn new(date: CalendarDate, speed: f64) -> Self {
        SpeedRecord {
            date,
            continuous_time: continuous_time(date, 0.0),
            speed,
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "{:08} {:.6} {:.6}\n",
            self.date.as_u32(),
            self.continuous_time,
            self.speed
        )
    }
}

fn parse_speed(input: &str) -> IResult<&str, (u32, f64, f64)> {
    all_consuming(delimited(
        space0,
        (
            terminated(map_res(digit1, str::parse::<u32>), space1),
            terminated(double, space1),
            double,
        ),
        space0,
    ))
    .parse(input)
}

pub fn write_speed_file(path: &Utf8Path, records: &[SpeedRecord]) -> Result<(), HeliorbitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    for record in records {
        writer.write_all(record.to_line().as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_speed_file(path: &Utf8Path) -> Result<Vec<SpeedRecord>, HeliorbitError> {
    fs::read_to_string(path)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let malformed = || HeliorbitError::MalformedRecord {
                path: path.to_owned(),
                line: line.to_string(),
            };
            let (_, (date, continuous_time, speed)) = parse_speed(line).map_err(|_| malformed())?;
            Ok(SpeedRecord {
                date: CalendarDate::new(date).map_err(|_| malformed())?,
                continuous_time,
                speed,
            })
        })
        .collect()
}

#[cfg(test)]
mod speed_file_test {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_speed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("MarsSpeed.dat")).unwrap();
        let date = CalendarDate::new(19500102).unwrap();

        let record = SpeedRecord::new(date, 24.5);
        assert_eq!(record.to_line(), "19500102 24.000000 24.500000\n");

        write_speed_file(&path, &[record]).unwrap();
        assert_eq!(read_speed_file(&path).unwrap(), vec![record]);

        fs::write(&path, "19500102 24.0\n").unwrap();
        assert!(read_speed_file(&path).is_err());
    }
}
