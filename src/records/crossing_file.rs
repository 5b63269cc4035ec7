//! Text files of crossing epochs.
//!
//! One epoch per line: date, decimal hour and continuous time, separated by
//! single spaces,
//!
//! ```text
//! 20150117 5.392500 570293.392500
//! ```
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

use crate::constants::Hours;
use crate::heliorbit_errors::HeliorbitError;
use crate::time::{continuous_time, CalendarDate};

/// One line of a crossing file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingRecord {
    pub date: CalendarDate,
    pub ut: Hours,
    /// Hours since 1950-01-01T00:00 UTC
    pub continuous_time: f64,
}

impl CrossingRecord {
    pub fn new(date: CalendarDate, ut: Hours) -> Self {
        CrossingRecord {
            date,
            ut,
            continuous_time: continuous_time(date, ut),
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "{:08} {:.6} {:.6}\n",
            self.date.as_u32(),
            self.ut,
            self.continuous_time
        )
    }
}

fn parse_record(input: &str) -> IResult<&str, (u32, f64, f64)> {
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

/// Parse one line of a crossing file.
pub fn parse_crossing_line(line: &str) -> Option<CrossingRecord> {
    let (_, (date, ut, continuous_time)) = parse_record(line).ok()?;
    Some(CrossingRecord {
        date: CalendarDate::new(date).ok()?,
        ut,
        continuous_time,
    })
}

/// Write `records` to `path`, creating the parent directories.
pub fn write_crossing_file(path: &Utf8Path, records: &[CrossingRecord]) -> Result<(), HeliorbitError> {
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

/// Read every record of a crossing file. Blank lines are skipped.
///
/// Return
/// ------
/// * the records in file order, or [`HeliorbitError::MalformedRecord`] naming the
///   first line that could not be parsed
pub fn read_crossing_file(path: &Utf8Path) -> Result<Vec<CrossingRecord>, HeliorbitError> {
    fs::read_to_string(path)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            parse_crossing_line(line).ok_or_else(|| HeliorbitError::MalformedRecord {
                path: path.to_owned(),
                line: line.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod crossing_file_test {
    use super::*;
    use approx::assert_relative_eq;
    use camino::Utf8PathBuf;

    #[test]
    fn test_line_format() {
        let record = CrossingRecord::new(CalendarDate::new(19500102).unwrap(), 5.3925);
        assert_eq!(record.to_line(), "19500102 5.392500 29.392500\n");
    }

    #[test]
    fn test_parse_line() {
        let record = parse_crossing_line("20150117 5.392500 570293.392500").unwrap();
        assert_eq!(record.date, CalendarDate::new(20150117).unwrap());
        assert_relative_eq!(record.ut, 5.3925);
        assert_relative_eq!(record.continuous_time, 570293.3925);

        assert!(parse_crossing_line("20150117 5.39").is_none());
        assert!(parse_crossing_line("20150230 5.0 1.0").is_none());
        assert!(parse_crossing_line("20150117 5.0 1.0 extra").is_none());
    }

    #[test]
    fn test_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("Venus/0long.dat")).unwrap();

        let records = vec![
            CrossingRecord::new(CalendarDate::new(20150101).unwrap(), 1.5),
            CrossingRecord::new(CalendarDate::new(20150206).unwrap(), 23.25),
        ];
        write_crossing_file(&path, &records).unwrap();
        let back = read_crossing_file(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].date, records[1].date);
        assert_relative_eq!(back[1].ut, 23.25);

        fs::write(&path, "20150101 1.0 2.0\nnot a record\n").unwrap();
        assert!(matches!(
            read_crossing_file(&path),
            Err(HeliorbitError::MalformedRecord { line, .. }) if line == "not a record"
        ));
    }
}
