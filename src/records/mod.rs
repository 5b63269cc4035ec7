//! # Output records
//!
//! On-disk formats written by [`export`](crate::export):
//!
//! * [`crossing_file`]: text calendars of crossing epochs (Carrington and solar rotations)
//! * [`position_file`]: count-prefixed little-endian binary position records
//! * [`speed_file`]: text files of daily orbital speed
pub mod crossing_file;
pub mod position_file;
pub mod speed_file;

pub use crossing_file::{read_crossing_file, write_crossing_file, CrossingRecord};
pub use position_file::{read_position_file, thin_to_daily, write_position_file, PositionRecord};
pub use speed_file::{read_speed_file, write_speed_file, SpeedRecord};
