//! Heliocentric orbits, frame transforms and rotation calendars for the inner
//! planets and the spacecraft orbiting them.
//!
//! The entry point is [`Heliorbit`], which bundles an
//! [`EphemerisService`](ephemeris::EphemerisService), a
//! [`TimeService`](time::TimeService), the kernel pool and the output
//! configuration. Per-body queries go through [`Heliorbit::body`]; calendars
//! live in [`calendar`] and file exports in [`export`].
pub mod body;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod crossing;
pub mod ephemeris;
pub mod export;
pub mod frames;
pub mod heliorbit;
pub mod heliorbit_errors;
pub mod kepler;
pub mod orbit;
pub mod progress_bar;
pub mod query;
pub mod records;
pub mod time;

pub use body::Body;
pub use config::HeliorbitConfig;
pub use frames::Frame;
pub use heliorbit::Heliorbit;
pub use heliorbit_errors::HeliorbitError;
pub use time::CalendarDate;
