//! # Constants and type definitions for heliorbit
//!
//! This module centralizes the **physical constants**, **conversion factors** and **type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, solar gravitational parameter)
//! - Unit conversions (degrees ↔ radians, hours ↔ seconds, days ↔ centuries)
//! - Fixed sizes and offsets shared by the orbit builder and the record writers
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Number of hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Rounded Astronomical Unit used to normalize stored positions.
///
/// Position records have always been written with this value; keep it so that
/// old files and new files agree.
pub const AU_RECORD_KM: f64 = 1.496e8;

/// Heliocentric gravitational constant GM☉ in km³/s²
pub const GM_SUN: f64 = 1.327_124_400_18e11;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// MJD of 1950-01-01T00:00 UTC, origin of the continuous time scale
pub const MJD_1950: f64 = 33282.0;

/// Number of samples in a closed planar ellipse (0° to 360° inclusive, 1° steps)
pub const ELLIPSE_SAMPLES: usize = 361;

/// Number of samples required by the local crossing interpolant
pub const CROSSING_WINDOW: usize = 4;

/// Northward offset of Mercury's magnetic dipole from the planet centre (km).
///
/// Subtracted from the MSO z coordinate to obtain MSM coordinates.
pub const MSM_DIPOLE_OFFSET_KM: f64 = 478.0;

/// Default solar wind speed used for the aberration angle (km/s)
pub const DEFAULT_SOLAR_WIND_SPEED: f64 = 400.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Ephemeris time: TDB seconds past J2000
pub type EphemerisTime = f64;
/// Decimal hours since the start of a UTC day
pub type Hours = f64;
