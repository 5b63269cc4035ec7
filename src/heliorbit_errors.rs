use camino::Utf8PathBuf;
use thiserror::Error;

use crate::{body::Body, frames::Frame, time::CalendarDate};

#[derive(Error, Debug)]
pub enum HeliorbitError {
    #[error("Eccentricity {0} is outside [0, 1): not a bound ellipse")]
    InvalidEccentricity(f64),

    #[error("Semi-major axis must be positive, got {0} km")]
    InvalidSemiMajorAxis(f64),

    #[error("At least {required} samples are needed, got {found}")]
    TooFewSamples { required: usize, found: usize },

    #[error("Input lengths differ: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Time array is not strictly increasing at index {0}")]
    NonMonotonicTimes(usize),

    #[error("Signal is not monotonic in the interpolation window around sample {0}")]
    DegenerateWindow(usize),

    #[error("Invalid calendar date: {0}")]
    InvalidDate(u32),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: CalendarDate,
        end: CalendarDate,
    },

    #[error("Invalid NAIF body id: {0}")]
    InvalidNaifId(i32),

    #[error("{0} has no reference orbit")]
    NoReferenceOrbit(Body),

    #[error("{0} is not a spacecraft")]
    NotASpacecraft(Body),

    #[error("No ephemeris data for {body} at ET {et}")]
    EphemerisUnavailable { body: Body, et: f64 },

    #[error("Frame transformation {from} -> {to} is not available")]
    FrameUnavailable { from: Frame, to: Frame },

    #[error("{body} has no data on {date}, outside its mission window")]
    OutsideMissionWindow { body: Body, date: CalendarDate },

    #[error("Kernel file not found at: {0}")]
    KernelNotFound(Utf8PathBuf),

    #[error("Kernel could not be loaded: {0}")]
    KernelLoadFailed(String),

    #[error("Time conversion error: {0}")]
    TimeConversion(#[from] hifitime::HifitimeError),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed record in {path}: {line}")]
    MalformedRecord { path: Utf8PathBuf, line: String },

    #[error("Base directory could not be resolved")]
    UnresolvedBaseDir,

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),
}

/// Coarse classification of a [`HeliorbitError`].
///
/// Batch callers abort on any error, but they report precondition failures
/// (bad input) differently from upstream failures (missing ephemeris data,
/// missing kernels) and from file-system problems. An empty result is never an
/// error and never reaches this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Precondition,
    Upstream,
    Io,
}

impl HeliorbitError {
    pub fn category(&self) -> ErrorCategory {
        use HeliorbitError::*;
        match self {
            InvalidEccentricity(_)
            | InvalidSemiMajorAxis(_)
            | TooFewSamples { .. }
            | LengthMismatch { .. }
            | NonMonotonicTimes(_)
            | DegenerateWindow(_)
            | InvalidDate(_)
            | InvalidDateRange { .. }
            | InvalidNaifId(_)
            | NoReferenceOrbit(_)
            | NotASpacecraft(_) => ErrorCategory::Precondition,

            EphemerisUnavailable { .. }
            | FrameUnavailable { .. }
            | OutsideMissionWindow { .. }
            | KernelNotFound(_)
            | KernelLoadFailed(_)
            | TimeConversion(_)
            | RootFindingError(_) => ErrorCategory::Upstream,

            IoError(_) | MalformedRecord { .. } | UnresolvedBaseDir | Utf8PathError(_) => {
                ErrorCategory::Io
            }
        }
    }

    pub fn is_precondition(&self) -> bool {
        self.category() == ErrorCategory::Precondition
    }

    pub fn is_upstream(&self) -> bool {
        self.category() == ErrorCategory::Upstream
    }
}
