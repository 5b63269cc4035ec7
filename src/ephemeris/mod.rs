//! # Ephemeris services
//!
//! Positions and frame rotations are delegated to an [`EphemerisService`].
//! A production deployment plugs a full ephemeris toolkit behind this trait;
//! the crate ships [`AnalyticEphemeris`], a mean-element model that needs no
//! data file and is good enough for planetary geometry and tests.
//!
//! Kernel-based services get their data files through the `furnish`/`unload`
//! hooks, driven by the [`kernels::KernelPool`].
pub mod analytic;
pub mod kernels;

use camino::Utf8Path;
use nalgebra::{Matrix3, Vector3};

use crate::body::Body;
use crate::constants::{EphemerisTime, Kilometer};
use crate::frames::Frame;
use crate::heliorbit_errors::HeliorbitError;

pub use analytic::AnalyticEphemeris;
pub use kernels::{KernelPool, KernelScope, KernelSet};

pub trait EphemerisService {
    /// Position of `target` relative to `observer`, in `frame`, at `et`.
    ///
    /// No light-time or aberration correction is applied.
    fn position(
        &self,
        target: Body,
        et: EphemerisTime,
        frame: Frame,
        observer: Body,
    ) -> Result<Vector3<Kilometer>, HeliorbitError>;

    /// Matrix `M` such that `v_to = M · v_from` at `et`.
    fn frame_rotation(
        &self,
        from: Frame,
        to: Frame,
        et: EphemerisTime,
    ) -> Result<Matrix3<f64>, HeliorbitError>;

    /// Load a kernel file. Called by the kernel pool on first use.
    fn furnish(&self, _kernel: &Utf8Path) -> Result<(), HeliorbitError> {
        Ok(())
    }

    /// Unload a kernel file. Called by the kernel pool once no scope holds it.
    fn unload(&self, _kernel: &Utf8Path) -> Result<(), HeliorbitError> {
        Ok(())
    }

    /// [`EphemerisService::position`] for several epochs.
    fn positions(
        &self,
        target: Body,
        ets: &[EphemerisTime],
        frame: Frame,
        observer: Body,
    ) -> Result<Vec<Vector3<Kilometer>>, HeliorbitError> {
        ets.iter()
            .map(|et| self.position(target, *et, frame, observer))
            .collect()
    }
}

impl<S: EphemerisService + ?Sized> EphemerisService for &S {
    fn position(
        &self,
        target: Body,
        et: EphemerisTime,
        frame: Frame,
        observer: Body,
    ) -> Result<Vector3<Kilometer>, HeliorbitError> {
        (**self).position(target, et, frame, observer)
    }

    fn frame_rotation(
        &self,
        from: Frame,
        to: Frame,
        et: EphemerisTime,
    ) -> Result<Matrix3<f64>, HeliorbitError> {
        (**self).frame_rotation(from, to, et)
    }

    fn furnish(&self, kernel: &Utf8Path) -> Result<(), HeliorbitError> {
        (**self).furnish(kernel)
    }

    fn unload(&self, kernel: &Utf8Path) -> Result<(), HeliorbitError> {
        (**self).unload(kernel)
    }
}
