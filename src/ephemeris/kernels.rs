//! # Kernel scopes
//!
//! Kernels are data files that must be loaded into the ephemeris service
//! before it can answer. A batch of queries runs inside a [`KernelScope`]:
//!
//! ```text
//! let scope = pool.acquire(&service, &set)?;   // furnish what is not loaded yet
//! ... queries ...
//! drop(scope);                                  // unload what nobody else uses
//! ```
//!
//! The [`KernelPool`] keeps a reference count per kernel so that several
//! scopes, possibly on different threads, can overlap. A kernel is furnished
//! when its count goes from 0 to 1 and unloaded when it drops back to 0. The
//! release happens in `Drop`, so it runs on early returns and panics alike.
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::ephemeris::EphemerisService;
use crate::frames::Frame;
use crate::heliorbit_errors::HeliorbitError;

/// Leapseconds
pub const LSK: &str = "lsk/naif0010.tls";
/// Planetary ephemeris
pub const PLANETARY_SPK: &str = "bodies/de432s.bsp";
/// Planetary constants (rotation of the Sun)
pub const PCK: &str = "bodies/pck00010.tpc";
/// HCI and ECLIPDATE frame definitions
pub const HCI_TK: &str = "frames/tk/sunframes.tk";
pub const MSO_TK: &str = "frames/tk/MercuryMSO.tk";
pub const VSO_TK: &str = "VEX/tk/VenusVSO.tk";
pub const MESSENGER_SPK: &str = "messenger/spk/msgr_20040803_20150501_od423sc_0.bsp";
pub const BEPI_MPO_SPK: &str = "bepi/misc/kernels/spk/BC-ESC-DF-50027_9217MPO.bsp";
pub const BEPI_MMO_SPK: &str = "bepi/misc/kernels/spk/BC-ESC-DF-50028_9133MMO.bsp";
pub const VEX_SPK: &str = "VEX/spk/ORVV__MERGED.BSP";

/// Ordered list of kernel paths, relative to the kernel directory, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KernelSet(Vec<Utf8PathBuf>);

impl KernelSet {
    pub fn new() -> Self {
        KernelSet(Vec::new())
    }

    /// Leapseconds, planetary SPK and PCK.
    pub fn base() -> Self {
        let mut set = KernelSet::new();
        set.push(LSK);
        set.push(PLANETARY_SPK);
        set.push(PCK);
        set
    }

    /// Append a kernel unless it is already in the set.
    pub fn push(&mut self, kernel: impl AsRef<Utf8Path>) {
        let kernel = kernel.as_ref();
        if !self.contains(kernel) {
            self.0.push(kernel.to_owned());
        }
    }

    /// Append the frame kernel defining `frame`, if any.
    pub fn push_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Hci | Frame::Hae => self.push(HCI_TK),
            Frame::MercuryMso => self.push(MSO_TK),
            Frame::VenusVso => self.push(VSO_TK),
            Frame::J2000 | Frame::IauSun => {}
        }
    }

    pub fn with(mut self, kernel: impl AsRef<Utf8Path>) -> Self {
        self.push(kernel);
        self
    }

    /// Union of two sets, keeping the order of `self` first.
    pub fn merge(mut self, other: &KernelSet) -> Self {
        for kernel in other.iter() {
            self.push(kernel);
        }
        self
    }

    pub fn contains(&self, kernel: impl AsRef<Utf8Path>) -> bool {
        let kernel = kernel.as_ref();
        self.0.iter().any(|k| k == kernel)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Utf8Path> {
        self.0.iter().map(|k| k.as_path())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: AsRef<Utf8Path>> FromIterator<P> for KernelSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = KernelSet::new();
        for kernel in iter {
            set.push(kernel);
        }
        set
    }
}

/// Reference-counted registry of loaded kernels.
#[derive(Debug)]
pub struct KernelPool {
    kernel_dir: Utf8PathBuf,
    check_files: bool,
    loaded: Mutex<HashMap<Utf8PathBuf, usize>>,
}

impl KernelPool {
    /// Pool over the kernel files found under `kernel_dir`.
    ///
    /// Acquiring a set fails with [`HeliorbitError::KernelNotFound`] if one of its
    /// files does not exist.
    pub fn new(kernel_dir: impl Into<Utf8PathBuf>) -> Self {
        KernelPool {
            kernel_dir: kernel_dir.into(),
            check_files: true,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Pool that never touches the file system, for services that carry their own data.
    pub fn in_memory() -> Self {
        KernelPool {
            kernel_dir: Utf8PathBuf::new(),
            check_files: false,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn kernel_dir(&self) -> &Utf8Path {
        &self.kernel_dir
    }

    /// Number of live scopes holding `kernel` (path relative to the kernel dir).
    pub fn refcount(&self, kernel: impl AsRef<Utf8Path>) -> usize {
        let full = self.kernel_dir.join(kernel.as_ref());
        self.lock().get(&full).copied().unwrap_or(0)
    }

    /// Kernels currently loaded, as full paths, sorted.
    pub fn loaded_kernels(&self) -> Vec<Utf8PathBuf> {
        let mut kernels: Vec<Utf8PathBuf> = self.lock().keys().cloned().collect();
        kernels.sort();
        kernels
    }

    /// Load the kernels of `set` that are not loaded yet and hold all of them
    /// until the returned scope is dropped.
    ///
    /// Arguments
    /// ---------
    /// * `service`: the ephemeris service whose `furnish`/`unload` hooks are called
    /// * `set`: kernels to hold
    ///
    /// Return
    /// ------
    /// * a [`KernelScope`], or the first error met. On error, every kernel
    ///   acquired by this call is released again.
    pub fn acquire<'a, S: EphemerisService + ?Sized>(
        &'a self,
        service: &'a S,
        set: &KernelSet,
    ) -> Result<KernelScope<'a, S>, HeliorbitError> {
        let mut loaded = self.lock();
        let mut held: Vec<Utf8PathBuf> = Vec::with_capacity(set.len());

        for kernel in set.iter() {
            let full = self.kernel_dir.join(kernel);
            let count = loaded.get(&full).copied().unwrap_or(0);

            if count == 0 {
                let furnished = if self.check_files && !full.exists() {
                    Err(HeliorbitError::KernelNotFound(full.clone()))
                } else {
                    service.furnish(&full)
                };

                if let Err(err) = furnished {
                    warn!(kernel = %full, error = %err, "kernel acquisition failed, rolling back");
                    release_all(&mut loaded, service, &held);
                    return Err(err);
                }
                debug!(kernel = %full, "kernel furnished");
            }

            loaded.insert(full.clone(), count + 1);
            held.push(full);
        }

        Ok(KernelScope {
            pool: self,
            service,
            kernels: held,
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Utf8PathBuf, usize>> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn release_all<S: EphemerisService + ?Sized>(
    loaded: &mut HashMap<Utf8PathBuf, usize>,
    service: &S,
    kernels: &[Utf8PathBuf],
) {
    for kernel in kernels.iter().rev() {
        match loaded.get(kernel).copied() {
            Some(count) if count > 1 => {
                loaded.insert(kernel.clone(), count - 1);
            }
            Some(_) => {
                loaded.remove(kernel);
                if let Err(err) = service.unload(kernel) {
                    warn!(kernel = %kernel, error = %err, "kernel unload failed");
                } else {
                    debug!(kernel = %kernel, "kernel unloaded");
                }
            }
            None => warn!(kernel = %kernel, "released a kernel that was not held"),
        }
    }
}

/// Guard holding a set of kernels, released on drop.
#[must_use = "the kernels are released as soon as the scope is dropped"]
pub struct KernelScope<'a, S: EphemerisService + ?Sized> {
    pool: &'a KernelPool,
    service: &'a S,
    kernels: Vec<Utf8PathBuf>,
}

impl<S: EphemerisService + ?Sized> KernelScope<'_, S> {
    /// Full paths of the kernels held by this scope.
    pub fn kernels(&self) -> &[Utf8PathBuf] {
        &self.kernels
    }

    pub fn service(&self) -> &S {
        self.service
    }
}

impl<S: EphemerisService + ?Sized> Drop for KernelScope<'_, S> {
    fn drop(&mut self) {
        let mut loaded = self.pool.lock();
        release_all(&mut loaded, self.service, &self.kernels);
    }
}
