//! # Heliorbit: configuration, ephemeris and time services
//!
//! [`Heliorbit`] is the façade tying together:
//!
//! 1. the [`HeliorbitConfig`] (kernel and output directories),
//! 2. an [`EphemerisService`] for positions and frame rotations,
//! 3. a [`TimeService`] for the UTC ↔ ephemeris-time bridge,
//! 4. a [`KernelPool`] that scopes kernel loading around each batch of queries.
//!
//! Per-body work goes through [`Heliorbit::body`], which returns a
//! [`BodyQuery`]; calendar and export operations live in
//! [`calendar`](crate::calendar) and [`export`](crate::export).
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use heliorbit::body::Body;
//! use heliorbit::config::HeliorbitConfig;
//! use heliorbit::heliorbit::Heliorbit;
//! use heliorbit::time::CalendarDate;
//!
//! let ctx = Heliorbit::analytic(HeliorbitConfig::from_base_dirs().unwrap());
//! let date = CalendarDate::new(20150101).unwrap();
//! let v = ctx.body(Body::Mercury).speed(date).unwrap();
//! ```
//!
//! ## Kernel scopes
//!
//! Each query acquires the kernels it needs and releases them when it
//! returns. Hold a scope from [`Heliorbit::session`] around a batch of calls
//! to keep the kernels loaded in between.
use crate::body::Body;
use crate::config::HeliorbitConfig;
use crate::ephemeris::{AnalyticEphemeris, EphemerisService, KernelPool, KernelScope, KernelSet};
use crate::heliorbit_errors::HeliorbitError;
use crate::query::BodyQuery;
use crate::time::{HifitimeService, TimeService};

#[derive(Debug)]
pub struct Heliorbit<S: EphemerisService, T: TimeService = HifitimeService> {
    config: HeliorbitConfig,
    ephemeris: S,
    time: T,
    kernels: KernelPool,
}

impl Heliorbit<AnalyticEphemeris, HifitimeService> {
    /// Context backed by the analytic ephemeris and hifitime; no kernel file is read.
    pub fn analytic(config: HeliorbitConfig) -> Self {
        Heliorbit {
            config,
            ephemeris: AnalyticEphemeris::new(),
            time: HifitimeService,
            kernels: KernelPool::in_memory(),
        }
    }
}

impl<S: EphemerisService, T: TimeService> Heliorbit<S, T> {
    /// Construct a new context.
    ///
    /// Arguments
    /// ---------
    /// * `config`: directories; kernels are resolved under `config.kernel_dir()`
    /// * `ephemeris`: position and frame provider
    /// * `time`: UTC ↔ ET conversion
    ///
    /// See also
    /// --------
    /// * [`Heliorbit::analytic`] for a context needing no data file
    pub fn new(config: HeliorbitConfig, ephemeris: S, time: T) -> Self {
        let kernels = KernelPool::new(config.kernel_dir().to_owned());
        Heliorbit {
            config,
            ephemeris,
            time,
            kernels,
        }
    }

    pub fn with_kernel_pool(mut self, kernels: KernelPool) -> Self {
        self.kernels = kernels;
        self
    }

    pub fn config(&self) -> &HeliorbitConfig {
        &self.config
    }

    pub fn ephemeris(&self) -> &S {
        &self.ephemeris
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    pub fn kernels(&self) -> &KernelPool {
        &self.kernels
    }

    /// Hold `set` loaded until the returned scope is dropped.
    pub fn session(&self, set: &KernelSet) -> Result<KernelScope<'_, S>, HeliorbitError> {
        self.kernels.acquire(&self.ephemeris, set)
    }

    /// Queries about one body.
    pub fn body(&self, body: Body) -> BodyQuery<'_, S, T> {
        BodyQuery::new(self, body)
    }
}
