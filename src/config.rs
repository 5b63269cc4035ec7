//! # Paths of the kernel and output trees
//!
//! By default kernels are looked up in `<cache dir>/heliorbit/kernels` and
//! products are written under `<data-local dir>/heliorbit`, both resolved
//! with [`directories::BaseDirs`]. Every product of a body lives in its own
//! directory under the output root:
//!
//! ```text
//! <output>/Mercury/0long.dat            Carrington calendar
//! <output>/Mercury/MercuryPos/YYYYMMDD.bin  daily position records
//! <output>/Mercury/MercuryPos.bin       all records combined
//! <output>/Mercury/MercuryPosSmall.bin  one record per day
//! <output>/Mercury/MercurySpeed.dat     daily orbital speed
//! <output>/Sun/SunRotations.dat         solar rotation calendar
//! ```
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;

use crate::body::Body;
use crate::heliorbit_errors::HeliorbitError;
use crate::time::CalendarDate;

const APP_DIR: &str = "heliorbit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeliorbitConfig {
    kernel_dir: Utf8PathBuf,
    output_dir: Utf8PathBuf,
}

impl HeliorbitConfig {
    pub fn new(kernel_dir: impl Into<Utf8PathBuf>, output_dir: impl Into<Utf8PathBuf>) -> Self {
        HeliorbitConfig {
            kernel_dir: kernel_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Default locations under the user's cache and data directories.
    ///
    /// Return
    /// ------
    /// * the configuration, or [`HeliorbitError::UnresolvedBaseDir`] when the home
    ///   directory cannot be found, or [`HeliorbitError::Utf8PathError`] when it is
    ///   not valid UTF-8
    pub fn from_base_dirs() -> Result<Self, HeliorbitError> {
        let base_dir = BaseDirs::new().ok_or(HeliorbitError::UnresolvedBaseDir)?;

        let utf8 = |p: &std::path::Path| {
            Utf8Path::from_path(p)
                .map(|p| p.join(APP_DIR))
                .ok_or_else(|| HeliorbitError::Utf8PathError(p.display().to_string()))
        };

        Ok(HeliorbitConfig {
            kernel_dir: utf8(base_dir.cache_dir())?.join("kernels"),
            output_dir: utf8(base_dir.data_local_dir())?,
        })
    }

    pub fn with_kernel_dir(mut self, kernel_dir: impl Into<Utf8PathBuf>) -> Self {
        self.kernel_dir = kernel_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn kernel_dir(&self) -> &Utf8Path {
        &self.kernel_dir
    }

    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    pub fn body_output_dir(&self, body: Body) -> Utf8PathBuf {
        self.output_dir.join(body.dir_name())
    }

    pub fn carrington_file(&self, body: Body) -> Utf8PathBuf {
        self.body_output_dir(body).join("0long.dat")
    }

    pub fn solar_rotation_file(&self) -> Utf8PathBuf {
        self.body_output_dir(Body::Sun).join("SunRotations.dat")
    }

    pub fn position_dir(&self, body: Body) -> Utf8PathBuf {
        self.body_output_dir(body)
            .join(format!("{}Pos", body.file_stem()))
    }

    pub fn daily_position_file(&self, body: Body, date: CalendarDate) -> Utf8PathBuf {
        self.position_dir(body).join(format!("{date}.bin"))
    }

    /// Combined position file; `small` selects the one-record-per-day version.
    pub fn combined_position_file(&self, body: Body, small: bool) -> Utf8PathBuf {
        let suffix = if small { "PosSmall" } else { "Pos" };
        self.body_output_dir(body)
            .join(format!("{}{suffix}.bin", body.file_stem()))
    }

    pub fn speed_file(&self, body: Body) -> Utf8PathBuf {
        self.body_output_dir(body)
            .join(format!("{}Speed.dat", body.file_stem()))
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_layout() {
        let config = HeliorbitConfig::new("/k", "/out");
        let date = CalendarDate::new(20150317).unwrap();

        assert_eq!(config.carrington_file(Body::Mercury), "/out/Mercury/0long.dat");
        assert_eq!(config.solar_rotation_file(), "/out/Sun/SunRotations.dat");
        assert_eq!(
            config.daily_position_file(Body::Venus, date),
            "/out/Venus/VenusPos/20150317.bin"
        );
        assert_eq!(
            config.combined_position_file(Body::Mars, true),
            "/out/Mars/MarsPosSmall.bin"
        );
        assert_eq!(
            config.speed_file(Body::Messenger),
            "/out/Mercury/MESSENGER/MessengerSpeed.dat"
        );
    }

    #[test]
    fn test_overrides() {
        let config = HeliorbitConfig::new("/a", "/b")
            .with_kernel_dir("/spice")
            .with_output_dir("/data");
        assert_eq!(config.kernel_dir(), Utf8Path::new("/spice"));
        assert_eq!(config.output_dir(), Utf8Path::new("/data"));
    }

    #[test]
    fn test_base_dirs() {
        // not every CI machine has a home directory
        if let Ok(config) = HeliorbitConfig::from_base_dirs() {
            assert!(config.kernel_dir().ends_with("heliorbit/kernels"));
            assert!(config.output_dir().ends_with("heliorbit"));
        }
    }
}
