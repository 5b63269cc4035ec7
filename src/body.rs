//! # Bodies
//!
//! Every planet and spacecraft handled by the crate is a variant of [`Body`].
//! The variant carries everything that used to differ from one body to the
//! next: NAIF id, reference orbit, host planet, mission window and the set of
//! kernels needed to query it.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::RADEG;
use crate::ephemeris::kernels::{self, KernelSet};
use crate::frames::Frame;
use crate::heliorbit_errors::HeliorbitError;
use crate::orbit::OrbitalElements;
use crate::time::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Messenger,
    BepiMpo,
    BepiMmo,
    VenusExpress,
}

impl Body {
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Messenger,
        Body::BepiMpo,
        Body::BepiMmo,
        Body::VenusExpress,
    ];

    pub const PLANETS: [Body; 4] = [Body::Mercury, Body::Venus, Body::Earth, Body::Mars];

    pub fn from_id(id: i32) -> Result<Self, HeliorbitError> {
        match id {
            10 => Ok(Body::Sun),
            199 => Ok(Body::Mercury),
            299 => Ok(Body::Venus),
            399 => Ok(Body::Earth),
            4 => Ok(Body::Mars),
            -236 => Ok(Body::Messenger),
            -121 => Ok(Body::BepiMpo),
            -122 => Ok(Body::BepiMmo),
            -248 => Ok(Body::VenusExpress),
            _ => Err(HeliorbitError::InvalidNaifId(id)),
        }
    }

    /// NAIF integer id. Mars is queried through its system barycenter.
    pub fn naif_id(&self) -> i32 {
        match self {
            Body::Sun => 10,
            Body::Mercury => 199,
            Body::Venus => 299,
            Body::Earth => 399,
            Body::Mars => 4,
            Body::Messenger => -236,
            Body::BepiMpo => -121,
            Body::BepiMmo => -122,
            Body::VenusExpress => -248,
        }
    }

    /// Directory, relative to the output root, holding the files of this body.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Messenger => "Mercury/MESSENGER",
            Body::BepiMpo => "Mercury/Bepi/MPO",
            Body::BepiMmo => "Mercury/Bepi/MMO",
            Body::VenusExpress => "Venus/VEX",
        }
    }

    /// Short name used as a file prefix, e.g. `MercurySpeed.dat`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Messenger => "Messenger",
            Body::BepiMpo => "MPO",
            Body::BepiMmo => "MMO",
            Body::VenusExpress => "VEX",
        }
    }

    pub fn is_spacecraft(&self) -> bool {
        matches!(
            self,
            Body::Messenger | Body::BepiMpo | Body::BepiMmo | Body::VenusExpress
        )
    }

    /// Planet orbited by a spacecraft.
    pub fn host(&self) -> Option<Body> {
        match self {
            Body::Messenger | Body::BepiMpo | Body::BepiMmo => Some(Body::Mercury),
            Body::VenusExpress => Some(Body::Venus),
            _ => None,
        }
    }

    /// Planet-centred frame of a spacecraft: MSO around Mercury, VSO around Venus.
    pub fn planet_centred_frame(&self) -> Option<Frame> {
        match self.host()? {
            Body::Mercury => Some(Frame::MercuryMso),
            Body::Venus => Some(Frame::VenusVso),
            _ => None,
        }
    }

    /// Idealized heliocentric orbit of a planet, in the ecliptic of epoch.
    ///
    /// Return
    /// ------
    /// * `Some` for Mercury, Venus, Earth and Mars, `None` otherwise
    pub fn reference_elements(&self) -> Option<OrbitalElements> {
        let (a, e, i, node, peri) = match self {
            Body::Mercury => (57909050.0, 0.20563, 3.38, 48.334, 29.124),
            Body::Venus => (108208000.0, 0.006772, 3.86, 76.68, 54.884),
            Body::Earth => (149598023.0, 0.0167086, 7.155, -11.26064, 114.20783),
            Body::Mars => (227.9392e6, 0.0934, 5.65, 49.558, 286.502),
            _ => return None,
        };
        Some(OrbitalElements::from_validated(
            a,
            e,
            i * RADEG,
            node * RADEG,
            peri * RADEG,
        ))
    }

    /// First and last date covered by the kernels of a spacecraft.
    pub fn mission_window(&self) -> Option<(CalendarDate, CalendarDate)> {
        match self {
            Body::Messenger => Some((
                CalendarDate::from_validated(20110323),
                CalendarDate::from_validated(20150430),
            )),
            Body::BepiMpo | Body::BepiMmo => Some((
                CalendarDate::from_validated(20250328),
                CalendarDate::from_validated(20270318),
            )),
            Body::VenusExpress => Some((
                CalendarDate::from_validated(20060411),
                CalendarDate::from_validated(20141231),
            )),
            _ => None,
        }
    }

    /// Planets are always in their window.
    pub fn in_mission_window(&self, date: CalendarDate) -> bool {
        self.mission_window()
            .map_or(true, |(first, last)| first <= date && date <= last)
    }

    pub fn check_mission_window(&self, date: CalendarDate) -> Result<(), HeliorbitError> {
        if self.in_mission_window(date) {
            Ok(())
        } else {
            Err(HeliorbitError::OutsideMissionWindow { body: *self, date })
        }
    }

    /// Kernels needed to query this body in `frame`.
    ///
    /// Always the leapseconds, planetary SPK and PCK; then the frame kernel of
    /// `frame` if it has one, and the mission SPK for a spacecraft.
    pub fn kernel_set(&self, frame: Frame) -> KernelSet {
        let mut set = KernelSet::base();
        set.push_frame(frame);

        match self {
            Body::Messenger => set.push(kernels::MESSENGER_SPK),
            Body::BepiMpo => set.push(kernels::BEPI_MPO_SPK),
            Body::BepiMmo => set.push(kernels::BEPI_MMO_SPK),
            Body::VenusExpress => set.push(kernels::VEX_SPK),
            _ => {}
        }
        set
    }
}

impl From<Body> for i32 {
    fn from(body: Body) -> Self {
        body.naif_id()
    }
}

impl TryFrom<i32> for Body {
    type Error = HeliorbitError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Body::from_id(id)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars Barycenter",
            Body::Messenger => "MESSENGER",
            Body::BepiMpo => "BepiColombo MPO",
            Body::BepiMmo => "BepiColombo MMO",
            Body::VenusExpress => "Venus Express",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod body_test {
    use super::*;

    #[test]
    fn test_naif_round_trip() {
        for body in Body::ALL {
            assert_eq!(Body::try_from(body.naif_id()).unwrap(), body);
        }
        assert!(matches!(
            Body::try_from(599),
            Err(HeliorbitError::InvalidNaifId(599))
        ));
    }

    #[test]
    fn test_reference_elements() {
        for planet in Body::PLANETS {
            assert!(planet.reference_elements().is_some(), "{planet}");
        }
        assert!(Body::Sun.reference_elements().is_none());
        assert!(Body::Messenger.reference_elements().is_none());

        let mercury = Body::Mercury.reference_elements().unwrap();
        assert_eq!(mercury.semi_major_axis(), 57909050.0);
        assert_eq!(mercury.eccentricity(), 0.20563);
    }

    #[test]
    fn test_hosts_and_frames() {
        assert_eq!(Body::Messenger.host(), Some(Body::Mercury));
        assert_eq!(Body::BepiMmo.planet_centred_frame(), Some(Frame::MercuryMso));
        assert_eq!(Body::VenusExpress.planet_centred_frame(), Some(Frame::VenusVso));
        assert_eq!(Body::Earth.host(), None);
        assert_eq!(Body::Earth.planet_centred_frame(), None);
    }

    #[test]
    fn test_mission_window() {
        let d = |x| CalendarDate::new(x).unwrap();
        assert!(Body::Messenger.in_mission_window(d(20110323)));
        assert!(Body::Messenger.in_mission_window(d(20150430)));
        assert!(!Body::Messenger.in_mission_window(d(20150501)));
        assert!(Body::Earth.in_mission_window(d(19000101)));

        let err = Body::VenusExpress
            .check_mission_window(d(20150101))
            .unwrap_err();
        assert!(err.is_upstream());

        // the literals used for the windows are real dates
        for body in Body::ALL {
            if let Some((first, last)) = body.mission_window() {
                assert!(CalendarDate::new(first.as_u32()).is_ok());
                assert!(CalendarDate::new(last.as_u32()).is_ok());
                assert!(first < last);
            }
        }
    }

    #[test]
    fn test_kernel_sets() {
        let earth = Body::Earth.kernel_set(Frame::IauSun);
        assert_eq!(earth.len(), 3);

        let earth_hci = Body::Earth.kernel_set(Frame::Hci);
        assert!(earth_hci.contains(kernels::HCI_TK));

        let msgr = Body::Messenger.kernel_set(Frame::MercuryMso);
        assert!(msgr.contains(kernels::MSO_TK));
        assert!(msgr.contains(kernels::MESSENGER_SPK));
        assert!(!msgr.contains(kernels::HCI_TK));
    }
}
