//! # Reference orbits
//!
//! Classical [`OrbitalElements`] and the idealized ellipse built from them
//! ([`build_ellipse`] then [`PlanarEllipse::to_frame`]).
//!
//! ## Example
//!
//! ```rust
//! use heliorbit::orbit::{build_ellipse, OrbitalElements};
//!
//! let earth = OrbitalElements::from_degrees(
//!     149598023.0, 0.0167086, 7.155, -11.26064, 114.20783,
//! ).unwrap();
//! let hae = build_ellipse(&earth).to_frame(&earth);
//! assert_eq!(hae.len(), 361);
//! ```
pub mod elements;
pub mod ellipse;

pub use elements::OrbitalElements;
pub use ellipse::{build_ellipse, rot_trans, rotate_orbital_plane, PlanarEllipse, SpatialCurve};
