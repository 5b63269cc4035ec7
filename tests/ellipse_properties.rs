use approx::assert_relative_eq;
use heliorbit::body::Body;
use heliorbit::constants::ELLIPSE_SAMPLES;
use heliorbit::orbit::{build_ellipse, OrbitalElements};

#[test]
fn reference_orbits_are_closed() {
    for body in Body::PLANETS {
        let elements = body.reference_elements().unwrap();
        let curve = build_ellipse(&elements).to_frame(&elements);
        assert_eq!(curve.len(), ELLIPSE_SAMPLES);

        let first = curve.points()[0];
        let last = curve.points()[ELLIPSE_SAMPLES - 1];
        assert_relative_eq!(
            (first - last).norm() / elements.semi_major_axis(),
            0.0,
            epsilon = 1e-12
        );
    }
}

#[test]
fn distances_stay_between_apsides() {
    for body in Body::PLANETS {
        let elements = body.reference_elements().unwrap();
        let curve = build_ellipse(&elements).to_frame(&elements);
        let rp = elements.periapsis_distance();
        let ra = elements.apoapsis_distance();

        for p in curve.points() {
            let r = p.norm();
            assert!(r >= rp * (1.0 - 1e-12) && r <= ra * (1.0 + 1e-12), "{body}: {r}");
        }
        assert_relative_eq!(curve.points()[0].norm(), rp, max_relative = 1e-12);
        assert_relative_eq!(curve.points()[180].norm(), ra, max_relative = 1e-12);
    }
}

#[test]
fn earth_periapsis() {
    let earth = Body::Earth.reference_elements().unwrap();
    let curve = build_ellipse(&earth).to_frame(&earth);
    assert_relative_eq!(curve.points()[0].norm(), 147098449.4729, max_relative = 1e-9);
}

#[test]
fn circular_orbit() {
    let circle = OrbitalElements::from_degrees(1.0e8, 0.0, 10.0, 30.0, 0.0).unwrap();
    let curve = build_ellipse(&circle).to_frame(&circle);
    for p in curve.points() {
        assert_relative_eq!(p.norm(), 1.0e8, max_relative = 1e-12);
    }
}

#[test]
fn orbit_plane_contains_the_normal() {
    let mercury = Body::Mercury.reference_elements().unwrap();
    let curve = build_ellipse(&mercury).to_frame(&mercury);
    let p = curve.points();
    let normal = p[0].cross(&p[90]).normalize();

    // inclination of the plane on the ecliptic
    assert_relative_eq!(normal.z.acos(), mercury.inclination(), epsilon = 1e-12);
    for point in p {
        assert_relative_eq!(point.dot(&normal) / mercury.semi_major_axis(), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn inverse_rotation_recovers_the_planar_ellipse() {
    let mars = Body::Mars.reference_elements().unwrap();
    let planar = build_ellipse(&mars);
    let back = planar.to_frame(&mars).to_planar(&mars);

    for (a, b) in planar.points().iter().zip(back.points()) {
        assert_relative_eq!(a.x, b.x, max_relative = 1e-10, epsilon = 1e-4);
        assert_relative_eq!(a.y, b.y, max_relative = 1e-10, epsilon = 1e-4);
    }
}
