//! Property-based tests for the collision and gravity passes.
//!
//! These verify the physical invariants across wide parameter ranges:
//! momentum and kinetic energy through elastic resolution, tangential
//! invariance, relabeling symmetry, and circular-orbit stability under the
//! integrator.

use std::f64::consts::TAU;

use bevy::math::DVec2;
use proptest::prelude::*;

use crate::body::{Body, Roster};
use crate::sim::{collision, gravity};
use crate::test_utils::{REF_RADIUS, assertions, fixtures};
use crate::units::{Kilograms, Meters, Position2, Seconds, Velocity2};

/// Two unit-radius bodies exactly in contact along the direction `angle`,
/// with arbitrary velocities and masses.
fn touching_pair(
    angle: f64,
    mass_a: f64,
    mass_b: f64,
    vel_a: DVec2,
    vel_b: DVec2,
) -> (Body, Body) {
    let offset = DVec2::from_angle(angle) * 2.0;
    let a = Body::new(
        "a",
        Position2::ZERO,
        Velocity2::from_dvec2(vel_a),
        Kilograms::new(mass_a),
        Meters::new(1.0),
    )
    .expect("valid test body");
    let b = Body::new(
        "b",
        Position2::from_dvec2(offset),
        Velocity2::from_dvec2(vel_b),
        Kilograms::new(mass_b),
        Meters::new(1.0),
    )
    .expect("valid test body");
    (a, b)
}

fn is_closing(a: &Body, b: &Body) -> bool {
    let dp = a.position.as_dvec2() - b.position.as_dvec2();
    let dv = a.velocity.as_dvec2() - b.velocity.as_dvec2();
    dp.dot(dv) < 0.0
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Elastic resolution preserves total linear momentum.
    #[test]
    fn prop_collision_conserves_momentum(
        angle in 0.0..TAU,
        mass_a in 0.1f64..100.0,
        mass_b in 0.1f64..100.0,
        vax in -50.0f64..50.0, vay in -50.0f64..50.0,
        vbx in -50.0f64..50.0, vby in -50.0f64..50.0,
    ) {
        let (a, b) = touching_pair(angle, mass_a, mass_b, DVec2::new(vax, vay), DVec2::new(vbx, vby));
        prop_assume!(is_closing(&a, &b));

        let mut roster = Roster::from_bodies([a, b]);
        let before = assertions::total_momentum(roster.bodies());

        let reports = collision::resolve(&mut roster, Seconds::new(0.1)).unwrap();
        prop_assert_eq!(reports.len(), 1, "a closing touching pair must resolve");

        let after = assertions::total_momentum(roster.bodies());
        let scale = 1.0 + before.length();
        prop_assert!(
            (after - before).length() <= 1e-9 * scale,
            "momentum drifted from {:?} to {:?}",
            before, after
        );
    }

    /// Elastic resolution preserves total kinetic energy.
    #[test]
    fn prop_collision_conserves_kinetic_energy(
        angle in 0.0..TAU,
        mass_a in 0.1f64..100.0,
        mass_b in 0.1f64..100.0,
        vax in -50.0f64..50.0, vay in -50.0f64..50.0,
        vbx in -50.0f64..50.0, vby in -50.0f64..50.0,
    ) {
        let (a, b) = touching_pair(angle, mass_a, mass_b, DVec2::new(vax, vay), DVec2::new(vbx, vby));
        prop_assume!(is_closing(&a, &b));

        let mut roster = Roster::from_bodies([a, b]);
        let before = assertions::total_kinetic_energy(roster.bodies());

        collision::resolve(&mut roster, Seconds::new(0.1)).unwrap();

        let after = assertions::total_kinetic_energy(roster.bodies());
        let drift = ((after - before) / before.max(1e-12)).abs();
        prop_assert!(
            drift <= 1e-9,
            "kinetic energy drifted by {:.3e} (before={:.6e}, after={:.6e})",
            drift, before, after
        );
    }

    /// The velocity component perpendicular to the contact normal rides
    /// through resolution untouched on both bodies.
    #[test]
    fn prop_collision_keeps_tangential_components(
        angle in 0.0..TAU,
        mass_a in 0.1f64..100.0,
        mass_b in 0.1f64..100.0,
        vax in -50.0f64..50.0, vay in -50.0f64..50.0,
        vbx in -50.0f64..50.0, vby in -50.0f64..50.0,
    ) {
        let (a, b) = touching_pair(angle, mass_a, mass_b, DVec2::new(vax, vay), DVec2::new(vbx, vby));
        prop_assume!(is_closing(&a, &b));

        // Impact is at t=0, so the contact normal is the current offset.
        let normal = (a.position.as_dvec2() - b.position.as_dvec2()).normalize();
        let tangent = normal.perp();
        let a_before = a.velocity.component_along(tangent).value();
        let b_before = b.velocity.component_along(tangent).value();

        let mut roster = Roster::from_bodies([a, b]);
        collision::resolve(&mut roster, Seconds::new(0.0)).unwrap();

        let a_after = roster.get("a").unwrap().velocity.component_along(tangent).value();
        let b_after = roster.get("b").unwrap().velocity.component_along(tangent).value();
        prop_assert!((a_after - a_before).abs() <= 1e-9 * (1.0 + a_before.abs()));
        prop_assert!((b_after - b_before).abs() <= 1e-9 * (1.0 + b_before.abs()));
    }

    /// Relabeling the pair (and therefore flipping the roster's index
    /// order) leaves the physical outcome unchanged.
    #[test]
    fn prop_resolution_symmetric_under_relabeling(
        angle in 0.0..TAU,
        mass_a in 0.1f64..100.0,
        mass_b in 0.1f64..100.0,
        vax in -50.0f64..50.0, vay in -50.0f64..50.0,
        vbx in -50.0f64..50.0, vby in -50.0f64..50.0,
    ) {
        let (a, b) = touching_pair(angle, mass_a, mass_b, DVec2::new(vax, vay), DVec2::new(vbx, vby));
        prop_assume!(is_closing(&a, &b));

        // Same states under swapped names: "alpha" sorts first in one
        // roster, last in the other.
        let relabel = |body: &Body, name: &str| {
            Body::new(
                name,
                body.position,
                body.velocity,
                body.mass(),
                body.radius(),
            )
            .expect("valid test body")
        };
        let mut forward = Roster::from_bodies([relabel(&a, "alpha"), relabel(&b, "beta")]);
        let mut backward = Roster::from_bodies([relabel(&a, "beta"), relabel(&b, "alpha")]);

        collision::resolve(&mut forward, Seconds::new(0.1)).unwrap();
        collision::resolve(&mut backward, Seconds::new(0.1)).unwrap();

        let f_a = forward.get("alpha").unwrap();
        let b_a = backward.get("beta").unwrap();
        prop_assert!(
            (f_a.velocity.as_dvec2() - b_a.velocity.as_dvec2()).length() <= 1e-9,
            "first body's outcome depends on labels: {:?} vs {:?}",
            f_a.velocity, b_a.velocity
        );

        let f_b = forward.get("beta").unwrap();
        let b_b = backward.get("alpha").unwrap();
        prop_assert!(
            (f_b.velocity.as_dvec2() - b_b.velocity.as_dvec2()).length() <= 1e-9,
            "second body's outcome depends on labels: {:?} vs {:?}",
            f_b.velocity, b_b.velocity
        );
    }

    /// For a head-on approach the quadratic solver reproduces the
    /// closed-form impact time gap/speed.
    #[test]
    fn prop_head_on_impact_time_matches_closed_form(
        gap in 0.1f64..100.0,
        speed in 0.1f64..50.0,
        radius_a in 0.5f64..10.0,
        radius_b in 0.5f64..10.0,
    ) {
        let mut roster = Roster::from_bodies([
            Body::new(
                "mover",
                Position2::ZERO,
                Velocity2::new(speed, 0.0),
                Kilograms::new(1.0),
                Meters::new(radius_a),
            )
            .unwrap(),
            Body::new(
                "target",
                Position2::new(radius_a + radius_b + gap, 0.0),
                Velocity2::ZERO,
                Kilograms::new(1.0),
                Meters::new(radius_b),
            )
            .unwrap(),
        ]);

        let expected = gap / speed;
        let reports = collision::resolve(&mut roster, Seconds::new(expected + 1.0)).unwrap();

        prop_assert_eq!(reports.len(), 1);
        let t = reports[0].at.value();
        prop_assert!(
            (t - expected).abs() <= 1e-9 * (1.0 + expected),
            "impact at {} but gap/speed gives {}",
            t, expected
        );
    }

    /// A craft at circular speed keeps its distance from the reference
    /// bounded over many integrator steps.
    #[test]
    fn prop_circular_orbit_distance_stays_bounded(
        altitude_factor in 0.05f64..3.0,
    ) {
        let r = REF_RADIUS * (1.0 + altitude_factor);
        let mut roster = fixtures::circular_orbit(r);
        let dt = Seconds::new(1.0);

        for _ in 0..2000 {
            gravity::step(&mut roster, dt).unwrap();
        }

        let craft = roster.get("AC").unwrap();
        let earth = roster.get("Earth").unwrap();
        let distance = craft.position.distance(earth.position).value();
        let drift = ((distance - r) / r).abs();
        prop_assert!(
            drift < 0.01,
            "circular orbit radius drifted {:.4}% after 2000 s",
            drift * 100.0
        );
    }
}
