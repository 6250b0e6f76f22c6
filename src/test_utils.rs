//! Test utilities for the physics core.
//!
//! Provides fixtures for two-body setups around an Earth-like reference and
//! assertions for the invariants the simulation must hold: momentum and
//! kinetic energy through collisions, orbital energy and angular momentum
//! through gravity steps.

use bevy::math::DVec2;

use crate::body::{Body, Roster};
use crate::units::{G, Kilograms, Meters, Position2, Velocity2};

/// Reference-body parameters shared by the fixtures. Earth-like numbers so
/// test tolerances relate to familiar scales.
pub const REF_MASS: f64 = 5.972e24;
pub const REF_RADIUS: f64 = 6.371e6;
pub const REF_MU: f64 = G * REF_MASS;

/// Fixtures for building test rosters.
pub mod fixtures {
    use super::*;

    /// The reference body, named "Earth", at the origin and at rest.
    pub fn reference() -> Body {
        Body::new(
            "Earth",
            Position2::ZERO,
            Velocity2::ZERO,
            Kilograms::new(REF_MASS),
            Meters::new(REF_RADIUS),
        )
        .expect("reference fixture is valid")
    }

    /// A small craft named "AC" at the given state.
    pub fn craft(position: Position2, velocity: Velocity2) -> Body {
        Body::new("AC", position, velocity, Kilograms::new(1.2e5), Meters::new(30.0))
            .expect("craft fixture is valid")
    }

    /// Reference plus a craft in a circular orbit of radius `r`, placed on
    /// the positive x-axis with velocity in +y.
    pub fn circular_orbit(r: f64) -> Roster {
        let v = (REF_MU / r).sqrt();
        Roster::from_bodies([
            reference(),
            craft(Position2::new(r, 0.0), Velocity2::new(0.0, v)),
        ])
    }

    /// Reference plus a craft at periapsis of an elliptical orbit.
    pub fn elliptical_orbit(periapsis: f64, eccentricity: f64) -> Roster {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "eccentricity must be in [0, 1) for a bound orbit"
        );
        let a = periapsis / (1.0 - eccentricity);
        // Vis-viva at periapsis.
        let v = (REF_MU * (2.0 / periapsis - 1.0 / a)).sqrt();
        Roster::from_bodies([
            reference(),
            craft(Position2::new(periapsis, 0.0), Velocity2::new(0.0, v)),
        ])
    }

    /// Reference plus a craft on a hyperbolic trajectory (1.1× escape
    /// speed, tangential).
    pub fn escape_trajectory(r: f64) -> Roster {
        let v = 1.1 * (2.0 * REF_MU / r).sqrt();
        Roster::from_bodies([
            reference(),
            craft(Position2::new(r, 0.0), Velocity2::new(0.0, v)),
        ])
    }

    /// Two unit-mass balls on the x-axis, exactly touching at t=0 and
    /// closing head-on at a combined 10 m/s. The canonical elastic-exchange
    /// scenario: equal masses fully swap their normal components.
    pub fn head_on_pair() -> Roster {
        Roster::from_bodies([ball("A", 0.0, 5.0), ball("B", 10.0, -5.0)])
    }

    /// Unit-mass, radius-5 ball on the x-axis.
    pub fn ball(name: &str, x: f64, vx: f64) -> Body {
        Body::new(
            name,
            Position2::new(x, 0.0),
            Velocity2::new(vx, 0.0),
            Kilograms::new(1.0),
            Meters::new(5.0),
        )
        .expect("ball fixture is valid")
    }
}

/// Assertions and observables for physical invariants.
pub mod assertions {
    use super::*;

    /// Total linear momentum of a body set (kg·m/s).
    pub fn total_momentum(bodies: &[Body]) -> DVec2 {
        bodies
            .iter()
            .map(|b| b.velocity.as_dvec2() * b.mass().value())
            .sum()
    }

    /// Total kinetic energy of a body set (J).
    pub fn total_kinetic_energy(bodies: &[Body]) -> f64 {
        bodies
            .iter()
            .map(|b| 0.5 * b.mass().value() * b.velocity.as_dvec2().length_squared())
            .sum()
    }

    /// Specific orbital energy of `craft` about `reference`: ε = v²/2 − μ/r.
    pub fn orbital_energy(craft: &Body, reference: &Body) -> f64 {
        let r = craft.position.distance(reference.position).value();
        let v = (craft.velocity - reference.velocity).length().value();
        0.5 * v * v - G * reference.mass().value() / r
    }

    /// Specific angular momentum of `craft` about `reference` (2D scalar).
    pub fn angular_momentum(craft: &Body, reference: &Body) -> f64 {
        let r = (craft.position - reference.position).as_dvec2();
        let v = (craft.velocity - reference.velocity).as_dvec2();
        r.perp_dot(v)
    }

    /// Orbital period for semi-major axis `a` around the standard
    /// reference, from Kepler's third law.
    pub fn orbital_period(a: f64) -> f64 {
        use std::f64::consts::TAU;
        TAU * (a.powi(3) / REF_MU).sqrt()
    }

    /// Assert a scalar invariant drifted no more than `tolerance`
    /// (relative where the initial value is meaningfully nonzero).
    ///
    /// # Panics
    /// Panics with both values and the drift when the tolerance is exceeded.
    pub fn assert_conserved(label: &str, initial: f64, current: f64, tolerance: f64) {
        let drift = if initial.abs() > 1e-10 {
            ((current - initial) / initial).abs()
        } else {
            (current - initial).abs()
        };
        assert!(
            drift <= tolerance,
            "{label} not conserved: initial={initial:.6e}, current={current:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_fixture_is_bound_and_tangential() {
        let roster = fixtures::circular_orbit(REF_RADIUS + 400_000.0);
        let craft = roster.get("AC").unwrap();
        let earth = roster.get("Earth").unwrap();

        assert!(
            assertions::orbital_energy(craft, earth) < 0.0,
            "circular orbit fixture must be bound"
        );
        assert_relative_eq!(
            craft.position.as_dvec2().dot(craft.velocity.as_dvec2()),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_escape_fixture_is_unbound() {
        let roster = fixtures::escape_trajectory(REF_RADIUS + 400_000.0);
        let craft = roster.get("AC").unwrap();
        let earth = roster.get("Earth").unwrap();
        assert!(assertions::orbital_energy(craft, earth) > 0.0);
    }

    #[test]
    fn test_elliptical_fixture_matches_requested_eccentricity() {
        let r_p = REF_RADIUS + 400_000.0;
        let e = 0.3;
        let roster = fixtures::elliptical_orbit(r_p, e);
        let craft = roster.get("AC").unwrap();
        let earth = roster.get("Earth").unwrap();

        let energy = assertions::orbital_energy(craft, earth);
        let h = assertions::angular_momentum(craft, earth);
        let e_back = (1.0 + 2.0 * energy * h * h / (REF_MU * REF_MU)).sqrt();
        assert_relative_eq!(e_back, e, max_relative = 1e-9);
    }

    #[test]
    fn test_head_on_fixture_carries_zero_net_momentum() {
        let roster = fixtures::head_on_pair();
        let p = assertions::total_momentum(roster.bodies());
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn test_leo_period_is_about_92_minutes() {
        let period = assertions::orbital_period(REF_RADIUS + 400_000.0);
        assert_relative_eq!(period / 60.0, 92.5, epsilon = 1.0);
    }
}
