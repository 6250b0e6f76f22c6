//! Mutual-gravity acceleration pass and the semi-implicit Euler step.
//!
//! Accelerations are computed from a start-of-step snapshot of positions and
//! masses, so the result does not depend on which body happens to be updated
//! first. The step then kicks velocities with the updated accelerations and
//! drifts positions with the updated velocities (symplectic order), which
//! keeps orbital energy drift bounded at sane step sizes.

use std::f64::consts::TAU;

use bevy::math::DVec2;

use crate::body::{Body, Roster};
use crate::error::PhysicsError;
use crate::units::{Acceleration2, G, Seconds};

/// Compute the net gravitational acceleration on every body.
///
/// Each unordered pair is evaluated once: the contribution on `i` from `j`
/// is G·m_j/r² toward `j`, and the opposite contribution on `j` reuses the
/// same distance. Index order is fixed by the roster's name order, so the
/// floating-point sums are reproducible for a given body set.
///
/// # Errors
/// `DegenerateGeometry` if two bodies sit at exactly the same position; the
/// collision pass is expected to have separated them before this runs.
pub fn accelerations(bodies: &[Body]) -> Result<Vec<Acceleration2>, PhysicsError> {
    let mut acc = vec![DVec2::ZERO; bodies.len()];

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let delta = bodies[j].position.as_dvec2() - bodies[i].position.as_dvec2();
            let r_squared = delta.length_squared();

            if r_squared == 0.0 {
                return Err(PhysicsError::degenerate(bodies[i].name(), bodies[j].name()));
            }

            let r = r_squared.sqrt();
            // delta/r is the unit vector from i toward j
            let coef = G / (r_squared * r);
            acc[i] += delta * (coef * bodies[j].mass().value());
            acc[j] -= delta * (coef * bodies[i].mass().value());
        }
    }

    Ok(acc.into_iter().map(Acceleration2::from_dvec2).collect())
}

/// Advance the whole roster by `dt` under mutual gravity and queued thrust.
///
/// Semi-implicit Euler: velocity += acceleration·dt, then position +=
/// *updated* velocity·dt. Spin states integrate in the same order. Each
/// body's net acceleration (gravity + thrust) is recorded for readouts and
/// its thrust accumulator cleared.
///
/// Collision handling is separate; use [`crate::sim::tick`] for the full
/// step including impact resolution.
pub fn step(roster: &mut Roster, dt: Seconds) -> Result<(), PhysicsError> {
    roster.validate()?;
    kick(roster, dt)?;
    drift(roster, dt);
    Ok(())
}

/// Velocity half of the step: gravity + queued thrust into velocities and
/// angular velocities. Positions are untouched.
///
/// Callers must validate the roster first.
pub(crate) fn kick(roster: &mut Roster, dt: Seconds) -> Result<(), PhysicsError> {
    let grav = accelerations(roster.bodies())?;

    for (body, gravity) in roster.bodies_mut().iter_mut().zip(grav) {
        let net = gravity + body.pending_thrust();
        body.velocity += net * dt;
        body.record_step_acceleration(net);

        if let Some(spin) = &mut body.spin {
            spin.angular_velocity += spin.angular_acceleration * dt.value();
        }
    }

    Ok(())
}

/// Position half of the step: linear motion at current velocities, plus
/// orientation advance for spinning bodies. Also used by the collision
/// sweep to move the roster between impact instants.
pub(crate) fn drift(roster: &mut Roster, dt: Seconds) {
    for body in roster.iter_mut() {
        body.position += body.velocity * dt;

        if let Some(spin) = &body.spin {
            // Orientation stays in [0, TAU).
            body.orientation = (body.orientation + spin.angular_velocity * dt.value()).rem_euclid(TAU);
        }
    }
}
