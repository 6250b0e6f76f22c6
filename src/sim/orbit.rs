//! Orbital descriptors for a control body relative to a reference body.
//!
//! Everything here is a pure function of the two bodies at the instant of
//! the call, under a two-body approximation around the reference
//! (μ = G·reference mass). Undefined elements come back as errors, never as
//! NaN: a radial dive has no apsides, an unbound trajectory has no
//! apoapsis, and a zero separation cannot be divided by.

use bevy::math::DVec2;

use crate::body::{Body, Roster};
use crate::error::PhysicsError;
use crate::units::{
    Force2, G, Meters, MetersPerSecond, MetersPerSecondSquared, Seconds,
};

/// Deceleration policy behind the stopping-acceleration readout.
///
/// All policies assume a constant braking acceleration opposed to the
/// current relative velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StoppingProfile {
    /// Bring relative speed to zero within a fixed time horizon: a = v/T.
    WithinTime(Seconds),
    /// Bring relative speed to zero within a fixed distance: a = v²/(2d).
    WithinDistance(Meters),
    /// Stop before reaching the reference surface, using the current
    /// altitude as the available distance. The classic suicide-burn gauge.
    BeforeSurface,
}

/// Distance from the reference body's *surface*, the datum every readout
/// uses. Negative once the control body's center is inside the reference.
pub fn altitude(control: &Body, reference: &Body) -> Result<Meters, PhysicsError> {
    guard(control, reference)?;
    let state = relative_state(control, reference);
    Ok(Meters::new(state.r) - reference.radius())
}

/// Speed of the control body relative to the reference body.
pub fn relative_speed(control: &Body, reference: &Body) -> Result<MetersPerSecond, PhysicsError> {
    guard(control, reference)?;
    let state = relative_state(control, reference);
    Ok(MetersPerSecond::new(state.speed))
}

/// Gravitational force exerted on the control body by the reference,
/// G·m_control·m_reference/r², pointing from control toward reference.
pub fn gravitational_force(control: &Body, reference: &Body) -> Result<Force2, PhysicsError> {
    guard(control, reference)?;
    let state = separated(control, reference)?;

    let magnitude =
        G * control.mass().value() * reference.mass().value() / (state.r * state.r);
    let toward_reference = -state.r_vec / state.r;
    Ok(Force2::from_dvec2(toward_reference * magnitude))
}

/// Magnitude of the control body's non-gravitational acceleration: the net
/// acceleration recorded by the last integrator step minus the reference's
/// pull at the current position. This is the HUD "Acceleration" line — what
/// the pilot's engines (plus any third body) are contributing.
pub fn thrust_acceleration(
    control: &Body,
    reference: &Body,
) -> Result<MetersPerSecondSquared, PhysicsError> {
    let pull = gravitational_force(control, reference)? / control.mass();
    let residual = control.acceleration() - pull;
    Ok(residual.length())
}

/// Orbital speed ("Vorbit"): the speed of a circular orbit at the current
/// distance, sqrt(μ/r). This is the target the pilot compares `speed`
/// against when circularizing.
pub fn orbital_speed(control: &Body, reference: &Body) -> Result<MetersPerSecond, PhysicsError> {
    guard(control, reference)?;
    let state = separated(control, reference)?;
    Ok(MetersPerSecond::new((state.mu / state.r).sqrt()))
}

/// General vis-viva speed v = sqrt(μ·(2/r − 1/a)) for an orbit of
/// semi-major axis `a` around the reference, evaluated at distance `r`.
pub fn vis_viva_speed(
    reference: &Body,
    distance: Meters,
    semi_major_axis: Meters,
) -> Result<MetersPerSecond, PhysicsError> {
    reference.validate()?;
    if distance.value() <= 0.0 {
        return Err(undefined(
            "vis-viva speed",
            reference,
            reference,
            "non-positive distance",
        ));
    }
    if semi_major_axis.value() == 0.0 {
        return Err(undefined(
            "vis-viva speed",
            reference,
            reference,
            "zero semi-major axis",
        ));
    }

    let mu = G * reference.mass().value();
    let v_squared = mu * (2.0 / distance.value() - 1.0 / semi_major_axis.value());
    if v_squared < 0.0 {
        return Err(undefined(
            "vis-viva speed",
            reference,
            reference,
            "no point of that orbit lies at the given distance",
        ));
    }
    Ok(MetersPerSecond::new(v_squared.sqrt()))
}

/// Specific orbital energy ε = v²/2 − μ/r (J/kg) of the control body's
/// trajectory around the reference. Negative for bound orbits.
pub fn specific_orbital_energy(control: &Body, reference: &Body) -> Result<f64, PhysicsError> {
    guard(control, reference)?;
    let state = separated(control, reference)?;
    Ok(state.energy())
}

/// Specific angular momentum h = r × v (m²/s, 2D scalar cross product) of
/// the control body's motion about the reference.
pub fn specific_angular_momentum(
    control: &Body,
    reference: &Body,
) -> Result<f64, PhysicsError> {
    guard(control, reference)?;
    let state = relative_state(control, reference);
    Ok(state.angular_momentum())
}

/// Eccentricity of the current trajectory, e = sqrt(1 + 2εh²/μ²).
pub fn eccentricity(control: &Body, reference: &Body) -> Result<f64, PhysicsError> {
    guard(control, reference)?;
    let state = separated(control, reference)?;
    Ok(state.eccentricity())
}

/// Closest approach of the current trajectory, from the conic relation
/// r_p = (h²/μ)/(1+e). Defined for every trajectory with nonzero angular
/// momentum.
pub fn periapsis(control: &Body, reference: &Body) -> Result<Meters, PhysicsError> {
    guard(control, reference)?;
    let state = separated(control, reference)?;

    let h = state.angular_momentum();
    if h == 0.0 {
        return Err(undefined(
            "periapsis",
            control,
            reference,
            "zero angular momentum (radial trajectory)",
        ));
    }

    let semi_latus = h * h / state.mu;
    Ok(Meters::new(semi_latus / (1.0 + state.eccentricity())))
}

/// Farthest distance of the current orbit, a(1+e) with a = −μ/(2ε).
/// Defined only for bound orbits with nonzero angular momentum.
pub fn apoapsis(control: &Body, reference: &Body) -> Result<Meters, PhysicsError> {
    guard(control, reference)?;
    let state = separated(control, reference)?;

    if state.angular_momentum() == 0.0 {
        return Err(undefined(
            "apoapsis",
            control,
            reference,
            "zero angular momentum (radial trajectory)",
        ));
    }
    let energy = state.energy();
    if energy >= 0.0 {
        return Err(undefined(
            "apoapsis",
            control,
            reference,
            "trajectory is unbound (specific orbital energy >= 0)",
        ));
    }

    let semi_major = -state.mu / (2.0 * energy);
    Ok(Meters::new(semi_major * (1.0 + state.eccentricity())))
}

/// Constant braking acceleration needed to bring the relative speed to zero
/// under the given profile. Zero speed needs zero braking under any
/// profile.
pub fn stopping_acceleration(
    control: &Body,
    reference: &Body,
    profile: StoppingProfile,
) -> Result<MetersPerSecondSquared, PhysicsError> {
    let speed = relative_speed(control, reference)?;

    match profile {
        StoppingProfile::WithinTime(horizon) => {
            if horizon.value() <= 0.0 {
                return Err(undefined(
                    "stopping acceleration",
                    control,
                    reference,
                    "non-positive time horizon",
                ));
            }
            Ok(speed / horizon)
        }
        StoppingProfile::WithinDistance(distance) => {
            if distance.value() <= 0.0 {
                return Err(undefined(
                    "stopping acceleration",
                    control,
                    reference,
                    "non-positive stopping distance",
                ));
            }
            Ok(MetersPerSecondSquared::new(
                speed.value() * speed.value() / (2.0 * distance.value()),
            ))
        }
        StoppingProfile::BeforeSurface => {
            let alt = altitude(control, reference)?;
            if alt.value() <= 0.0 {
                return Err(undefined(
                    "stopping acceleration",
                    control,
                    reference,
                    "at or below the reference surface",
                ));
            }
            Ok(MetersPerSecondSquared::new(
                speed.value() * speed.value() / (2.0 * alt.value()),
            ))
        }
    }
}

/// Every display quantity for one (control, reference) pair, computed in
/// one call. Quantities that can be individually undefined keep their own
/// `Result`, so a radial dive still reads out altitude and speed.
#[derive(Clone, Debug)]
pub struct Readout {
    pub altitude: Meters,
    pub speed: MetersPerSecond,
    pub acceleration: Result<MetersPerSecondSquared, PhysicsError>,
    pub orbital_speed: Result<MetersPerSecond, PhysicsError>,
    pub periapsis: Result<Meters, PhysicsError>,
    pub apoapsis: Result<Meters, PhysicsError>,
    pub stopping_acc: Result<MetersPerSecondSquared, PhysicsError>,
}

impl Readout {
    /// Resolve both identities and compute the full readout.
    ///
    /// Fails as a whole only for conditions that invalidate every quantity:
    /// unknown names, invalid body state, or control == reference.
    pub fn compute(
        roster: &Roster,
        control: &str,
        reference: &str,
        profile: StoppingProfile,
    ) -> Result<Self, PhysicsError> {
        let control = roster.find(control)?;
        let reference = roster.find(reference)?;
        guard(control, reference)?;

        Ok(Self {
            altitude: altitude(control, reference)?,
            speed: relative_speed(control, reference)?,
            acceleration: thrust_acceleration(control, reference),
            orbital_speed: orbital_speed(control, reference),
            periapsis: periapsis(control, reference),
            apoapsis: apoapsis(control, reference),
            stopping_acc: stopping_acceleration(control, reference, profile),
        })
    }
}

/// Relative two-body state, SI floats. Built after the pair guard.
struct RelativeState {
    r_vec: DVec2,
    v_vec: DVec2,
    r: f64,
    speed: f64,
    mu: f64,
}

impl RelativeState {
    fn energy(&self) -> f64 {
        0.5 * self.speed * self.speed - self.mu / self.r
    }

    fn angular_momentum(&self) -> f64 {
        self.r_vec.perp_dot(self.v_vec)
    }

    fn eccentricity(&self) -> f64 {
        let h = self.angular_momentum();
        let e_squared = 1.0 + 2.0 * self.energy() * h * h / (self.mu * self.mu);
        // Rounding can push a circular orbit's e² a hair below zero.
        e_squared.max(0.0).sqrt()
    }
}

/// Checks every analyzer entry point shares: both bodies valid, and not the
/// same entity.
fn guard(control: &Body, reference: &Body) -> Result<(), PhysicsError> {
    control.validate()?;
    reference.validate()?;
    if control.name() == reference.name() {
        return Err(PhysicsError::degenerate(control.name(), reference.name()));
    }
    Ok(())
}

fn relative_state(control: &Body, reference: &Body) -> RelativeState {
    let r_vec = (control.position - reference.position).as_dvec2();
    let v_vec = (control.velocity - reference.velocity).as_dvec2();
    RelativeState {
        r_vec,
        v_vec,
        r: r_vec.length(),
        speed: v_vec.length(),
        mu: G * reference.mass().value(),
    }
}

/// As [`relative_state`], but zero separation is an error (the caller is
/// about to divide by r).
fn separated(control: &Body, reference: &Body) -> Result<RelativeState, PhysicsError> {
    let state = relative_state(control, reference);
    if state.r == 0.0 {
        return Err(PhysicsError::degenerate(control.name(), reference.name()));
    }
    Ok(state)
}

fn undefined(
    element: &'static str,
    control: &Body,
    reference: &Body,
    reason: &str,
) -> PhysicsError {
    PhysicsError::UndefinedOrbitalElement {
        element,
        control: control.name().to_string(),
        reference: reference.name().to_string(),
        reason: reason.to_string(),
    }
}
