//! Simulated bodies and the name-ordered roster holding them.
//!
//! Bodies are created by the driving application before a session; the
//! physics passes only mutate state in place. Mass and radius are validated
//! at construction and immutable afterwards, since the gravity and collision
//! code divides by them.

use bevy::prelude::*;

use crate::error::PhysicsError;
use crate::units::{Acceleration2, Force2, Kilograms, Meters, Position2, Velocity2};

/// Angular state carried by orientable ("habitat"-like) bodies.
///
/// Plain circular bodies have no spin record and keep a fixed orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spin {
    /// Angular velocity in rad/s, counterclockwise positive
    pub angular_velocity: f64,
    /// Angular acceleration in rad/s²
    pub angular_acceleration: f64,
}

/// One rigid circular body.
///
/// Uses f64-backed vectors for physics accuracy over planetary scales.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Stable identity; lookups use this name.
    name: String,
    /// Position in meters, world frame
    pub position: Position2,
    /// Velocity in meters per second
    pub velocity: Velocity2,
    /// Mass in kilograms, strictly positive
    mass: Kilograms,
    /// Collision radius in meters, non-negative
    radius: Meters,
    /// Facing angle in radians, independent of translational state
    pub orientation: f64,
    /// Angular state; `None` for bodies that never rotate
    pub spin: Option<Spin>,
    /// Net acceleration over the most recent step (gravity + thrust)
    acceleration: Acceleration2,
    /// Thrust accumulated since the last step, applied by the next one
    pending_thrust: Acceleration2,
}

impl Body {
    /// Create a body, rejecting state the physics passes cannot divide by:
    /// non-positive or non-finite mass, negative radius, non-finite
    /// position/velocity.
    pub fn new(
        name: impl Into<String>,
        position: Position2,
        velocity: Velocity2,
        mass: Kilograms,
        radius: Meters,
    ) -> Result<Self, PhysicsError> {
        let name = name.into();
        if !mass.is_finite() || mass.value() <= 0.0 {
            return Err(PhysicsError::invalid_state(
                &name,
                format!("mass must be positive and finite, got {}", mass.value()),
            ));
        }
        if !radius.is_finite() || radius.value() < 0.0 {
            return Err(PhysicsError::invalid_state(
                &name,
                format!("radius must be non-negative, got {}", radius.value()),
            ));
        }
        if !position.is_finite() || !velocity.is_finite() {
            return Err(PhysicsError::invalid_state(
                &name,
                "position and velocity must be finite",
            ));
        }
        Ok(Self {
            name,
            position,
            velocity,
            mass,
            radius,
            orientation: 0.0,
            spin: None,
            acceleration: Acceleration2::ZERO,
            pending_thrust: Acceleration2::ZERO,
        })
    }

    /// Attach an angular state, making the body orientable.
    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = Some(spin);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> Kilograms {
        self.mass
    }

    pub fn radius(&self) -> Meters {
        self.radius
    }

    /// Net acceleration recorded by the most recent integrator step.
    pub fn acceleration(&self) -> Acceleration2 {
        self.acceleration
    }

    /// Thrust queued for the next integrator step.
    pub fn pending_thrust(&self) -> Acceleration2 {
        self.pending_thrust
    }

    /// Queue a thrust force for the next integrator step.
    ///
    /// Contributions accumulate; the step consumes them all at once.
    pub fn accelerate(&mut self, force: Force2) {
        self.pending_thrust += force / self.mass;
    }

    /// Record the net acceleration the step integrated with and clear the
    /// thrust accumulator. Called once per body per step.
    pub(crate) fn record_step_acceleration(&mut self, net: Acceleration2) {
        self.acceleration = net;
        self.pending_thrust = Acceleration2::ZERO;
    }

    /// Re-check the mutable state the driver can reach between steps.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(PhysicsError::invalid_state(
                &self.name,
                "position and velocity must be finite",
            ));
        }
        if !self.orientation.is_finite() {
            return Err(PhysicsError::invalid_state(
                &self.name,
                "orientation must be finite",
            ));
        }
        if let Some(spin) = &self.spin {
            if !spin.angular_velocity.is_finite() || !spin.angular_acceleration.is_finite() {
                return Err(PhysicsError::invalid_state(
                    &self.name,
                    "angular state must be finite",
                ));
            }
        }
        if !self.pending_thrust.is_finite() {
            return Err(PhysicsError::invalid_state(
                &self.name,
                "queued thrust must be finite",
            ));
        }
        if mass_invalid(self.mass) {
            return Err(PhysicsError::invalid_state(
                &self.name,
                format!("mass must be positive and finite, got {}", self.mass.value()),
            ));
        }
        Ok(())
    }
}

fn mass_invalid(mass: Kilograms) -> bool {
    !mass.is_finite() || mass.value() <= 0.0
}

/// The entity collection owned by the driver, ordered by body name.
///
/// Names are unique; inserting under an existing name replaces that body.
/// The physics passes index into the underlying slice, so iteration order
/// (and therefore floating-point summation order) is deterministic.
#[derive(Resource, Clone, Debug, Default)]
pub struct Roster {
    bodies: Vec<Body>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from bodies in any order.
    pub fn from_bodies(bodies: impl IntoIterator<Item = Body>) -> Self {
        let mut roster = Self::new();
        for body in bodies {
            roster.insert(body);
        }
        roster
    }

    /// Insert a body, keeping name order. Returns the previous body with the
    /// same name, if any.
    pub fn insert(&mut self, body: Body) -> Option<Body> {
        match self
            .bodies
            .binary_search_by(|b| b.name().cmp(body.name()))
        {
            Ok(i) => Some(std::mem::replace(&mut self.bodies[i], body)),
            Err(i) => {
                self.bodies.insert(i, body);
                None
            }
        }
    }

    /// Remove a body by name. The core never calls this; lifecycle belongs
    /// to the driver.
    pub fn remove(&mut self, name: &str) -> Option<Body> {
        self.index_of(name).map(|i| self.bodies.remove(i))
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.index_of(name).map(move |i| &mut self.bodies[i])
    }

    /// Lookup that reports a missing name as an error.
    pub fn find(&self, name: &str) -> Result<&Body, PhysicsError> {
        self.get(name).ok_or_else(|| PhysicsError::LookupFailure {
            name: name.to_string(),
        })
    }

    /// Mutable lookup that reports a missing name as an error.
    pub fn find_mut(&mut self, name: &str) -> Result<&mut Body, PhysicsError> {
        match self.index_of(name) {
            Some(i) => Ok(&mut self.bodies[i]),
            None => Err(PhysicsError::LookupFailure {
                name: name.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Names are immutable, so handing out mutable bodies cannot break the
    /// sort order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Boundary validation before a physics pass.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        for body in &self.bodies {
            body.validate()?;
        }
        Ok(())
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies
            .binary_search_by(|b| b.name().cmp(name))
            .ok()
    }
}
