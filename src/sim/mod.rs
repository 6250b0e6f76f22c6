//! Simulation driver layer.
//!
//! The physics lives in [`gravity`], [`collision`] and [`orbit`] as plain
//! functions over a [`Roster`]; this module schedules them. One simulation
//! tick is a gravity kick followed by the collision sweep, which owns all
//! position advancement for the step (through and between impacts), so
//! positions are written exactly once per tick.
//!
//! Embedders that are not Bevy apps can skip [`SimulationPlugin`] and call
//! [`tick`] (or the pass functions) directly.

pub mod collision;
pub mod gravity;
pub mod orbit;

#[cfg(test)]
mod proptest_sim;

use bevy::prelude::*;

use crate::body::Roster;
use crate::command::CommandQueue;
use crate::error::PhysicsError;
use crate::units::Seconds;

pub use collision::{DEFAULT_MAX_IMPACTS, Impact};
pub use orbit::{Readout, StoppingProfile};

/// Simulation clock: scales real elapsed time into simulation seconds.
#[derive(Resource, Clone, Debug)]
pub struct SimClock {
    /// Simulation seconds per real second. The accelerate-time pilot
    /// command adjusts this.
    pub scale: f64,
    /// Whether the simulation is paused
    pub paused: bool,
    /// Simulation seconds successfully integrated this session
    pub elapsed: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            scale: 1.0,
            paused: false,
            elapsed: 0.0,
        }
    }
}

/// Tuning for the per-step physics pass.
#[derive(Resource, Clone, Debug)]
pub struct SimConfig {
    /// Cap on collision resolutions within one step.
    pub max_impacts_per_step: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_impacts_per_step: DEFAULT_MAX_IMPACTS,
        }
    }
}

/// Event mirroring each resolved impact, for HUD/driver consumption.
#[derive(Message, Clone, Debug)]
pub struct CollisionEvent {
    pub impact: Impact,
}

/// Advance the roster by one step: gravity (and thrust) into velocities,
/// then the collision sweep carries positions through the window, resolving
/// impacts earliest-first.
///
/// On error the roster is untouched, except for a degenerate impact
/// geometry discovered mid-sweep, which leaves it at that impact instant.
pub fn tick(
    roster: &mut Roster,
    dt: Seconds,
    config: &SimConfig,
) -> Result<Vec<Impact>, PhysicsError> {
    roster.validate()?;
    gravity::kick(roster, dt)?;
    collision::resolve_capped(roster, dt, config.max_impacts_per_step)
}

/// Plugin wiring the physics pass into `FixedUpdate`.
///
/// The driver owns the entity collection: insert a populated [`Roster`]
/// (and optionally a tuned [`SimClock`]/[`SimConfig`]) before startup, or
/// fill the default-empty one later.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Roster>()
            .init_resource::<SimClock>()
            .init_resource::<SimConfig>()
            .init_resource::<CommandQueue>()
            .add_message::<CollisionEvent>()
            .add_systems(FixedUpdate, sim_step);
    }
}

/// Per-frame system: scale the fixed delta, run [`tick`], publish impacts.
///
/// An invalid roster skips the step with a warning and leaves state for the
/// driver to repair; nothing is retried here.
fn sim_step(
    mut roster: ResMut<Roster>,
    mut clock: ResMut<SimClock>,
    config: Res<SimConfig>,
    time: Res<Time>,
    mut collision_events: MessageWriter<CollisionEvent>,
) {
    if clock.paused {
        return;
    }

    let dt = time.delta_secs_f64() * clock.scale;
    if dt <= 0.0 {
        return;
    }

    match tick(&mut roster, Seconds::new(dt), &config) {
        Ok(impacts) => {
            clock.elapsed += dt;

            if impacts.len() >= config.max_impacts_per_step {
                warn!(
                    "impact cap reached ({}); remainder of the step advanced unresolved",
                    impacts.len()
                );
            }
            for impact in impacts {
                info!(
                    "collision: {} and {} at +{:.3}s, closing at {:.2} m/s",
                    impact.a,
                    impact.b,
                    impact.at.value(),
                    impact.closing_speed.value()
                );
                collision_events.write(CollisionEvent { impact });
            }
        }
        Err(err) => {
            warn!("physics step skipped: {err}");
        }
    }
}
