//! Continuous pairwise collision detection and elastic resolution.
//!
//! Detection treats each body's motion within a step as linear and solves
//! the quadratic ‖Δp + Δv·t‖ = rA + rB for the earliest contact instant.
//! Impacts are resolved earliest-first: the whole roster drifts to the
//! impact instant, the pair exchanges normal velocity components
//! elastically, and the remaining window is re-scanned, since one
//! resolution can create or remove later contacts (including for the same
//! pair).
//!
//! The resolution math has no observable effect beyond the updated bodies
//! and the returned reports.

use crate::body::{Body, Roster};
use crate::error::PhysicsError;
use crate::units::{MetersPerSecond, Seconds};

use super::gravity;

/// Default cap on resolutions within a single step. A pair can only
/// re-collide via outside interference, so ordinary rosters stay far below
/// this; the cap bounds pathological jitter chains.
pub const DEFAULT_MAX_IMPACTS: usize = 64;

/// One resolved impact, reported in chronological order.
#[derive(Clone, Debug, PartialEq)]
pub struct Impact {
    /// Names of the colliding pair, in roster order.
    pub a: String,
    pub b: String,
    /// Impact instant measured from the start of the step.
    pub at: Seconds,
    /// Relative speed along the contact normal just before the exchange.
    pub closing_speed: MetersPerSecond,
}

/// A contact candidate found during a scan.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Contact {
    pub i: usize,
    pub j: usize,
    pub t: f64,
}

/// Resolve every impact within `dt` and advance the roster to the end of
/// the step.
///
/// Expects start-of-step positions with already-kicked velocities (the
/// arrangement [`crate::sim::tick`] produces); all position advancement for
/// the step, through and between impacts, happens here.
///
/// `dt` must be non-negative and finite.
///
/// # Errors
/// `InvalidEntityState` if any body fails boundary validation;
/// `DegenerateGeometry` if an impact puts two centers exactly on top of
/// each other (possible only for zero-radius bodies), in which case the
/// roster is left at that impact instant.
pub fn resolve(roster: &mut Roster, dt: Seconds) -> Result<Vec<Impact>, PhysicsError> {
    resolve_capped(roster, dt, DEFAULT_MAX_IMPACTS)
}

/// [`resolve`] with an explicit cap on the number of resolutions. Once the
/// cap is reached the rest of the window is a plain drift; the caller can
/// detect this by `reports.len() == max_impacts`.
pub fn resolve_capped(
    roster: &mut Roster,
    dt: Seconds,
    max_impacts: usize,
) -> Result<Vec<Impact>, PhysicsError> {
    debug_assert!(
        dt.is_finite() && dt.value() >= 0.0,
        "collision sweep needs a non-negative finite dt, got {:?}",
        dt
    );
    roster.validate()?;

    let mut reports = Vec::new();
    let mut elapsed = 0.0;

    while reports.len() < max_impacts {
        let window = dt.value() - elapsed;
        let Some(contact) = earliest_contact(roster.bodies(), window) else {
            break;
        };

        gravity::drift(roster, Seconds::new(contact.t));
        elapsed += contact.t;

        let impact = exchange(roster.bodies_mut(), contact.i, contact.j, elapsed)?;
        reports.push(impact);
    }

    gravity::drift(roster, Seconds::new(dt.value() - elapsed));
    Ok(reports)
}

/// Scan all unordered pairs for the earliest contact within `window`.
///
/// Ties go to the first pair in index order, which the roster's name order
/// makes deterministic.
pub(crate) fn earliest_contact(bodies: &[Body], window: f64) -> Option<Contact> {
    let mut best: Option<Contact> = None;

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if let Some(t) = time_to_impact(&bodies[i], &bodies[j], window) {
                if best.is_none_or(|b| t < b.t) {
                    best = Some(Contact { i, j, t });
                }
            }
        }
    }

    best
}

/// Earliest instant in `[0, window]` at which the two circles touch, given
/// their current relative motion, or `None` if they don't.
///
/// ‖Δp + Δv·t‖ = rA + rB squared gives
/// (Δv·Δv)·t² + 2(Δp·Δv)·t + (Δp·Δp − (rA+rB)²) = 0; the smaller root is
/// the entry instant. Pairs already in contact count as an immediate impact
/// only while closing; a separating or grazing pair is left alone.
pub(crate) fn time_to_impact(a: &Body, b: &Body, window: f64) -> Option<f64> {
    let dp = a.position.as_dvec2() - b.position.as_dvec2();
    let dv = a.velocity.as_dvec2() - b.velocity.as_dvec2();
    let radius_sum = a.radius().value() + b.radius().value();

    let c = dp.length_squared() - radius_sum * radius_sum;
    let closing = dp.dot(dv) < 0.0;

    if c <= 0.0 {
        // Touching or overlapping at t=0.
        return closing.then_some(0.0);
    }
    if !closing {
        // Separating, or no relative motion toward contact.
        return None;
    }

    let a2 = dv.length_squared();
    let b_half = dp.dot(dv);
    let disc = b_half * b_half - a2 * c;
    if disc < 0.0 {
        // Closest approach stays wider than the radius sum.
        return None;
    }

    let t = (-b_half - disc.sqrt()) / a2;
    (t <= window).then_some(t)
}

/// Elastic exchange for bodies `i` and `j`, currently at contact.
///
/// Velocities decompose along the unit normal (center-to-center) and its
/// perpendicular; tangential components ride through untouched and normal
/// components take the 1D elastic-collision update.
fn exchange(bodies: &mut [Body], i: usize, j: usize, elapsed: f64) -> Result<Impact, PhysicsError> {
    let (a, b) = (&bodies[i], &bodies[j]);

    let normal = (a.position.as_dvec2() - b.position.as_dvec2())
        .try_normalize()
        .ok_or_else(|| PhysicsError::degenerate(a.name(), b.name()))?;
    let tangent = normal.perp();

    let va_n = a.velocity.component_along(normal);
    let va_t = a.velocity.component_along(tangent);
    let vb_n = b.velocity.component_along(normal);
    let vb_t = b.velocity.component_along(tangent);

    let ma = a.mass().value();
    let mb = b.mass().value();
    let total = ma + mb;

    let va_n_after =
        MetersPerSecond::new((va_n.value() * (ma - mb) + 2.0 * mb * vb_n.value()) / total);
    let vb_n_after =
        MetersPerSecond::new((vb_n.value() * (mb - ma) + 2.0 * ma * va_n.value()) / total);

    let impact = Impact {
        a: a.name().to_string(),
        b: b.name().to_string(),
        at: Seconds::new(elapsed),
        closing_speed: (vb_n - va_n).abs(),
    };

    bodies[i].velocity = va_n_after * normal + va_t * tangent;
    bodies[j].velocity = vb_n_after * normal + vb_t * tangent;

    Ok(impact)
}
