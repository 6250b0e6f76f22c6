//! Headless two-body session printing the pilot's readout.
//!
//! Puts a craft on a mild ellipse above an Earth-like body, steps the
//! simulation for a few minutes at a time, and prints the HUD quantities
//! after each leg.
//!
//! Run with: cargo run --example orbit_readout

use freefall::body::{Body, Roster};
use freefall::sim::orbit::{Readout, StoppingProfile};
use freefall::sim::{SimConfig, tick};
use freefall::units::{G, Kilograms, Meters, Position2, Seconds, Velocity2};

const EARTH_MASS: f64 = 5.972e24;
const EARTH_RADIUS: f64 = 6.371e6;

fn main() {
    let r = EARTH_RADIUS + 400_000.0;
    // 5% over circular speed: periapsis here, apoapsis a few hundred km up.
    let v = 1.05 * (G * EARTH_MASS / r).sqrt();

    let mut roster = Roster::from_bodies([
        Body::new(
            "Earth",
            Position2::ZERO,
            Velocity2::ZERO,
            Kilograms::new(EARTH_MASS),
            Meters::new(EARTH_RADIUS),
        )
        .expect("valid reference body"),
        Body::new(
            "AC",
            Position2::new(r, 0.0),
            Velocity2::new(0.0, v),
            Kilograms::new(1.2e5),
            Meters::new(30.0),
        )
        .expect("valid craft body"),
    ]);

    let config = SimConfig::default();
    let dt = Seconds::new(1.0);
    let leg_seconds = 300;

    println!("=== Orbit readout: AC around Earth ===\n");

    for leg in 0..6 {
        print_readout(leg * leg_seconds, &roster);

        for _ in 0..leg_seconds {
            let impacts = tick(&mut roster, dt, &config).expect("session stays valid");
            for impact in impacts {
                println!(
                    "  !! collision between {} and {} at {:.2} m/s",
                    impact.a,
                    impact.b,
                    impact.closing_speed.value()
                );
            }
        }
    }

    print_readout(6 * leg_seconds, &roster);
}

fn print_readout(elapsed: usize, roster: &Roster) {
    let readout = Readout::compute(roster, "AC", "Earth", StoppingProfile::BeforeSurface)
        .expect("both bodies exist");

    println!("t = {elapsed} s");
    println!("  Altitude:      {:>12.0} m", readout.altitude.value());
    println!("  Speed:         {:>12.1} m/s", readout.speed.value());
    match readout.acceleration {
        Ok(a) => println!("  Acceleration:  {:>12.3} m/s²", a.value()),
        Err(e) => println!("  Acceleration:  {e}"),
    }
    match readout.orbital_speed {
        Ok(v) => println!("  Orbital Speed: {:>12.1} m/s", v.value()),
        Err(e) => println!("  Orbital Speed: {e}"),
    }
    match readout.periapsis {
        Ok(p) => println!("  Periapsis:     {:>12.0} m", p.value()),
        Err(e) => println!("  Periapsis:     {e}"),
    }
    match readout.apoapsis {
        Ok(a) => println!("  Apoapsis:      {:>12.0} m", a.value()),
        Err(e) => println!("  Apoapsis:      {e}"),
    }
    match readout.stopping_acc {
        Ok(s) => println!("  Stopping Acc:  {:>12.3} m/s²", s.value()),
        Err(e) => println!("  Stopping Acc:  {e}"),
    }
    println!();
}
