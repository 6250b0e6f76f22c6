//! Freefall - 2D orbital physics core
//!
//! Simulates rigid circular bodies under mutual gravity, resolves pairwise
//! elastic collisions at their exact impact instants, and derives the
//! orbital readouts a piloting HUD displays (altitude, speed, apsides,
//! orbital speed, stopping acceleration).
//!
//! The crate is a library: rendering, input, and persistence are external
//! collaborators. Drivers either add [`sim::SimulationPlugin`] to a Bevy
//! app or call [`sim::tick`] and the analyzer functions directly on a
//! [`body::Roster`] they own.

pub mod body;
pub mod command;
pub mod error;
pub mod sim;
pub mod units;

#[cfg(test)]
pub mod test_utils;
