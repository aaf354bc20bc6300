//! Wa-Tor world simulation engine.
//!
//! This module implements the toroidal 2D grid and the per-tick
//! predator-prey rules: movement, predation, starvation, and reproduction.

pub mod cell;
pub mod grid;
pub mod world;

pub use cell::{CellFactory, Denizen, Hunger, SpawnOverrides};
pub use grid::{Grid, Slot};
pub use world::{Census, World};
