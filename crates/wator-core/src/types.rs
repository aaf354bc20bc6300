//! Core type definitions for the simulation.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a denizen (living grid occupant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DenizenId(pub Uuid);

impl DenizenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DenizenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DenizenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given grid dimensions
    pub fn wrap(&self, width: i32, height: i32) -> Self {
        Self {
            x: ((self.x % width) + width) % width,
            y: ((self.y % height) + height) % height,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The closed set of cell variants a grid slot can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Empty,
    Fish,
    Shark,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Empty => write!(f, "empty"),
            CellKind::Fish => write!(f, "fish"),
            CellKind::Shark => write!(f, "shark"),
        }
    }
}

impl FromStr for CellKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "empty" => Ok(CellKind::Empty),
            "fish" => Ok(CellKind::Fish),
            "shark" => Ok(CellKind::Shark),
            other => Err(Error::UnknownVariant(other.to_string())),
        }
    }
}

/// The living subset of [`CellKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenizenKind {
    Fish,
    Shark,
}

impl From<DenizenKind> for CellKind {
    fn from(kind: DenizenKind) -> Self {
        match kind {
            DenizenKind::Fish => CellKind::Fish,
            DenizenKind::Shark => CellKind::Shark,
        }
    }
}

impl TryFrom<CellKind> for DenizenKind {
    type Error = Error;

    fn try_from(kind: CellKind) -> Result<Self, Self::Error> {
        match kind {
            CellKind::Fish => Ok(DenizenKind::Fish),
            CellKind::Shark => Ok(DenizenKind::Shark),
            CellKind::Empty => Err(Error::UnknownVariant("empty".to_string())),
        }
    }
}

impl fmt::Display for DenizenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        CellKind::from(*self).fmt(f)
    }
}
