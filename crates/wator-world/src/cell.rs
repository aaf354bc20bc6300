//! Denizen records and the cell factory.

use serde::{Deserialize, Serialize};
use wator_core::{DenizenId, DenizenKind, Position, WatorConfig};

/// Feeding state carried by predators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunger {
    /// Ticks without feeding before death
    pub starve_time: u32,
    /// Ticks since the last successful feeding
    pub starve_time_counter: u32,
    /// The kind this denizen may consume
    pub prey: DenizenKind,
}

/// A living grid occupant.
///
/// `pos` always names the grid slot that currently holds this denizen;
/// it is mutated only through the engine's canonical move path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Denizen {
    pub id: DenizenId,
    pub kind: DenizenKind,
    pub pos: Position,
    /// True at creation; set false exactly once, at the moment of death
    pub is_alive: bool,
    /// Ticks of activity before reproducing
    pub breed_time: u32,
    /// Ticks of activity since the last reproduction
    pub breed_time_counter: u32,
    /// `Some` for kinds that hunt, `None` for prey
    pub hunger: Option<Hunger>,
}

impl Denizen {
    pub fn is_eater(&self) -> bool {
        self.hunger.is_some()
    }
}

/// Per-instance overrides for [`CellFactory::spawn`].
///
/// Timer overrides only take effect when nonzero; a zero value falls back
/// to the species-wide default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnOverrides {
    pub breed_time: Option<u32>,
    pub breed_time_counter: Option<u32>,
    pub starve_time: Option<u32>,
    pub starve_time_counter: Option<u32>,
    pub is_alive: Option<bool>,
}

/// Constructs denizens with species-wide timer defaults, so the engine
/// never hardcodes breed or starve thresholds inline.
#[derive(Debug, Clone)]
pub struct CellFactory {
    fish_breed_time: u32,
    shark_breed_time: u32,
    shark_starve_time: u32,
}

impl CellFactory {
    pub fn from_config(config: &WatorConfig) -> Self {
        Self {
            fish_breed_time: config.fish_breed_time,
            shark_breed_time: config.shark_breed_time,
            shark_starve_time: config.shark_starve_time,
        }
    }

    /// Create a denizen of `kind` at `pos` with a fresh id.
    ///
    /// Counters start at 0 and denizens start alive unless overridden.
    pub fn spawn(&self, kind: DenizenKind, pos: Position, overrides: SpawnOverrides) -> Denizen {
        let breed_default = match kind {
            DenizenKind::Fish => self.fish_breed_time,
            DenizenKind::Shark => self.shark_breed_time,
        };

        let hunger = match kind {
            DenizenKind::Fish => None,
            DenizenKind::Shark => Some(Hunger {
                starve_time: nonzero(overrides.starve_time).unwrap_or(self.shark_starve_time),
                starve_time_counter: overrides.starve_time_counter.unwrap_or(0),
                prey: DenizenKind::Fish,
            }),
        };

        Denizen {
            id: DenizenId::new(),
            kind,
            pos,
            is_alive: overrides.is_alive.unwrap_or(true),
            breed_time: nonzero(overrides.breed_time).unwrap_or(breed_default),
            breed_time_counter: overrides.breed_time_counter.unwrap_or(0),
            hunger,
        }
    }
}

fn nonzero(value: Option<u32>) -> Option<u32> {
    value.filter(|&v| v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> CellFactory {
        CellFactory::from_config(&WatorConfig {
            fish_breed_time: 5,
            shark_breed_time: 10,
            shark_starve_time: 5,
            ..Default::default()
        })
    }

    #[test]
    fn test_spawn_fish_defaults() {
        let fish = factory().spawn(
            DenizenKind::Fish,
            Position::new(2, 3),
            SpawnOverrides::default(),
        );

        assert_eq!(fish.kind, DenizenKind::Fish);
        assert_eq!(fish.pos, Position::new(2, 3));
        assert!(fish.is_alive);
        assert_eq!(fish.breed_time, 5);
        assert_eq!(fish.breed_time_counter, 0);
        assert!(fish.hunger.is_none());
        assert!(!fish.is_eater());
    }

    #[test]
    fn test_spawn_shark_defaults() {
        let shark = factory().spawn(
            DenizenKind::Shark,
            Position::new(0, 0),
            SpawnOverrides::default(),
        );

        assert_eq!(shark.breed_time, 10);
        assert!(shark.is_eater());

        let hunger = shark.hunger.unwrap();
        assert_eq!(hunger.starve_time, 5);
        assert_eq!(hunger.starve_time_counter, 0);
        assert_eq!(hunger.prey, DenizenKind::Fish);
    }

    #[test]
    fn test_nonzero_override_wins() {
        let shark = factory().spawn(
            DenizenKind::Shark,
            Position::new(0, 0),
            SpawnOverrides {
                breed_time: Some(3),
                starve_time: Some(7),
                breed_time_counter: Some(2),
                ..Default::default()
            },
        );

        assert_eq!(shark.breed_time, 3);
        assert_eq!(shark.breed_time_counter, 2);
        assert_eq!(shark.hunger.unwrap().starve_time, 7);
    }

    #[test]
    fn test_zero_override_falls_back_to_default() {
        let fish = factory().spawn(
            DenizenKind::Fish,
            Position::new(0, 0),
            SpawnOverrides {
                breed_time: Some(0),
                ..Default::default()
            },
        );

        assert_eq!(fish.breed_time, 5);
    }

    #[test]
    fn test_is_alive_override() {
        let fish = factory().spawn(
            DenizenKind::Fish,
            Position::new(0, 0),
            SpawnOverrides {
                is_alive: Some(false),
                ..Default::default()
            },
        );

        assert!(!fish.is_alive);
    }

    #[test]
    fn test_spawned_ids_are_unique() {
        let factory = factory();
        let a = factory.spawn(DenizenKind::Fish, Position::new(0, 0), SpawnOverrides::default());
        let b = factory.spawn(DenizenKind::Fish, Position::new(0, 0), SpawnOverrides::default());
        assert_ne!(a.id, b.id);
    }
}
