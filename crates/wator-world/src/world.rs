//! Simulation engine for running a Wa-Tor world.

use crate::cell::{CellFactory, Denizen, SpawnOverrides};
use crate::grid::{Grid, Slot};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, instrument, trace};
use wator_core::{
    CellKind, DenizenId, DenizenKind, Error, PopulateOverrides, Position, Result, WatorConfig,
};

/// Population counts per species.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Census {
    pub fish: usize,
    pub sharks: usize,
}

/// The Wa-Tor simulation engine.
///
/// Owns the grid, the arena of denizen records, and the ordered population
/// registry. Grid slots and registry entries refer into the arena by id;
/// every relocation goes through a single canonical move path so both views
/// stay consistent.
pub struct World {
    config: WatorConfig,
    grid: Grid,
    arena: HashMap<DenizenId, Denizen>,
    population: Vec<DenizenId>,
    factory: CellFactory,
    rng: ChaCha8Rng,
    ticks: u64,
}

impl World {
    /// Build a world from configuration. The RNG is seeded from
    /// `config.seed` when present, from OS entropy otherwise.
    pub fn new(config: WatorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::from_rng(config, rng)
    }

    /// Build a world around a caller-supplied RNG, for deterministic tests.
    pub fn from_rng(config: WatorConfig, rng: ChaCha8Rng) -> Self {
        let grid = Grid::new(config.width, config.height);
        let factory = CellFactory::from_config(&config);

        Self {
            config,
            grid,
            arena: HashMap::new(),
            population: Vec::new(),
            factory,
            rng,
            ticks: 0,
        }
    }

    /// Seed the grid with denizens, fish before sharks.
    ///
    /// A zero (or absent) override falls back to the configured population
    /// size. Seeding stops silently when no empty slot remains; calling
    /// again later adds to the existing population.
    pub fn populate(&mut self, overrides: PopulateOverrides) -> Result<()> {
        let fish = requested(overrides.fish_pop_size, self.config.fish_pop_size);
        let sharks = requested(overrides.shark_pop_size, self.config.shark_pop_size);

        let fish_placed = self.seed_species(DenizenKind::Fish, fish)?;
        let sharks_placed = self.seed_species(DenizenKind::Shark, sharks)?;

        info!(
            fish_requested = fish,
            fish_placed,
            sharks_requested = sharks,
            sharks_placed,
            population = self.population.len(),
            "world populated"
        );

        Ok(())
    }

    fn seed_species(&mut self, kind: DenizenKind, count: u32) -> Result<u32> {
        let mut placed = 0;

        for _ in 0..count {
            let open = self.grid.empty_positions();
            if open.is_empty() {
                break;
            }

            let pos = *choose(&mut self.rng, &open)?;
            let denizen = self.factory.spawn(kind, pos, SpawnOverrides::default());
            self.register(denizen);
            placed += 1;
        }

        Ok(placed)
    }

    /// Advance the simulation by one step.
    ///
    /// Denizens are processed in a uniformly shuffled order; children born
    /// mid-tick join the registry but not the in-flight order. Dead entries
    /// are purged from the registry and arena only at end of tick, so the
    /// liveness skip works against the pre-filtered list.
    pub fn tick(&mut self) -> Result<()> {
        let mut order = self.population.clone();
        order.shuffle(&mut self.rng);

        for id in order {
            let denizen = match self.arena.get(&id) {
                Some(denizen) => denizen,
                None => continue,
            };
            // Killed earlier this tick: takes no action
            if !denizen.is_alive {
                continue;
            }

            let pos = denizen.pos;
            let hunger = denizen.hunger;
            let neighbors = self.grid.neighbors(pos);

            let mut vacated = None;
            if let Some(hunger) = hunger {
                vacated = self.eat(id, pos, hunger.prey, &neighbors)?;

                // Starved this tick: no move, no breeding
                match self.arena.get(&id) {
                    Some(denizen) if denizen.is_alive => {}
                    _ => continue,
                }
            }

            let vacated = match vacated {
                Some(vacated) => Some(vacated),
                None => self.swim(id, &neighbors)?,
            };

            // Breeding requires a slot vacated this tick
            if let Some(vacated) = vacated {
                self.breed(id, vacated);
            }
        }

        self.population
            .retain(|id| self.arena.get(id).map_or(false, |d| d.is_alive));
        self.arena.retain(|_, denizen| denizen.is_alive);

        self.ticks += 1;
        trace!(
            tick = self.ticks,
            population = self.population.len(),
            "tick complete"
        );

        Ok(())
    }

    /// Advance the simulation by `ticks` steps, logging periodic progress.
    #[instrument(skip(self))]
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.tick()?;

            if self.ticks % 100 == 0 {
                let census = self.census();
                info!(
                    tick = self.ticks,
                    fish = census.fish,
                    sharks = census.sharks,
                    "population snapshot"
                );
            }
        }

        Ok(())
    }

    /// Predation step. Returns the slot vacated by a successful kill, or
    /// `None` when the denizen stayed put (hungry or newly dead).
    fn eat(
        &mut self,
        id: DenizenId,
        pos: Position,
        prey_kind: DenizenKind,
        neighbors: &[Position; 4],
    ) -> Result<Option<Position>> {
        let preys: Vec<DenizenId> = neighbors
            .iter()
            .filter_map(|&neighbor| match self.grid.get(neighbor) {
                Slot::Occupied(other) => self
                    .arena
                    .get(&other)
                    .filter(|denizen| denizen.kind == prey_kind)
                    .map(|_| other),
                Slot::Empty => None,
            })
            .collect();

        if preys.is_empty() {
            if let Some(denizen) = self.arena.get_mut(&id) {
                if let Some(hunger) = denizen.hunger.as_mut() {
                    hunger.starve_time_counter += 1;
                    if hunger.starve_time_counter >= hunger.starve_time {
                        denizen.is_alive = false;
                        self.grid.set(pos, Slot::Empty);
                        debug!(denizen = %id, pos = %pos, "predator starved");
                    }
                }
            }
            return Ok(None);
        }

        let prey_id = *choose(&mut self.rng, &preys)?;
        let prey_pos = match self.arena.get_mut(&prey_id) {
            Some(prey) => {
                prey.is_alive = false;
                prey.pos
            }
            None => return Ok(None),
        };

        self.move_cell(id, prey_pos);
        debug!(denizen = %id, prey = %prey_id, pos = %prey_pos, "prey eaten");

        Ok(Some(pos))
    }

    /// Free move into a random empty neighbor slot. Returns the vacated
    /// slot, or `None` when no empty neighbor exists.
    fn swim(&mut self, id: DenizenId, neighbors: &[Position; 4]) -> Result<Option<Position>> {
        let open: Vec<Position> = neighbors
            .iter()
            .copied()
            .filter(|&neighbor| self.grid.get(neighbor).is_empty())
            .collect();

        if open.is_empty() {
            return Ok(None);
        }

        let to = *choose(&mut self.rng, &open)?;
        let from = match self.arena.get(&id) {
            Some(denizen) => denizen.pos,
            None => return Ok(None),
        };

        self.move_cell(id, to);

        Ok(Some(from))
    }

    /// Advance the breed counter and spawn a child into the vacated slot
    /// once the threshold is reached.
    fn breed(&mut self, id: DenizenId, vacated: Position) {
        let kind = match self.arena.get_mut(&id) {
            Some(parent) => {
                parent.breed_time_counter += 1;
                if parent.breed_time_counter < parent.breed_time {
                    return;
                }
                parent.breed_time_counter = 0;
                parent.kind
            }
            None => return,
        };

        let child = self.factory.spawn(kind, vacated, SpawnOverrides::default());
        debug!(parent = %id, child = %child.id, kind = %kind, pos = %vacated, "denizen born");
        self.register(child);
    }

    /// Canonical move: the vacated slot becomes a fresh empty, the
    /// destination points at the denizen, and its coordinates follow.
    fn move_cell(&mut self, id: DenizenId, to: Position) {
        if let Some(denizen) = self.arena.get_mut(&id) {
            let from = denizen.pos;
            denizen.pos = to;
            self.grid.set(from, Slot::Empty);
            self.grid.set(to, Slot::Occupied(id));
        }
    }

    fn register(&mut self, denizen: Denizen) {
        let id = denizen.id;
        self.grid.set(denizen.pos, Slot::Occupied(id));
        self.arena.insert(id, denizen);
        self.population.push(id);
    }

    pub fn config(&self) -> &WatorConfig {
        &self.config
    }

    /// The live grid, for rendering collaborators.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Living denizens in registry order.
    pub fn population(&self) -> impl Iterator<Item = &Denizen> + '_ {
        self.population.iter().filter_map(|id| self.arena.get(id))
    }

    pub fn denizen(&self, id: DenizenId) -> Option<&Denizen> {
        self.arena.get(&id)
    }

    /// The cell variant at a position (with toroidal wrapping).
    pub fn kind_at(&self, pos: Position) -> CellKind {
        self.slot_kind(self.grid.get(pos))
    }

    /// Every slot with its cell variant, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellKind)> + '_ {
        self.grid.iter().map(|(pos, slot)| (pos, self.slot_kind(slot)))
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for denizen in self.population() {
            match denizen.kind {
                DenizenKind::Fish => census.fish += 1,
                DenizenKind::Shark => census.sharks += 1,
            }
        }
        census
    }

    /// Steps executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn slot_kind(&self, slot: Slot) -> CellKind {
        match slot {
            Slot::Empty => CellKind::Empty,
            Slot::Occupied(id) => self
                .arena
                .get(&id)
                .map(|denizen| CellKind::from(denizen.kind))
                .unwrap_or(CellKind::Empty),
        }
    }
}

/// A zero (or absent) override falls back to the configured size.
fn requested(override_size: Option<u32>, configured: u32) -> u32 {
    override_size.filter(|&n| n > 0).unwrap_or(configured)
}

/// Uniform random choice. Callers check non-emptiness before selecting; an
/// empty candidate set here is a logic error in the caller.
fn choose<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Result<&'a T> {
    items.choose(rng).ok_or(Error::EmptySelection)
}
