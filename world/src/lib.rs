#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative cave state management for Gem Caverns.
//!
//! The world owns the tile map, the carver population, the shared carve
//! budget, and the gem counter. Hosts mutate it exclusively through
//! [`apply`] and read it through the [`query`] module; nothing else may
//! touch a cell.

mod carving;

use carving::{Carver, StepOutcome};
use gem_caverns_core::{
    Command, Direction, Event, GeneratorConfig, GridPos, TileGrid, TileType, TileView,
    WELCOME_BANNER,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Dense square grid of tile states.
///
/// Every read and write is gated by the legality predicate, so an illegal
/// coordinate can never reach the backing vector.
#[derive(Clone, Debug)]
struct TileMap {
    size: i32,
    cells: Vec<TileType>,
}

impl TileMap {
    fn new(size: i32) -> Self {
        let side = usize::try_from(size).unwrap_or(0);
        Self {
            size,
            cells: vec![TileType::Wall; side.saturating_mul(side)],
        }
    }

    /// Reports whether both coordinates lie inside the map extent.
    fn is_legal(&self, pos: GridPos) -> bool {
        pos.x() >= 0 && pos.y() >= 0 && pos.x() < self.size && pos.y() < self.size
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if !self.is_legal(pos) {
            return None;
        }
        Some(pos.y() as usize * self.size as usize + pos.x() as usize)
    }

    fn tile(&self, pos: GridPos) -> Option<TileType> {
        self.index(pos).and_then(|index| self.cells.get(index).copied())
    }

    fn set(&mut self, pos: GridPos, tile: TileType) {
        if let Some(index) = self.index(pos) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = tile;
            }
        }
    }

    fn fill(&mut self, tile: TileType) {
        self.cells.fill(tile);
    }

    /// Legal and not wall: floor, gem, or the player marker itself.
    fn walkable(&self, pos: GridPos) -> bool {
        self.tile(pos).map_or(false, TileType::is_walkable)
    }
}

/// Represents the authoritative Gem Caverns world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GeneratorConfig,
    tile_grid: TileGrid,
    tiles: TileMap,
    carvers: Vec<Carver>,
    remaining_floors: u32,
    floors_carved: u32,
    gems_remaining: u32,
    player: Option<GridPos>,
    completed: bool,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world with the shipped default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Creates a world driven by the provided configuration.
    ///
    /// The map starts reset: every cell wall, the carve budget full, and a
    /// single carver seeded at the center. The random stream is seeded once
    /// here and never reseeded, so successive levels differ while a whole
    /// run stays reproducible for a given seed.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        let tile_grid = TileGrid::new(config.map_size(), config.tile_length());
        let mut world = Self {
            banner: WELCOME_BANNER,
            tiles: TileMap::new(config.map_size()),
            carvers: Vec::new(),
            remaining_floors: 0,
            floors_carved: 0,
            gems_remaining: 0,
            player: None,
            completed: false,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed()),
            tile_grid,
            config,
        };
        world.reset();
        world
    }

    fn reset(&mut self) {
        self.tiles.fill(TileType::Wall);
        self.remaining_floors = self.config.max_floors();
        self.floors_carved = 0;
        self.gems_remaining = 0;
        self.player = None;
        self.completed = false;
        self.carvers.clear();
        self.carvers.push(Carver::at(self.tile_grid.center()));
    }

    fn advance_sweep(&mut self, out_events: &mut Vec<Event>) {
        if self.completed {
            return;
        }

        let active = self.carvers.len();
        {
            let Self {
                carvers,
                tiles,
                rng,
                remaining_floors,
                floors_carved,
                config,
                ..
            } = self;
            for carver in carvers.iter_mut() {
                // End condition re-checked per carver so the budget never
                // overshoots mid-sweep.
                if *remaining_floors == 0 {
                    break;
                }
                if let StepOutcome::Moved { carved: true } =
                    carver.try_step(tiles, config.reproduction_odds(), rng)
                {
                    *remaining_floors -= 1;
                    *floors_carved += 1;
                }
            }
        }

        // Two-phase reproduction: requests collected during the sweep are
        // serviced afterwards, so children first move on the next sweep.
        for index in 0..active {
            if self.carvers[index].take_spawn_request() {
                let position = self.carvers[index].position();
                self.carvers.push(Carver::at(position));
            }
        }

        if self.remaining_floors == 0 {
            self.finalize(out_events);
        }
    }

    fn finalize(&mut self, out_events: &mut Vec<Event>) {
        self.completed = true;

        let center = self.tile_grid.center();
        self.tiles.set(center, TileType::Player);
        self.player = Some(center);
        out_events.push(Event::PlayerSpawned { cell: center });

        for _ in 0..self.config.max_gems() {
            let cell = self.sample_floor_cell();
            self.tiles.set(cell, TileType::Gem);
            self.gems_remaining += 1;
            out_events.push(Event::GemPlaced { cell });
        }

        out_events.push(Event::GenerationCompleted {
            floors_carved: self.floors_carved,
            carver_count: self.carvers.len() as u32,
        });
    }

    /// Rejection-samples a carved floor cell.
    ///
    /// Terminates almost surely: the validated configuration guarantees
    /// carving leaves more floor cells than gems to place.
    fn sample_floor_cell(&mut self) -> GridPos {
        loop {
            let x = self.rng.gen_range(0..self.tile_grid.size());
            let y = self.rng.gen_range(0..self.tile_grid.size());
            let candidate = GridPos::new(x, y);
            if self.tiles.tile(candidate) == Some(TileType::Floor) {
                return candidate;
            }
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let Some(from) = self.player else {
            return;
        };

        let to = from.step(direction);
        if !self.tiles.walkable(to) {
            return;
        }

        let entered = self.tiles.tile(to);
        self.tiles.set(from, TileType::Floor);
        self.tiles.set(to, TileType::Player);
        self.player = Some(to);
        out_events.push(Event::PlayerMoved { from, to });

        if entered == Some(TileType::Gem) {
            self.gems_remaining = self.gems_remaining.saturating_sub(1);
            out_events.push(Event::GemCollected {
                cell: to,
                remaining: self.gems_remaining,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Reset => {
            world.reset();
            out_events.push(Event::MapReset);
        }
        Command::Advance => world.advance_sweep(out_events),
        Command::Generate => {
            while !world.completed {
                world.advance_sweep(out_events);
            }
        }
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use gem_caverns_core::{GridPos, TileGrid, TileType, TileView};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's tile grid geometry.
    #[must_use]
    pub fn tile_grid(world: &World) -> &TileGrid {
        &world.tile_grid
    }

    /// Cell state at the provided coordinate, if the coordinate is legal.
    #[must_use]
    pub fn tile_at(world: &World, pos: GridPos) -> Option<TileType> {
        world.tiles.tile(pos)
    }

    /// Captures a row-major snapshot of every cell for presentation.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView {
        TileView::from_cells(world.tiles.size, world.tiles.cells.clone())
    }

    /// True iff both coordinates lie inside the map extent.
    #[must_use]
    pub fn is_legal_position(world: &World, pos: GridPos) -> bool {
        world.tiles.is_legal(pos)
    }

    /// True iff the coordinate is legal and its cell is not wall.
    #[must_use]
    pub fn available_for_player(world: &World, pos: GridPos) -> bool {
        world.tiles.walkable(pos)
    }

    /// Cell currently holding the player marker, once generation completed.
    #[must_use]
    pub fn player(world: &World) -> Option<GridPos> {
        world.player
    }

    /// Gems still waiting to be collected on the current map.
    #[must_use]
    pub fn gems_remaining(world: &World) -> u32 {
        world.gems_remaining
    }

    /// Wall-to-floor conversions still owed before generation completes.
    #[must_use]
    pub fn remaining_floors(world: &World) -> u32 {
        world.remaining_floors
    }

    /// Wall-to-floor conversions performed during the current cycle.
    #[must_use]
    pub fn floors_carved(world: &World) -> u32 {
        world.floors_carved
    }

    /// Number of carver agents alive in the current cycle.
    #[must_use]
    pub fn carver_count(world: &World) -> usize {
        world.carvers.len()
    }

    /// Reports whether the current generation cycle has finalized.
    #[must_use]
    pub fn generation_complete(world: &World) -> bool {
        world.completed
    }
}
