#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gem Caverns engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Gem Caverns.";

/// State of a single cell within the cave map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Solid rock; impassable and the state every cell starts in.
    #[default]
    Wall,
    /// Carved-out open space the player may occupy.
    Floor,
    /// Carved-out space holding a collectible gem.
    Gem,
    /// The single cell currently occupied by the player marker.
    Player,
}

impl TileType {
    /// Reports whether the player may stand on a cell in this state.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Location of a single map cell expressed as signed x and y coordinates.
///
/// Coordinates are signed so that out-of-bounds candidates, including ones
/// with negative components, stay representable and can be rejected by the
/// legality predicate instead of wrapping or panicking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    x: i32,
    y: i32,
}

impl GridPos {
    /// Creates a new map coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate one cell away in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Cardinal movement directions available to the player and to carvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing y coordinates.
    North,
    /// Movement toward increasing x coordinates.
    East,
    /// Movement toward increasing y coordinates.
    South,
    /// Movement toward decreasing x coordinates.
    West,
}

impl Direction {
    /// Every cardinal direction in a fixed, deterministic order.
    pub const CARDINALS: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit offset applied to a coordinate when stepping this way.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Wipes every cell back to wall, restores the carve budget, and seeds a
    /// single carver at the map center.
    Reset,
    /// Runs one carve sweep; the incremental per-frame generation variant.
    Advance,
    /// Drives carving to completion and places the pickups; the synchronous
    /// level-start generation variant.
    Generate,
    /// Requests that the player marker advance one cell.
    MovePlayer {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms the map was wiped back to solid wall and reseeded.
    MapReset,
    /// Announces the cell where the player marker was placed when
    /// generation finished.
    PlayerSpawned {
        /// Cell now holding the player marker.
        cell: GridPos,
    },
    /// Confirms a gem was scattered onto a carved floor cell.
    GemPlaced {
        /// Cell now holding the gem.
        cell: GridPos,
    },
    /// Announces that the carve budget was exhausted and the map finalized.
    GenerationCompleted {
        /// Total wall-to-floor conversions performed during the cycle.
        floors_carved: u32,
        /// Number of carver agents alive when the budget ran out.
        carver_count: u32,
    },
    /// Confirms that the player marker moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: GridPos,
        /// Cell the player occupies after the move.
        to: GridPos,
    },
    /// Confirms the player picked up a gem.
    GemCollected {
        /// Cell the gem occupied before collection.
        cell: GridPos,
        /// Gems still waiting on the map after this pickup.
        remaining: u32,
    },
}

/// Describes the discrete tile layout of the cave map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGrid {
    size: i32,
    tile_length: f32,
}

impl TileGrid {
    /// Creates a new tile grid description.
    #[must_use]
    pub const fn new(size: i32, tile_length: f32) -> Self {
        Self { size, tile_length }
    }

    /// Side length of the square map measured in tiles.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total extent of the map along one axis measured in world units.
    #[must_use]
    pub const fn extent(&self) -> f32 {
        self.size as f32 * self.tile_length
    }

    /// Cell at the center of the map, where generation seeds its first
    /// carver and later places the player marker.
    #[must_use]
    pub const fn center(&self) -> GridPos {
        GridPos::new(self.size / 2, self.size / 2)
    }
}

/// Read-only row-major snapshot of every cell in the cave map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileView {
    size: i32,
    cells: Vec<TileType>,
}

impl TileView {
    /// Creates a view from row-major cell states; index `y * size + x`.
    #[must_use]
    pub fn from_cells(size: i32, cells: Vec<TileType>) -> Self {
        Self { size, cells }
    }

    /// Side length of the captured map measured in tiles.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// Cell state at the provided coordinate, if it lies inside the map.
    #[must_use]
    pub fn at(&self, pos: GridPos) -> Option<TileType> {
        if pos.x() < 0 || pos.y() < 0 || pos.x() >= self.size || pos.y() >= self.size {
            return None;
        }
        let index = pos.y() as usize * self.size as usize + pos.x() as usize;
        self.cells.get(index).copied()
    }

    /// Raw row-major cell states backing the view.
    #[must_use]
    pub fn cells(&self) -> &[TileType] {
        &self.cells
    }

    /// Iterator over every cell paired with its coordinate, row by row.
    pub fn positions(&self) -> impl Iterator<Item = (GridPos, TileType)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(index, tile)| {
            let x = (index as i32) % size;
            let y = (index as i32) / size;
            (GridPos::new(x, y), *tile)
        })
    }
}

const DEFAULT_MAP_SIZE: i32 = 100;
const DEFAULT_TILE_LENGTH: f32 = 8.0;
const DEFAULT_MAX_FLOORS: u32 = 1200;
const DEFAULT_MAX_GEMS: u32 = 3;
const DEFAULT_REPRODUCTION_ODDS: u32 = 24;
const DEFAULT_RNG_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Validated tuning parameters for one world instance.
///
/// The defaults reproduce the shipped game: a 100x100 map, a carve budget of
/// 1200 floors, and three gems per level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    map_size: i32,
    tile_length: f32,
    max_floors: u32,
    max_gems: u32,
    reproduction_odds: u32,
    rng_seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            tile_length: DEFAULT_TILE_LENGTH,
            max_floors: DEFAULT_MAX_FLOORS,
            max_gems: DEFAULT_MAX_GEMS,
            reproduction_odds: DEFAULT_REPRODUCTION_ODDS,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with explicit map and budget dimensions,
    /// keeping the remaining knobs at their defaults.
    ///
    /// Rejects combinations that would break generation's termination
    /// guarantees: the carve budget must leave at least one wall standing,
    /// and gem placement must leave at least one floor cell uncovered so the
    /// rejection-sampling search always finds a target.
    pub fn new(map_size: i32, max_floors: u32, max_gems: u32) -> Result<Self, ConfigError> {
        Self {
            map_size,
            max_floors,
            max_gems,
            ..Self::default()
        }
        .validated()
    }

    /// Replaces the RNG seed, preserving every other knob.
    #[must_use]
    pub const fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Replaces the rendering scale, preserving every other knob.
    #[must_use]
    pub const fn with_tile_length(mut self, tile_length: f32) -> Self {
        self.tile_length = tile_length;
        self
    }

    /// Replaces the carver reproduction odds (one-in-`odds` per successful
    /// move), preserving every other knob.
    pub fn with_reproduction_odds(mut self, reproduction_odds: u32) -> Result<Self, ConfigError> {
        self.reproduction_odds = reproduction_odds;
        self.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.map_size < 1 {
            return Err(ConfigError::EmptyMap {
                map_size: self.map_size,
            });
        }

        let capacity = self.map_size as u64 * self.map_size as u64;
        if u64::from(self.max_floors) >= capacity {
            return Err(ConfigError::BudgetExceedsCapacity {
                max_floors: self.max_floors,
                capacity,
            });
        }

        if self.max_gems != 0 && self.max_gems >= self.max_floors {
            return Err(ConfigError::GemsExceedBudget {
                max_gems: self.max_gems,
                max_floors: self.max_floors,
            });
        }

        if self.reproduction_odds == 0 {
            return Err(ConfigError::ZeroReproductionOdds);
        }

        Ok(self)
    }

    /// Side length of the square map measured in tiles.
    #[must_use]
    pub const fn map_size(&self) -> i32 {
        self.map_size
    }

    /// Side length of a single tile in world units; rendering scale only.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Carve budget: total wall-to-floor conversions per generation cycle.
    #[must_use]
    pub const fn max_floors(&self) -> u32 {
        self.max_floors
    }

    /// Number of gems scattered onto the floor once carving completes.
    #[must_use]
    pub const fn max_gems(&self) -> u32 {
        self.max_gems
    }

    /// A carver requests a clone with probability one-in-this per
    /// successful move.
    #[must_use]
    pub const fn reproduction_odds(&self) -> u32 {
        self.reproduction_odds
    }

    /// Seed for the world's random stream.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Reasons a [`GeneratorConfig`] may be rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The map would contain no cells at all.
    #[error("map size {map_size} leaves no cells to carve")]
    EmptyMap {
        /// Requested side length.
        map_size: i32,
    },
    /// The carve budget meets or exceeds the cell count, so the budget could
    /// never reach zero.
    #[error("carve budget {max_floors} must stay below the {capacity}-cell map capacity")]
    BudgetExceedsCapacity {
        /// Requested carve budget.
        max_floors: u32,
        /// Total number of cells in the map.
        capacity: u64,
    },
    /// Gem placement could exhaust the carved floor and loop forever.
    #[error("{max_gems} gems cannot be placed within a carve budget of {max_floors}")]
    GemsExceedBudget {
        /// Requested gem count.
        max_gems: u32,
        /// Requested carve budget.
        max_floors: u32,
    },
    /// Reproduction odds of zero would divide by zero when rolling.
    #[error("carver reproduction odds must be at least one")]
    ZeroReproductionOdds,
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Direction, GeneratorConfig, GridPos, TileType, TileView};

    #[test]
    fn cardinal_offsets_are_unit_steps() {
        for direction in Direction::CARDINALS {
            let (dx, dy) = direction.offset();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn step_moves_one_cell() {
        let origin = GridPos::new(5, 5);
        assert_eq!(origin.step(Direction::North), GridPos::new(5, 4));
        assert_eq!(origin.step(Direction::East), GridPos::new(6, 5));
        assert_eq!(origin.step(Direction::South), GridPos::new(5, 6));
        assert_eq!(origin.step(Direction::West), GridPos::new(4, 5));
    }

    #[test]
    fn walls_alone_are_impassable() {
        assert!(!TileType::Wall.is_walkable());
        assert!(TileType::Floor.is_walkable());
        assert!(TileType::Gem.is_walkable());
        assert!(TileType::Player.is_walkable());
    }

    #[test]
    fn default_config_matches_shipped_game() {
        let config = GeneratorConfig::default();
        assert_eq!(config.map_size(), 100);
        assert_eq!(config.max_floors(), 1200);
        assert_eq!(config.max_gems(), 3);
        assert!((config.tile_length() - 8.0).abs() < f32::EPSILON);
    }

    #[test]
    fn config_rejects_budget_at_capacity() {
        assert_eq!(
            GeneratorConfig::new(10, 100, 3),
            Err(ConfigError::BudgetExceedsCapacity {
                max_floors: 100,
                capacity: 100,
            })
        );
    }

    #[test]
    fn config_rejects_gems_that_fill_the_budget() {
        assert_eq!(
            GeneratorConfig::new(10, 5, 5),
            Err(ConfigError::GemsExceedBudget {
                max_gems: 5,
                max_floors: 5,
            })
        );
    }

    #[test]
    fn config_rejects_empty_maps_and_zero_odds() {
        assert!(matches!(
            GeneratorConfig::new(0, 0, 0),
            Err(ConfigError::EmptyMap { .. })
        ));
        assert_eq!(
            GeneratorConfig::default().with_reproduction_odds(0),
            Err(ConfigError::ZeroReproductionOdds)
        );
    }

    #[test]
    fn tile_view_rejects_out_of_range_lookups() {
        let view = TileView::from_cells(2, vec![TileType::Wall; 4]);
        assert_eq!(view.at(GridPos::new(0, 0)), Some(TileType::Wall));
        assert_eq!(view.at(GridPos::new(-1, 0)), None);
        assert_eq!(view.at(GridPos::new(0, 2)), None);
    }

    #[test]
    fn grid_pos_round_trips_through_bincode() {
        let pos = GridPos::new(42, 7);
        let bytes = bincode::serialize(&pos).expect("serialize");
        let restored: GridPos = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, pos);
    }
}
