//! Carver agents that perform the branching random walk.

use gem_caverns_core::{Direction, GridPos, TileType};
use rand::Rng;

use crate::TileMap;

/// Outcome of a single carver step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// The drawn destination fell outside the map; the carver stayed put.
    Blocked,
    /// The carver advanced; `carved` reports whether a wall became floor.
    Moved {
        /// True exactly when the step converted a wall cell.
        carved: bool,
    },
}

/// Random-walk cursor that converts wall cells to floor as it moves.
///
/// Carvers never remove themselves; the population only grows within one
/// generation cycle and is cleared wholesale on reset.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Carver {
    position: GridPos,
    spawn_requested: bool,
}

impl Carver {
    /// Creates a carver standing on the provided cell.
    pub(crate) const fn at(position: GridPos) -> Self {
        Self {
            position,
            spawn_requested: false,
        }
    }

    /// Cell the carver currently stands on.
    pub(crate) const fn position(&self) -> GridPos {
        self.position
    }

    /// Clears and reports the pending reproduction request.
    pub(crate) fn take_spawn_request(&mut self) -> bool {
        let requested = self.spawn_requested;
        self.spawn_requested = false;
        requested
    }

    /// Advances the walk by one step.
    ///
    /// Draws a cardinal direction uniformly, stays put when the destination
    /// is outside the map, and otherwise moves there, carving the cell open
    /// when it was still wall. After any successful move the carver rolls a
    /// one-in-`reproduction_odds` chance to request a clone at its new cell.
    pub(crate) fn try_step<R: Rng>(
        &mut self,
        tiles: &mut TileMap,
        reproduction_odds: u32,
        rng: &mut R,
    ) -> StepOutcome {
        let direction = Direction::CARDINALS[rng.gen_range(0..Direction::CARDINALS.len())];
        let destination = self.position.step(direction);

        if !tiles.is_legal(destination) {
            return StepOutcome::Blocked;
        }

        let carved = tiles.tile(destination) == Some(TileType::Wall);
        if carved {
            tiles.set(destination, TileType::Floor);
        }
        self.position = destination;

        if rng.gen_ratio(1, reproduction_odds) {
            self.spawn_requested = true;
        }

        StepOutcome::Moved { carved }
    }
}

#[cfg(test)]
mod tests {
    use super::{Carver, StepOutcome};
    use crate::TileMap;
    use gem_caverns_core::{GridPos, TileType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn step_from_the_center_always_carves() {
        let mut tiles = TileMap::new(3);
        let mut carver = Carver::at(GridPos::new(1, 1));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = carver.try_step(&mut tiles, u32::MAX, &mut rng);

        assert_eq!(outcome, StepOutcome::Moved { carved: true });
        assert_ne!(carver.position(), GridPos::new(1, 1));
        assert_eq!(tiles.tile(carver.position()), Some(TileType::Floor));
    }

    #[test]
    fn step_off_a_single_cell_map_is_blocked() {
        let mut tiles = TileMap::new(1);
        let mut carver = Carver::at(GridPos::new(0, 0));
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        for _ in 0..16 {
            assert_eq!(
                carver.try_step(&mut tiles, u32::MAX, &mut rng),
                StepOutcome::Blocked
            );
            assert_eq!(carver.position(), GridPos::new(0, 0));
        }
    }

    #[test]
    fn revisiting_a_carved_cell_does_not_carve_again() {
        let mut tiles = TileMap::new(3);
        tiles.set(GridPos::new(1, 0), TileType::Floor);
        tiles.set(GridPos::new(2, 1), TileType::Floor);
        tiles.set(GridPos::new(1, 2), TileType::Floor);
        tiles.set(GridPos::new(0, 1), TileType::Floor);
        let mut carver = Carver::at(GridPos::new(1, 1));
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(
            carver.try_step(&mut tiles, u32::MAX, &mut rng),
            StepOutcome::Moved { carved: false }
        );
    }

    #[test]
    fn certain_odds_request_a_clone_once() {
        let mut tiles = TileMap::new(3);
        let mut carver = Carver::at(GridPos::new(1, 1));
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        assert!(matches!(
            carver.try_step(&mut tiles, 1, &mut rng),
            StepOutcome::Moved { .. }
        ));
        assert!(carver.take_spawn_request());
        assert!(!carver.take_spawn_request(), "request must clear on service");
    }
}
