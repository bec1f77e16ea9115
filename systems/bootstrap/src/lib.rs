#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Gem Caverns experience.

use gem_caverns_core::{TileGrid, TileView};
use gem_caverns_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the tile grid geometry required for rendering.
    #[must_use]
    pub fn tile_grid<'world>(&self, world: &'world World) -> &'world TileGrid {
        query::tile_grid(world)
    }

    /// Captures the cave snapshot a presentation host draws from.
    #[must_use]
    pub fn tile_view(&self, world: &World) -> TileView {
        query::tile_view(world)
    }
}

#[cfg(test)]
mod tests {
    use super::Bootstrap;
    use gem_caverns_world::World;

    #[test]
    fn banner_and_geometry_come_from_the_world() {
        let world = World::new();
        let bootstrap = Bootstrap::default();

        assert_eq!(bootstrap.welcome_banner(&world), "Welcome to Gem Caverns.");
        assert_eq!(bootstrap.tile_grid(&world).size(), 100);

        let view = bootstrap.tile_view(&world);
        assert_eq!(view.cells().len(), 100 * 100);
    }
}
