#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Gem Caverns adapters.
//!
//! Everything here is pure data: the palette, the cell-to-rectangle scaling,
//! and the scene assembly a backend consumes. No graphics device code lives
//! in this crate.

use anyhow::Result as AnyResult;
use gem_caverns_core::{GridPos, TileType, TileView};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Fill color used when drawing a tile as a solid square.
#[must_use]
pub const fn tile_color(tile: TileType) -> Color {
    match tile {
        TileType::Wall => Color::from_rgb_u8(44, 28, 52),
        TileType::Floor => Color::from_rgb_u8(164, 132, 108),
        TileType::Gem => Color::from_rgb_u8(80, 220, 160),
        TileType::Player => Color::from_rgb_u8(255, 255, 255),
    }
}

/// Glyph used when drawing a tile into a character grid.
#[must_use]
pub const fn tile_glyph(tile: TileType) -> char {
    match tile {
        TileType::Wall => '#',
        TileType::Floor => '.',
        TileType::Gem => '*',
        TileType::Player => '@',
    }
}

/// Renders the captured cave as one line of glyphs per map row.
#[must_use]
pub fn render_text_map(view: &TileView) -> String {
    let size = view.size().max(0) as usize;
    let mut out = String::with_capacity(size * (size + 1));
    for (pos, tile) in view.positions() {
        out.push(tile_glyph(tile));
        if pos.x() == view.size() - 1 {
            out.push('\n');
        }
    }
    out
}

/// Describes the square tile grid that adapters project onto the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Side length of the map measured in tiles.
    pub size: i32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when the map has no cells or the tiles no area.
    pub fn new(size: i32, tile_length: f32) -> Result<Self, RenderingError> {
        if size < 1 {
            return Err(RenderingError::EmptyGrid { size });
        }
        if tile_length <= f32::EPSILON {
            return Err(RenderingError::DegenerateTileLength { tile_length });
        }

        Ok(Self { size, tile_length })
    }

    /// Screen-space origin of the square that draws the provided cell.
    #[must_use]
    pub fn tile_origin(&self, pos: GridPos) -> Vec2 {
        Vec2::new(
            pos.x() as f32 * self.tile_length,
            pos.y() as f32 * self.tile_length,
        )
    }

    /// Total extent of the rendered map along one axis in world units.
    #[must_use]
    pub const fn extent(&self) -> f32 {
        self.size as f32 * self.tile_length
    }
}

/// Solid square covering exactly one map cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSprite {
    /// Upper-left corner of the square in world units.
    pub origin: Vec2,
    /// Side length of the square in world units.
    pub size: f32,
    /// Fill color of the square.
    pub color: Color,
}

impl TileSprite {
    /// Creates a new tile sprite descriptor.
    #[must_use]
    pub const fn new(origin: Vec2, size: f32, color: Color) -> Self {
        Self {
            origin,
            size,
            color,
        }
    }
}

/// Scene description combining the grid geometry and one sprite per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Sprites in draw order, one per cell, row by row.
    pub sprites: Vec<TileSprite>,
}

impl Scene {
    /// Builds the scene for a captured cave snapshot.
    ///
    /// Every cell becomes one sprite at `cell * tile_length`, mirroring the
    /// direct cell-to-rectangle mapping of the play field.
    #[must_use]
    pub fn compose(view: &TileView, tile_grid: TileGridPresentation) -> Self {
        let sprites = view
            .positions()
            .map(|(pos, tile)| {
                TileSprite::new(
                    tile_grid.tile_origin(pos),
                    tile_grid.tile_length,
                    tile_color(tile),
                )
            })
            .collect();

        Self { tile_grid, sprites }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Gem Caverns scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and may mutate the scene before it is rendered, allowing
    /// adapters to animate world snapshots deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The grid must contain at least one cell to be drawable.
    EmptyGrid {
        /// Provided side length that failed validation.
        size: i32,
    },
    /// Tile length must be positive to avoid zero-area sprites.
    DegenerateTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { size } => {
                write!(f, "grid size must be positive (received {size})")
            }
            Self::DegenerateTileLength { tile_length } => {
                write!(f, "tile length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use gem_caverns_core::{GridPos, TileType, TileView};

    #[test]
    fn palette_matches_the_shipped_block_colors() {
        assert_eq!(tile_color(TileType::Floor), Color::from_rgb_u8(164, 132, 108));
        assert_eq!(tile_color(TileType::Wall), Color::from_rgb_u8(44, 28, 52));
        assert_eq!(
            tile_color(TileType::Player),
            Color::from_rgb_u8(255, 255, 255)
        );
    }

    #[test]
    fn sprite_origins_scale_with_tile_length() {
        let tile_grid = TileGridPresentation::new(4, 8.0).expect("valid grid");
        assert_eq!(
            tile_grid.tile_origin(GridPos::new(3, 1)),
            Vec2::new(24.0, 8.0)
        );
        assert!((tile_grid.extent() - 32.0).abs() < f32::EPSILON);
    }

    #[test]
    fn descriptor_construction_rejects_degenerate_grids() {
        assert!(matches!(
            TileGridPresentation::new(0, 8.0),
            Err(RenderingError::EmptyGrid { size: 0 })
        ));
        assert!(matches!(
            TileGridPresentation::new(4, 0.0),
            Err(RenderingError::DegenerateTileLength { .. })
        ));
    }

    #[test]
    fn compose_emits_one_sprite_per_cell_in_draw_order() {
        let view = TileView::from_cells(
            2,
            vec![
                TileType::Wall,
                TileType::Floor,
                TileType::Gem,
                TileType::Player,
            ],
        );
        let tile_grid = TileGridPresentation::new(2, 10.0).expect("valid grid");

        let scene = Scene::compose(&view, tile_grid);

        assert_eq!(scene.sprites.len(), 4);
        assert_eq!(scene.sprites[1].origin, Vec2::new(10.0, 0.0));
        assert_eq!(scene.sprites[1].color, tile_color(TileType::Floor));
        assert_eq!(scene.sprites[3].origin, Vec2::new(10.0, 10.0));
        assert_eq!(scene.sprites[3].color, tile_color(TileType::Player));
    }

    #[test]
    fn text_map_draws_one_row_per_line() {
        let view = TileView::from_cells(
            2,
            vec![
                TileType::Wall,
                TileType::Floor,
                TileType::Gem,
                TileType::Player,
            ],
        );

        assert_eq!(render_text_map(&view), "#.\n*@\n");
    }
}
