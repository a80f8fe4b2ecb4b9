//! Loaded levels and the mapping from grid units to screen pixels.

use glam::{IVec2, UVec2, Vec2};
use tracing::debug;

use crate::error::LevelLoadError;
use crate::map::parser::{LevelParser, ParsedLevel, Tile};

/// An immutable, validated level together with its screen geometry.
#[derive(Debug, Clone)]
pub struct Level {
    parsed: ParsedLevel,
    /// Pixel size of one cell.
    side: u32,
    /// Pixel offset centering the board on screen.
    offset: UVec2,
}

impl Level {
    /// Parses `source` and fits the board onto a screen of the given pixel size.
    ///
    /// # Errors
    ///
    /// Any [`LevelLoadError`] reported by [`LevelParser::parse`].
    pub fn load(source: &str, screen: UVec2) -> Result<Level, LevelLoadError> {
        let parsed = LevelParser::parse(source)?;
        Ok(Self::from_parsed(parsed, screen))
    }

    pub(crate) fn from_parsed(parsed: ParsedLevel, screen: UVec2) -> Level {
        let height = parsed.height as u32;
        let width = parsed.width as u32;
        let side = (screen.y / height).min(screen.x / width).max(1);
        let offset = UVec2::new(
            screen.x.saturating_sub(width * side) / 2,
            screen.y.saturating_sub(height * side) / 2,
        );

        debug!(height, width, max_players = parsed.max_players, side, ?offset, "Level loaded");
        Level { parsed, side, offset }
    }

    pub fn height(&self) -> usize {
        self.parsed.height
    }

    pub fn width(&self) -> usize {
        self.parsed.width
    }

    pub fn max_players(&self) -> usize {
        self.parsed.max_players
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn offset(&self) -> UVec2 {
        self.offset
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        self.parsed.tile(cell).is_some()
    }

    pub fn tile(&self, cell: IVec2) -> Option<Tile> {
        self.parsed.tile(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.parsed.cells()
    }

    /// Cells marked `S`, in reading order.
    pub fn spawn_points(&self) -> Vec<IVec2> {
        self.cells()
            .filter(|(_, tile)| *tile == Tile::Spawn)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// The fixed start cell for a player, from the legacy digit markers.
    pub fn fixed_start(&self, player: usize) -> Option<IVec2> {
        self.cells()
            .find(|(_, tile)| *tile == Tile::Start(player as u8))
            .map(|(cell, _)| cell)
    }

    /// Translates a grid position to the pixel position of its top-left corner.
    pub fn cell_to_screen(&self, position: Vec2) -> Vec2 {
        self.offset.as_vec2() + position * self.side as f32
    }
}
