//! Level parsing functionality for converting level files into structured data.

use glam::IVec2;

use crate::constants::MAX_PLAYERS;
use crate::error::LevelLoadError;

/// The different kinds of tiles a level file can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    /// An indestructible wall.
    Wall,
    /// A destructible box.
    Box,
    /// A spawn point handed out to players in random order.
    Spawn,
    /// A fixed starting position for the given 0-based player id.
    Start(u8),
}

/// Structured representation of a level file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLevel {
    pub height: usize,
    pub width: usize,
    pub max_players: usize,
    /// Row-major tiles, `height * width` long.
    pub tiles: Vec<Tile>,
}

impl ParsedLevel {
    pub fn tile(&self, cell: IVec2) -> Option<Tile> {
        if cell.x < 0 || cell.y < 0 || cell.x as usize >= self.width || cell.y as usize >= self.height {
            return None;
        }
        self.tiles.get(cell.y as usize * self.width + cell.x as usize).copied()
    }

    /// Iterates every cell with its tile, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| (IVec2::new((index % width) as i32, (index / width) as i32), *tile))
    }
}

/// Parser for the plain-text level format.
///
/// ```text
/// 3 5 2
/// WWWWW
/// W1 2W
/// WWWWW
/// ```
pub struct LevelParser;

impl LevelParser {
    /// Converts a level symbol into its tile, or `None` for characters outside the
    /// level alphabet (the caller knows the row and column to report).
    pub fn parse_symbol(symbol: char) -> Option<Tile> {
        match symbol {
            'W' => Some(Tile::Wall),
            'B' => Some(Tile::Box),
            ' ' => Some(Tile::Empty),
            'S' => Some(Tile::Spawn),
            '1'..='9' => Some(Tile::Start(symbol as u8 - b'1')),
            _ => None,
        }
    }

    /// Parses the `height width max_players` header line.
    pub fn parse_header(line: &str) -> Result<(usize, usize, usize), LevelLoadError> {
        let fields = line
            .split_whitespace()
            .map(|field| field.parse::<usize>().ok().filter(|value| *value > 0))
            .collect::<Vec<_>>();

        match fields.as_slice() {
            [Some(height), Some(width), Some(max_players)] => {
                if *max_players > MAX_PLAYERS {
                    return Err(LevelLoadError::MalformedHeader(format!(
                        "at most {MAX_PLAYERS} players are supported, header declares {max_players}"
                    )));
                }
                Ok((*height, *width, *max_players))
            }
            [_, _, _] => Err(LevelLoadError::MalformedHeader(format!(
                "expected three positive integers, found {line:?}"
            ))),
            _ => Err(LevelLoadError::MalformedHeader(format!(
                "expected 3 fields, found {} in {line:?}",
                fields.len()
            ))),
        }
    }

    /// Parses a whole level file.
    ///
    /// The row count is checked before any row is inspected; rows are then checked in
    /// order, width first and symbols second.
    ///
    /// # Errors
    ///
    /// Returns the [`LevelLoadError`] describing the first violated rule.
    pub fn parse(source: &str) -> Result<ParsedLevel, LevelLoadError> {
        let mut lines = source.lines().map(|line| line.strip_suffix('\r').unwrap_or(line));

        let header = lines
            .next()
            .ok_or_else(|| LevelLoadError::MalformedHeader("level source is empty".to_string()))?;
        let (height, width, max_players) = Self::parse_header(header)?;

        let rows = lines.collect::<Vec<_>>();
        if rows.len() != height {
            return Err(LevelLoadError::RowCountMismatch {
                expected: height,
                found: rows.len(),
            });
        }

        let mut tiles = Vec::with_capacity(height * width);
        for (row_index, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelLoadError::ColumnCountMismatch {
                    row: row_index + 1,
                    expected: width,
                    found,
                });
            }

            for (col_index, symbol) in row.chars().enumerate() {
                let tile = Self::parse_symbol(symbol).ok_or(LevelLoadError::UnknownSymbol {
                    row: row_index + 1,
                    col: col_index + 1,
                    symbol,
                })?;
                tiles.push(tile);
            }
        }

        Ok(ParsedLevel {
            height,
            width,
            max_players,
            tiles,
        })
    }
}
