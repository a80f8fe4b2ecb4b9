//! Discovery of level files on disk.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::GameResult;
use crate::map::parser::LevelParser;

/// Extension of level files.
pub const LEVEL_EXTENSION: &str = "bff";

/// A level file that can host a requested number of players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    /// Capitalised file stem, e.g. `Arena` for `arena.bff`.
    pub name: String,
    pub path: PathBuf,
    pub max_players: usize,
}

pub struct LevelCatalog;

impl LevelCatalog {
    /// Lists the levels in `dir` that allow at least `players` players, sorted by name.
    ///
    /// Only header lines are read. Files with an unreadable header are skipped with a
    /// warning rather than failing the whole scan.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the directory itself cannot be read.
    pub fn scan(dir: &Path, players: usize) -> GameResult<Vec<LevelEntry>> {
        let mut entries = Vec::new();

        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEVEL_EXTENSION) {
                continue;
            }

            let max_players = match Self::read_capacity(&path) {
                Ok(max_players) => max_players,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable level");
                    continue;
                }
            };

            if max_players < players {
                debug!(path = %path.display(), max_players, players, "Level too small");
                continue;
            }

            entries.push(LevelEntry {
                name: display_name(&path),
                path,
                max_players,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        Ok(entries)
    }

    fn read_capacity(path: &Path) -> GameResult<usize> {
        let mut header = String::new();
        BufReader::new(File::open(path)?).read_line(&mut header)?;
        let (_, _, max_players) = LevelParser::parse_header(header.trim_end())?;
        Ok(max_players)
    }
}

fn display_name(path: &Path) -> String {
    let stem = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or_default();
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("maps/ARENA.bff")), "Arena");
        assert_eq!(display_name(Path::new("maps/cross.bff")), "Cross");
    }
}
