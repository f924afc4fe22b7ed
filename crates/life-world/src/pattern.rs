//! Named starting patterns parsed from ASCII rows.

use life_core::{Coord, Error, Result};
use serde::{Deserialize, Serialize};

/// A set of live cells relative to a top-left origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub cells: Vec<Coord>,
}

const PRESETS: &[(&str, &[&str])] = &[
    ("block", &["##", "##"]),
    ("blinker", &["###"]),
    ("toad", &[".###", "###."]),
    ("beacon", &["##..", "##..", "..##", "..##"]),
    ("glider", &[".#.", "..#", "###"]),
    ("r-pentomino", &[".##", "##.", ".#."]),
];

impl Pattern {
    /// Parse rows where `#`, `O` or `*` mark live cells and `.` marks dead ones.
    pub fn parse(name: &str, rows: &[&str]) -> Result<Self> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut cells = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(Error::InvalidPattern(format!(
                    "{}: row {} has {} columns, expected {}",
                    name,
                    row,
                    line.chars().count(),
                    width
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' | 'O' | '*' => cells.push(Coord::new(row as i32, col as i32)),
                    '.' => {}
                    other => {
                        return Err(Error::InvalidPattern(format!(
                            "{}: unexpected character {:?} at row {}, column {}",
                            name, other, row, col
                        )))
                    }
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            cells,
        })
    }

    /// Look up a built-in pattern by name (case-insensitive).
    pub fn preset(name: &str) -> Result<Self> {
        let wanted = name.to_ascii_lowercase();
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == wanted)
            .ok_or_else(|| Error::InvalidPattern(format!("unknown preset: {}", name)))
            .and_then(|(preset, rows)| Self::parse(preset, rows))
    }

    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glider() {
        let glider = Pattern::preset("glider").unwrap();
        assert_eq!(
            glider.cells,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(2, 0),
                Coord::new(2, 1),
                Coord::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_every_preset_parses() {
        for name in Pattern::preset_names() {
            let pattern = Pattern::preset(name).unwrap();
            assert!(!pattern.cells.is_empty(), "{name} is empty");
        }
        assert_eq!(Pattern::preset("BLINKER").unwrap().cells.len(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Pattern::parse("bad", &["#x"]),
            Err(Error::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::parse("ragged", &["##", "#"]),
            Err(Error::InvalidPattern(_))
        ));
        assert!(Pattern::preset("spaceship").is_err());
    }
}
