use std::fmt;

use glam::IVec2;
use thiserror::Error;

use crate::fixed::Fixed;

/// One map cell.  `0` is empty, anything else is solid.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// Things that can go wrong when building a [`Map`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no cells")]
    Empty,

    /// Row `row` has `got` cells, the first row has `expected`.
    #[error("row {row} has {got} cells, expected {expected}")]
    Ragged {
        row: usize,
        got: usize,
        expected: usize,
    },

    /// The ray caster needs a solid border to terminate.
    #[error("border cell ({x}, {y}) is empty; the map must be enclosed")]
    Unenclosed { x: usize, y: usize },

    #[error("unknown map character {ch:?} at line {line}, column {column}")]
    BadCell {
        ch: char,
        line: usize,
        column: usize,
    },
}

/// Immutable grid of cells, row-major, row 0 at the top (−Y).
///
/// One cell spans exactly one [`Fixed`] unit on each axis.
#[derive(Clone, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Map {
    /// Build a map from a flat row-major cell vector.
    ///
    /// Fails unless every border cell is solid.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        if cells.len() != width * height {
            return Err(MapError::Ragged {
                row: cells.len() / width,
                got: cells.len() % width,
                expected: width,
            });
        }
        let map = Self {
            width,
            height,
            cells,
        };
        map.check_enclosed()?;
        Ok(map)
    }

    /// Parse an ASCII map.
    ///
    /// `#` and `1`–`9` are solid (digits keep their value), `.`, `0` and
    /// space are empty.  Blank lines are skipped.
    pub fn parse(src: &str) -> Result<Self, MapError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (line_no, line) in src.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let mut row_len = 0;
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' | '0' | ' ' => EMPTY,
                    '#' => 1,
                    '1'..='9' => ch as u8 - b'0',
                    _ => {
                        return Err(MapError::BadCell {
                            ch,
                            line: line_no + 1,
                            column: col + 1,
                        });
                    }
                };
                cells.push(cell);
                row_len += 1;
            }
            match width {
                None => width = Some(row_len),
                Some(w) if w != row_len => {
                    return Err(MapError::Ragged {
                        row: height,
                        got: row_len,
                        expected: w,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Self::new(width.unwrap_or(0), height, cells)
    }

    /// The 8×8 octagon-like room used by the demo and the tests.
    pub fn sample() -> Self {
        #[rustfmt::skip]
        const CELLS: [Cell; 64] = [
            1, 1, 1, 1, 1, 1, 1, 1,
            1, 0, 0, 0, 0, 1, 1, 1,
            1, 0, 0, 0, 0, 0, 1, 1,
            1, 1, 0, 0, 0, 0, 0, 1,
            1, 1, 0, 0, 0, 0, 0, 1,
            1, 0, 0, 0, 0, 0, 1, 1,
            1, 0, 0, 0, 0, 1, 1, 1,
            1, 1, 1, 1, 1, 1, 1, 1,
        ];
        Self {
            width: 8,
            height: 8,
            cells: CELLS.to_vec(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at grid coordinate `c`, `None` outside the grid.
    #[inline]
    pub fn cell(&self, c: IVec2) -> Option<Cell> {
        if c.x < 0 || c.y < 0 || c.x as usize >= self.width || c.y as usize >= self.height {
            return None;
        }
        Some(self.cells[c.y as usize * self.width + c.x as usize])
    }

    /// Cells outside the grid count as solid.
    #[inline(always)]
    pub fn is_solid(&self, c: IVec2) -> bool {
        self.cell(c).is_none_or(|cell| cell != EMPTY)
    }

    /// Grid-occupancy test for a world-space point.
    #[inline]
    pub fn is_solid_at(&self, x: Fixed, y: Fixed) -> bool {
        self.is_solid(IVec2::new(x.floor(), y.floor()))
    }

    fn check_enclosed(&self) -> Result<(), MapError> {
        let (w, h) = (self.width, self.height);
        let border = (0..w)
            .flat_map(|x| [(x, 0), (x, h - 1)])
            .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));
        for (x, y) in border {
            if self.cells[y * w + x] == EMPTY {
                return Err(MapError::Unenclosed { x, y });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Map {}x{}", self.width, self.height)?;
        for row in self.cells.chunks(self.width) {
            let line: String = row
                .iter()
                .map(|&c| if c == EMPTY { '.' } else { '#' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_enclosed() {
        let m = Map::sample();
        assert!(m.check_enclosed().is_ok());
        assert!(!m.is_solid(IVec2::new(3, 3)));
        assert!(m.is_solid(IVec2::new(0, 3)));
        assert!(m.is_solid(IVec2::new(1, 3)));
    }

    #[test]
    fn outside_cells_are_solid() {
        let m = Map::sample();
        assert!(m.is_solid(IVec2::new(-1, 2)));
        assert!(m.is_solid(IVec2::new(8, 2)));
        assert_eq!(m.cell(IVec2::new(2, 100)), None);
    }

    #[test]
    fn parse_round_trips_sample() {
        let src = "\
########
#....###
#.....##
##.....#
##.....#
#.....##
#....###
########
";
        assert_eq!(Map::parse(src).unwrap(), Map::sample());
    }

    #[test]
    fn parse_rejects_open_border() {
        let err = Map::parse("###\n#..\n###\n").unwrap_err();
        assert_eq!(err, MapError::Unenclosed { x: 2, y: 1 });
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Map::parse("####\n#.#\n####\n").unwrap_err();
        assert_eq!(
            err,
            MapError::Ragged {
                row: 1,
                got: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_chars() {
        let err = Map::parse("###\n#x#\n###\n").unwrap_err();
        assert_eq!(
            err,
            MapError::BadCell {
                ch: 'x',
                line: 2,
                column: 2
            }
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(Map::parse("\n\n").unwrap_err(), MapError::Empty);
    }
}
