//! Static occupancy grid
//!
//! Cells are unit squares; cell (cx, cy) covers [cx, cx+1) x [cy, cy+1) in
//! world coordinates. Anything outside the grid counts as solid.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::SPAWN_MAX_ATTEMPTS;

/// Occupancy of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
}

impl Cell {
    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' | '0' | ' ' => Some(Cell::Empty),
            '#' | '1' => Some(Cell::Wall),
            _ => None,
        }
    }
}

/// Problems found in map data handed to [`GridMap::parse`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },
    #[error("border cell ({x}, {y}) is not a wall")]
    OpenBorder { x: usize, y: usize },
    #[error("map has no empty interior cell")]
    NoInterior,
}

/// Built-in arena: 10x10 room with solid border
const DEFAULT_ROWS: [&str; 10] = [
    "##########",
    "#........#",
    "#........#",
    "#........#",
    "#........#",
    "#........#",
    "#........#",
    "#........#",
    "#........#",
    "##########",
];

/// Immutable 2D occupancy grid, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Default for GridMap {
    fn default() -> Self {
        match Self::parse(&DEFAULT_ROWS) {
            Ok(map) => map,
            Err(e) => unreachable!("built-in map is valid: {e}"),
        }
    }
}

impl GridMap {
    /// Build a map from text rows (`#`/`1` = wall, `.`/`0`/space = empty).
    ///
    /// The border must be solid and at least one interior cell must be empty,
    /// so spawning and ray termination are always well defined.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let height = rows.len();
        if height == 0 {
            return Err(MapError::Empty);
        }
        let width = rows[0].as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell = Cell::from_glyph(glyph).ok_or(MapError::UnknownGlyph { glyph, x, y })?;
                cells.push(cell);
            }
        }

        let map = Self {
            width,
            height,
            cells,
        };

        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                if border && map.cell(x, y) != Cell::Wall {
                    return Err(MapError::OpenBorder { x, y });
                }
            }
        }

        if map.interior_cells().next().is_none() {
            return Err(MapError::NoInterior);
        }

        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at integer coordinates (caller guarantees bounds)
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Whether the cell containing (x, y) is a wall. Out of bounds is blocked.
    pub fn is_blocked(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        let (fx, fy) = (x.floor(), y.floor());
        if fx < 0.0 || fy < 0.0 || fx >= self.width as f32 || fy >= self.height as f32 {
            return true;
        }
        self.cell(fx as usize, fy as usize) == Cell::Wall
    }

    #[inline]
    pub fn is_blocked_at(&self, pos: Vec2) -> bool {
        self.is_blocked(pos.x, pos.y)
    }

    /// Coordinates of empty cells that do not touch the border
    fn interior_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..self.height.saturating_sub(1))
            .flat_map(move |y| (1..self.width.saturating_sub(1)).map(move |x| (x, y)))
            .filter(|&(x, y)| self.cell(x, y) == Cell::Empty)
    }

    /// First empty interior cell in row-major order
    pub fn first_empty_cell(&self) -> Option<(usize, usize)> {
        self.interior_cells().next()
    }

    /// Pick a random empty cell for spawning.
    ///
    /// Rejection sampling is capped at [`SPAWN_MAX_ATTEMPTS`]; past the cap the
    /// first empty cell in scan order is used. `None` only when the map has no
    /// empty cell in the sampled region at all.
    pub fn random_empty_cell<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        exclude_border: bool,
    ) -> Option<(usize, usize)> {
        let (lo_x, hi_x, lo_y, hi_y) = if exclude_border {
            (1, self.width.saturating_sub(1), 1, self.height.saturating_sub(1))
        } else {
            (0, self.width, 0, self.height)
        };
        if lo_x >= hi_x || lo_y >= hi_y {
            return None;
        }

        for _ in 0..SPAWN_MAX_ATTEMPTS {
            let x = rng.random_range(lo_x..hi_x);
            let y = rng.random_range(lo_y..hi_y);
            if self.cell(x, y) == Cell::Empty {
                return Some((x, y));
            }
        }

        log::warn!(
            "No empty cell after {} attempts, falling back to scan",
            SPAWN_MAX_ATTEMPTS
        );
        (lo_y..hi_y)
            .flat_map(|y| (lo_x..hi_x).map(move |x| (x, y)))
            .find(|&(x, y)| self.cell(x, y) == Cell::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_map_border() {
        let map = GridMap::default();
        assert_eq!(map.width(), 10);
        assert_eq!(map.height(), 10);
        assert!(map.is_blocked(0.5, 5.0));
        assert!(map.is_blocked(9.2, 5.0));
        assert!(map.is_blocked(5.0, 0.99));
        assert!(!map.is_blocked(5.0, 5.0));
        assert!(!map.is_blocked(1.0, 8.999));
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let map = GridMap::default();
        assert!(map.is_blocked(-0.1, 5.0));
        assert!(map.is_blocked(5.0, 10.0));
        assert!(map.is_blocked(100.0, -100.0));
        assert!(map.is_blocked(f32::NAN, 5.0));
        assert!(map.is_blocked(5.0, f32::INFINITY));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(GridMap::parse::<&str>(&[]), Err(MapError::Empty));
        assert_eq!(
            GridMap::parse(&["###", "#.", "###"]),
            Err(MapError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            GridMap::parse(&["###", "#x#", "###"]),
            Err(MapError::UnknownGlyph {
                glyph: 'x',
                x: 1,
                y: 1
            })
        );
        assert_eq!(
            GridMap::parse(&["###", "#..", "###"]),
            Err(MapError::OpenBorder { x: 2, y: 1 })
        );
        assert_eq!(
            GridMap::parse(&["###", "###", "###"]),
            Err(MapError::NoInterior)
        );
    }

    #[test]
    fn test_parse_numeric_glyphs() {
        let map = GridMap::parse(&["1111", "1001", "1111"]).unwrap();
        assert!(!map.is_blocked(1.5, 1.5));
        assert!(!map.is_blocked(2.5, 1.5));
        assert!(map.is_blocked(3.5, 1.5));
    }

    #[test]
    fn test_random_empty_cell_is_interior() {
        let map = GridMap::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let (x, y) = map.random_empty_cell(&mut rng, true).unwrap();
            assert!((1..9).contains(&x));
            assert!((1..9).contains(&y));
            assert_eq!(map.cell(x, y), Cell::Empty);
        }
    }

    #[test]
    fn test_random_empty_cell_single_gap() {
        let map = GridMap::parse(&[
            "##########",
            "##########",
            "########.#",
            "##########",
        ])
        .unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(map.random_empty_cell(&mut rng, true), Some((8, 2)));
    }
}
