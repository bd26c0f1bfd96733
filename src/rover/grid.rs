//! Growable rover map addressed by signed logical coordinates.
//!
//! The origin is the rover's starting cell. Logical `x` grows to the right and
//! logical `y` grows upward. Storage is a dense row-major matrix whose first row
//! is the *top* of the map, so every access goes through one translation:
//!
//! ```text
//! col = x - min_x
//! row = max_y - y
//! ```
//!
//! Growing the map only ever adds one row or column on the edge the rover tried
//! to cross; the boundaries are adjusted in the same step so previously written
//! cells keep their logical coordinates.

use std::fmt;
use thiserror::Error;

/// Signed logical coordinate of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four moves the rover can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)` in logical space.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Coordinate one step away from `from`.
    pub fn step(self, from: Coord) -> Coord {
        let (dx, dy) = self.offset();
        Coord::new(from.x + dx, from.y + dy)
    }

    /// Compass letter the maze server expects for this move.
    pub fn heading(self) -> char {
        match self {
            Direction::Up => 'N',
            Direction::Down => 'S',
            Direction::Left => 'W',
            Direction::Right => 'E',
        }
    }

    /// Arrow shown when a scripted move is echoed.
    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '\u{2191}',
            Direction::Down => '\u{2193}',
            Direction::Left => '\u{2190}',
            Direction::Right => '\u{2192}',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// What the rover knows about a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Unknown,
    Obstacle,
    Empty,
    /// Rover's current cell.
    Occupied,
    /// Rover's current cell once the exit has been reached.
    ExitFound,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Unknown => '?',
            Cell::Obstacle => '#',
            Cell::Empty => '0',
            Cell::Occupied => 'X',
            Cell::ExitFound => 'E',
        }
    }

    /// True for the cell that carries the rover.
    pub fn is_rover(self) -> bool {
        matches!(self, Cell::Occupied | Cell::ExitFound)
    }
}

/// Logical extent currently backed by storage (inclusive on all sides).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundaries {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Boundaries {
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    pub fn contains(&self, at: Coord) -> bool {
        (self.min_x..=self.max_x).contains(&at.x) && (self.min_y..=self.max_y).contains(&at.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {at} is outside the mapped area x={min_x}..={max_x}, y={min_y}..={max_y}")]
    OutOfBounds {
        at: Coord,
        min_x: i32,
        min_y: i32,
        max_x: i32,
        max_y: i32,
    },
}

pub type GridResult<T> = Result<T, GridError>;

/// Dense rover map with an origin-centred coordinate system.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    bounds: Boundaries,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// 3x3 map centred on the origin with the rover in the middle.
    pub fn new() -> Self {
        let mut rows = vec![vec![Cell::Unknown; 3]; 3];
        rows[1][1] = Cell::Occupied;
        Grid {
            rows,
            bounds: Boundaries {
                min_x: -1,
                min_y: -1,
                max_x: 1,
                max_y: 1,
            },
        }
    }

    pub fn bounds(&self) -> Boundaries {
        self.bounds
    }

    /// Backing storage size as `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        let cols = self.rows.first().map_or(0, Vec::len);
        (cols, self.rows.len())
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.bounds.contains(at)
    }

    pub fn get(&self, at: Coord) -> GridResult<Cell> {
        let (row, col) = self.resolve(at)?;
        Ok(self.rows[row][col])
    }

    pub fn set(&mut self, at: Coord, value: Cell) -> GridResult<()> {
        let (row, col) = self.resolve(at)?;
        self.rows[row][col] = value;
        Ok(())
    }

    /// Grow the map by one row or column on the edge `direction` points at.
    pub fn expand(&mut self, direction: Direction) {
        let width = self.bounds.width();
        match direction {
            Direction::Left => {
                for row in &mut self.rows {
                    row.insert(0, Cell::Unknown);
                }
                self.bounds.min_x -= 1;
            }
            Direction::Right => {
                for row in &mut self.rows {
                    row.push(Cell::Unknown);
                }
                self.bounds.max_x += 1;
            }
            Direction::Up => {
                self.rows.insert(0, vec![Cell::Unknown; width]);
                self.bounds.max_y += 1;
            }
            Direction::Down => {
                self.rows.push(vec![Cell::Unknown; width]);
                self.bounds.min_y -= 1;
            }
        }
    }

    /// Cells of the map, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Bordered ASCII picture of the map.
    pub fn render(&self) -> String {
        let (cols, _) = self.dimensions();
        let mut out = String::new();
        out.push(' ');
        out.push_str(&"_ ".repeat(cols));
        out.push('\n');
        for row in &self.rows {
            out.push('|');
            let glyphs: Vec<String> = row.iter().map(|c| c.glyph().to_string()).collect();
            out.push_str(&glyphs.join(" "));
            out.push('|');
            out.push('\n');
        }
        out.push(' ');
        out.push_str(&"\u{203E} ".repeat(cols));
        out.push('\n');
        out
    }

    fn resolve(&self, at: Coord) -> GridResult<(usize, usize)> {
        let col = at.x - self.bounds.min_x;
        let row = self.bounds.max_y - at.y;
        let (cols, rows) = self.dimensions();
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if r < rows && c < cols => Ok((r, c)),
            _ => Err(GridError::OutOfBounds {
                at,
                min_x: self.bounds.min_x,
                min_y: self.bounds.min_y,
                max_x: self.bounds.max_x,
                max_y: self.bounds.max_y,
            }),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_three_by_three_with_rover_in_centre() {
        let grid = Grid::new();
        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.get(Coord::ORIGIN), Ok(Cell::Occupied));
        assert_eq!(grid.get(Coord::new(-1, 1)), Ok(Cell::Unknown));
        assert_eq!(grid.get(Coord::new(1, -1)), Ok(Cell::Unknown));
    }

    #[test]
    fn up_is_stored_first() {
        let mut grid = Grid::new();
        grid.set(Coord::new(0, 1), Cell::Obstacle).unwrap();
        let top: Vec<Cell> = grid.rows().next().unwrap().to_vec();
        assert_eq!(top, vec![Cell::Unknown, Cell::Obstacle, Cell::Unknown]);
    }

    #[test]
    fn out_of_range_on_every_side() {
        let mut grid = Grid::new();
        for at in [
            Coord::new(-2, 0),
            Coord::new(2, 0),
            Coord::new(0, 2),
            Coord::new(0, -2),
        ] {
            assert!(matches!(grid.get(at), Err(GridError::OutOfBounds { .. })));
            assert!(grid.set(at, Cell::Empty).is_err());
        }
    }

    #[test]
    fn expansion_keeps_logical_positions() {
        let mut grid = Grid::new();
        grid.set(Coord::new(-1, 1), Cell::Obstacle).unwrap();
        grid.set(Coord::new(1, -1), Cell::Empty).unwrap();

        grid.expand(Direction::Left);
        grid.expand(Direction::Up);
        grid.expand(Direction::Right);
        grid.expand(Direction::Down);

        assert_eq!(grid.dimensions(), (5, 5));
        assert_eq!(
            grid.bounds(),
            Boundaries {
                min_x: -2,
                min_y: -2,
                max_x: 2,
                max_y: 2
            }
        );
        assert_eq!(grid.get(Coord::new(-1, 1)), Ok(Cell::Obstacle));
        assert_eq!(grid.get(Coord::new(1, -1)), Ok(Cell::Empty));
        assert_eq!(grid.get(Coord::ORIGIN), Ok(Cell::Occupied));
        assert_eq!(grid.get(Coord::new(-2, 2)), Ok(Cell::Unknown));
    }

    #[test]
    fn render_frames_rows() {
        let grid = Grid::new();
        let text = grid.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], " _ _ _ ");
        assert_eq!(lines[1], "|? ? ?|");
        assert_eq!(lines[2], "|? X ?|");
        assert_eq!(lines[3], "|? ? ?|");
        assert_eq!(lines[4], " \u{203E} \u{203E} \u{203E} ");
    }

    #[test]
    fn direction_headings() {
        let headings: String = Direction::ALL.iter().map(|d| d.heading()).collect();
        assert_eq!(headings, "NSWE");
        assert_eq!(Direction::Left.step(Coord::ORIGIN), Coord::new(-1, 0));
    }
}
