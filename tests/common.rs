//! Test utilities & fixtures.
//! Provides an in-memory Pathbot maze so sessions can be played without a network.

use pathrover::pathbot::{LocationReport, PathbotApi, ServiceError, Step, BLOCKED_MESSAGE};

/// Maze drawn as text. `S` is the start (logical origin), `E` the exit, `#`
/// rock; anything else is open. The first row is the northernmost, and
/// everything outside the drawing counts as rock.
pub struct MemoryMaze {
    rows: Vec<Vec<char>>,
    start: (usize, usize),
    requests: usize,
}

#[allow(dead_code)]
impl MemoryMaze {
    pub fn from_rows(rows: &[&str]) -> Self {
        let rows: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
        let mut start = None;
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.iter().enumerate() {
                if *ch == 'S' {
                    start = Some((r, c));
                }
            }
        }
        MemoryMaze {
            rows,
            start: start.expect("maze needs an S"),
            requests: 0,
        }
    }

    /// Transport calls seen so far (start included).
    pub fn requests(&self) -> usize {
        self.requests
    }

    fn tile(&self, x: i32, y: i32) -> char {
        let r = self.start.0 as i32 - y;
        let c = self.start.1 as i32 + x;
        if r < 0 || c < 0 {
            return '#';
        }
        self.rows
            .get(r as usize)
            .and_then(|row| row.get(c as usize))
            .copied()
            .unwrap_or('#')
    }

    fn exit(&self) -> Option<(i32, i32)> {
        for (r, row) in self.rows.iter().enumerate() {
            for (c, ch) in row.iter().enumerate() {
                if *ch == 'E' {
                    return Some((c as i32 - self.start.1 as i32, self.start.0 as i32 - r as i32));
                }
            }
        }
        None
    }

    fn open_exits(&self, x: i32, y: i32) -> Vec<String> {
        [("N", 0, 1), ("S", 0, -1), ("E", 1, 0), ("W", -1, 0)]
            .iter()
            .filter(|(_, dx, dy)| self.tile(x + dx, y + dy) != '#')
            .map(|(letter, _, _)| letter.to_string())
            .collect()
    }

    fn report(&self, x: i32, y: i32) -> LocationReport {
        let (ex, ey) = self.exit().unwrap_or((x, y));
        let (dx, dy) = (ex - x, ey - y);
        let vertical = if dy > 0 { "N" } else if dy < 0 { "S" } else { "" };
        let horizontal = if dx > 0 { "E" } else if dx < 0 { "W" } else { "" };
        let finished = dx == 0 && dy == 0;
        LocationReport {
            status: Some(if finished { "finished" } else { "in-progress" }.to_string()),
            message: Some(format!("You are at {},{}", x, y)),
            exits: self.open_exits(x, y),
            description: Some("A dusty corridor.".to_string()),
            maze_exit_direction: if finished {
                None
            } else {
                Some(format!("{}{}", vertical, horizontal))
            },
            maze_exit_distance: Some((dx.abs() + dy.abs()) as u32),
            location_path: Some(format!("/maze/{}/{}", x, y)),
        }
    }
}

impl PathbotApi for MemoryMaze {
    async fn start(&mut self) -> Result<LocationReport, ServiceError> {
        self.requests += 1;
        Ok(self.report(0, 0))
    }

    async fn step(&mut self, location_path: &str, heading: char) -> Result<Step, ServiceError> {
        self.requests += 1;
        let parts: Vec<i32> = location_path
            .trim_start_matches("/maze/")
            .split('/')
            .filter_map(|p| p.parse().ok())
            .collect();
        let (x, y) = match parts.as_slice() {
            [x, y] => (*x, *y),
            _ => {
                return Err(ServiceError::Rejected {
                    status: 404,
                    message: format!("no room at {}", location_path),
                })
            }
        };
        let (nx, ny) = match heading {
            'N' => (x, y + 1),
            'S' => (x, y - 1),
            'E' => (x + 1, y),
            'W' => (x - 1, y),
            other => {
                return Err(ServiceError::Rejected {
                    status: 400,
                    message: format!("bad direction {}", other),
                })
            }
        };
        if self.tile(nx, ny) == '#' {
            return Ok(Step::Blocked(BLOCKED_MESSAGE.to_string()));
        }
        Ok(Step::Moved(self.report(nx, ny)))
    }
}
