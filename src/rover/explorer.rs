//! Move-by-move exploration of the maze.
//!
//! [`Explorer`] owns the rover map and position. Each call to
//! [`Explorer::attempt_move`] asks the [`Session`] about exactly one neighbouring
//! cell, grows the map if that cell was past the edge, and records the answer.

use log::{debug, info};
use std::fmt;
use thiserror::Error;

use super::grid::{Cell, Coord, Direction, Grid, GridError};
use crate::pathbot::{Bearing, MoveReport, PathbotApi, ServiceError, Session};

/// Distance to the exit as last reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitDistance {
    #[default]
    Unknown,
    Known(u32),
}

impl fmt::Display for ExitDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDistance::Unknown => f.write_str("unknown"),
            ExitDistance::Known(d) => write!(f, "{}", d),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone)]
pub struct Explorer {
    grid: Grid,
    rover: Coord,
    exit_found: bool,
    exit_distance: ExitDistance,
    exit_bearing: Option<Bearing>,
    last_move_successful: bool,
    moves: u32,
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Explorer {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            rover: Coord::ORIGIN,
            exit_found: false,
            exit_distance: ExitDistance::Unknown,
            exit_bearing: None,
            last_move_successful: true,
            moves: 0,
        }
    }

    /// Take exit hints from the report the maze opened with.
    pub fn note_start(&mut self, report: &MoveReport) {
        self.absorb_exit_info(report);
    }

    /// Try to move the rover one cell. Returns whether it moved.
    ///
    /// Walls and open cells are ordinary results; only service failures are errors.
    pub async fn attempt_move<A: PathbotApi>(
        &mut self,
        session: &mut Session<A>,
        direction: Direction,
    ) -> Result<bool, ExploreError> {
        let from = self.rover;
        let target = direction.step(from);
        self.moves += 1;

        let (at_boundary, known) = match self.grid.get(target) {
            Ok(cell) => (false, cell),
            Err(GridError::OutOfBounds { .. }) => (true, Cell::Unknown),
        };
        debug!(
            "Move #{} {} from {} to {} (currently {:?}, edge: {})",
            self.moves, direction, from, target, known, at_boundary
        );

        let report = session.request_move(direction, target).await?;
        if report.is_passable() {
            self.absorb_exit_info(&report);
        }
        if at_boundary {
            self.grid.expand(direction);
        }

        if !report.is_passable() {
            self.grid.set(target, Cell::Obstacle)?;
            self.last_move_successful = false;
            return Ok(false);
        }

        let marker = if self.exit_found {
            Cell::ExitFound
        } else {
            Cell::Occupied
        };
        self.grid.set(from, Cell::Empty)?;
        self.grid.set(target, marker)?;
        self.rover = target;
        self.last_move_successful = true;
        Ok(true)
    }

    fn absorb_exit_info(&mut self, report: &MoveReport) {
        if report.finished {
            if !self.exit_found {
                info!("Exit reached after {} moves", self.moves);
            }
            self.exit_found = true;
            self.exit_distance = ExitDistance::Known(0);
            return;
        }
        if self.exit_found {
            return;
        }
        if let Some(d) = report.exit_distance {
            self.exit_distance = ExitDistance::Known(d);
        }
        if let Some(b) = report.exit_bearing {
            self.exit_bearing = Some(b);
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rover(&self) -> Coord {
        self.rover
    }

    pub fn exit_found(&self) -> bool {
        self.exit_found
    }

    pub fn exit_distance(&self) -> ExitDistance {
        self.exit_distance
    }

    pub fn exit_bearing(&self) -> Option<Bearing> {
        self.exit_bearing
    }

    pub fn last_move_successful(&self) -> bool {
        self.last_move_successful
    }

    /// Number of moves attempted so far, blocked ones included.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn render(&self) -> String {
        self.grid.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathbot::{LocationReport, Step, BLOCKED_MESSAGE};
    use crate::rover::Boundaries;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Step>);

    impl PathbotApi for Scripted {
        async fn start(&mut self) -> Result<LocationReport, ServiceError> {
            Ok(LocationReport {
                location_path: Some("/p/0".into()),
                ..Default::default()
            })
        }

        async fn step(&mut self, _path: &str, _heading: char) -> Result<Step, ServiceError> {
            self.0.pop_front().ok_or(ServiceError::Rejected {
                status: 500,
                message: "no more replies".into(),
            })
        }
    }

    async fn session(replies: Vec<Step>) -> Session<Scripted> {
        let mut s = Session::new(Scripted(replies.into()));
        s.start().await.unwrap();
        s
    }

    fn open(distance: Option<u32>, status: &str) -> Step {
        Step::Moved(LocationReport {
            status: Some(status.into()),
            maze_exit_distance: distance,
            maze_exit_direction: Some("N".into()),
            location_path: Some("/p/next".into()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn moving_up_inside_the_map_does_not_grow_it() {
        let mut session = session(vec![open(Some(5), "in-progress")]).await;
        let mut explorer = Explorer::new();

        assert!(explorer.attempt_move(&mut session, Direction::Up).await.unwrap());

        assert_eq!(explorer.grid().dimensions(), (3, 3));
        assert_eq!(explorer.grid().bounds().max_y, 1);
        assert_eq!(explorer.rover(), Coord::new(0, 1));
        assert_eq!(explorer.grid().get(Coord::ORIGIN), Ok(Cell::Empty));
        assert_eq!(explorer.grid().get(Coord::new(0, 1)), Ok(Cell::Occupied));
        assert_eq!(explorer.exit_distance(), ExitDistance::Known(5));
        assert_eq!(explorer.exit_bearing(), Some(Bearing::N));
    }

    #[tokio::test]
    async fn moving_up_past_the_top_edge() {
        let mut session = session(vec![open(Some(4), "in-progress")]).await;
        let mut explorer = Explorer::new();
        // Rover already on the top row.
        explorer.rover = Coord::new(0, 1);
        explorer.grid.set(Coord::ORIGIN, Cell::Empty).unwrap();
        explorer.grid.set(Coord::new(0, 1), Cell::Occupied).unwrap();

        assert!(explorer.attempt_move(&mut session, Direction::Up).await.unwrap());

        assert_eq!(explorer.grid().dimensions(), (3, 4));
        assert_eq!(
            explorer.grid().bounds(),
            Boundaries {
                min_x: -1,
                min_y: -1,
                max_x: 1,
                max_y: 2
            }
        );
        assert_eq!(explorer.rover(), Coord::new(0, 2));
        assert_eq!(explorer.grid().get(Coord::new(0, 1)), Ok(Cell::Empty));
        assert_eq!(explorer.grid().get(Coord::new(0, 2)), Ok(Cell::Occupied));
        assert_eq!(explorer.grid().get(Coord::ORIGIN), Ok(Cell::Empty));
        assert_eq!(explorer.exit_distance(), ExitDistance::Known(4));
    }

    #[tokio::test]
    async fn blocked_left_grows_a_column() {
        let mut session = session(vec![Step::Blocked(BLOCKED_MESSAGE.into())]).await;
        let mut explorer = Explorer::new();
        // Step left once so the next left probe crosses the edge.
        explorer.rover = Coord::new(-1, 0);
        explorer.grid.set(Coord::ORIGIN, Cell::Empty).unwrap();
        explorer.grid.set(Coord::new(-1, 0), Cell::Occupied).unwrap();

        assert!(!explorer.attempt_move(&mut session, Direction::Left).await.unwrap());

        assert_eq!(
            explorer.grid().bounds(),
            Boundaries {
                min_x: -2,
                min_y: -1,
                max_x: 1,
                max_y: 1
            }
        );
        assert_eq!(explorer.grid().get(Coord::new(-2, 0)), Ok(Cell::Obstacle));
        assert_eq!(explorer.rover(), Coord::new(-1, 0));
        assert_eq!(explorer.grid().get(Coord::new(-1, 0)), Ok(Cell::Occupied));
        assert!(!explorer.last_move_successful());
        assert_eq!(explorer.exit_distance(), ExitDistance::Unknown);
    }

    #[tokio::test]
    async fn finishing_marks_the_exit() {
        let mut session = session(vec![open(None, "finished")]).await;
        let mut explorer = Explorer::new();

        assert!(explorer.attempt_move(&mut session, Direction::Right).await.unwrap());

        assert!(explorer.exit_found());
        assert_eq!(explorer.exit_distance(), ExitDistance::Known(0));
        assert_eq!(explorer.grid().get(Coord::new(1, 0)), Ok(Cell::ExitFound));
        assert_eq!(explorer.render().matches('E').count(), 1);
    }

    #[tokio::test]
    async fn service_failure_leaves_the_map_alone() {
        let mut session = session(Vec::new()).await;
        let mut explorer = Explorer::new();

        let err = explorer
            .attempt_move(&mut session, Direction::Down)
            .await
            .unwrap_err();
        assert!(matches!(err, ExploreError::Service(ServiceError::Rejected { .. })));
        assert_eq!(explorer.grid().dimensions(), (3, 3));
        assert_eq!(explorer.rover(), Coord::ORIGIN);
    }

    #[test]
    fn distance_display() {
        assert_eq!(ExitDistance::Unknown.to_string(), "unknown");
        assert_eq!(ExitDistance::Known(0).to_string(), "0");
    }
}
