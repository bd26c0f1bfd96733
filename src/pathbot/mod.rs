//! # Pathbot maze service
//!
//! Client side of the remote maze game. The server keeps no per-player state:
//! every reply carries a `locationPath` and the next move is posted to that path.
//!
//! - [`PathbotApi`] is the transport seam (HTTP in production, in-memory in tests).
//! - [`HttpPathbot`] talks JSON over HTTPS with reqwest.
//! - [`Session`] owns the current location path and a per-coordinate cache of
//!   resolved moves so the same coordinate is never asked about twice.

pub mod errors;
pub mod http;
pub mod session;

pub use errors::ServiceError;
pub use http::{decode_reply, HttpPathbot};
pub use session::Session;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Message the server sends with a non-success status when a wall is in the way.
pub const BLOCKED_MESSAGE: &str = "Can't go that way";

/// Value of `status` once the rover stands on the exit.
pub const STATUS_FINISHED: &str = "finished";

/// Location report as sent by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub exits: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub maze_exit_direction: Option<String>,
    #[serde(default)]
    pub maze_exit_distance: Option<u32>,
    #[serde(default)]
    pub location_path: Option<String>,
}

/// Body of a non-success reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of one move request at the transport level.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Moved(LocationReport),
    Blocked(String),
}

/// Transport used by [`Session`].
#[allow(async_fn_in_trait)]
pub trait PathbotApi {
    /// Open a new maze and return the starting location.
    async fn start(&mut self) -> Result<LocationReport, ServiceError>;

    /// Post `heading` (one of `N`, `S`, `E`, `W`) to `location_path`.
    async fn step(&mut self, location_path: &str, heading: char) -> Result<Step, ServiceError>;
}

/// Server classification of a probed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionType {
    Empty,
    Obstacle,
}

/// Eight-way compass bearing from the rover to the exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bearing {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Bearing {
    pub fn arrow(self) -> char {
        match self {
            Bearing::N => '\u{2191}',
            Bearing::NE => '\u{2197}',
            Bearing::E => '\u{2192}',
            Bearing::SE => '\u{2198}',
            Bearing::S => '\u{2193}',
            Bearing::SW => '\u{2199}',
            Bearing::W => '\u{2190}',
            Bearing::NW => '\u{2196}',
        }
    }
}

impl FromStr for Bearing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(Bearing::N),
            "NE" => Ok(Bearing::NE),
            "E" => Ok(Bearing::E),
            "SE" => Ok(Bearing::SE),
            "S" => Ok(Bearing::S),
            "SW" => Ok(Bearing::SW),
            "W" => Ok(Bearing::W),
            "NW" => Ok(Bearing::NW),
            other => Err(format!("unknown bearing '{}'", other)),
        }
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bearing::N => "N",
            Bearing::NE => "NE",
            Bearing::E => "E",
            Bearing::SE => "SE",
            Bearing::S => "S",
            Bearing::SW => "SW",
            Bearing::W => "W",
            Bearing::NW => "NW",
        };
        f.write_str(s)
    }
}

/// Resolved answer for one coordinate, as cached by [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub region: RegionType,
    pub finished: bool,
    pub exit_distance: Option<u32>,
    pub exit_bearing: Option<Bearing>,
    pub location_path: Option<String>,
    pub description: Option<String>,
    pub message: Option<String>,
    pub exits: Vec<String>,
}

impl MoveReport {
    /// Report for a cell the rover was able to enter.
    pub fn passable(report: LocationReport) -> Self {
        let exit_bearing = report
            .maze_exit_direction
            .as_deref()
            .and_then(|raw| match raw.parse::<Bearing>() {
                Ok(b) => Some(b),
                Err(e) => {
                    log::warn!("Ignoring exit direction from server: {}", e);
                    None
                }
            });
        MoveReport {
            region: RegionType::Empty,
            finished: report.status.as_deref() == Some(STATUS_FINISHED),
            exit_distance: report.maze_exit_distance,
            exit_bearing,
            location_path: report.location_path,
            description: report.description,
            message: report.message,
            exits: report.exits,
        }
    }

    /// Report for a wall.
    pub fn blocked(message: String) -> Self {
        MoveReport {
            region: RegionType::Obstacle,
            finished: false,
            exit_distance: None,
            exit_bearing: None,
            location_path: None,
            description: None,
            message: Some(message),
            exits: Vec::new(),
        }
    }

    pub fn is_passable(&self) -> bool {
        self.region == RegionType::Empty
    }
}
