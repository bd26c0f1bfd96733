//! Stateful wrapper around a [`PathbotApi`].
//!
//! The server only knows where the rover is through the location path it
//! handed out last, so the session carries that path forward. Every resolved
//! coordinate is remembered: asking about it again is answered locally, and a
//! passable hit also moves the session's location path to that cell.

use log::{debug, info};
use std::collections::HashMap;

use super::{MoveReport, PathbotApi, ServiceError, Step};
use crate::logutil::preview;
use crate::rover::{Coord, Direction};

pub struct Session<A> {
    api: A,
    location_path: Option<String>,
    last: Option<MoveReport>,
    cache: HashMap<Coord, MoveReport>,
    network_requests: usize,
}

impl<A: PathbotApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            location_path: None,
            last: None,
            cache: HashMap::new(),
            network_requests: 0,
        }
    }

    /// Open the maze. The origin is recorded as a passable cell.
    pub async fn start(&mut self) -> Result<&MoveReport, ServiceError> {
        self.network_requests += 1;
        let report = MoveReport::passable(self.api.start().await?);
        info!(
            "Maze started at {}",
            report.location_path.as_deref().unwrap_or("<no path>")
        );
        self.location_path = report.location_path.clone();
        self.cache.clear();
        self.cache.insert(Coord::ORIGIN, report.clone());
        Ok(&*self.last.insert(report))
    }

    /// Resolve a move toward `candidate`, which is only used as the cache key.
    pub async fn request_move(
        &mut self,
        direction: Direction,
        candidate: Coord,
    ) -> Result<MoveReport, ServiceError> {
        if let Some(hit) = self.cache.get(&candidate) {
            debug!("Cache hit for {} ({:?})", candidate, hit.region);
            let hit = hit.clone();
            if hit.is_passable() {
                if let Some(path) = &hit.location_path {
                    self.location_path = Some(path.clone());
                }
                self.last = Some(hit.clone());
            }
            return Ok(hit);
        }

        let path = self.location_path.clone().ok_or(ServiceError::NotStarted)?;
        self.network_requests += 1;
        let report = match self.api.step(&path, direction.heading()).await? {
            Step::Moved(location) => {
                let report = MoveReport::passable(location);
                if let Some(next) = &report.location_path {
                    self.location_path = Some(next.clone());
                }
                debug!(
                    "Moved {} to {}: {}",
                    direction,
                    candidate,
                    preview(report.description.as_deref().unwrap_or(""), 120)
                );
                self.last = Some(report.clone());
                report
            }
            Step::Blocked(message) => {
                debug!("Blocked moving {} to {}", direction, candidate);
                MoveReport::blocked(message)
            }
        };
        self.cache.insert(candidate, report.clone());
        Ok(report)
    }

    pub fn location_path(&self) -> Option<&str> {
        self.location_path.as_deref()
    }

    /// Report for the cell the rover currently stands on.
    pub fn last_report(&self) -> Option<&MoveReport> {
        self.last.as_ref()
    }

    /// Number of calls made to the underlying transport.
    pub fn network_requests(&self) -> usize {
        self.network_requests
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
