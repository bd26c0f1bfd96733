//! # Pathrover - console client for the Pathbot maze
//!
//! Pathrover plays the Pathbot maze game: a rover is dropped in an unknown maze
//! and can only learn, one step at a time, whether the neighbouring cell is open.
//! The client keeps a local map of everything probed so far and draws it as
//! ASCII art after every move.
//!
//! ## Features
//!
//! - **Growable map**: origin-centred coordinates over a dense grid that grows one
//!   row or column at a time as the rover pushes past an edge.
//! - **Cached session**: each coordinate is asked about at most once; repeat moves
//!   are answered locally.
//! - **Two players**: a person at the keyboard (`WASD`, `Q` to quit) or a seeded
//!   random walker.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pathrover::config::Config;
//! use pathrover::console::{ConsoleOptions, ConsoleWorld, Keyboard};
//! use pathrover::pathbot::{HttpPathbot, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("pathrover.toml").await?;
//!     let session = Session::new(HttpPathbot::new(&config.pathbot));
//!     let options = ConsoleOptions::from_config(&config.console, false);
//!     let mut game = ConsoleWorld::new(session, Keyboard::stdin(), std::io::stdout(), options);
//!     game.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`rover`] - map grid and the move-by-move explorer
//! - [`pathbot`] - maze server protocol, HTTP transport and cached session
//! - [`console`] - prompts, input sources and chat-style output
//! - [`config`] - TOML configuration
//! - [`logutil`] - log formatting helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  ConsoleWorld   │ ← prompts, map display
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Explorer     │ ← rover position, grid, exit hints
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Session      │ ← location path + per-coordinate cache
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   PathbotApi    │ ← HTTP (reqwest) or in-memory
//! └─────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod logutil;
pub mod pathbot;
pub mod rover;
