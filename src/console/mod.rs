//! # Console front end
//!
//! Text interface for a maze session: a short briefing, the map, then one
//! prompt per move until the exit is found, the player quits, or input runs out.
//!
//! The loop is generic over the maze transport, the [`InputSource`] and the
//! output writer, so tests drive it with an in-memory maze and a byte buffer.

pub mod chat;
pub mod input;

pub use chat::ChatPrinter;
pub use input::{parse_command, Command, InputSource, Keyboard, LineInput, RandomWalker};

use anyhow::Result;
use log::info;
use std::io::Write;

use crate::config::ConsoleConfig;
use crate::pathbot::{PathbotApi, Session};
use crate::rover::Explorer;

/// Presentation switches for [`ConsoleWorld`].
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Print the arrow for each move. Useful when moves are scripted and the
    /// terminal has not already echoed a keypress.
    pub echo_moves: bool,
    pub typing_effect: bool,
    pub typing_min_ms: u64,
    pub typing_max_ms: u64,
    pub indent: usize,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self::from_config(&ConsoleConfig::default(), false)
    }
}

impl ConsoleOptions {
    pub fn from_config(config: &ConsoleConfig, echo_moves: bool) -> Self {
        Self {
            echo_moves,
            typing_effect: config.typing_effect,
            typing_min_ms: config.typing_min_ms,
            typing_max_ms: config.typing_max_ms,
            indent: config.indent,
        }
    }
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    ExitFound,
    Quit,
    InputClosed,
}

const BRIEFING: [&str; 5] = [
    "16:08:42 -- Engineer, we need you on the console right now.",
    "16:08:39 -- The rover lost its bearings in the canyon maze and cannot find the launchpad.",
    "16:08:38 -- Its cameras are offline. It can only feel whether the next cell is open.",
    "16:08:34 -- Steer it home before the battery gives out.",
    "16:08:33 -- Here is what it knows so far:",
];

const LEGEND: &str = "16:08:19 -- <X> is the rover. <?> marks cells nobody has probed yet, \
<0> marks open ground it has crossed, and <#> marks rock it cannot pass. \
The map grows as you push past its edges.";

const GO: &str = "16:08:17 -- The controls are yours.";

const PROMPT_HELP: &str =
    "Please input the next direction. (W is up, A is left, S is down and D is right.)";

const INVALID_HELP: &str = "Invalid direction supplied. Valid directions are [W,A,S,D]. Press Q to quit";

pub struct ConsoleWorld<A, I, W> {
    explorer: Explorer,
    session: Session<A>,
    input: I,
    out: W,
    options: ConsoleOptions,
    printer: ChatPrinter,
}

impl<A: PathbotApi, I: InputSource, W: Write> ConsoleWorld<A, I, W> {
    pub fn new(session: Session<A>, input: I, out: W, options: ConsoleOptions) -> Self {
        let printer = ChatPrinter::new(&options);
        Self {
            explorer: Explorer::new(),
            session,
            input,
            out,
            options,
            printer,
        }
    }

    /// Open the maze, brief the player and play until the game ends.
    pub async fn start(&mut self) -> Result<GameEnd> {
        let opening = self.session.start().await?.clone();
        self.explorer.note_start(&opening);

        for line in BRIEFING {
            self.printer.say(&mut self.out, line).await?;
        }
        self.printer.say(&mut self.out, "16:08:28 -- ").await?;
        let map = self.explorer.render();
        self.printer.upload(&mut self.out, &map).await?;
        self.printer.say(&mut self.out, LEGEND).await?;
        self.printer.say(&mut self.out, GO).await?;

        writeln!(self.out, "{}", PROMPT_HELP)?;
        self.run_till_end().await
    }

    /// Prompt for moves until the exit is found or the player stops.
    pub async fn run_till_end(&mut self) -> Result<GameEnd> {
        loop {
            let command = loop {
                write!(self.out, "Direction: ")?;
                self.out.flush()?;
                let Some(raw) = self.input.next_symbol(&self.explorer).await? else {
                    writeln!(self.out)?;
                    writeln!(self.out, "\nInput closed. The rover will wait for you.")?;
                    return Ok(GameEnd::InputClosed);
                };
                match parse_command(&raw) {
                    Ok(command) => break command,
                    Err(_) => writeln!(self.out, "{}", INVALID_HELP)?,
                }
            };

            let direction = match command {
                Command::Quit => {
                    writeln!(self.out, "\n\nSeems you have to leave :(. Thanks for your time!")?;
                    info!("Player quit after {} moves", self.explorer.moves());
                    return Ok(GameEnd::Quit);
                }
                Command::Move(direction) => direction,
            };

            if self.options.echo_moves {
                writeln!(self.out, "{}", direction.arrow())?;
            }

            let moved = self
                .explorer
                .attempt_move(&mut self.session, direction)
                .await?;
            if moved {
                writeln!(self.out, "There was a path in the direction specified\n")?;
                self.describe_room()?;
            } else {
                writeln!(self.out, "Rover's path was blocked\n")?;
            }

            self.display_map()?;
            writeln!(self.out, "\n{}", self.status_line())?;

            if self.explorer.exit_found() {
                writeln!(
                    self.out,
                    "\n\nAwesome!! You have located the exit and saved the Rover\n\n"
                )?;
                return Ok(GameEnd::ExitFound);
            }
        }
    }

    /// Exit hints as shown under the map.
    pub fn status_line(&self) -> String {
        let direction = self
            .explorer
            .exit_bearing()
            .map(|b| b.arrow().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "Launchpad direction: {} || Launchpad distance: {}",
            direction,
            self.explorer.exit_distance()
        )
    }

    /// Server text for the rover's cell: message, description and open exits.
    fn describe_room(&mut self) -> std::io::Result<()> {
        let Some(report) = self.session.last_report() else {
            return Ok(());
        };
        for text in [&report.message, &report.description].into_iter().flatten() {
            writeln!(self.out, "{}", text)?;
        }
        if !report.exits.is_empty() {
            writeln!(self.out, "Exits: {}", report.exits.join(", "))?;
        }
        writeln!(self.out)
    }

    fn display_map(&mut self) -> std::io::Result<()> {
        let pad = " ".repeat(self.options.indent);
        for row in self.explorer.render().lines() {
            writeln!(self.out, "{}{}", pad, row)?;
        }
        Ok(())
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn session(&self) -> &Session<A> {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
