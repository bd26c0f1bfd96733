//! Where moves come from: a person at the keyboard or the random walker.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::rover::{Direction, Explorer};

/// Symbols the random walker picks from.
pub const MOVE_SYMBOLS: [&str; 4] = ["W", "A", "S", "D"];

pub const QUIT_SYMBOL: &str = "Q";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid direction '{0}'")]
pub struct InvalidCommand(pub String);

/// Map a typed symbol to a command. `W A S D` move, `Q` quits; case and
/// surrounding whitespace are ignored.
pub fn parse_command(raw: &str) -> Result<Command, InvalidCommand> {
    match raw.trim().to_uppercase().as_str() {
        "W" => Ok(Command::Move(Direction::Up)),
        "A" => Ok(Command::Move(Direction::Left)),
        "S" => Ok(Command::Move(Direction::Down)),
        "D" => Ok(Command::Move(Direction::Right)),
        "Q" => Ok(Command::Quit),
        _ => Err(InvalidCommand(raw.trim().to_string())),
    }
}

/// Supplies one raw symbol per turn. `Ok(None)` means the input is exhausted.
#[allow(async_fn_in_trait)]
pub trait InputSource {
    async fn next_symbol(&mut self, explorer: &Explorer) -> anyhow::Result<Option<String>>;
}

/// Line-oriented input; each line is one symbol.
pub struct LineInput<R> {
    lines: Lines<R>,
}

pub type Keyboard = LineInput<BufReader<Stdin>>;

impl Keyboard {
    pub fn stdin() -> Self {
        LineInput::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: AsyncBufRead + Unpin> InputSource for LineInput<R> {
    async fn next_symbol(&mut self, _explorer: &Explorer) -> anyhow::Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }
}

/// Picks a uniformly random direction every turn; quits after `max_moves`
/// symbols when that is non-zero.
pub struct RandomWalker {
    rng: StdRng,
    max_moves: u32,
    issued: u32,
}

impl RandomWalker {
    pub fn new(seed: Option<u64>, max_moves: u32) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_moves,
            issued: 0,
        }
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }
}

impl InputSource for RandomWalker {
    async fn next_symbol(&mut self, _explorer: &Explorer) -> anyhow::Result<Option<String>> {
        if self.max_moves > 0 && self.issued >= self.max_moves {
            return Ok(Some(QUIT_SYMBOL.to_string()));
        }
        self.issued += 1;
        let symbol = MOVE_SYMBOLS.choose(&mut self.rng).copied().unwrap_or("W");
        Ok(Some(symbol.to_string()))
    }
}
