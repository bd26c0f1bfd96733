//! Chat-style narration: an animated "Typing..." status, then the message.

use rand::Rng;
use std::io::{self, Write};
use std::time::Duration;
use tokio::time::{sleep, Instant};

use super::ConsoleOptions;

const FRAME: Duration = Duration::from_millis(200);

pub struct ChatPrinter {
    typing_effect: bool,
    min: Duration,
    max: Duration,
    indent: usize,
}

impl ChatPrinter {
    pub fn new(options: &ConsoleOptions) -> Self {
        Self {
            typing_effect: options.typing_effect,
            min: Duration::from_millis(options.typing_min_ms),
            max: Duration::from_millis(options.typing_min_ms.max(options.typing_max_ms)),
            indent: options.indent,
        }
    }

    /// Narrate a line of text.
    pub async fn say<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        self.animate(out, "Typing").await?;
        out.write_all(layout(text, self.indent).as_bytes())?;
        out.flush()
    }

    /// Post a block (the map) below a bare timestamp line.
    pub async fn upload<W: Write>(&self, out: &mut W, block: &str) -> io::Result<()> {
        self.animate(out, "Uploading").await?;
        out.write_all(layout(&format!("\n{}", block), self.indent).as_bytes())?;
        out.flush()
    }

    async fn animate<W: Write>(&self, out: &mut W, status: &str) -> io::Result<()> {
        if !self.typing_effect {
            return Ok(());
        }
        let total = if self.max > self.min {
            rand::thread_rng().gen_range(self.min..=self.max)
        } else {
            self.min
        };
        let started = Instant::now();
        let mut dots = 1;
        while started.elapsed() < total {
            write!(out, "\r-- {}{:<3}  ", status, ".".repeat(dots))?;
            out.flush()?;
            dots = dots % 3 + 1;
            sleep(FRAME).await;
        }
        write!(out, "\r{}\r", " ".repeat(16))?;
        out.flush()
    }
}

/// First line, a blank line, then the remaining lines indented.
pub fn layout(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut out = String::new();
    for (i, line) in text.split('\n').enumerate() {
        if i == 0 {
            out.push_str(line);
            out.push_str("\n\n");
        } else {
            out.push_str(&pad);
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
