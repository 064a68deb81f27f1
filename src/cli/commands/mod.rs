use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;

use crate::workflow::Marble;

pub mod action;
pub mod date;
pub mod marble;
pub mod text;

pub use action::ActionCommand;
pub use date::FormatDateCommand;
pub use marble::{HistoryCommand, OwnerCommand, PendingCommand};
pub use text::{EscapeCommand, TitleCommand, TokenCommand};

/// Read one marble or an array of marbles from `path`, or stdin when absent
pub fn read_marbles(path: Option<&Path>) -> Result<Vec<Marble>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read marble JSON from stdin")?;
            buf
        }
    };
    parse_marbles(&raw)
}

/// Parse a marble object or an array of marble objects
pub fn parse_marbles(raw: &str) -> Result<Vec<Marble>> {
    let value: serde_json::Value = serde_json::from_str(raw).context("Marble input is not valid JSON")?;
    let marbles: Vec<Marble> = if value.is_array() {
        serde_json::from_value(value).context("Invalid marble list")?
    } else {
        vec![serde_json::from_value(value).context("Invalid marble")?]
    };
    tracing::debug!(count = marbles.len(), "parsed marbles");
    Ok(marbles)
}

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
