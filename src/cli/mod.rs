use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "marbles-view")]
#[command(about = "Decode and format supply-chain-finance marbles for display")]
#[command(long_about = "marbles-view turns the raw stage/status codes and timestamps reported by the \
                       marbles ledger into the labels, owners and operation logs shown in the web UI. \
                       Marble JSON is read from a file or stdin.")]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the action label for a stage/status pair
    Action {
        /// Workflow stage index (0-7)
        stage: usize,
        /// Review status code (0-3)
        status: usize,
    },
    /// Format a timestamp with the single-letter pattern language
    FormatDate {
        /// Epoch milliseconds, RFC 3339 or YYYY-MM-DD
        timestamp: String,
        /// Pattern such as "Y-M-d H:m:s" (defaults to the configured one)
        pattern: Option<String>,
        /// Render milliseconds with three digits
        #[arg(long, help = "Pad the r code to three digits")]
        full_millis: bool,
    },
    /// Show which company currently holds each marble
    Owner {
        /// Marble JSON file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Show the confirm/reject actions waiting on each marble
    Pending {
        /// Marble JSON file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the operation log of each marble
    History {
        /// Marble JSON file (stdin when omitted)
        file: Option<PathBuf>,
        /// Date pattern for log lines (defaults to the configured one)
        #[arg(long, help = "Date pattern used in log lines")]
        pattern: Option<String>,
    },
    /// Generate a random identifier
    Token {
        /// Number of characters
        #[arg(long, help = "Token length (defaults to the configured one)")]
        length: Option<usize>,
    },
    /// Escape text for insertion into HTML
    Escape {
        text: String,
    },
    /// Capitalise each word of a name
    Title {
        text: String,
    },
}
