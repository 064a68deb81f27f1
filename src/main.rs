use anyhow::Result;
use clap::Parser;
use std::io::Write;

use marbles_view::cli::commands::{
    read_marbles, ActionCommand, EscapeCommand, FormatDateCommand, HistoryCommand, OwnerCommand,
    PendingCommand, TitleCommand, TokenCommand,
};
use marbles_view::cli::{Cli, Commands};
use marbles_view::{config, init_config, init_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config()?;
    init_telemetry(&config.observability)?;
    init_config()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Action { stage, status } => {
            ActionCommand::new(stage, status)
                .with_json(cli.json)
                .execute(&mut out)?;
        }
        Commands::FormatDate {
            timestamp,
            pattern,
            full_millis,
        } => {
            FormatDateCommand::new(timestamp)
                .with_pattern(pattern)
                .with_full_millis(full_millis)
                .with_json(cli.json)
                .execute(&config.display, &mut out)?;
        }
        Commands::Owner { file } => {
            let marbles = read_marbles(file.as_deref())?;
            OwnerCommand::new()
                .with_json(cli.json)
                .execute(&marbles, &mut out)?;
        }
        Commands::Pending { file } => {
            let marbles = read_marbles(file.as_deref())?;
            PendingCommand::new()
                .with_json(cli.json)
                .execute(&marbles, &mut out)?;
        }
        Commands::History { file, pattern } => {
            let marbles = read_marbles(file.as_deref())?;
            HistoryCommand::new()
                .with_pattern(pattern)
                .with_json(cli.json)
                .execute(&config.display, &marbles, &mut out)?;
        }
        Commands::Token { length } => {
            TokenCommand::new(length).execute(&config.tokens, &mut out)?;
        }
        Commands::Escape { text } => {
            EscapeCommand { text }.execute(&mut out)?;
        }
        Commands::Title { text } => {
            TitleCommand { text }.execute(&mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
