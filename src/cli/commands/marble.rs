use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::cli::commands::write_json;
use crate::config::DisplayConfig;
use crate::telemetry::create_render_span;
use crate::workflow::{HistoryEntry, Marble, PendingAction, StageRole};

#[derive(Debug, Serialize)]
struct OwnerRow<'a> {
    id: &'a str,
    owner: Option<&'a str>,
    awaiting_role: Option<StageRole>,
}

#[derive(Debug, Serialize)]
struct PendingRow<'a> {
    id: &'a str,
    pending: Option<PendingAction>,
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    id: &'a str,
    entries: Vec<HistoryEntry>,
}

/// Lists the company holding each marble
#[derive(Default)]
pub struct OwnerCommand {
    pub json: bool,
}

impl OwnerCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute<W: Write>(&self, marbles: &[Marble], out: &mut W) -> Result<()> {
        let rows: Vec<OwnerRow> = marbles
            .iter()
            .map(|marble| OwnerRow {
                id: &marble.id,
                owner: marble.current_owner(),
                awaiting_role: marble.awaiting_role(),
            })
            .collect();

        if self.json {
            return write_json(out, &rows);
        }

        for row in rows {
            let role = row.awaiting_role.map(|r| r.to_string());
            writeln!(
                out,
                "{}\t{}\t{}",
                row.id,
                row.owner.unwrap_or("-"),
                role.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}

/// Lists the confirm/reject actions waiting on each marble
#[derive(Default)]
pub struct PendingCommand {
    pub json: bool,
}

impl PendingCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute<W: Write>(&self, marbles: &[Marble], out: &mut W) -> Result<()> {
        let mut rows = Vec::with_capacity(marbles.len());
        for marble in marbles {
            let pending = marble
                .pending_action()
                .with_context(|| format!("Failed to resolve pending action for marble {}", marble.id))?;
            rows.push(PendingRow { id: &marble.id, pending });
        }

        if self.json {
            return write_json(out, &rows);
        }

        for row in rows {
            match row.pending {
                Some(action) => writeln!(
                    out,
                    "{}\t{}\t{}\tconfirm={}\treject={}",
                    row.id,
                    action.stage,
                    action.company,
                    action.confirm,
                    action.reject.unwrap_or("-")
                )?,
                None => writeln!(out, "{}\tcomplete", row.id)?,
            }
        }
        Ok(())
    }
}

/// Prints the operation log of each marble
#[derive(Default)]
pub struct HistoryCommand {
    pub pattern: Option<String>,
    pub json: bool,
}

impl HistoryCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute<W: Write>(&self, display: &DisplayConfig, marbles: &[Marble], out: &mut W) -> Result<()> {
        let pattern = self
            .pattern
            .as_deref()
            .unwrap_or(display.history_date_pattern.as_str());
        let formatter = display.formatter();

        let mut rows = Vec::with_capacity(marbles.len());
        for marble in marbles {
            let span = create_render_span("history", Some(&marble.id));
            let _enter = span.enter();

            let entries = marble
                .history(&formatter, pattern)
                .with_context(|| format!("Failed to build history for marble {}", marble.id))?;
            rows.push(HistoryRow { id: &marble.id, entries });
        }

        if self.json {
            return write_json(out, &rows);
        }

        for row in rows {
            writeln!(out, "{}:", row.id)?;
            for entry in &row.entries {
                writeln!(out, "  {entry}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::parse_marbles;

    const MARBLE: &str = r#"{
        "id": "m1",
        "title": "invoice 7",
        "balance": 1200,
        "user": {"id": "u1", "username": "alice", "company": "acme"},
        "check": [
            {"company": "acme", "review": 2, "date": "2021-03-01T08:00:00Z", "comment": "new"},
            {"company": "core", "review": 2, "date": "2021-03-02T08:00:00Z", "comment": "fine"},
            {"company": "bank", "review": 1, "date": null, "comment": ""},
            {"company": "acme", "review": 0},
            {"company": "core", "review": 0},
            {"company": "acme", "review": 0},
            {"company": "bank", "review": 0},
            {"company": "bank", "review": 0}
        ]
    }"#;

    fn marbles() -> Vec<Marble> {
        parse_marbles(MARBLE).unwrap()
    }

    #[test]
    fn test_owner_text() {
        let mut out = Vec::new();
        OwnerCommand::new().execute(&marbles(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "m1\tbank\tbank\n");
    }

    #[test]
    fn test_pending_text() {
        let mut out = Vec::new();
        PendingCommand::new().execute(&marbles(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "m1\tcompany check\tbank\tconfirm=loan\treject=reject\n"
        );
    }

    #[test]
    fn test_history_text() {
        let mut out = Vec::new();
        HistoryCommand::new()
            .execute(&DisplayConfig::default(), &marbles(), &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "m1:\n  acme create on 2021-03-01 with comment: new\n  core confirm on 2021-03-02 with comment: fine\n"
        );
    }

    #[test]
    fn test_history_json() {
        let mut out = Vec::new();
        HistoryCommand::new()
            .with_pattern(Some("d/M".to_string()))
            .with_json(true)
            .execute(&DisplayConfig::default(), &marbles(), &mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["entries"][1]["date"], "02/03");
        assert_eq!(value[0]["entries"][1]["stage"], "SupplierApply");
    }
}
