use anyhow::Result;
use serde_json::json;
use std::io::Write;

use crate::cli::commands::write_json;
use crate::config::DisplayConfig;
use crate::format::{DateFormatter, MillisPadding};

pub struct FormatDateCommand {
    pub timestamp: String,
    pub pattern: Option<String>,
    pub full_millis: bool,
    pub json: bool,
}

impl FormatDateCommand {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            pattern: None,
            full_millis: false,
            json: false,
        }
    }

    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_full_millis(mut self, full_millis: bool) -> Self {
        self.full_millis = full_millis;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute<W: Write>(&self, display: &DisplayConfig, out: &mut W) -> Result<()> {
        let pattern = self
            .pattern
            .as_deref()
            .unwrap_or(display.timestamp_pattern.as_str());
        let formatter = if self.full_millis {
            DateFormatter::new(MillisPadding::Full)
        } else {
            display.formatter()
        };

        let formatted = formatter.format(self.timestamp.as_str(), pattern)?;

        if self.json {
            write_json(out, &json!({ "pattern": pattern, "formatted": formatted }))
        } else {
            writeln!(out, "{formatted}")?;
            Ok(())
        }
    }
}
