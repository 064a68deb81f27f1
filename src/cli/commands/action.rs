use anyhow::Result;
use serde_json::json;
use std::io::Write;

use crate::cli::commands::write_json;
use crate::workflow::translate_action;

pub struct ActionCommand {
    pub stage: usize,
    pub status: usize,
    pub json: bool,
}

impl ActionCommand {
    pub fn new(stage: usize, status: usize) -> Self {
        Self {
            stage,
            status,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        let label = translate_action(self.stage, self.status)?;

        if self.json {
            write_json(
                out,
                &json!({ "stage": self.stage, "status": self.status, "action": label }),
            )
        } else {
            writeln!(out, "{label}")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prints_label() {
        let mut out = Vec::new();
        ActionCommand::new(2, 2).execute(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "loan\n");
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        ActionCommand::new(7, 3).with_json(true).execute(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["action"], "failed");
    }

    #[test]
    fn test_invalid_pair_fails() {
        let mut out = Vec::new();
        let err = ActionCommand::new(0, 3).execute(&mut out).unwrap_err();
        assert!(err.to_string().contains("stage 0, status 3"));
        assert!(out.is_empty());
    }
}
