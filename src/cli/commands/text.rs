use anyhow::Result;
use std::io::Write;

use crate::config::TokenConfig;
use crate::format::{escape_text, random_token, title_case};

pub struct TokenCommand {
    pub length: Option<usize>,
}

impl TokenCommand {
    pub fn new(length: Option<usize>) -> Self {
        Self { length }
    }

    pub fn execute<W: Write>(&self, tokens: &TokenConfig, out: &mut W) -> Result<()> {
        let length = self.length.unwrap_or(tokens.default_length);
        writeln!(out, "{}", random_token(length))?;
        Ok(())
    }
}

pub struct EscapeCommand {
    pub text: String,
}

impl EscapeCommand {
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", escape_text(&self.text))?;
        Ok(())
    }
}

pub struct TitleCommand {
    pub text: String,
}

impl TitleCommand {
    pub fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", title_case(&self.text))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_uses_configured_length() {
        let mut out = Vec::new();
        TokenCommand::new(None)
            .execute(&TokenConfig { default_length: 6 }, &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim_end().len(), 6);
    }

    #[test]
    fn test_escape_and_title() {
        let mut out = Vec::new();
        EscapeCommand { text: "<i>R&D</i>".to_string() }.execute(&mut out).unwrap();
        TitleCommand { text: "core enterprise".to_string() }.execute(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "iR&amp;D/i\nCore Enterprise\n");
    }
}
