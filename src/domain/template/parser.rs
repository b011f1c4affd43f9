// Template parser using recursive descent

use anyhow::{bail, Result};

use super::ast::{Template, TemplatePart};

pub struct TemplateParser {
    input: String,
    pos: usize,
}

impl TemplateParser {
    pub fn parse(template: &str) -> Result<Template> {
        let mut parser = Self {
            input: template.to_string(),
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while self.pos < self.input.len() {
            if self.peek_char() == Some('{') {
                // Check for escaped braces {{
                if self.peek_ahead(1) == Some('{') {
                    self.pos += 2;
                    literal_buf.push('{');
                } else {
                    // Start of slot - flush literal buffer first
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(literal_buf.clone()));
                        literal_buf.clear();
                    }

                    let name = self.parse_slot()?;
                    parts.push(TemplatePart::Slot(name));
                }
            } else if self.peek_char() == Some('}') {
                if self.peek_ahead(1) == Some('}') {
                    self.pos += 2;
                    literal_buf.push('}');
                } else {
                    bail!("Unexpected closing brace at position {}", self.pos);
                }
            } else {
                literal_buf.push(self.consume_char()?);
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(Template::new(parts))
    }

    fn parse_slot(&mut self) -> Result<String> {
        self.expect_char('{')?;
        self.skip_whitespace();

        let name = self.parse_slot_name()?;

        self.skip_whitespace();
        self.expect_char('}')?;

        Ok(name)
    }

    fn parse_slot_name(&mut self) -> Result<String> {
        let mut name = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(self.consume_char()?);
            } else if ch == '}' || ch.is_whitespace() {
                break;
            } else {
                bail!(
                    "Invalid character '{}' in slot name at position {}",
                    ch,
                    self.pos
                );
            }
        }

        if name.is_empty() {
            bail!("Empty slot name at position {}", self.pos);
        }

        Ok(name)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_ahead(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn consume_char(&mut self) -> Result<char> {
        let ch = self.peek_char()
            .ok_or_else(|| anyhow::anyhow!("Unexpected end of input at position {}", self.pos))?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            Some(ch) => bail!(
                "Expected '{}' but found '{}' at position {}",
                expected,
                ch,
                self.pos
            ),
            None => bail!("Expected '{}' but found end of input", expected),
        }
    }
}
