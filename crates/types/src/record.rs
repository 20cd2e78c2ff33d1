//! Field extraction from debug-formatted records.
//!
//! Metric producers that cannot send structured data describe clients and
//! workspaces as strings such as
//! `Client { id: 3, title: "vim, main.rs", class: "kitty", pid: 42 }`.
//! This module tokenizes that shape instead of splitting on label text, so
//! field names appearing inside values or as suffixes of other names
//! (`initial_title` vs `title`) never confuse the lookup.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record body is not closed")]
    Unbalanced,
    #[error("quoted value for field '{0}' is not terminated")]
    Unterminated(String),
    #[error("expected 'name: value' at offset {0}")]
    Malformed(usize),
    #[error("field '{0}' not present in record")]
    MissingField(String),
}

/// A parsed `Name { field: value, ... }` record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub name: Option<String>,
    pub fields: Vec<(String, String)>,
}

impl Record {
    pub fn parse(input: &str) -> Result<Self, RecordError> {
        let input = input.trim();
        let (name, body) = match input.find('{') {
            Some(open) => {
                let close = matching_brace(input, open).ok_or(RecordError::Unbalanced)?;
                let name = input[..open].trim();
                (
                    (!name.is_empty()).then(|| name.to_string()),
                    &input[open + 1..close],
                )
            }
            None => (None, input),
        };

        Ok(Self {
            name,
            fields: parse_fields(body)?,
        })
    }

    /// Value of a field, matched by exact name
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn require(&self, field: &str) -> Result<&str, RecordError> {
        self.get(field)
            .ok_or_else(|| RecordError::MissingField(field.to_string()))
    }
}

/// Parse `input` and return the value of `field`
pub fn extract_field(input: &str, field: &str) -> Result<String, RecordError> {
    Record::parse(input)?.require(field).map(str::to_string)
}

/// Byte offset of the brace closing the one at `open`, honouring quotes
fn matching_brace(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;
    for (offset, c) in input[open..].char_indices() {
        if in_quotes {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_fields(body: &str) -> Result<Vec<(String, String)>, RecordError> {
    let chars: Vec<(usize, char)> = body.char_indices().collect();
    let mut fields = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && (chars[i].1.is_whitespace() || chars[i].1 == ',') {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let key_start = i;
        while i < chars.len() && chars[i].1 != ':' {
            if !(chars[i].1.is_alphanumeric() || chars[i].1 == '_') && !chars[i].1.is_whitespace() {
                return Err(RecordError::Malformed(chars[key_start].0));
            }
            i += 1;
        }
        if i >= chars.len() {
            return Err(RecordError::Malformed(chars[key_start].0));
        }
        let key: String = chars[key_start..i].iter().map(|(_, c)| c).collect();
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(RecordError::Malformed(chars[key_start].0));
        }
        i += 1;

        while i < chars.len() && chars[i].1.is_whitespace() {
            i += 1;
        }

        let value = if i < chars.len() && chars[i].1 == '"' {
            i += 1;
            let mut value = String::new();
            let mut closed = false;
            while i < chars.len() {
                let c = chars[i].1;
                i += 1;
                match c {
                    '\\' if i < chars.len() => {
                        value.push(chars[i].1);
                        i += 1;
                    }
                    '"' => {
                        closed = true;
                        break;
                    }
                    _ => value.push(c),
                }
            }
            if !closed {
                return Err(RecordError::Unterminated(key));
            }
            // Anything between the closing quote and the next comma is dropped
            while i < chars.len() && chars[i].1 != ',' {
                i += 1;
            }
            value
        } else {
            let value_start = i;
            let mut depth = 0usize;
            while i < chars.len() {
                match chars[i].1 {
                    '{' | '[' | '(' => depth += 1,
                    '}' | ']' | ')' => depth = depth.saturating_sub(1),
                    ',' if depth == 0 => break,
                    _ => {}
                }
                i += 1;
            }
            let raw: String = chars[value_start..i].iter().map(|(_, c)| c).collect();
            raw.trim().to_string()
        };

        fields.push((key, value));
    }

    Ok(fields)
}
