//! Clock template parsing and rendering
//!
//! A template holds one bracketed time pattern with optional literal text
//! around it, e.g. `"Now: {hh:mm A}"`. Pattern tokens:
//! `HH` (24-hour), `hh` (12-hour), `mm`, `ss`, `A` (AM/PM), `a` (am/pm).

use chrono::{Local, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern used when a template has no usable token
pub const DEFAULT_CLOCK_PATTERN: &str = "HH:mm:ss";

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]*)\}").expect("Invalid regex"));

/// Wall-clock time split into its components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Current local time
    pub fn now() -> Self {
        let now = Local::now();
        Self::new(now.hour(), now.minute(), now.second())
    }

    /// Parse `H:M[:S]`; components that are not numbers become 0
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.contains(':') {
            return None;
        }
        let mut parts = text
            .split(':')
            .map(|part| part.trim().parse::<u32>().unwrap_or(0));
        Some(Self::new(
            parts.next().unwrap_or(0),
            parts.next().unwrap_or(0),
            parts.next().unwrap_or(0),
        ))
    }

    fn meridiem_upper(&self) -> &'static str {
        if self.hour < 12 {
            "AM"
        } else {
            "PM"
        }
    }

    fn meridiem_lower(&self) -> &'static str {
        if self.hour < 12 {
            "am"
        } else {
            "pm"
        }
    }

    fn hour12(&self) -> u32 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Hour24,
    Hour12,
    Minute,
    Second,
    MeridiemUpper,
    MeridiemLower,
    Literal(char),
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        let repeated = chars.peek() == Some(&c);
        let doubled = match c {
            'H' if repeated => Some(Token::Hour24),
            'h' if repeated => Some(Token::Hour12),
            'm' if repeated => Some(Token::Minute),
            's' if repeated => Some(Token::Second),
            _ => None,
        };
        match (doubled, c) {
            (Some(token), _) => {
                chars.next();
                tokens.push(token);
            }
            (None, 'A') => tokens.push(Token::MeridiemUpper),
            (None, 'a') => tokens.push(Token::MeridiemLower),
            (None, c) => tokens.push(Token::Literal(c)),
        }
    }
    tokens
}

/// A parsed clock template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTemplate {
    pub prefix: String,
    pub pattern: String,
    pub suffix: String,
}

impl Default for ClockTemplate {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            pattern: DEFAULT_CLOCK_PATTERN.to_string(),
            suffix: String::new(),
        }
    }
}

impl ClockTemplate {
    /// Split a template into prefix, pattern, and suffix.
    ///
    /// Without a bracketed token the whole template is kept as prefix and
    /// the default pattern is used. The suffix ends at a second token.
    pub fn parse(template: &str) -> Self {
        let Some(captures) = TOKEN_RE.captures(template) else {
            return Self {
                prefix: template.to_string(),
                ..Self::default()
            };
        };
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            return Self::default();
        };

        let rest = &template[whole.end()..];
        let suffix = match TOKEN_RE.find(rest) {
            Some(next) => &rest[..next.start()],
            None => rest,
        };
        let pattern = if inner.as_str().trim().is_empty() {
            DEFAULT_CLOCK_PATTERN
        } else {
            inner.as_str()
        };

        Self {
            prefix: template[..whole.start()].to_string(),
            pattern: pattern.to_string(),
            suffix: suffix.to_string(),
        }
    }

    /// Render the template for a time
    pub fn render(&self, time: ClockTime) -> String {
        let tokens = tokenize(&self.pattern);
        let mut out = String::with_capacity(self.prefix.len() + self.pattern.len() + 8);
        out.push_str(&self.prefix);

        for token in &tokens {
            match token {
                Token::Hour24 => out.push_str(&format!("{:02}", time.hour)),
                Token::Hour12 => out.push_str(&format!("{:02}", time.hour12())),
                Token::Minute => out.push_str(&format!("{:02}", time.minute)),
                Token::Second => out.push_str(&format!("{:02}", time.second)),
                Token::MeridiemUpper => out.push_str(time.meridiem_upper()),
                Token::MeridiemLower => out.push_str(time.meridiem_lower()),
                Token::Literal(c) => out.push(*c),
            }
        }

        let uses_12h = tokens.contains(&Token::Hour12);
        let has_meridiem = tokens
            .iter()
            .any(|t| matches!(t, Token::MeridiemUpper | Token::MeridiemLower));
        if uses_12h && !has_meridiem {
            out.push(' ');
            out.push_str(time.meridiem_upper());
        }

        out.push_str(&self.suffix);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, h: u32, m: u32, s: u32) -> String {
        ClockTemplate::parse(template).render(ClockTime::new(h, m, s))
    }

    #[test]
    fn test_twelve_hour_with_meridiem() {
        assert_eq!(render("{hh:mm A}", 13, 5, 0), "01:05 PM");
        assert_eq!(render("{hh:mm a}", 9, 30, 0), "09:30 am");
    }

    #[test]
    fn test_twenty_four_hour() {
        assert_eq!(render("{HH:mm:ss}", 9, 7, 3), "09:07:03");
    }

    #[test]
    fn test_prefix_and_auto_meridiem() {
        assert_eq!(render("Now: {hh:mm}", 0, 42, 0), "Now: 12:42 AM");
        assert_eq!(render("[{hh}]", 12, 0, 0), "[12 PM]");
    }

    #[test]
    fn test_suffix_stops_at_second_token() {
        let template = ClockTemplate::parse("<{HH:mm}> ignored {ss}");
        assert_eq!(template.prefix, "<");
        assert_eq!(template.pattern, "HH:mm");
        assert_eq!(template.suffix, "> ignored ");
    }

    #[test]
    fn test_missing_or_empty_token_uses_default() {
        assert_eq!(render("", 1, 2, 3), "01:02:03");
        assert_eq!(render("Time ", 1, 2, 3), "Time 01:02:03");
        assert_eq!(render("{}", 23, 59, 58), "23:59:58");
    }

    #[test]
    fn test_single_letters_are_literal() {
        assert_eq!(render("{H.m.s}", 4, 5, 6), "H.m.s");
    }

    #[test]
    fn test_clock_time_parse() {
        assert_eq!(ClockTime::parse("13:05:09"), Some(ClockTime::new(13, 5, 9)));
        assert_eq!(ClockTime::parse("7:x"), Some(ClockTime::new(7, 0, 0)));
        assert_eq!(ClockTime::parse("noon"), None);
    }
}
