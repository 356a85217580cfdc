use super::date::CalendarDate;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("format pattern is empty")]
    Empty,
    #[error("unclosed '[' literal in format pattern '{0}'")]
    UnclosedLiteral(String),
    #[error("format pattern '{0}' cannot be rendered")]
    Invalid(String),
}

// Longest tokens first so "MMMM" wins over "MM".
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("DD", "%d"),
    ("D", "%-d"),
];

/// `Do` has no strftime directive, so it is rendered by hand.
const ORDINAL_DAY: &str = "Do";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Strftime(String),
    OrdinalDay,
}

/// Renders dates with a display pattern such as `DD/MM/YYYY` or `MMMM YYYY`.
/// Text inside `[...]` is copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    pieces: Vec<Piece>,
}

impl DateFormatter {
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        if pattern.trim().is_empty() {
            return Err(FormatError::Empty);
        }
        let pieces = translate(pattern)?;
        let invalid = pieces.iter().any(|piece| match piece {
            Piece::Strftime(items) => {
                StrftimeItems::new(items).any(|item| matches!(item, Item::Error))
            }
            Piece::OrdinalDay => false,
        });
        if invalid {
            return Err(FormatError::Invalid(pattern.to_string()));
        }
        Ok(DateFormatter { pieces })
    }

    pub fn format(&self, date: CalendarDate) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Strftime(items) => {
                    let _ = write!(out, "{}", date.naive().format(items));
                }
                Piece::OrdinalDay => {
                    let _ = write!(out, "{}{}", date.day(), ordinal_suffix(date.day()));
                }
            }
        }
        out
    }
}

fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn translate(pattern: &str) -> Result<Vec<Piece>, FormatError> {
    let mut pieces = Vec::new();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'outer: while let Some(c) = rest.chars().next() {
        if c == '[' {
            let close = rest
                .find(']')
                .ok_or_else(|| FormatError::UnclosedLiteral(pattern.to_string()))?;
            push_literal(&mut out, &rest[1..close]);
            rest = &rest[close + 1..];
            continue;
        }
        if let Some(tail) = rest.strip_prefix(ORDINAL_DAY) {
            if !out.is_empty() {
                pieces.push(Piece::Strftime(std::mem::take(&mut out)));
            }
            pieces.push(Piece::OrdinalDay);
            rest = tail;
            continue;
        }
        for (token, directive) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(directive);
                rest = tail;
                continue 'outer;
            }
        }
        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }
    if !out.is_empty() {
        pieces.push(Piece::Strftime(out));
    }
    Ok(pieces)
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::date::d;

    fn fmt(pattern: &str) -> String {
        DateFormatter::new(pattern).unwrap().format(d(2024, 3, 5))
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(fmt("DD/MM/YYYY"), "05/03/2024");
    }

    #[test]
    fn test_header_patterns() {
        assert_eq!(fmt("MMMM YYYY"), "March 2024");
        assert_eq!(fmt("YYYY"), "2024");
    }

    #[test]
    fn test_short_and_unpadded_tokens() {
        assert_eq!(fmt("D MMM YY"), "5 Mar 24");
        assert_eq!(fmt("M/D"), "3/5");
        assert_eq!(fmt("ddd, MMM D"), "Tue, Mar 5");
        assert_eq!(fmt("dddd"), "Tuesday");
    }

    #[test]
    fn test_bracket_literal_and_percent() {
        assert_eq!(fmt("[Day] D [of] MMMM"), "Day 5 of March");
        assert_eq!(fmt("YYYY 100%"), "2024 100%");
    }

    #[test]
    fn test_ordinal_day() {
        assert_eq!(fmt("Do MMMM"), "5th March");
        let f = DateFormatter::new("Do [of] MMM").unwrap();
        assert_eq!(f.format(d(2024, 3, 1)), "1st of Mar");
        assert_eq!(f.format(d(2024, 3, 22)), "22nd of Mar");
        assert_eq!(f.format(d(2024, 3, 23)), "23rd of Mar");
        assert_eq!(f.format(d(2024, 3, 11)), "11th of Mar");
        assert_eq!(f.format(d(2024, 3, 13)), "13th of Mar");
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(DateFormatter::new("  "), Err(FormatError::Empty));
    }

    #[test]
    fn test_unclosed_literal_rejected() {
        assert!(matches!(
            DateFormatter::new("[oops YYYY"),
            Err(FormatError::UnclosedLiteral(_))
        ));
    }

    #[test]
    fn test_iso_pattern() {
        let f = DateFormatter::new("YYYY-MM-DD").unwrap();
        assert_eq!(f.format(d(2025, 12, 1)), "2025-12-01");
    }
}
