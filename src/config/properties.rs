//! Java-style `.properties` parsing
//!
//! Follows the `java.util.Properties` line format: `#`/`!` comments,
//! `=`/`:`/whitespace separators, backslash line continuations and
//! `\uXXXX` escapes. Duplicate keys resolve last-write-wins.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    #[error("line {line}: malformed \\uXXXX escape")]
    MalformedUnicode { line: usize },
}

pub fn parse_properties(content: &str) -> Result<HashMap<String, String>, PropertiesError> {
    let mut props = HashMap::new();
    for (line, logical) in logical_lines(content) {
        let (key, value) = split_entry(&logical);
        props.insert(unescape(key, line)?, unescape(value, line)?);
    }
    Ok(props)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Natural lines end at `\n`, `\r` or `\r\n`.
fn natural_lines(content: &str) -> impl Iterator<Item = &str> {
    content.split('\n').flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Join continuation lines, drop comments and blanks. Each logical line is
/// tagged with the natural line number it started on.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in natural_lines(content).enumerate() {
        let trimmed = raw.trim_start_matches(is_blank);

        let (start, mut buf) = match pending.take() {
            Some(continued) => continued,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        if ends_with_odd_backslashes(trimmed) {
            buf.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, buf));
        } else {
            buf.push_str(trimmed);
            lines.push((start, buf));
        }
    }

    // A continuation at end of input just ends the entry.
    if let Some(unfinished) = pending {
        lines.push(unfinished);
    }
    lines
}

fn ends_with_odd_backslashes(line: &str) -> bool {
    line.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = i;
            break;
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let value = rest
        .strip_prefix(['=', ':'])
        .map(|after| after.trim_start_matches(is_blank))
        .unwrap_or(rest);
    (&line[..key_end], value)
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_hex4(&mut chars).ok_or(PropertiesError::MalformedUnicode { line })?;
                out.push(decode_utf16_unit(unit, &mut chars, line)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_hex4(chars: &mut impl Iterator<Item = char>) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

/// `\uXXXX` escapes are UTF-16 code units; a high surrogate pairs with an
/// immediately following `\uXXXX` low surrogate.
fn decode_utf16_unit(
    unit: u32,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    line: usize,
) -> Result<char, PropertiesError> {
    if (0xD800..0xDC00).contains(&unit) && chars.peek() == Some(&'\\') {
        let mut lookahead = chars.clone();
        lookahead.next();
        if lookahead.next() == Some('u') {
            let low = read_hex4(&mut lookahead).ok_or(PropertiesError::MalformedUnicode { line })?;
            if (0xDC00..0xE000).contains(&low) {
                *chars = lookahead;
                let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }
    Ok(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
}
