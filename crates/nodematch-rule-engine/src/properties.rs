//! Java Properties text parsing
//!
//! Supports the line-oriented `.properties` format used for the attributes
//! to add:
//! - `#` and `!` comment lines, blank lines
//! - `key=value`, `key: value` and `key value` separators
//! - backslash line continuation (leading whitespace of the next line dropped)
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes, any other `\c` yields `c`
//!
//! Trailing unescaped whitespace is trimmed from values.

use crate::{Result, RuleError};

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Parse properties text into `(key, value)` entries in file order.
///
/// Duplicate keys are kept; callers collecting into a map get last-wins.
pub fn parse_properties(text: &str) -> Result<Vec<(String, String)>> {
    logical_lines(text)
        .into_iter()
        .map(|(line, logical)| split_entry(&logical, line))
        .collect()
}

/// Join continuation lines and drop comments and blank lines.
///
/// Returns the 1-based number of each logical line's first natural line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut natural = normalized.split('\n').enumerate();
    let mut logical_lines = Vec::new();

    while let Some((index, line)) = natural.next() {
        let trimmed = line.trim_start_matches(WHITESPACE);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_odd_backslashes(&logical) {
            logical.pop();
            match natural.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(WHITESPACE)),
                None => break,
            }
        }

        if !logical.is_empty() {
            logical_lines.push((index + 1, logical));
        }
    }

    logical_lines
}

fn ends_with_odd_backslashes(s: &str) -> bool {
    s.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into an unescaped key and value.
fn split_entry(logical: &str, line: usize) -> Result<(String, String)> {
    let chars: Vec<char> = logical.chars().collect();
    let limit = chars.len();

    let mut key_len = 0;
    let mut value_start = limit;
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_len < limit {
        let c = chars[key_len];
        if (c == '=' || c == ':') && !preceding_backslash {
            value_start = key_len + 1;
            has_separator = true;
            break;
        } else if WHITESPACE.contains(&c) && !preceding_backslash {
            value_start = key_len + 1;
            break;
        }

        preceding_backslash = c == '\\' && !preceding_backslash;
        key_len += 1;
    }

    while value_start < limit {
        let c = chars[value_start];
        if !WHITESPACE.contains(&c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    let mut value_end = limit;
    while value_end > value_start && WHITESPACE.contains(&chars[value_end - 1]) {
        let escapes = chars[value_start..value_end - 1]
            .iter()
            .rev()
            .take_while(|&&c| c == '\\')
            .count();
        if escapes % 2 == 1 {
            break;
        }
        value_end -= 1;
    }

    let key = unescape(&chars[..key_len], line)?;
    let value = unescape(&chars[value_start..value_end], line)?;
    Ok((key, value))
}

fn unescape(raw: &[char], line: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let c = raw[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(&escaped) = raw.get(i) else {
            // Dangling backslash at the end of the text
            break;
        };
        i += 1;

        match escaped {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'u' => {
                let unit = read_code_unit(raw, i, line)?;
                i += 4;
                out.push(decode_code_unit(unit, raw, &mut i, line)?);
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

fn read_code_unit(raw: &[char], start: usize, line: usize) -> Result<u32> {
    let digits = raw.get(start..start + 4).ok_or_else(|| malformed_unicode(line))?;
    digits.iter().try_fold(0u32, |acc, c| {
        c.to_digit(16)
            .map(|d| acc * 16 + d)
            .ok_or_else(|| malformed_unicode(line))
    })
}

/// Turn a UTF-16 code unit into a char, consuming a following `\uXXXX` low
/// surrogate when `unit` is a high surrogate.
fn decode_code_unit(unit: u32, raw: &[char], i: &mut usize, line: usize) -> Result<char> {
    if (0xD800..=0xDBFF).contains(&unit) {
        let low = match raw.get(*i..*i + 2) {
            Some(['\\', 'u']) => read_code_unit(raw, *i + 2, line)?,
            _ => return Err(unpaired_surrogate(line)),
        };
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(unpaired_surrogate(line));
        }
        *i += 6;
        let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined).ok_or_else(|| unpaired_surrogate(line));
    }

    char::from_u32(unit).ok_or_else(|| unpaired_surrogate(line))
}

fn malformed_unicode(line: usize) -> RuleError {
    RuleError::PropertiesParse {
        line,
        message: "malformed \\uxxxx encoding".to_string(),
    }
}

fn unpaired_surrogate(line: usize) -> RuleError {
    RuleError::PropertiesParse {
        line,
        message: "unpaired UTF-16 surrogate in \\u escape".to_string(),
    }
}
