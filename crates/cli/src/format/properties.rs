// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `.properties` parsing.
//!
//! Follows the `java.util.Properties` line grammar: `#`/`!` comments,
//! `=`/`:`/whitespace separators, backslash continuation and escapes.

use crate::model::Properties;

const BLANKS: [char; 3] = [' ', '\t', '\x0c'];

/// Parse properties text. Each value's origin is `{origin}:{line}`.
///
/// A later duplicate key replaces the earlier value in place.
pub fn parse(text: &str, origin: &str) -> Result<Properties, String> {
    let mut props = Properties::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = raw.trim_start_matches(BLANKS);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(BLANKS)),
                None => break,
            }
        }

        let line_no = index + 1;
        let (key, value) = split_key_value(&logical);
        let key = unescape(key).map_err(|e| format!("line {line_no}: {e}"))?;
        let value = unescape(value).map_err(|e| format!("line {line_no}: {e}"))?;
        props.insert_with_origin(key, value, Some(format!("{origin}:{line_no}")));
    }

    Ok(props)
}

/// An odd run of trailing backslashes joins the next line.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(BLANKS);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(BLANKS);
    }
    (key, rest)
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
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
                let unit = hex_unit(&mut chars)?;
                out.push(decode_unit(unit, &mut chars)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn hex_unit(chars: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 {
        return Err(format!("malformed \\uxxxx encoding: \\u{digits}"));
    }
    u32::from_str_radix(&digits, 16).map_err(|_| format!("malformed \\uxxxx encoding: \\u{digits}"))
}

/// Decode a UTF-16 unit, consuming a following `\uXXXX` low surrogate if needed.
fn decode_unit(unit: u32, chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    if (0xD800..0xDC00).contains(&unit) {
        let rest = chars.as_str();
        if let Some(tail) = rest.strip_prefix("\\u") {
            let mut low_chars = tail.chars();
            let low = hex_unit(&mut low_chars)?;
            if (0xDC00..0xE000).contains(&low) {
                *chars = low_chars;
                let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return char::from_u32(code).ok_or_else(|| format!("invalid code point {code:#x}"));
            }
        }
        return Err(format!("unpaired surrogate \\u{unit:04X}"));
    }
    char::from_u32(unit).ok_or_else(|| format!("unpaired surrogate \\u{unit:04X}"))
}

#[cfg(test)]
#[path = "properties_tests.rs"]
mod tests;
