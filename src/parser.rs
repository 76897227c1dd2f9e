//! Keyed field scanning over line-oriented "key value" text.
//!
//! Most files under /proc are lists of `Key: value unit` or `key value` lines.
//! These helpers return `None` on a miss so callers can tell "absent" apart
//! from a legitimate zero reading.
//!
//! Lines are read as bytes and decoded lossily: a process can put arbitrary
//! bytes in its name or arguments, and one such line must not hide the
//! numeric keys around it.

use std::io::{self, BufRead};
use std::str::FromStr;

/// Lines of `reader` with invalid UTF-8 replaced by U+FFFD.
///
/// Like `BufRead::lines`, the trailing `\n` or `\r\n` is stripped.
pub fn lossy_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut bytes| {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8_lossy(&bytes).into_owned()
        })
    })
}

/// Splits `line` into whitespace tokens after replacing `separator` with a space.
fn tokens(line: &str, separator: Option<char>) -> Vec<String> {
    let normalized = match separator {
        Some(sep) => line.replace(sep, " "),
        None => line.to_string(),
    };
    normalized.split_whitespace().map(str::to_string).collect()
}

/// Returns the value following `key` on the first line whose leading token is `key`.
///
/// Scanning stops at the first matching line; a token that fails to parse as `T`
/// is a miss, not a reason to keep scanning.
pub fn scan_key<T, R>(reader: R, key: &str, separator: Option<char>) -> Option<T>
where
    T: FromStr,
    R: BufRead,
{
    for line in lossy_lines(reader) {
        let line = line.ok()?;
        let toks = tokens(&line, separator);
        if toks.first().map(String::as_str) == Some(key) {
            return toks.get(1).and_then(|v| v.parse().ok());
        }
    }
    None
}

/// Looks up several keys in one pass, stopping once every key has been seen.
///
/// The result is positionally aligned with `keys`.
pub fn scan_keys<T, R>(reader: R, keys: &[&str], separator: Option<char>) -> Vec<Option<T>>
where
    T: FromStr,
    R: BufRead,
{
    let mut found: Vec<Option<T>> = keys.iter().map(|_| None).collect();
    let mut seen = vec![false; keys.len()];

    for line in lossy_lines(reader) {
        let Ok(line) = line else { break };
        let toks = tokens(&line, separator);
        let Some(first) = toks.first() else { continue };

        if let Some(idx) = keys.iter().position(|k| *k == first.as_str()) {
            if !seen[idx] {
                seen[idx] = true;
                found[idx] = toks.get(1).and_then(|v| v.parse().ok());
            }
        }

        if seen.iter().all(|s| *s) {
            break;
        }
    }

    found
}

/// First whitespace-separated token of the first line, parsed as `T`.
pub fn first_token<T, R>(reader: R) -> Option<T>
where
    T: FromStr,
    R: BufRead,
{
    let line = lossy_lines(reader).next()?.ok()?;
    line.split_whitespace().next()?.parse().ok()
}
