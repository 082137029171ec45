// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP record tokenizer.
//!
//! Splits raw file lines into `#id = KEYWORD(args);` records. The scanner is
//! deliberately forgiving: comments, header lines, section markers and
//! records it cannot make sense of are skipped, never errored. Real-world
//! STEP files routinely contain records this subsystem does not need to
//! understand.

use memchr::{memchr, memrchr};

/// One tokenized STEP record.
///
/// Ephemeral: only alive during the model build pass. Arguments are kept as
/// unparsed strings; the builder inspects the few positions it cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// STEP line number (`#123`).
    pub id: u32,
    /// Entity keyword, e.g. `IFCWALL`.
    pub type_name: String,
    /// Top-level argument strings, trimmed, nesting preserved.
    pub args: Vec<String>,
}

/// Tokenize a single line into a record.
///
/// Returns `None` for anything that does not look like `#id = KEYWORD(...)`.
pub fn tokenize_line(line: &str) -> Option<RawRecord> {
    let line = line.trim();
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'#') {
        return None;
    }

    // The id may be multi-digit, so look for '=' anywhere after the '#'.
    let eq = memchr(b'=', &bytes[1..]).map(|i| i + 1)?;
    let id: u32 = line[1..eq].trim().parse().ok()?;

    let mut rhs = line[eq + 1..].trim();
    if let Some(stripped) = rhs.strip_suffix(';') {
        rhs = stripped.trim_end();
    }

    let rhs_bytes = rhs.as_bytes();
    let open = memchr(b'(', rhs_bytes)?;
    let type_name = rhs[..open].trim().to_string();

    // Argument list is everything between the first '(' and the last ')'.
    let inner = match memrchr(b')', rhs_bytes) {
        Some(close) if close > open => &rhs[open + 1..close],
        _ => &rhs[open + 1..],
    };

    Some(RawRecord {
        id,
        type_name,
        args: split_top_level(inner),
    })
}

/// Split an argument string into top-level arguments.
///
/// A `,` separates arguments only at parenthesis depth 0 and outside quoted
/// strings. Quote state toggles on every `'`; STEP escapes a quote by
/// doubling it, which toggles twice and leaves the state unchanged across
/// the pair.
fn split_top_level(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0usize;

    for (i, b) in trimmed.bytes().enumerate() {
        match b {
            b'\'' => in_string = !in_string,
            b'(' if !in_string => depth += 1,
            b')' if !in_string => depth = depth.saturating_sub(1),
            b',' if !in_string && depth == 0 => {
                args.push(trimmed[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(trimmed[start..].trim().to_string());
    args
}

/// Tokenize every line of a file body, skipping non-record lines.
pub fn scan_records(content: &str) -> Vec<RawRecord> {
    let records: Vec<RawRecord> = content.lines().filter_map(tokenize_line).collect();
    tracing::debug!(records = records.len(), "Scanned STEP records");
    records
}
