//! Line grammar of correlator logs.
//!
//! An ERROR record looks like `<field0>-<field1>-<field2>-<message...>`. The three leading
//! fields are metadata (timestamp parts, severity, component) and are stripped. The message may
//! itself contain `-`; everything after the third delimiter is kept verbatim.
//!
//! Mismatch payloads are introduced by `actual: ` and `expected: ` inside a block and run to
//! the end of their line. When a marker occurs twice on the same line, the payload stops at the
//! second occurrence.
//!
//! Line breaks follow universal-newline reading: `\n`, `\r\n` and a lone `\r` each end a
//! line, and every one of them is read as `\n`.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

pub const ERROR_MARKER: &str = "ERROR";
pub const ACTUAL_MARKER: &str = "actual: ";
pub const EXPECTED_MARKER: &str = "expected: ";
pub const FIELD_DELIMITER: char = '-';
pub const STRIPPED_FIELDS: usize = 3;

static ACTUAL_REGEX: OnceLock<Regex> = OnceLock::new();
static EXPECTED_REGEX: OnceLock<Regex> = OnceLock::new();

fn marker_regex(marker: &str) -> Regex {
    let m = regex::escape(marker);
    Regex::new(&format!(r"{m}(.*?)(?:{m}|\n|\z)")).expect("marker regex is valid")
}

fn actual_regex() -> &'static Regex {
    ACTUAL_REGEX.get_or_init(|| marker_regex(ACTUAL_MARKER))
}

fn expected_regex() -> &'static Regex {
    EXPECTED_REGEX.get_or_init(|| marker_regex(EXPECTED_MARKER))
}

/// A line opens a new block when it contains the ERROR marker anywhere.
pub fn is_error_line(line: &str) -> bool {
    line.contains(ERROR_MARKER)
}

/// Payload of an ERROR line with the metadata fields removed.
///
/// Lines with fewer than [`STRIPPED_FIELDS`] delimiters have no payload and yield `""`.
/// The line terminator, if any, is part of the payload.
pub fn strip_fields(line: &str) -> &str {
    let mut rest = line;
    for _ in 0..STRIPPED_FIELDS {
        match rest.find(FIELD_DELIMITER) {
            Some(i) => rest = &rest[i + FIELD_DELIMITER.len_utf8()..],
            None => return "",
        }
    }
    rest
}

/// Text following the first `actual: ` marker, up to the end of that line.
pub fn actual_payload(block: &str) -> Option<&str> {
    capture_payload(actual_regex(), block)
}

/// Text following the first `expected: ` marker, up to the end of that line.
pub fn expected_payload(block: &str) -> Option<&str> {
    capture_payload(expected_regex(), block)
}

fn capture_payload<'a>(re: &Regex, block: &'a str) -> Option<&'a str> {
    re.captures(block)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// A trailing `\r\n` is read as `\n`.
pub fn normalize_terminator(line: &str) -> Cow<'_, str> {
    match line.strip_suffix("\r\n") {
        Some(body) => Cow::Owned(format!("{body}\n")),
        None => Cow::Borrowed(line),
    }
}

/// Iterator over the lines of `text`, terminators included and normalized to `\n`.
pub fn universal_lines(text: &str) -> UniversalLines<'_> {
    UniversalLines { rest: text }
}

pub struct UniversalLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for UniversalLines<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(|c: char| c == '\n' || c == '\r') {
            None => {
                let line = self.rest;
                self.rest = "";
                Some(Cow::Borrowed(line))
            }
            Some(i) if self.rest.as_bytes()[i] == b'\n' => {
                let (line, rest) = self.rest.split_at(i + 1);
                self.rest = rest;
                Some(Cow::Borrowed(line))
            }
            Some(i) => {
                let body = &self.rest[..i];
                let skip = if self.rest[i + 1..].starts_with('\n') {
                    i + 2
                } else {
                    i + 1
                };
                self.rest = &self.rest[skip..];
                Some(Cow::Owned(format!("{body}\n")))
            }
        }
    }
}
