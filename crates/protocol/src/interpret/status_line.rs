//! crates/protocol/src/interpret/status_line.rs
//!
//! Status-line interpretation for CRLF-delimited text protocols.

use logging::trace_interpret;
use memchr::memmem;

use crate::state::StateSequence;

/// Signature every RTSP status line starts with.
pub const RTSP_SIGNATURE: &[u8] = b"RTSP/";

/// Offset of the status code inside an RTSP status line (`RTSP/1.0 200 OK`).
const RTSP_CODE_OFFSET: usize = 9;

/// Shortest RTSP line (terminator included) considered for a status code.
const RTSP_MIN_LINE: usize = 6;

/// Number of characters holding a status code.
const STATUS_CODE_WIDTH: usize = 3;

/// Extracts RTSP response codes.
///
/// Lines not starting with [`RTSP_SIGNATURE`] (headers, bodies) are skipped.
#[must_use]
pub fn interpret_rtsp(buf: &[u8]) -> StateSequence {
    interpret_status_lines(buf, |line| {
        (line.len() >= RTSP_MIN_LINE && line.starts_with(RTSP_SIGNATURE))
            .then(|| code_field(line, RTSP_CODE_OFFSET))
    })
}

/// Extracts FTP reply codes; every line is assumed to start with one.
#[must_use]
pub fn interpret_ftp(buf: &[u8]) -> StateSequence {
    interpret_status_lines(buf, |line| Some(code_field(line, 0)))
}

/// Runs `field` over every CRLF-terminated line and parses the returned bytes
/// as a status code.
///
/// A line for which `field` returns `None` is skipped. A parsed code of 0
/// means the line was not a real status line and stops the scan. A trailing
/// line without terminator is ignored.
fn interpret_status_lines<'a, F>(buf: &'a [u8], field: F) -> StateSequence
where
    F: Fn(&'a [u8]) -> Option<&'a [u8]>,
{
    let mut states = StateSequence::new();
    let mut line_start = 0usize;

    for cr in memmem::find_iter(buf, b"\r\n") {
        let line = &buf[line_start..cr + 2];
        line_start = cr + 2;

        let Some(digits) = field(line) else {
            continue;
        };

        let code = parse_status_code(digits);
        if code == 0 {
            trace_interpret!(line_len = line.len(), "no status code, stopping");
            break;
        }
        trace_interpret!(code, "status line");
        states.push(code);
    }

    states
}

/// Borrows up to [`STATUS_CODE_WIDTH`] bytes of `line` starting at `offset`.
fn code_field(line: &[u8], offset: usize) -> &[u8] {
    let start = offset.min(line.len());
    let end = (offset + STATUS_CODE_WIDTH).min(line.len());
    &line[start..end]
}

/// Parses a decimal status code with C `atoi` leniency.
///
/// Leading ASCII whitespace and an optional sign are skipped, then digits are
/// accumulated until the first non-digit. A negative value wraps to its
/// two's-complement `u32`, the same bits an `int` cast to unsigned carries.
/// Anything unparsable yields 0.
#[must_use]
pub fn parse_status_code(field: &[u8]) -> u32 {
    let mut bytes = field
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match bytes.peek() {
        Some(b'-') => true,
        Some(b'+') => false,
        _ => return magnitude(bytes),
    };
    bytes.next();

    let value = magnitude(bytes);
    if negative { value.wrapping_neg() } else { value }
}

fn magnitude(digits: impl Iterator<Item = u8>) -> u32 {
    digits
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |code, digit| {
            code.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
        })
}
