//! Pure response-framing logic: status-line parsing, single- vs multi-line
//! classification, and inline header-line parsing. No I/O lives here so
//! these rules stay testable against literal byte slices.

use crate::commands::Command;
use crate::error::NntpError;

/// Status codes that introduce a multi-line data block, independent of the
/// 211 special case handled separately in [`is_multiline`].
const MULTILINE_CODES: &[u16] = &[100, 101, 215, 220, 221, 222, 224, 225, 230, 231];

/// Parse a status line of the form `DDD text\r\n` (or `\n`).
///
/// Matches the grammar `^([1-5][0-9][0-9])(?:\s+(.*?))?\r?\n$`.
pub fn parse_status_line(line: &[u8]) -> Result<(u16, String), NntpError> {
    let text = std::str::from_utf8(line)
        .map_err(|_| NntpError::ProtocolError("status line is not valid UTF-8".into()))?;
    let trimmed = text.trim_end_matches(['\r', '\n']);

    if trimmed.len() < 3 || !trimmed.as_bytes()[..3].iter().all(u8::is_ascii_digit) {
        return Err(NntpError::ProtocolError(format!(
            "malformed status line: {trimmed:?}"
        )));
    }
    let code: u16 = trimmed[..3]
        .parse()
        .map_err(|_| NntpError::ProtocolError(format!("malformed status code: {trimmed:?}")))?;
    if !(100..=599).contains(&code) {
        return Err(NntpError::ProtocolError(format!(
            "status code out of range: {code}"
        )));
    }
    let rest = trimmed[3..].trim_start();
    Ok((code, rest.to_string()))
}

/// Whether status 220/221 is followed by an inline header region.
pub fn has_inline_headers(status: u16) -> bool {
    status == 220 || status == 221
}

/// Parse one header line of the form `Name: Value`, matching
/// `^([\x21-\x39\x3B-\x7E]+):\s(.*)\r?\n$`. Returns `None` if the line does
/// not look like a header (ends header parsing, defensively). The grammar
/// requires exactly one whitespace octet (space or tab) between the colon
/// and the value — a bare `Name:Value` with no separating whitespace, or
/// `Name:\tValue`'s tab, both need that single octet consumed, not glued
/// onto the returned value or silently accepted without it.
pub fn parse_header_line(line: &[u8]) -> Option<(String, String)> {
    let text = std::str::from_utf8(line).ok()?;
    let trimmed = text.trim_end_matches(['\r', '\n']);
    let colon = trimmed.find(':')?;
    let (name, rest) = trimmed.split_at(colon);
    if name.is_empty() || !name.bytes().all(is_header_name_octet) {
        return None;
    }
    let mut after_colon = rest[1..].chars();
    match after_colon.next() {
        Some(' ') | Some('\t') => {}
        _ => return None,
    }
    Some((name.to_string(), after_colon.as_str().to_string()))
}

fn is_header_name_octet(b: u8) -> bool {
    matches!(b, 0x21..=0x39 | 0x3B..=0x7E)
}

/// Decide whether `status` introduces a multi-line body.
///
/// For the 211 ambiguity (GROUP vs LISTGROUP both use 211), prefer `hint`;
/// it reflects which command the caller actually sent. Without a hint this
/// falls back to searching `status_text` for "list"/"follow" — the
/// statusText heuristic RFC 3977 warns against relying on, kept only
/// because `request()` allows commands to be issued without a hint at all.
pub fn is_multiline(status: u16, hint: Option<Command>, status_text: &str) -> bool {
    if status == 211 {
        return match hint {
            Some(Command::Listgroup) => true,
            Some(Command::Group) => false,
            _ => {
                let lower = status_text.to_ascii_lowercase();
                lower.contains("list") || lower.contains("follow")
            }
        };
    }
    MULTILINE_CODES.contains(&status)
}
