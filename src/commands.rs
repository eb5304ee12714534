//! The closed set of NNTP commands this client speaks, plus the small
//! value types the typed wrappers parse responses into.

use crate::error::{NntpError, Result};

/// Maximum total octets in a command line, CRLF included (RFC 3977 §3.1).
const MAX_COMMAND_LINE: usize = 512;
/// Maximum octets across all arguments (512 minus keyword, spaces, CRLF
/// headroom).
const MAX_ARGS_LEN: usize = 497;

/// The closed set of RFC keywords this client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Article,
    Body,
    Capabilities,
    Date,
    Group,
    Hdr,
    Head,
    Help,
    Ihave,
    Last,
    List,
    Listgroup,
    ModeReader,
    Newgroups,
    Newnews,
    Next,
    Over,
    Post,
    Quit,
    Stat,
    AuthinfoUser,
    AuthinfoPass,
    AuthinfoSasl,
}

impl Command {
    /// The uppercase wire keyword, including the space for two-word
    /// commands like `MODE READER`.
    pub fn keyword(self) -> &'static str {
        match self {
            Command::Article => "ARTICLE",
            Command::Body => "BODY",
            Command::Capabilities => "CAPABILITIES",
            Command::Date => "DATE",
            Command::Group => "GROUP",
            Command::Hdr => "HDR",
            Command::Head => "HEAD",
            Command::Help => "HELP",
            Command::Ihave => "IHAVE",
            Command::Last => "LAST",
            Command::List => "LIST",
            Command::Listgroup => "LISTGROUP",
            Command::ModeReader => "MODE READER",
            Command::Newgroups => "NEWGROUPS",
            Command::Newnews => "NEWNEWS",
            Command::Next => "NEXT",
            Command::Over => "OVER",
            Command::Post => "POST",
            Command::Quit => "QUIT",
            Command::Stat => "STAT",
            Command::AuthinfoUser => "AUTHINFO USER",
            Command::AuthinfoPass => "AUTHINFO PASS",
            Command::AuthinfoSasl => "AUTHINFO SASL",
        }
    }
}

/// Wrap `id` in `<...>` if it looks like a bare message-id (contains `@`)
/// and isn't already wrapped.
pub fn wrap_message_id(id: &str) -> String {
    if id.starts_with('<') && id.ends_with('>') {
        id.to_string()
    } else if id.contains('@') {
        format!("<{id}>")
    } else {
        id.to_string()
    }
}

/// Build a CRLF-terminated command line, enforcing the RFC 3977 §3.1
/// length limits.
pub fn build_command_line(keyword: &str, args: &[&str]) -> Result<String> {
    let args_len: usize = args.iter().map(|a| a.len() + 1).sum();
    if args_len > MAX_ARGS_LEN {
        return Err(NntpError::CommandTooLong);
    }

    let mut line = String::with_capacity(keyword.len() + args_len + 2);
    line.push_str(keyword);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line.push_str("\r\n");

    if line.len() > MAX_COMMAND_LINE {
        return Err(NntpError::CommandTooLong);
    }
    Ok(line)
}

/// Parsed response to GROUP (RFC 3977 §6.1.1): `count first last name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub count: u64,
    pub first: u64,
    pub last: u64,
    pub name: String,
}

pub fn parse_group_info(status_text: &str) -> Result<GroupInfo> {
    let mut parts = status_text.split_whitespace();
    let count = next_u64(&mut parts)?;
    let first = next_u64(&mut parts)?;
    let last = next_u64(&mut parts)?;
    let name = parts
        .next()
        .ok_or_else(|| NntpError::ProtocolError("missing group name in GROUP response".into()))?
        .to_string();
    Ok(GroupInfo { count, first, last, name })
}

/// Parsed response to STAT/NEXT/LAST (RFC 3977 §6.1.3-6.2.4): `number
/// message-id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    pub number: u64,
    pub message_id: String,
}

pub fn parse_article_info(status_text: &str) -> Result<ArticleInfo> {
    let mut parts = status_text.split_whitespace();
    let number = next_u64(&mut parts)?;
    let message_id = parts
        .next()
        .ok_or_else(|| NntpError::ProtocolError("missing message-id in response".into()))?
        .to_string();
    Ok(ArticleInfo { number, message_id })
}

fn next_u64<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<u64> {
    parts
        .next()
        .ok_or_else(|| NntpError::ProtocolError("missing numeric field in response".into()))?
        .parse()
        .map_err(|_| NntpError::ProtocolError("non-numeric field in response".into()))
}

/// One line of an OVER/XOVER response: tab-separated fields per RFC 3977
/// §8.3 (article number, subject, from, date, message-id, references,
/// bytes, lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewEntry {
    pub article_number: u64,
    pub subject: String,
    pub from: String,
    pub date: String,
    pub message_id: String,
    pub references: String,
    pub bytes: u64,
    pub lines: u64,
}

pub fn parse_overview_line(line: &str) -> Result<OverviewEntry> {
    let mut fields = line.split('\t');
    let article_number = next_u64(&mut fields)?;
    let mut next_field = || {
        fields
            .next()
            .ok_or_else(|| NntpError::ProtocolError("truncated overview line".into()))
    };
    let subject = next_field()?.to_string();
    let from = next_field()?.to_string();
    let date = next_field()?.to_string();
    let message_id = next_field()?.to_string();
    let references = next_field()?.to_string();
    let bytes = next_field()?.parse().unwrap_or(0);
    let lines = next_field()?.parse().unwrap_or(0);
    Ok(OverviewEntry {
        article_number,
        subject,
        from,
        date,
        message_id,
        references,
        bytes,
        lines,
    })
}

/// One line of an HDR response: `article-number value` (RFC 3977 §8.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HdrEntry {
    pub article_number: u64,
    pub value: String,
}

pub fn parse_hdr_line(line: &str) -> Result<HdrEntry> {
    let (number, value) = line
        .split_once(' ')
        .ok_or_else(|| NntpError::ProtocolError("malformed HDR line".into()))?;
    Ok(HdrEntry {
        article_number: number
            .parse()
            .map_err(|_| NntpError::ProtocolError("non-numeric HDR article number".into()))?,
        value: value.to_string(),
    })
}
