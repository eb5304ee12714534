#![doc = include_str!("../README.md")]

/// Article data model (input to POST/IHAVE) and its builder.
pub mod article;
mod capabilities;
mod client;
/// The closed set of NNTP commands and the small value types responses
/// parse into.
pub mod commands;
mod config;
mod encoder;
mod error;
/// Pure response-framing logic (status line, header, multi-line
/// classification).
pub mod framer;
mod reader;
/// The NNTP response value and its lazy multi-line body stream.
pub mod response;

pub use article::{Article, ArticleBody, ArticleBuilder};
pub use capabilities::Capabilities;
pub use client::NntpClient;
pub use commands::{ArticleInfo, Command, GroupInfo, HdrEntry, OverviewEntry};
pub use config::{ConnectOptions, LogLevel};
pub use encoder::{ArticleEncoder, DotStuffer};
pub use error::{NntpError, Result};
pub use response::{codes, BodyStream, Response};
