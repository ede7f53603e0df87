use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaisyError {
    #[error("not a valid URL: {url}")]
    UnparsableUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid {site} problem URL: {url}")]
    InvalidUrl { site: &'static str, url: String },

    #[error("retrieval failed for {url}")]
    Retrieval {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("retrieval failed for {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("retrieval failed for {url}: unreadable response")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not find section \"{0}\"")]
    MissingSection(String),

    #[error("malformed problem page: {0}")]
    Malformed(String),

    #[error("title {0:?} yields an empty identifier")]
    EmptyIdentifier(String),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    ProjectExists(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why an authoritative function signature was rejected. Never surfaced to
/// the user; the renderer falls back to the generated identifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("no rust code snippet")]
    NoSnippet,
    #[error("snippet is not an `impl Solution` block")]
    NotSolution,
    #[error("no `pub fn` declaration in snippet")]
    NoFunction,
    #[error("bad parameter {0:?}")]
    BadParam(String),
    #[error("type `{0}` is not defined by the snippet")]
    UndefinedType(String),
}
