use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_WRAP_WIDTH: usize = 84;
const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Runtime configuration, loaded once at startup and passed down explicitly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Column at which normalized prose is wrapped.
    pub wrap_width: usize,
    /// Directory under which generated projects are created.
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub leetcode_graphql_url: String,
    /// Version requirement written for the `indoc` dev-dependency.
    pub indoc_version: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            wrap_width: DEFAULT_WRAP_WIDTH,
            output_dir: PathBuf::from("."),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            leetcode_graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            indoc_version: "2".to_string(),
        }
    }
}

/// Layered load: `daisy.toml` in the working directory (optional), then
/// `DAISY_*` environment variables.
pub fn load() -> Result<Settings> {
    let settings: Settings = Config::builder()
        .add_source(File::with_name("daisy").required(false))
        .add_source(Environment::with_prefix("DAISY").try_parsing(true))
        .build()?
        .try_deserialize()?;
    Ok(settings.sanitized())
}

impl Settings {
    fn sanitized(mut self) -> Self {
        self.wrap_width = self.wrap_width.max(1);
        self
    }

    pub fn with_overrides(mut self, output_dir: Option<PathBuf>, wrap_width: Option<usize>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if let Some(width) = wrap_width {
            self.wrap_width = width;
        }
        self.sanitized()
    }
}
