use std::path::PathBuf;

use tracing::info;
use url::Url;

use crate::error::DaisyError;
use crate::fetch::Fetcher;
use crate::render::render_project;
use crate::settings::Settings;
use crate::sources::{Registry, Source};
use crate::writer::write_project;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Print `lib.rs` to stdout instead of writing a project.
    pub print: bool,
    /// Replace an existing project directory.
    pub force: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Unsupported(String),
    Written(PathBuf),
    Printed(String),
}

pub fn parse_url(raw: &str) -> Result<Url, DaisyError> {
    Url::parse(raw.trim()).map_err(|source| DaisyError::UnparsableUrl { url: raw.to_string(), source })
}

/// Parse, render, and persist an already retrieved response body.
pub fn materialize(
    source: &dyn Source,
    url: &Url,
    body: &str,
    settings: &Settings,
    options: Options,
) -> Result<Outcome, DaisyError> {
    let record = source.parse(url, body, settings)?;
    info!(
        "{}: \"{}\" with {} samples",
        source.name(),
        record.title,
        record.sample_inputs.len()
    );
    let project = render_project(&record, &settings.indoc_version)?;

    if options.print {
        return Ok(Outcome::Printed(project.lib));
    }
    let path = write_project(&project, &settings.output_dir, options.force)?;
    Ok(Outcome::Written(path))
}

/// Full run for one URL: resolve the site, fetch, then materialize.
pub async fn generate(
    registry: &Registry,
    raw_url: &str,
    settings: &Settings,
    options: Options,
) -> Result<Outcome, DaisyError> {
    let url = parse_url(raw_url)?;
    let host = url.host_str().unwrap_or_default().to_string();
    let Some(source) = registry.resolve(&host) else {
        return Ok(Outcome::Unsupported(host));
    };

    let fetcher = Fetcher::new(settings)?;
    let request = source.request(&url, settings)?;
    info!("{}: requesting {}", source.name(), request.url());
    let body = fetcher.retrieve(&request).await?;
    materialize(source, &url, &body, settings, options)
}
