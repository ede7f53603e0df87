pub mod constraints;
pub mod dmoj;
pub mod leetcode;

use url::Url;

use crate::error::DaisyError;
use crate::fetch::FetchRequest;
use crate::parser::text::normalize;
use crate::problem::ProblemRecord;
use crate::settings::Settings;

/// One judge site. A source validates the URL and describes the request to
/// make, then turns the response body into a [`ProblemRecord`].
pub trait Source {
    fn name(&self) -> &'static str;

    /// Host substrings this source handles.
    fn hosts(&self) -> &'static [&'static str];

    fn request(&self, url: &Url, settings: &Settings) -> Result<FetchRequest, DaisyError>;

    fn parse(&self, url: &Url, body: &str, settings: &Settings) -> Result<ProblemRecord, DaisyError>;
}

/// Maps hosts to sources. Adding a site means registering one more source.
pub struct Registry {
    sources: Vec<Box<dyn Source>>,
}

impl Registry {
    pub fn empty() -> Self {
        Registry { sources: Vec::new() }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Registry::empty();
        registry.register(Box::new(dmoj::Dmoj));
        registry.register(Box::new(leetcode::LeetCode));
        registry
    }

    pub fn register(&mut self, source: Box<dyn Source>) {
        self.sources.push(source);
    }

    pub fn resolve(&self, host: &str) -> Option<&dyn Source> {
        self.sources
            .iter()
            .find(|s| s.hosts().iter().any(|h| host.contains(h)))
            .map(|s| s.as_ref())
    }

    pub fn sources(&self) -> impl Iterator<Item = &dyn Source> {
        self.sources.iter().map(|s| s.as_ref())
    }
}

/// Normalize each paragraph and join them with blank lines.
pub(crate) fn join_paragraphs<'a>(parts: impl IntoIterator<Item = &'a str>, width: usize) -> String {
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| normalize(p, width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render bullet items as `- item` lines, continuation lines indented to
/// line up under the text.
pub(crate) fn bullet_list<'a>(items: impl IntoIterator<Item = &'a str>, width: usize) -> String {
    items
        .into_iter()
        .map(|item| {
            let body = normalize(item, width.saturating_sub(2).max(1));
            body.lines()
                .enumerate()
                .map(|(i, line)| match (i, line.is_empty()) {
                    (0, _) => format!("- {}", line),
                    (_, true) => String::new(),
                    _ => format!("  {}", line),
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
