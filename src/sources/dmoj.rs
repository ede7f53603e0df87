use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use url::Url;

use super::constraints::group_constraints;
use super::{bullet_list, join_paragraphs, Source};
use crate::error::DaisyError;
use crate::fetch::FetchRequest;
use crate::parser::blocks::{flatten_document, Block};
use crate::parser::sections::{extract_sections, Marker, Sections};
use crate::problem::{ProblemDraft, ProblemRecord};
use crate::settings::Settings;

const BASE_URL: &str = "https://dmoj.ca";
const TITLE_LEVEL: u8 = 2;

const CONSTRAINTS: &str = "Constraints";
const INPUT_SPEC: &str = "Input Specification";
const OUTPUT_SPEC: &str = "Output Specification";

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());
// "Sample Output 2" and CCC's "Output for Sample Input 2" both name output 2.
static SAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Sample (?P<kind>Input|Output)|(?P<for>Output) for Sample Input)(?: (?P<n>\d+))?$").unwrap()
});
static EXPLANATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:explanation (?:for|of) (?:output for sample input|sample(?: output| input)?)(?: (\d+))?|sample(?: (\d+))? explanation)$",
    )
    .unwrap()
});

/// dmoj.ca: one HTML page, `h4` marker headings, numbered sample headings.
pub struct Dmoj;

/// Problem code from `/problem/<code>`.
pub fn problem_code(url: &Url) -> Option<&str> {
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    match (segments.next(), segments.next(), segments.next()) {
        (Some("problem"), Some(code), None) if CODE_RE.is_match(code) => Some(code),
        _ => None,
    }
}

/// "CCC '15 S1 - Zero That Out" → "Zero That Out".
pub fn clean_title(raw: &str) -> String {
    let raw = raw.trim();
    match raw.split_once(" - ") {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim().to_string(),
        _ => raw.to_string(),
    }
}

#[derive(Debug, Default)]
struct SampleHeadings {
    inputs: Vec<(u32, String)>,
    outputs: Vec<(u32, String)>,
    explanations: Vec<(u32, String)>,
}

/// Find every sample-related heading, in document order.
fn sample_headings(blocks: &[Block]) -> SampleHeadings {
    let mut found = SampleHeadings::default();
    for text in blocks.iter().filter_map(Block::heading_text) {
        let text = text.trim();
        if let Some(caps) = SAMPLE_RE.captures(text) {
            let n = caps.name("n").and_then(|m| m.as_str().parse().ok()).unwrap_or(1);
            let is_input = caps.name("kind").is_some_and(|m| m.as_str() == "Input");
            let bucket = if is_input { &mut found.inputs } else { &mut found.outputs };
            if !bucket.iter().any(|(_, h)| h == text) {
                bucket.push((n, text.to_string()));
            }
        } else if let Some(caps) = EXPLANATION_RE.captures(text) {
            let n = caps
                .get(1)
                .or_else(|| caps.get(2))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(1);
            found.explanations.push((n, text.to_string()));
        }
    }
    found
}

fn markers(samples: &SampleHeadings) -> Vec<Marker> {
    let mut markers = vec![
        Marker::optional("constraints", CONSTRAINTS),
        Marker::required("input", INPUT_SPEC),
        Marker::required("output", OUTPUT_SPEC),
    ];
    for (n, heading) in &samples.inputs {
        markers.push(Marker::optional(format!("sample_input_{}", n), heading.clone()));
    }
    for (n, heading) in &samples.outputs {
        markers.push(Marker::optional(format!("sample_output_{}", n), heading.clone()));
    }
    for (n, heading) in &samples.explanations {
        markers.push(Marker::optional(format!("explanation_{}", n), heading.clone()));
    }
    markers
}

/// Pair numbered inputs with outputs, in input order.
fn collect_samples(
    sections: &Sections,
    samples: &SampleHeadings,
    width: usize,
) -> (Vec<(String, String)>, Vec<Option<String>>) {
    let mut pairs = Vec::new();
    let mut explanations = Vec::new();

    for (n, _) in &samples.inputs {
        let input = sections
            .get(&format!("sample_input_{}", n))
            .and_then(|s| s.preformatted());
        let output = sections
            .get(&format!("sample_output_{}", n))
            .and_then(|s| s.preformatted());
        match (input, output) {
            (Some(input), Some(output)) => {
                pairs.push((input.to_string(), output.to_string()));
                let explanation = sections
                    .get(&format!("explanation_{}", n))
                    .map(|s| join_paragraphs(s.paragraphs(), width))
                    .filter(|e| !e.is_empty());
                explanations.push(explanation);
            }
            _ => warn!("Sample {} has no matching input/output pair, skipping it", n),
        }
    }
    for (n, _) in &samples.outputs {
        if !samples.inputs.iter().any(|(m, _)| m == n) {
            warn!("Sample Output {} has no Sample Input, skipping it", n);
        }
    }
    (pairs, explanations)
}

/// Constraints body: paragraphs first, then grouped bullets.
fn constraints_text(sections: &Sections, width: usize) -> Option<String> {
    let section = sections.get("constraints")?;
    let paragraphs = join_paragraphs(section.paragraphs(), width);
    let items: Vec<String> = section.list_items().map(str::to_string).collect();
    let bullets = bullet_list(group_constraints(&items).iter().map(String::as_str), width);
    let text = [paragraphs, bullets]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    Some(text)
}

/// Parse a DMOJ problem page.
pub fn parse_page(html: &str, width: usize) -> Result<ProblemRecord, DaisyError> {
    let blocks = flatten_document(html);
    let samples = sample_headings(&blocks);
    let sections = extract_sections(&blocks, &markers(&samples), TITLE_LEVEL)?;

    let title = sections
        .title
        .as_deref()
        .map(clean_title)
        .ok_or_else(|| DaisyError::Malformed("no problem title heading".into()))?;
    debug!("DMOJ title {:?}, {} sections", title, sections.sections.len());

    let section_body = |key: &str| -> (String, String) {
        sections
            .get(key)
            .map(|s| (s.heading.clone(), join_paragraphs(s.paragraphs(), width)))
            .unwrap_or_default()
    };
    let (input_header, input_spec) = section_body("input");
    let (output_header, output_spec) = section_body("output");

    let (sample_pairs, sample_explanations) = collect_samples(&sections, &samples, width);

    ProblemDraft {
        title,
        description: join_paragraphs(sections.description.iter().map(Block::text), width),
        constraints_header: sections.get("constraints").map(|s| s.heading.clone()),
        constraints: constraints_text(&sections, width),
        input_header,
        input_spec,
        output_header,
        output_spec,
        follow_up: None,
        samples: sample_pairs,
        sample_explanations,
        signature: None,
    }
    .finish()
}

impl Source for Dmoj {
    fn name(&self) -> &'static str {
        "DMOJ"
    }

    fn hosts(&self) -> &'static [&'static str] {
        &["dmoj.ca"]
    }

    fn request(&self, url: &Url, _settings: &Settings) -> Result<FetchRequest, DaisyError> {
        let code = problem_code(url).ok_or_else(|| DaisyError::InvalidUrl {
            site: self.name(),
            url: url.to_string(),
        })?;
        Ok(FetchRequest::Get { url: format!("{}/problem/{}", BASE_URL, code) })
    }

    fn parse(&self, _url: &Url, body: &str, settings: &Settings) -> Result<ProblemRecord, DaisyError> {
        parse_page(body, settings.wrap_width)
    }
}
