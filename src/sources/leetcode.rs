use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::constraints::group_constraints;
use super::{bullet_list, join_paragraphs, Source};
use crate::error::{DaisyError, SignatureError};
use crate::fetch::FetchRequest;
use crate::parser::blocks::{flatten_fragment, Block};
use crate::parser::sections::{extract_sections, Marker, Section};
use crate::parser::text::{markup_to_text, normalize};
use crate::problem::{Param, ProblemDraft, ProblemRecord, Signature};
use crate::settings::Settings;

const QUERY: &str = "query questionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    title
    content
    codeSnippets { langSlug code }
  }
}";

const CONSTRAINTS: &str = "Constraints";
const FOLLOW_UP: &str = "Follow-up";
// Statement content has no title heading; the description walk runs to the start.
const NO_TITLE_LEVEL: u8 = 0;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());
static EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Example\s*(\d+)\s*:?$").unwrap());
static CONSTRAINTS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Constraints\s*:?$").unwrap());
static FOLLOW_UP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^follow[- ]?up\s*:?\s*(.*)$").unwrap());
static LEADING_STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*<(strong|b)[^>]*>.*?</(strong|b)>\s*").unwrap());
static EXAMPLE_FIELDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Input:\s*(?P<input>.*?)\s*Output:\s*(?P<output>.*?)\s*(?:Explanation:\s*(?P<explanation>.*?))?\s*$").unwrap()
});
static FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)pub\s+fn\s+(?P<name>[A-Za-z_]\w*)\s*\((?P<params>.*?)\)\s*(?:->\s*(?P<ret>[^{]+?))?\s*\{").unwrap()
});
static IDENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_]\w*$").unwrap());
static TYPE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z0-9_]*").unwrap());

/// Types usable in a signature without a definition, with the import they need.
const STD_TYPES: &[(&str, Option<&str>)] = &[
    ("Vec", None),
    ("Option", None),
    ("Box", None),
    ("String", None),
    ("Rc", Some("use std::rc::Rc;")),
    ("RefCell", Some("use std::cell::RefCell;")),
    ("HashMap", Some("use std::collections::HashMap;")),
    ("HashSet", Some("use std::collections::HashSet;")),
    ("VecDeque", Some("use std::collections::VecDeque;")),
];

/// leetcode.com: a GraphQL query whose `content` field is statement HTML.
pub struct LeetCode;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<QuestionData>,
}

#[derive(Debug, Deserialize)]
struct QuestionData {
    question: Option<Question>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Question {
    title: String,
    content: Option<String>,
    #[serde(default)]
    code_snippets: Option<Vec<CodeSnippet>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeSnippet {
    lang_slug: String,
    code: String,
}

/// Problem slug from `/problems/<slug>/...`.
pub fn problem_slug(url: &Url) -> Option<&str> {
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("problems"), Some(slug)) if SLUG_RE.is_match(slug) => Some(slug),
        _ => None,
    }
}

/// Parse the `pub fn` of an `impl Solution` snippet.
pub fn parse_signature(code: &str) -> Result<Signature, SignatureError> {
    if !code.contains("impl Solution") {
        return Err(SignatureError::NotSolution);
    }
    let caps = FN_RE.captures(code).ok_or(SignatureError::NoFunction)?;

    let mut params = Vec::new();
    for raw in split_top_level(&caps["params"]) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let (name, ty) = raw
            .split_once(':')
            .ok_or_else(|| SignatureError::BadParam(raw.to_string()))?;
        let name = name.trim().trim_start_matches("mut ").trim();
        let ty = ty.trim();
        if !IDENT_RE.is_match(name) || ty.is_empty() {
            return Err(SignatureError::BadParam(raw.to_string()));
        }
        params.push(Param { name: name.to_string(), ty: ty.to_string() });
    }

    let ret = caps.name("ret").map(|m| m.as_str().trim().to_string());
    let types: Vec<&str> = params.iter().map(|p| p.ty.as_str()).chain(ret.as_deref()).collect();
    let prelude = complete_prelude(snippet_prelude(code), &types.join(" "))?;

    Ok(Signature {
        name: caps["name"].to_string(),
        params,
        ret,
        prelude,
    })
}

/// Uncomment the type definitions that precede `impl Solution` in a
/// snippet. Prose comment lines before the first definition are dropped;
/// `use` lines are kept as they are.
fn snippet_prelude(code: &str) -> Option<String> {
    let head = &code[..code.find("impl Solution")?];
    let mut lines = Vec::new();
    let mut in_code = false;
    for line in head.lines() {
        let trimmed = line.trim();
        match trimmed.strip_prefix("//") {
            Some(rest) => {
                let rest = rest.strip_prefix(' ').unwrap_or(rest).trim_end();
                if !in_code && ["#[", "pub struct", "struct ", "use "].iter().any(|p| rest.starts_with(p)) {
                    in_code = true;
                }
                if in_code {
                    lines.push(rest.to_string());
                }
            }
            None => lines.push(trimmed.to_string()),
        }
    }
    let prelude = lines.join("\n").trim().to_string();
    (!prelude.is_empty()).then_some(prelude)
}

fn defines(prelude: &str, name: &str) -> bool {
    let tokens: Vec<&str> = prelude.split_whitespace().collect();
    tokens
        .windows(2)
        .any(|w| matches!(w[0], "struct" | "enum" | "type") && w[1].trim_end_matches(['{', ';', '<']) == name)
}

/// Every type the signature names must be std or defined in the prelude.
/// Missing std imports are added.
fn complete_prelude(prelude: Option<String>, types: &str) -> Result<Option<String>, SignatureError> {
    let existing = prelude.as_deref().unwrap_or_default();
    let mut imports: Vec<&str> = Vec::new();
    for name in TYPE_NAME_RE.find_iter(types).map(|m| m.as_str()) {
        match STD_TYPES.iter().find(|(t, _)| *t == name) {
            Some((_, Some(import))) if !existing.contains(import) && !imports.contains(import) => {
                imports.push(*import)
            }
            Some(_) => {}
            None if defines(existing, name) => {}
            None => return Err(SignatureError::UndefinedType(name.to_string())),
        }
    }

    let parts: Vec<&str> = imports.into_iter().chain(prelude.as_deref()).collect();
    Ok((!parts.is_empty()).then(|| parts.join("\n")))
}

/// Split on commas outside `<...>`, `(...)`, and `[...]`.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}

fn rust_signature(snippets: Option<&[CodeSnippet]>) -> Option<Signature> {
    let result = snippets
        .and_then(|all| all.iter().find(|s| s.lang_slug == "rust"))
        .ok_or(SignatureError::NoSnippet)
        .and_then(|s| parse_signature(&s.code));
    match result {
        Ok(sig) => Some(sig),
        Err(e) => {
            debug!("No usable function signature ({}), falling back to the title", e);
            None
        }
    }
}

/// Turn the pseudo-heading paragraphs LeetCode uses ("Example 1:",
/// "Constraints:", "Follow-up: ...") into real headings.
fn promote_markers(blocks: Vec<Block>) -> Vec<Block> {
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        let Block::Paragraph { text, markup } = &block else {
            out.push(block);
            continue;
        };
        if let Some(caps) = EXAMPLE_RE.captures(text) {
            out.push(Block::Heading { level: 4, text: format!("Example {}", &caps[1]) });
        } else if CONSTRAINTS_RE.is_match(text) {
            out.push(Block::Heading { level: 4, text: CONSTRAINTS.to_string() });
        } else if let Some(caps) = FOLLOW_UP_RE.captures(text) {
            out.push(Block::Heading { level: 4, text: FOLLOW_UP.to_string() });
            let rest = caps[1].trim();
            if !rest.is_empty() {
                out.push(Block::Paragraph {
                    text: rest.to_string(),
                    markup: LEADING_STRONG_RE.replace(markup, "").into_owned(),
                });
            }
        } else {
            out.push(block);
        }
    }
    out
}

fn markup_of(block: &Block) -> Option<&str> {
    match block {
        Block::Paragraph { markup, .. } | Block::ListItem { markup, .. } => Some(markup.as_str()),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
struct Example {
    input: String,
    output: String,
    explanation: Option<String>,
}

/// Read "Input: / Output: / Explanation:" out of one example section, in
/// either the `<pre>` layout or the paragraph-per-field layout.
fn parse_example(section: &Section, width: usize) -> Option<Example> {
    let text = section
        .blocks
        .iter()
        .map(|b| match b {
            Block::Preformatted(t) => t.clone(),
            Block::Paragraph { markup, .. } | Block::ListItem { markup, .. } => markup_to_text(markup, false),
            Block::Heading { .. } => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let caps = EXAMPLE_FIELDS_RE.captures(&text)?;
    let explanation = caps
        .name("explanation")
        .map(|m| normalize(m.as_str(), width))
        .filter(|e| !e.is_empty());
    Some(Example {
        input: caps["input"].trim().to_string(),
        output: caps["output"].trim().to_string(),
        explanation,
    })
}

fn input_spec(signature: Option<&Signature>, width: usize) -> String {
    match signature {
        Some(sig) if sig.params.is_empty() => "The function takes no arguments.".to_string(),
        Some(sig) => {
            let items: Vec<String> = sig.params.iter().map(|p| format!("`{}`: `{}`", p.name, p.ty)).collect();
            bullet_list(items.iter().map(String::as_str), width)
        }
        None => "The arguments shown on each example's Input line.".to_string(),
    }
}

fn output_spec(signature: Option<&Signature>) -> String {
    match signature {
        Some(Signature { ret: Some(ret), .. }) => format!("Return a `{}`.", ret),
        Some(_) => "Nothing is returned; the input is modified in place.".to_string(),
        None => "The value shown on each example's Output line.".to_string(),
    }
}

/// Parse a GraphQL `questionDetail` response body.
pub fn parse_response(body: &str, source_url: &str, width: usize) -> Result<ProblemRecord, DaisyError> {
    let response: GraphqlResponse = serde_json::from_str(body).map_err(|source| DaisyError::Decode {
        url: source_url.to_string(),
        source,
    })?;
    let question = response
        .data
        .and_then(|d| d.question)
        .ok_or_else(|| DaisyError::Malformed("no question in response".into()))?;
    let content = question
        .content
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| DaisyError::Malformed(format!("no statement for \"{}\" (premium problem?)", question.title)))?;

    let blocks = promote_markers(flatten_fragment(content));
    let example_headings: Vec<String> = blocks
        .iter()
        .filter_map(Block::heading_text)
        .filter(|t| t.starts_with("Example "))
        .map(str::to_string)
        .collect();

    let mut markers: Vec<Marker> = example_headings
        .iter()
        .map(|h| Marker::optional(h.to_lowercase().replace(' ', "_"), h.clone()))
        .collect();
    markers.push(Marker::optional("constraints", CONSTRAINTS));
    markers.push(Marker::optional("follow_up", FOLLOW_UP));
    let sections = extract_sections(&blocks, &markers, NO_TITLE_LEVEL)?;

    let mut samples = Vec::new();
    let mut explanations = Vec::new();
    for heading in &example_headings {
        let key = heading.to_lowercase().replace(' ', "_");
        match sections.get(&key).and_then(|s| parse_example(s, width)) {
            Some(example) => {
                samples.push((example.input, example.output));
                explanations.push(example.explanation);
            }
            None => warn!("{} has no Input/Output lines, skipping it", heading),
        }
    }

    let paragraphs: Vec<String> = sections
        .description
        .iter()
        .filter_map(markup_of)
        .map(|m| markup_to_text(m, true))
        .collect();
    let description = join_paragraphs(paragraphs.iter().map(String::as_str), width);

    let constraints = sections.get("constraints").map(|s| {
        let items: Vec<String> = s
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::ListItem { .. }))
            .filter_map(markup_of)
            .map(|m| markup_to_text(m, false))
            .collect();
        bullet_list(group_constraints(&items).iter().map(String::as_str), width)
    });

    let follow_up = sections
        .get("follow_up")
        .map(|s| {
            let parts: Vec<String> = s.blocks.iter().filter_map(markup_of).map(|m| markup_to_text(m, true)).collect();
            join_paragraphs(parts.iter().map(String::as_str), width)
        })
        .filter(|f| !f.is_empty());

    let signature = rust_signature(question.code_snippets.as_deref());

    ProblemDraft {
        title: question.title.clone(),
        description,
        constraints_header: constraints.as_ref().map(|_| CONSTRAINTS.to_string()),
        constraints,
        input_header: "Input".to_string(),
        input_spec: input_spec(signature.as_ref(), width),
        output_header: "Output".to_string(),
        output_spec: output_spec(signature.as_ref()),
        follow_up,
        samples,
        sample_explanations: explanations,
        signature,
    }
    .finish()
}

impl Source for LeetCode {
    fn name(&self) -> &'static str {
        "LeetCode"
    }

    fn hosts(&self) -> &'static [&'static str] {
        &["leetcode.com", "leetcode.cn"]
    }

    fn request(&self, url: &Url, settings: &Settings) -> Result<FetchRequest, DaisyError> {
        let slug = problem_slug(url).ok_or_else(|| DaisyError::InvalidUrl {
            site: self.name(),
            url: url.to_string(),
        })?;
        Ok(FetchRequest::PostJson {
            url: settings.leetcode_graphql_url.clone(),
            body: serde_json::json!({
                "query": QUERY,
                "variables": { "titleSlug": slug },
            }),
        })
    }

    fn parse(&self, _url: &Url, body: &str, settings: &Settings) -> Result<ProblemRecord, DaisyError> {
        parse_response(body, &settings.leetcode_graphql_url, settings.wrap_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn slug_from_path() {
        assert_eq!(problem_slug(&url("https://leetcode.com/problems/two-sum/")), Some("two-sum"));
        assert_eq!(problem_slug(&url("https://leetcode.com/problems/two-sum/description/")), Some("two-sum"));
        assert_eq!(problem_slug(&url("https://leetcode.com/problemset/all/")), None);
        assert_eq!(problem_slug(&url("https://leetcode.com/problems/")), None);
    }

    #[test]
    fn request_is_graphql_post() {
        let settings = Settings::default();
        let req = LeetCode.request(&url("https://leetcode.com/problems/two-sum/"), &settings).unwrap();
        match req {
            FetchRequest::PostJson { url, body } => {
                assert_eq!(url, settings.leetcode_graphql_url);
                assert_eq!(body["variables"]["titleSlug"], "two-sum");
                assert!(body["query"].as_str().unwrap().contains("codeSnippets"));
            }
            other => panic!("expected POST, got {:?}", other),
        }
    }

    #[test]
    fn bad_path_is_validation_error() {
        let err = LeetCode.request(&url("https://leetcode.com/contest/weekly-contest-1"), &Settings::default()).unwrap_err();
        assert!(matches!(err, DaisyError::InvalidUrl { site: "LeetCode", .. }));
    }

    #[test]
    fn signature_parsing() {
        let code = "impl Solution {\n    pub fn two_sum(nums: Vec<i32>, target: i32) -> Vec<i32> {\n        \n    }\n}";
        let sig = parse_signature(code).unwrap();
        assert_eq!(sig.name, "two_sum");
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.params[0], Param { name: "nums".into(), ty: "Vec<i32>".into() });
        assert_eq!(sig.ret.as_deref(), Some("Vec<i32>"));
    }

    #[test]
    fn signature_generic_commas_and_unit_return() {
        let code = "impl Solution {\n    pub fn rotate(mut m: HashMap<i32, Vec<i32>>, k: i32) {\n    }\n}";
        let sig = parse_signature(code).unwrap();
        assert_eq!(sig.params[0], Param { name: "m".into(), ty: "HashMap<i32, Vec<i32>>".into() });
        assert!(sig.ret.is_none());
    }

    #[test]
    fn linked_list_definitions_carried() {
        let code = "// Definition for singly-linked list.\n// #[derive(PartialEq, Eq, Clone, Debug)]\n// pub struct ListNode {\n//   pub val: i32,\n//   pub next: Option<Box<ListNode>>\n// }\n//\n// impl ListNode {\n//   #[inline]\n//   fn new(val: i32) -> Self {\n//     ListNode {\n//       next: None,\n//       val\n//     }\n//   }\n// }\nimpl Solution {\n    pub fn reverse_list(head: Option<Box<ListNode>>) -> Option<Box<ListNode>> {\n        \n    }\n}";
        let sig = parse_signature(code).unwrap();
        let prelude = sig.prelude.unwrap();
        assert!(prelude.starts_with("#[derive(PartialEq, Eq, Clone, Debug)]\npub struct ListNode {\n  pub val: i32,"));
        assert!(prelude.contains("\n\nimpl ListNode {\n  #[inline]\n  fn new(val: i32) -> Self {"));
        assert!(!prelude.contains("Definition for"));
        assert!(!prelude.contains("//"));
    }

    #[test]
    fn tree_definitions_keep_imports() {
        let code = "// Definition for a binary tree node.\n// #[derive(Debug, PartialEq, Eq)]\n// pub struct TreeNode {\n//   pub val: i32,\n//   pub left: Option<Rc<RefCell<TreeNode>>>,\n//   pub right: Option<Rc<RefCell<TreeNode>>>,\n// }\nuse std::rc::Rc;\nuse std::cell::RefCell;\nimpl Solution {\n    pub fn max_depth(root: Option<Rc<RefCell<TreeNode>>>) -> i32 {\n        \n    }\n}";
        let sig = parse_signature(code).unwrap();
        let prelude = sig.prelude.unwrap();
        assert!(prelude.contains("pub struct TreeNode {"));
        assert!(prelude.ends_with("}\nuse std::rc::Rc;\nuse std::cell::RefCell;"));
        assert_eq!(prelude.matches("use std::rc::Rc;").count(), 1);
    }

    #[test]
    fn missing_std_imports_added() {
        let code = "impl Solution {\n    pub fn group(words: Vec<String>) -> HashMap<String, i32> {\n    }\n}";
        let sig = parse_signature(code).unwrap();
        assert_eq!(sig.prelude.as_deref(), Some("use std::collections::HashMap;"));

        let plain = parse_signature("impl Solution {\n    pub fn f(n: i32) -> Vec<i32> {\n    }\n}").unwrap();
        assert!(plain.prelude.is_none());
    }

    #[test]
    fn undefined_type_degrades() {
        let code = "impl Solution {\n    pub fn reverse_list(head: Option<Box<ListNode>>) -> Option<Box<ListNode>> {\n    }\n}";
        assert_eq!(parse_signature(code), Err(SignatureError::UndefinedType("ListNode".into())));
    }

    #[test]
    fn signature_failures() {
        assert_eq!(parse_signature("struct MinStack {}\nimpl MinStack { fn new() -> Self {} }"), Err(SignatureError::NotSolution));
        assert_eq!(parse_signature("impl Solution {}"), Err(SignatureError::NoFunction));
        assert!(matches!(parse_signature("impl Solution { pub fn f(x) -> i32 {} }"), Err(SignatureError::BadParam(_))));
    }

    #[test]
    fn pre_layout_examples() {
        let record = parse_response(&fixture("leetcode_two_sum.json"), "test", 84).unwrap();
        assert_eq!(record.title, "Two Sum");
        assert_eq!(record.function_name, "two_sum");
        assert!(record.description.starts_with("Given an array of integers `nums`"));
        assert!(record.description.contains("`target`"));
        assert_eq!(record.sample_inputs.len(), 3);
        assert_eq!(record.sample_inputs.len(), record.sample_outputs.len());
        assert_eq!(record.sample_inputs[0], "nums = [2,7,11,15], target = 9");
        assert_eq!(record.sample_outputs[0], "[0,1]");
        assert_eq!(record.sample_outputs[2], "[0,1]");
        assert!(record.sample_explanations[0].as_deref().unwrap().contains("nums[0] + nums[1] == 9"));
        assert_eq!(record.sample_explanations.len(), 1);

        let constraints = record.constraints.as_deref().unwrap();
        assert_eq!(record.constraints_header.as_deref(), Some("Constraints"));
        assert!(constraints.contains("- 2 <= nums.length <= 10^4, -10^9 <= nums[i] <= 10^9"), "{}", constraints);
        assert!(constraints.contains("- -10^9 <= target <= 10^9"));
        assert!(record.follow_up.as_deref().unwrap().starts_with("Can you come up with"));
        assert!(record.input_spec.contains("- `nums`: `Vec<i32>`"));
        assert_eq!(record.output_spec, "Return a `Vec<i32>`.");
    }

    #[test]
    fn paragraph_layout_examples() {
        let record = parse_response(&fixture("leetcode_example_blocks.json"), "test", 84).unwrap();
        assert_eq!(record.title, "Longest Substring Without Repeating Characters");
        assert_eq!(record.sample_inputs, vec![r#"s = "abcabcbb""#, r#"s = "bbbbb""#]);
        assert_eq!(record.sample_outputs, vec!["3", "1"]);
        assert_eq!(record.sample_explanations.len(), 2);
        assert!(record.sample_explanations[1].as_deref().unwrap().contains("\"b\""));
        assert!(record.follow_up.is_none());
        // No Rust snippet, so the name comes from the title.
        assert!(record.signature.is_none());
        assert_eq!(record.function_name, "longest_substring_without_repeating_characters");
        assert_eq!(record.input_header, "Input");
        assert!(!record.input_spec.is_empty());
    }

    #[test]
    fn statement_without_examples_keeps_description() {
        let body = serde_json::json!({
            "data": { "question": {
                "title": "Design Parking System",
                "content": "<p>Design a parking system.</p><p>Implement the <code>ParkingSystem</code> class.</p>",
                "codeSnippets": []
            }}
        })
        .to_string();
        let record = parse_response(&body, "test", 84).unwrap();
        assert_eq!(record.description, "Design a parking system.\n\nImplement the `ParkingSystem` class.");
        assert!(record.sample_inputs.is_empty());
        assert!(record.constraints.is_none());
    }

    #[test]
    fn missing_question_is_error() {
        let err = parse_response(r#"{"data":{"question":null}}"#, "test", 84).unwrap_err();
        assert!(matches!(err, DaisyError::Malformed(_)));
        let err = parse_response(r#"{"data":{"question":{"title":"Paid","content":null}}}"#, "test", 84).unwrap_err();
        assert!(matches!(err, DaisyError::Malformed(m) if m.contains("Paid")));
    }

    #[test]
    fn garbage_body_is_decode_error() {
        let err = parse_response("<html>rate limited</html>", "https://leetcode.com/graphql", 84).unwrap_err();
        assert!(matches!(err, DaisyError::Decode { .. }));
    }
}
