use super::blocks::Block;
use crate::error::DaisyError;

/// A heading that opens a named section.
#[derive(Debug, Clone)]
pub struct Marker {
    pub key: String,
    pub heading: String,
    pub required: bool,
}

impl Marker {
    pub fn required(key: impl Into<String>, heading: impl Into<String>) -> Self {
        Marker { key: key.into(), heading: heading.into(), required: true }
    }

    pub fn optional(key: impl Into<String>, heading: impl Into<String>) -> Self {
        Marker { key: key.into(), heading: heading.into(), required: false }
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub key: String,
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn list_items(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::ListItem { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// The first preformatted block, verbatim.
    pub fn preformatted(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Preformatted(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sections {
    pub title: Option<String>,
    /// Paragraph blocks between the title heading and the first marker.
    pub description: Vec<Block>,
    pub sections: Vec<Section>,
}

impl Sections {
    pub fn get(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }
}

/// Slice a flat block list into the sections named by `markers`.
///
/// A section runs from its marker heading up to the next marker heading, a
/// heading of a strictly higher level, or the end of the document. The
/// description is every paragraph before the first marker, walking back
/// until the first heading of `title_level`; with no marker present it is
/// every paragraph after the title.
pub fn extract_sections(
    blocks: &[Block],
    markers: &[Marker],
    title_level: u8,
) -> Result<Sections, DaisyError> {
    let is_marker = |b: &Block| {
        b.heading_text()
            .is_some_and(|t| markers.iter().any(|m| m.heading == t.trim()))
    };

    let title_idx = blocks
        .iter()
        .position(|b| matches!(b, Block::Heading { level, .. } if *level == title_level));
    let title = title_idx.map(|i| blocks[i].text().trim().to_string());

    let mut sections = Vec::new();
    for marker in markers {
        let found = blocks.iter().enumerate().find_map(|(i, b)| match b {
            Block::Heading { level, text } if text.trim() == marker.heading => Some((i, *level)),
            _ => None,
        });
        let Some((start, level)) = found else {
            if marker.required {
                return Err(DaisyError::MissingSection(marker.heading.clone()));
            }
            continue;
        };

        let body: Vec<Block> = blocks[start + 1..]
            .iter()
            .take_while(|b| match b {
                Block::Heading { level: l, .. } => *l >= level && !is_marker(b),
                _ => true,
            })
            .filter(|b| !matches!(b, Block::Heading { .. }))
            .cloned()
            .collect();

        sections.push(Section {
            key: marker.key.clone(),
            heading: blocks[start].text().trim().to_string(),
            blocks: body,
        });
    }

    let is_prose = |b: &&Block| matches!(b, Block::Paragraph { text, .. } if !text.is_empty());
    let description = match blocks.iter().position(|b| is_marker(b)) {
        Some(first) => {
            let mut parts = Vec::new();
            for block in blocks[..first].iter().rev() {
                match block {
                    Block::Heading { level, .. } if *level == title_level => break,
                    _ if is_prose(&block) => parts.push(block.clone()),
                    _ => {}
                }
            }
            parts.reverse();
            parts
        }
        // No marker at all: everything after the title is description.
        None => {
            let start = title_idx.map_or(0, |i| i + 1);
            blocks[start..].iter().filter(is_prose).cloned().collect()
        }
    };

    Ok(Sections { title, description, sections })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::blocks::{flatten_document, flatten_fragment};

    fn markers() -> Vec<Marker> {
        vec![
            Marker::optional("constraints", "Constraints"),
            Marker::required("input", "Input Specification"),
            Marker::required("output", "Output Specification"),
            Marker::optional("sample_input", "Sample Input"),
            Marker::optional("sample_output", "Sample Output"),
        ]
    }

    const PAGE: &str = r#"<html><body>
        <p>Site banner</p>
        <h2>A Problem</h2>
        <p>First paragraph.</p>
        <p>Second paragraph.</p>
        <h4>Constraints</h4>
        <ul><li>1 <= n</li><li>n <= 100</li></ul>
        <h4>Input Specification</h4>
        <p>One integer n.</p>
        <h5>Note</h5>
        <p>Still input.</p>
        <h4>Output Specification</h4>
        <p>Print n.</p>
        <h4>Sample Input</h4>
        <pre>5
</pre>
        <h4>Sample Output</h4>
        <pre>5
</pre>
        <h3>Comments</h3>
        <p>nice problem</p>
    </body></html>"#;

    #[test]
    fn slices_between_markers() {
        let blocks = flatten_document(PAGE);
        let s = extract_sections(&blocks, &markers(), 2).unwrap();

        assert_eq!(s.title.as_deref(), Some("A Problem"));
        let description: Vec<_> = s.description.iter().map(Block::text).collect();
        assert_eq!(description, vec!["First paragraph.", "Second paragraph."]);

        let constraints = s.get("constraints").unwrap();
        assert_eq!(constraints.list_items().collect::<Vec<_>>(), vec!["1 <= n", "n <= 100"]);

        let input = s.get("input").unwrap();
        assert_eq!(input.paragraphs().collect::<Vec<_>>(), vec!["One integer n.", "Still input."]);

        assert_eq!(s.get("output").unwrap().paragraphs().collect::<Vec<_>>(), vec!["Print n."]);
        assert_eq!(s.get("sample_input").unwrap().preformatted(), Some("5\n"));
        // The h3 closes the last section.
        assert!(s.get("sample_output").unwrap().paragraphs().next().is_none());
    }

    #[test]
    fn constraints_optional() {
        let page = PAGE.replace("<h4>Constraints</h4>", "");
        let blocks = flatten_document(&page);
        let s = extract_sections(&blocks, &markers(), 2).unwrap();
        assert!(s.get("constraints").is_none());
        assert!(s.get("input").is_some());
    }

    #[test]
    fn missing_required_is_structural_error() {
        for heading in ["Input Specification", "Output Specification"] {
            let page = PAGE.replace(&format!("<h4>{}</h4>", heading), "<h4>Something Else</h4>");
            let blocks = flatten_document(&page);
            let err = extract_sections(&blocks, &markers(), 2).unwrap_err();
            assert!(matches!(err, DaisyError::MissingSection(h) if h == heading));
        }
    }

    #[test]
    fn description_without_any_marker() {
        let blocks = flatten_document("<p>banner</p><h2>T</h2><p>one</p><ul><li>x</li></ul><p></p><p>two</p>");
        let optional = vec![Marker::optional("constraints", "Constraints")];
        let s = extract_sections(&blocks, &optional, 2).unwrap();
        let description: Vec<_> = s.description.iter().map(Block::text).collect();
        assert_eq!(description, vec!["one", "two"]);

        let s = extract_sections(&flatten_fragment("<p>only</p><p>prose</p>"), &optional, 0).unwrap();
        assert_eq!(s.description.len(), 2);
    }

    #[test]
    fn description_without_title_runs_to_start() {
        let blocks = flatten_document("<p>a</p><p></p><p>b</p><h4>Input Specification</h4><h4>Output Specification</h4>");
        let s = extract_sections(&blocks, &markers(), 2).unwrap();
        assert!(s.title.is_none());
        let description: Vec<_> = s.description.iter().map(Block::text).collect();
        assert_eq!(description, vec!["a", "b"]);
    }
}
