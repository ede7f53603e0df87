use scraper::{ElementRef, Html};

/// One structural node of a problem statement, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph { text: String, markup: String },
    ListItem { text: String, markup: String },
    /// Preformatted text, verbatim.
    Preformatted(String),
}

impl Block {
    pub fn heading_text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. }
            | Block::Paragraph { text, .. }
            | Block::ListItem { text, .. }
            | Block::Preformatted(text) => text.as_str(),
        }
    }
}

const SKIPPED: &[&str] = &["head", "script", "style", "noscript", "template", "svg", "nav", "footer"];

/// Parse an HTML document and flatten it into an ordered block list.
pub fn flatten_document(html: &str) -> Vec<Block> {
    let doc = Html::parse_document(html);
    let mut blocks = Vec::new();
    walk(doc.root_element(), &mut blocks);
    blocks
}

/// Same as [`flatten_document`] for a fragment (e.g. a JSON-embedded body).
pub fn flatten_fragment(html: &str) -> Vec<Block> {
    let doc = Html::parse_fragment(html);
    let mut blocks = Vec::new();
    walk(doc.root_element(), &mut blocks);
    blocks
}

fn walk(element: ElementRef, blocks: &mut Vec<Block>) {
    for child in element.children().filter_map(ElementRef::wrap) {
        let name = child.value().name();
        if SKIPPED.contains(&name) {
            continue;
        }
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name.as_bytes()[1] - b'0';
                blocks.push(Block::Heading {
                    level,
                    text: collapse_whitespace(&text_of(child)),
                });
            }
            "p" => blocks.push(Block::Paragraph {
                text: collapse_whitespace(&text_of(child)),
                markup: child.inner_html(),
            }),
            "li" => blocks.push(Block::ListItem {
                text: collapse_whitespace(&text_of(child)),
                markup: child.inner_html(),
            }),
            "pre" => blocks.push(Block::Preformatted(text_of(child))),
            _ => walk(child, blocks),
        }
    }
}

fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
