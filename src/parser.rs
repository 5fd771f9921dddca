use crate::block::Block;

/// Code fence state carried across the line scan. Content accumulated by an
/// `Open` fence only becomes a block when the closing marker arrives.
enum Fence {
    Closed,
    Open {
        language: Option<String>,
        content: Vec<String>,
    },
}

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut fence = Fence::Closed;

    // split('\n') rather than lines(): a trailing newline carries a final
    // empty line, which classifies as Blank.
    for line in markdown.split('\n') {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            fence = match std::mem::replace(&mut fence, Fence::Closed) {
                Fence::Closed => {
                    let tag = trimmed[3..].trim();
                    Fence::Open {
                        language: (!tag.is_empty()).then(|| tag.to_string()),
                        content: Vec::new(),
                    }
                }
                Fence::Open { language, content } => {
                    // Empty code blocks are dropped.
                    if !content.is_empty() {
                        blocks.push(Block::CodeBlock {
                            language,
                            content: content.join("\n"),
                        });
                    }
                    Fence::Closed
                }
            };
            continue;
        }

        if let Fence::Open { content, .. } = &mut fence {
            content.push(line.to_string());
            continue;
        }

        blocks.push(classify_line(line, trimmed));
    }

    // A fence still open here never produced its CodeBlock; the accumulated
    // content is discarded with the fence state.
    blocks
}

/// Heading markers, longest first so a level-6 line never matches a shorter
/// prefix. The trailing space is part of the marker.
const HEADING_MARKERS: [(&str, u8); 6] = [
    ("###### ", 6),
    ("##### ", 5),
    ("#### ", 4),
    ("### ", 3),
    ("## ", 2),
    ("# ", 1),
];

fn classify_line(line: &str, trimmed: &str) -> Block {
    // Headings match against the raw line; an indented hash run is plain text.
    for (marker, level) in HEADING_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return Block::Heading {
                level,
                text: rest.trim().to_string(),
            };
        }
    }

    if trimmed == "---" || trimmed == "***" {
        return Block::Rule;
    }

    if let Some(rest) = trimmed.strip_prefix("- ") {
        return Block::Bullet {
            text: rest.trim().to_string(),
        };
    }

    if trimmed.is_empty() {
        return Block::Blank;
    }

    Block::Text {
        text: trimmed.to_string(),
    }
}
