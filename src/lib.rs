mod block;
mod config;
mod docx;
mod inline;
mod parser;

pub use block::{Block, Run, RunStyle};
pub use config::Config;
pub use docx::RenderError;

/// Parse markdown text into a vector of blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown)
}

/// Split one plain-text block into styled runs.
pub fn resolve_runs(text: &str) -> Vec<Run> {
    inline::resolve(text)
}

/// Convert markdown to the WordprocessingML document part.
pub fn markdown_to_document_xml(markdown: &str, config: &Config) -> String {
    let blocks = parse(markdown);
    docx::blocks_to_document_xml(&blocks, config)
}

/// Convert markdown to .docx bytes.
pub fn markdown_to_docx(markdown: &str, config: &Config) -> Result<Vec<u8>, RenderError> {
    let blocks = parse(markdown);
    docx::write_package(&blocks, config)
}
