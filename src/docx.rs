use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::block::{Block, Run, RunStyle};
use crate::config::Config;
use crate::inline;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Paragraph spacing overrides per heading level, in points (before, after).
const HEADING_SPACING: [(u32, u32); 6] = [(0, 12), (12, 10), (10, 8), (8, 6), (6, 4), (4, 4)];

/// Heading font sizes in points, level 1 first.
const HEADING_SIZES: [u32; 6] = [16, 13, 12, 11, 11, 11];

/// Convert blocks to the WordprocessingML document part
pub fn blocks_to_document_xml(blocks: &[Block], config: &Config) -> String {
    let mut body = String::new();
    for block in blocks {
        emit_block(block, config, &mut body);
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

/// Assemble the complete .docx package in memory.
pub fn write_package(blocks: &[Block], config: &Config) -> Result<Vec<u8>, RenderError> {
    let document = blocks_to_document_xml(blocks, config);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", options)?;
    zip.write_all(WORD_RELS_XML.as_bytes())?;

    zip.start_file("word/styles.xml", options)?;
    zip.write_all(styles_xml(config).as_bytes())?;

    zip.start_file("word/numbering.xml", options)?;
    zip.write_all(NUMBERING_XML.as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Heading { level, text } => emit_heading(*level, text, out),
        Block::Bullet { text } => emit_bullet(text, out),
        Block::CodeBlock { content, .. } => emit_code_block(content, out),
        Block::Rule => emit_rule(out),
        Block::Blank => out.push_str("<w:p/>"),
        Block::Text { text } => emit_text(text, config, out),
    }
}

fn emit_heading(level: u8, text: &str, out: &mut String) {
    let (before, after) = HEADING_SPACING[usize::from(level - 1)];
    out.push_str("<w:p><w:pPr>");
    out.push_str(&format!(r#"<w:pStyle w:val="Heading{level}"/>"#));
    push_spacing(before, after, out);
    out.push_str("</w:pPr>");
    push_text_run(text, out);
    out.push_str("</w:p>");
}

fn emit_bullet(text: &str, out: &mut String) {
    out.push_str(r#"<w:p><w:pPr><w:pStyle w:val="ListBullet"/>"#);
    push_spacing(0, 6, out);
    out.push_str("</w:pPr>");
    push_text_run(text, out);
    out.push_str("</w:p>");
}

fn emit_code_block(content: &str, out: &mut String) {
    out.push_str(r#"<w:p><w:pPr><w:pStyle w:val="Code"/>"#);
    push_spacing(6, 6, out);
    // 0.25" left indent (360 twips).
    out.push_str(r#"<w:ind w:left="360"/>"#);
    out.push_str("</w:pPr>");
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:r><w:br/></w:r>");
        }
        push_text_run(line, out);
    }
    out.push_str("</w:p>");
}

fn emit_rule(out: &mut String) {
    // An empty paragraph carrying a 0.5pt bottom border (w:sz is in
    // eighths of a point).
    out.push_str("<w:p><w:pPr>");
    push_spacing(6, 6, out);
    out.push_str(
        r#"<w:pBdr><w:bottom w:val="single" w:sz="4" w:space="1" w:color="000000"/></w:pBdr>"#,
    );
    out.push_str("</w:pPr></w:p>");
}

fn emit_text(text: &str, config: &Config, out: &mut String) {
    out.push_str("<w:p><w:pPr>");
    push_spacing(0, 6, out);
    out.push_str("</w:pPr>");
    for run in inline::resolve(text) {
        push_styled_run(&run, config, out);
    }
    out.push_str("</w:p>");
}

fn push_styled_run(run: &Run, config: &Config, out: &mut String) {
    out.push_str("<w:r>");
    match run.style {
        Some(RunStyle::Bold) => out.push_str("<w:rPr><w:b/></w:rPr>"),
        Some(RunStyle::Italic) => out.push_str("<w:rPr><w:i/></w:rPr>"),
        Some(RunStyle::Code) => out.push_str(&format!(
            r#"<w:rPr><w:rFonts w:ascii="{family}" w:hAnsi="{family}"/><w:sz w:val="{size}"/></w:rPr>"#,
            family = xml_escape(&config.code.family),
            size = config.code.size * 2,
        )),
        None => {}
    }
    out.push_str(r#"<w:t xml:space="preserve">"#);
    out.push_str(&xml_escape(&run.text));
    out.push_str("</w:t></w:r>");
}

fn push_text_run(text: &str, out: &mut String) {
    out.push_str(r#"<w:r><w:t xml:space="preserve">"#);
    out.push_str(&xml_escape(text));
    out.push_str("</w:t></w:r>");
}

// w:spacing takes twentieths of a point.
fn push_spacing(before_pt: u32, after_pt: u32, out: &mut String) {
    out.push_str(&format!(
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        before_pt * 20,
        after_pt * 20,
    ));
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The package's style part: default body font plus the heading, code and
/// bullet paragraph styles the document part refers to. Registering them
/// all statically means there is no duplicate-registration case at runtime.
fn styles_xml(config: &Config) -> String {
    let family = xml_escape(&config.font.family);
    let size = config.font.size * 2;
    let code_family = xml_escape(&config.code.family);
    let code_size = config.code.size * 2;

    let mut styles = String::new();
    styles.push_str(&format!(
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/><w:rPr><w:rFonts w:ascii="{family}" w:hAnsi="{family}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:style>"#
    ));
    for level in 1..=6u8 {
        let heading_size = HEADING_SIZES[usize::from(level - 1)] * 2;
        styles.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:pPr><w:keepNext/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="{heading_size}"/><w:szCs w:val="{heading_size}"/></w:rPr></w:style>"#,
            outline = level - 1,
        ));
    }
    styles.push_str(&format!(
        r#"<w:style w:type="paragraph" w:styleId="Code"><w:name w:val="Code"/><w:basedOn w:val="Normal"/><w:rPr><w:rFonts w:ascii="{code_family}" w:hAnsi="{code_family}"/><w:sz w:val="{code_size}"/><w:szCs w:val="{code_size}"/></w:rPr></w:style>"#
    ));
    styles.push_str(
        r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:style>"#,
    );

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">{styles}</w:styles>"#
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const WORD_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

/// One bullet numbering definition backing the ListBullet style
/// (&#61623; is the Symbol-font bullet glyph).
const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="&#61623;"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr><w:rPr><w:rFonts w:ascii="Symbol" w:hAnsi="Symbol" w:hint="default"/></w:rPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;
