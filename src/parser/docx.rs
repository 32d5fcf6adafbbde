//! Word document parser using zip and quick-xml.
//!
//! Only the direct children of `w:body` become body elements. Paragraph
//! text is the concatenation of its runs; tables are read row by row with
//! each cell's paragraphs joined by newlines. Nested tables and text boxes
//! are not part of the body sequence.

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::is_zip_bytes;
use crate::error::{Error, Result};
use crate::model::{Block, Document, Metadata, Paragraph, Table, TableRow};

use super::options::ParseOptions;
use super::properties::parse_core_properties;
use super::styles::StyleSheet;
use super::get_attr;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";
const CORE_PART: &str = "docProps/core.xml";

/// Word document parser.
///
/// All parts needed for extraction are read into memory when the parser
/// is created; [`DocxParser::parse`] does a single forward pass.
pub struct DocxParser {
    source: String,
    document_xml: String,
    styles_xml: Option<String>,
    core_xml: Option<String>,
    options: ParseOptions,
}

impl DocxParser {
    /// Open a `.docx` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a `.docx` file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Error::open(path, e))?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::load(&data, source, options)
    }

    /// Parse a `.docx` from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a `.docx` from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        Self::load(data, "<memory>".to_string(), options)
    }

    /// Parse a `.docx` from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a `.docx` from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    fn load(data: &[u8], source: String, options: ParseOptions) -> Result<Self> {
        if !is_zip_bytes(data) {
            return Err(Error::open(&source, "not a ZIP container (is this a .docx file?)"));
        }

        let mut archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| Error::open(&source, e))?;

        let document_xml = read_part(&mut archive, DOCUMENT_PART)
            .map_err(|e| Error::open(&source, e))?
            .ok_or_else(|| Error::open(&source, format!("missing {}", DOCUMENT_PART)))?;
        let styles_xml = read_part(&mut archive, STYLES_PART).map_err(|e| Error::open(&source, e))?;
        let core_xml = read_part(&mut archive, CORE_PART).map_err(|e| Error::open(&source, e))?;

        log::debug!(
            "Opened {} ({} bytes of body XML, styles: {}, core properties: {})",
            source,
            document_xml.len(),
            styles_xml.is_some(),
            core_xml.is_some()
        );

        Ok(Self {
            source,
            document_xml,
            styles_xml,
            core_xml,
            options,
        })
    }

    /// Name of the input, as used in error messages.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parse the document and return its body elements in order.
    pub fn parse(&self) -> Result<Document> {
        let styles = self.load_styles()?;
        let mut document = Document::new();
        document.metadata = self.load_metadata();
        document.blocks = self.walk_body(&styles)?;

        log::debug!(
            "Parsed {}: {} body elements",
            self.source,
            document.blocks.len()
        );
        Ok(document)
    }

    fn load_styles(&self) -> Result<StyleSheet> {
        if !self.options.resolve_style_names {
            return Ok(StyleSheet::new());
        }
        let Some(ref xml) = self.styles_xml else {
            return Ok(StyleSheet::new());
        };
        match StyleSheet::parse(xml) {
            Ok(sheet) => Ok(sheet),
            Err(e) if self.options.is_lenient() => {
                log::warn!("{}: ignoring unreadable style sheet: {}", self.source, e);
                Ok(StyleSheet::new())
            }
            Err(e) => Err(Error::open(&self.source, e)),
        }
    }

    fn load_metadata(&self) -> Metadata {
        let mut metadata = match (&self.core_xml, self.options.read_metadata) {
            (Some(xml), true) => parse_core_properties(xml).unwrap_or_else(|e| {
                log::warn!("{}: ignoring unreadable core properties: {}", self.source, e);
                Metadata::default()
            }),
            _ => Metadata::default(),
        };
        if self.source != "<memory>" {
            metadata.source = Some(self.source.clone());
        }
        metadata
    }

    fn walk_body(&self, styles: &StyleSheet) -> Result<Vec<Block>> {
        let mut reader = Reader::from_str(&self.document_xml);
        let mut walker = BodyWalker::new(styles);

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    let reason = format!(
                        "malformed {} at byte {}: {}",
                        DOCUMENT_PART,
                        reader.buffer_position(),
                        e
                    );
                    return self.fail_or_keep(reason, walker.blocks);
                }
            };

            match event {
                Event::Start(e) => {
                    walker.inline_element(&e);
                    let tag = walker.open(e.name().as_ref());
                    walker.stack.push(tag);
                }
                Event::Empty(e) => {
                    walker.inline_element(&e);
                    let tag = walker.open(e.name().as_ref());
                    walker.close(tag);
                }
                Event::End(_) => {
                    if let Some(tag) = walker.stack.pop() {
                        walker.close(tag);
                    }
                }
                Event::Text(t) => {
                    if walker.in_text() {
                        match t.unescape() {
                            Ok(text) => walker.push_text(&text),
                            Err(e) => {
                                let reason = format!(
                                    "bad text in {} at byte {}: {}",
                                    DOCUMENT_PART,
                                    reader.buffer_position(),
                                    e
                                );
                                return self.fail_or_keep(reason, walker.blocks);
                            }
                        }
                    }
                }
                Event::CData(t) => {
                    if walker.in_text() {
                        walker.push_text(&String::from_utf8_lossy(&t));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !walker.saw_body {
            if self.options.is_lenient() {
                log::warn!("{}: no w:body element", self.source);
            } else {
                return Err(Error::open(&self.source, format!("{} has no w:body", DOCUMENT_PART)));
            }
        }

        Ok(walker.blocks)
    }

    /// A fault in the body: fatal in strict mode, otherwise keep what was
    /// read before it.
    fn fail_or_keep(&self, reason: String, blocks: Vec<Block>) -> Result<Vec<Block>> {
        if self.options.is_lenient() {
            log::warn!(
                "{}: {}; keeping {} elements read so far",
                self.source,
                reason,
                blocks.len()
            );
            return Ok(blocks);
        }
        Err(Error::open(&self.source, reason))
    }
}

/// Read a whole archive entry as UTF-8, `None` when the entry is absent.
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> std::result::Result<Option<String>, String> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(format!("{}: {}", name, e)),
    };
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| format!("{}: {}", name, e))?;
    Ok(Some(content))
}

/// Role of an open element in the body walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Body,
    Table,
    Row,
    Cell,
    Paragraph,
    ParagraphProps,
    Run,
    Text,
    TextBox,
    Other,
}

#[derive(Default)]
struct ParagraphBuilder {
    text: String,
    style_id: Option<String>,
}

/// Event-driven state for one pass over `w:body`.
struct BodyWalker<'s> {
    styles: &'s StyleSheet,
    stack: Vec<Tag>,
    blocks: Vec<Block>,
    paragraph: Option<ParagraphBuilder>,
    table: Option<Table>,
    row: Option<TableRow>,
    cell: Option<Vec<String>>,
    textbox_depth: usize,
    saw_body: bool,
}

impl<'s> BodyWalker<'s> {
    fn new(styles: &'s StyleSheet) -> Self {
        Self {
            styles,
            stack: Vec::new(),
            blocks: Vec::new(),
            paragraph: None,
            table: None,
            row: None,
            cell: None,
            textbox_depth: 0,
            saw_body: false,
        }
    }

    fn parent(&self) -> Option<Tag> {
        self.stack.last().copied()
    }

    /// True while inside a body or cell paragraph, outside text boxes.
    fn collecting(&self) -> bool {
        self.paragraph.is_some() && self.textbox_depth == 0
    }

    fn in_text(&self) -> bool {
        self.parent() == Some(Tag::Text) && self.collecting()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(p) = self.paragraph.as_mut() {
            p.text.push_str(text);
        }
    }

    /// Classify an opening element and start any builder it implies.
    fn open(&mut self, name: &[u8]) -> Tag {
        match (name, self.parent()) {
            (b"w:body", _) => {
                self.saw_body = true;
                Tag::Body
            }
            (b"w:tbl", Some(Tag::Body)) => {
                self.table = Some(Table::new());
                Tag::Table
            }
            (b"w:tr", Some(Tag::Table)) => {
                self.row = Some(TableRow::default());
                Tag::Row
            }
            (b"w:tc", Some(Tag::Row)) => {
                self.cell = Some(Vec::new());
                Tag::Cell
            }
            (b"w:p", Some(Tag::Body | Tag::Cell)) => {
                self.paragraph = Some(ParagraphBuilder::default());
                Tag::Paragraph
            }
            (b"w:pPr", Some(Tag::Paragraph)) => Tag::ParagraphProps,
            (b"w:txbxContent", _) => {
                self.textbox_depth += 1;
                Tag::TextBox
            }
            (b"w:r", _) if self.collecting() => Tag::Run,
            (b"w:t", Some(Tag::Run)) if self.collecting() => Tag::Text,
            _ => Tag::Other,
        }
    }

    /// Finish whatever `tag` was building. The parent is `self.parent()`.
    fn close(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                let Some(builder) = self.paragraph.take() else {
                    return;
                };
                let paragraph = Paragraph {
                    text: builder.text,
                    style: self.styles.resolve(builder.style_id.as_deref()),
                };
                match self.parent() {
                    Some(Tag::Body) => self.blocks.push(Block::Paragraph(paragraph)),
                    Some(Tag::Cell) => {
                        if let Some(cell) = self.cell.as_mut() {
                            cell.push(paragraph.text);
                        }
                    }
                    _ => {}
                }
            }
            Tag::Cell => {
                if let (Some(parts), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.push_cell(parts.join("\n"));
                }
            }
            Tag::Row => {
                if let (Some(row), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.add_row(row);
                }
            }
            Tag::Table => {
                if let Some(table) = self.table.take() {
                    self.blocks.push(Block::Table(table));
                }
            }
            Tag::TextBox => self.textbox_depth = self.textbox_depth.saturating_sub(1),
            _ => {}
        }
    }

    /// Handle elements that carry content in their attributes or stand
    /// for a character: paragraph style, tabs and breaks.
    fn inline_element(&mut self, e: &BytesStart<'_>) {
        let name = e.name();
        let parent = self.parent();

        if name.as_ref() == b"w:pStyle" && parent == Some(Tag::ParagraphProps) {
            if let (Some(p), Some(id)) = (self.paragraph.as_mut(), get_attr(e, b"w:val")) {
                p.style_id = Some(id);
            }
            return;
        }

        if parent != Some(Tag::Run) || !self.collecting() {
            return;
        }
        match name.as_ref() {
            b"w:tab" | b"w:ptab" => self.push_text("\t"),
            b"w:cr" => self.push_text("\n"),
            b"w:noBreakHyphen" => self.push_text("-"),
            b"w:br" => {
                // Page and column breaks carry no text.
                let kind = get_attr(e, b"w:type");
                if matches!(kind.as_deref(), None | Some("textWrapping")) {
                    self.push_text("\n");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(body: &str) -> Vec<Block> {
        walk_with(body, &StyleSheet::new())
    }

    fn walk_with(body: &str, styles: &StyleSheet) -> Vec<Block> {
        let parser = DocxParser {
            source: "test.docx".into(),
            document_xml: wrap(body),
            styles_xml: None,
            core_xml: None,
            options: ParseOptions::default(),
        };
        parser.walk_body(styles).unwrap()
    }

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    fn para(block: &Block) -> &Paragraph {
        match block {
            Block::Paragraph(p) => p,
            Block::Table(_) => panic!("expected paragraph"),
        }
    }

    fn table(block: &Block) -> &Table {
        match block {
            Block::Table(t) => t,
            Block::Paragraph(_) => panic!("expected table"),
        }
    }

    #[test]
    fn test_runs_are_concatenated() {
        let blocks = walk(
            r#"<w:p><w:r><w:t>Hel</w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">lo </w:t></w:r><w:hyperlink r:id="rId1"><w:r><w:t>world</w:t></w:r></w:hyperlink></w:p>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(para(&blocks[0]).text, "Hello world");
        assert_eq!(para(&blocks[0]).style, None);
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let blocks = walk(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b&amp;c</w:t><w:br/><w:t>d</w:t><w:br w:type="page"/></w:r></w:p>"#,
        );
        assert_eq!(para(&blocks[0]).text, "a\tb&c\nd");
    }

    #[test]
    fn test_paragraph_style_resolution() {
        let mut styles = StyleSheet::new();
        styles.insert("2", "Heading 2");

        let blocks = walk_with(
            r#"<w:p><w:pPr><w:pStyle w:val="2"/></w:pPr><w:r><w:t>Known</w:t></w:r></w:p><w:p><w:pPr><w:pStyle w:val="Heading3"/></w:pPr><w:r><w:t>Raw</w:t></w:r></w:p>"#,
            &styles,
        );
        assert_eq!(para(&blocks[0]).style.as_deref(), Some("Heading 2"));
        assert_eq!(para(&blocks[1]).style.as_deref(), Some("Heading3"));
    }

    #[test]
    fn test_document_order_is_preserved() {
        let blocks = walk(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>x</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p/><w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        assert_eq!(blocks.len(), 4);
        assert_eq!(para(&blocks[0]).text, "before");
        assert!(blocks[1].is_table());
        assert_eq!(para(&blocks[2]).text, "");
        assert_eq!(para(&blocks[3]).text, "after");
    }

    #[test]
    fn test_table_cells() {
        let blocks = walk(
            r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid>
<w:tr><w:tc><w:p><w:r><w:t> A </w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>line1</w:t></w:r></w:p><w:p><w:r><w:t>line2</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:trPr/></w:tr>
<w:tr><w:tc><w:p/></w:tc></w:tr>
</w:tbl>"#,
        );
        let t = table(&blocks[0]);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.rows[0].cells, vec![" A ", "line1\nline2"]);
        assert!(t.rows[1].is_empty());
        assert_eq!(t.rows[2].cells, vec![""]);
    }

    #[test]
    fn test_nested_tables_and_text_boxes_are_skipped() {
        let blocks = walk(
            r#"<w:tbl><w:tr><w:tc><w:p><w:r><w:t>outer</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>main</w:t></w:r><w:r><w:drawing><wps:txbx><w:txbxContent><w:p><w:r><w:t>boxed</w:t></w:r></w:p></w:txbxContent></wps:txbx></w:drawing></w:r></w:p>"#,
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(table(&blocks[0]).rows[0].cells, vec!["outer"]);
        assert_eq!(para(&blocks[1]).text, "main");
    }

    #[test]
    fn test_malformed_body_strict_and_lenient() {
        let xml = wrap(r#"<w:p><w:r><w:t>kept</w:t></w:r></w:p><w:p><w:r><w:t>broken</w:r></w:p>"#);

        let strict = DocxParser {
            source: "bad.docx".into(),
            document_xml: xml,
            styles_xml: None,
            core_xml: None,
            options: ParseOptions::default(),
        };
        let err = strict.walk_body(&StyleSheet::new()).unwrap_err();
        assert!(err.is_open_error());

        let lenient = DocxParser {
            options: ParseOptions::new().lenient(),
            ..strict
        };
        let blocks = lenient.walk_body(&StyleSheet::new()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(para(&blocks[0]).text, "kept");
    }

    #[test]
    fn test_unknown_entity_strict_and_lenient() {
        let xml = wrap(r#"<w:p><w:r><w:t>kept</w:t></w:r></w:p><w:p><w:r><w:t>a&nbsp;b</w:t></w:r></w:p>"#);

        let strict = DocxParser {
            source: "entity.docx".into(),
            document_xml: xml,
            styles_xml: None,
            core_xml: None,
            options: ParseOptions::default(),
        };
        let err = strict.walk_body(&StyleSheet::new()).unwrap_err();
        assert!(matches!(err, Error::DocumentOpen(_)));

        let lenient = DocxParser {
            options: ParseOptions::new().lenient(),
            ..strict
        };
        let blocks = lenient.walk_body(&StyleSheet::new()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(para(&blocks[0]).text, "kept");
    }

    #[test]
    fn test_from_bytes_rejects_non_zip() {
        let result = DocxParser::from_bytes(b"plain text, not a document");
        assert!(matches!(result, Err(Error::DocumentOpen(_))));
    }
}
