//! Fixture builders shared by the integration tests.
//!
//! Word documents and workbooks are assembled at runtime with
//! `zip::ZipWriter`, so no binary fixtures live in the repository.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Build a zip archive from `(name, content)` pairs.
pub fn zip_bytes(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in parts {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// `word/document.xml` wrapping the given body XML.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        W_NS, body
    )
}

/// `word/styles.xml` declaring the given `(styleId, name)` paragraph styles.
pub fn styles_xml(styles: &[(&str, &str)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="{}"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>"#,
        W_NS
    );
    for (id, name) in styles {
        xml.push_str(&format!(
            r#"<w:style w:type="paragraph" w:styleId="{}"><w:name w:val="{}"/><w:basedOn w:val="Normal"/></w:style>"#,
            id, name
        ));
    }
    xml.push_str("</w:styles>");
    xml
}

/// A paragraph with an optional style id.
pub fn p(text: &str, style: Option<&str>) -> String {
    let props = style
        .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s))
        .unwrap_or_default();
    format!(
        r#"<w:p>{}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        props, text
    )
}

/// A table with one paragraph per cell.
pub fn tbl(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr/>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row.iter() {
            xml.push_str(&format!("<w:tc>{}</w:tc>", p(cell, None)));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// A `.docx` with the given body and optional style declarations.
pub fn docx_bytes(body: &str, styles: Option<&[(&str, &str)]>) -> Vec<u8> {
    let document = document_xml(body);
    let styles = styles.map(styles_xml);
    let mut parts = vec![
        ("[Content_Types].xml", CONTENT_TYPES_DOCX),
        ("word/document.xml", document.as_str()),
    ];
    if let Some(ref styles) = styles {
        parts.push(("word/styles.xml", styles.as_str()));
    }
    zip_bytes(&parts)
}

/// Write a `.docx` into `dir` and return its path.
pub fn write_docx(dir: &Path, name: &str, body: &str, styles: Option<&[(&str, &str)]>) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, docx_bytes(body, styles)).unwrap();
    path
}

/// Write a minimal `.xlsx` with the given sheets of inline string cells.
pub fn write_xlsx(dir: &Path, name: &str, sheets: &[(&str, &[&[&str]])]) -> PathBuf {
    let mut workbook_sheets = String::new();
    let mut rels = String::new();
    let mut overrides = String::new();
    let mut sheet_parts = Vec::new();

    for (i, (sheet_name, rows)) in sheets.iter().enumerate() {
        let n = i + 1;
        workbook_sheets.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            sheet_name, n, n
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            n, n
        ));
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            n
        ));
        sheet_parts.push((format!("xl/worksheets/sheet{}.xml", n), sheet_xml(rows)));
    }

    let content_types = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{}</Types>"#,
        overrides
    );
    let workbook = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
        workbook_sheets
    );
    let workbook_rels = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        rels
    );

    let mut parts: Vec<(&str, &str)> = vec![
        ("[Content_Types].xml", content_types.as_str()),
        ("_rels/.rels", ROOT_RELS_XLSX),
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", workbook_rels.as_str()),
    ];
    for (name, xml) in &sheet_parts {
        parts.push((name.as_str(), xml.as_str()));
    }

    let path = dir.join(name);
    fs::write(&path, zip_bytes(&parts)).unwrap();
    path
}

fn sheet_xml(rows: &[&[&str]]) -> String {
    let mut data = String::new();
    for (r, row) in rows.iter().enumerate() {
        data.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            data.push_str(&format!(
                r#"<c r="{}{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                column_name(c),
                r + 1,
                value
            ));
        }
        data.push_str("</row>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        data
    )
}

fn column_name(index: usize) -> char {
    (b'A' + index as u8) as char
}

const CONTENT_TYPES_DOCX: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS_XLSX: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
