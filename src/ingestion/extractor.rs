//! Format-dispatching text extraction
//!
//! Each supported format maps to one extraction routine behind a single
//! `extract` entry point. Extraction is format-aware but chunk-size
//! agnostic: the output is a single plain-text string for the chunker.

use calamine::Reader;

use crate::error::{Error, Result};
use crate::types::DocumentFormat;

/// Extract plain text from raw document bytes
///
/// Fails with `Error::Extraction` when the content is corrupt, encrypted,
/// undecodable, or contains no extractable text.
pub fn extract(format: DocumentFormat, data: &[u8]) -> Result<String> {
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(data)?,
        DocumentFormat::Docx => extract_docx(data)?,
        DocumentFormat::Txt => extract_text(data)?,
        DocumentFormat::Html => extract_html(data)?,
        DocumentFormat::Csv => extract_csv(data)?,
        DocumentFormat::Xlsx => extract_xlsx(data)?,
    };

    if text.trim().is_empty() {
        return Err(Error::extraction(format!(
            "{} document contains no extractable text",
            format.display_name()
        )));
    }

    Ok(text)
}

/// Extract PDF text page by page, labelling each page
fn extract_pdf(data: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| Error::extraction(format!("invalid PDF: {}", e)))?;
    if doc.is_encrypted() {
        return Err(Error::extraction("PDF is encrypted"));
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| Error::extraction(format!("PDF text extraction failed: {}", e)))?;

    let mut text = String::new();
    for (i, page) in pages.iter().enumerate() {
        let page = page.trim();
        if page.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&format!("[Page {}]\n{}", i + 1, page));
    }

    Ok(text)
}

/// Extract DOCX paragraph text in document order
fn extract_docx(data: &[u8]) -> Result<String> {
    let doc = docx_rs::read_docx(data)
        .map_err(|e| Error::extraction(format!("invalid DOCX: {}", e)))?;

    let mut text = String::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            line.push_str(&t.text);
                        }
                    }
                }
            }
            text.push_str(&line);
            text.push('\n');
        }
    }

    Ok(text)
}

/// Decode plain text, rejecting invalid UTF-8 outright
fn extract_text(data: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::extraction(format!("text file is not valid UTF-8: {}", e)))?;
    Ok(text.to_string())
}

/// Extract visible HTML text, skipping script/style subtrees
fn extract_html(data: &[u8]) -> Result<String> {
    let raw = String::from_utf8_lossy(data);
    let document = scraper::Html::parse_document(&raw);

    let mut parts = Vec::new();
    collect_visible_text(document.tree.root(), &mut parts);

    Ok(parts.join(" "))
}

/// Walk the DOM collecting text nodes outside non-visible elements
fn collect_visible_text(
    node: ego_tree::NodeRef<'_, scraper::Node>,
    parts: &mut Vec<String>,
) {
    match node.value() {
        scraper::Node::Element(element) => {
            if matches!(element.name(), "script" | "style" | "head" | "noscript" | "template") {
                return;
            }
            for child in node.children() {
                collect_visible_text(child, parts);
            }
        }
        scraper::Node::Text(text) => {
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !collapsed.is_empty() {
                parts.push(collapsed);
            }
        }
        _ => {
            for child in node.children() {
                collect_visible_text(child, parts);
            }
        }
    }
}

/// Serialize CSV rows in order, sniffing the delimiter from the first line
fn extract_csv(data: &[u8]) -> Result<String> {
    let raw = decode_csv_bytes(data);
    let delimiter = sniff_delimiter(&raw);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut content = String::new();
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| Error::extraction(format!("malformed CSV: {}", e)))?;
        content.push_str(&record.iter().collect::<Vec<_>>().join(" | "));
        content.push('\n');
        rows += 1;
    }

    if rows == 0 {
        return Err(Error::extraction("CSV contains no records"));
    }

    Ok(content)
}

/// Decode CSV bytes as UTF-8, falling back to Latin-1
fn decode_csv_bytes(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => data.iter().map(|&b| b as char).collect(),
    }
}

/// Pick the candidate delimiter that occurs most often in the first line
///
/// Falls back to `;` when no candidate appears at all, matching common
/// European exports.
fn sniff_delimiter(sample: &str) -> u8 {
    let first_line = sample.lines().next().unwrap_or("");
    let candidates = [b',', b';', b'\t', b'|'];

    candidates
        .into_iter()
        .map(|delimiter| {
            (
                delimiter,
                first_line.bytes().filter(|&b| b == delimiter).count(),
            )
        })
        .filter(|&(_, count)| count > 0)
        .max_by_key(|&(_, count)| count)
        .map(|(delimiter, _)| delimiter)
        .unwrap_or(b';')
}

/// Serialize every sheet of a workbook row by row
fn extract_xlsx(data: &[u8]) -> Result<String> {
    let cursor = std::io::Cursor::new(data);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::extraction(format!("unreadable workbook: {}", e)))?;

    let mut content = String::new();
    for sheet_name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| Error::extraction(format!("unreadable sheet '{}': {}", sheet_name, e)))?;

        let mut sheet_content = format!("Sheet: {}\n", sheet_name);
        for row in range.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    calamine::Data::Empty => String::new(),
                    calamine::Data::String(s) => s.clone(),
                    calamine::Data::Float(f) => f.to_string(),
                    calamine::Data::Int(i) => i.to_string(),
                    calamine::Data::Bool(b) => b.to_string(),
                    calamine::Data::DateTime(dt) => dt.to_string(),
                    _ => String::new(),
                })
                .collect();

            if cells.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            sheet_content.push_str(&cells.join(" | "));
            sheet_content.push('\n');
        }

        content.push_str(&sheet_content);
        content.push('\n');
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_decodes_directly() {
        let text = extract(DocumentFormat::Txt, "hello\nworld".as_bytes()).unwrap();
        assert_eq!(text, "hello\nworld");
    }

    #[test]
    fn invalid_utf8_text_fails_explicitly() {
        let err = extract(DocumentFormat::Txt, &[0x68, 0x69, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn whitespace_only_content_is_an_extraction_error() {
        let err = extract(DocumentFormat::Txt, b"  \n\t  ").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn html_strips_markup_and_scripts() {
        let html = br#"<html>
            <head><title>ignored</title><style>p { color: red; }</style></head>
            <body>
                <h1>Heading</h1>
                <script>var hidden = "secret";</script>
                <p>Visible   paragraph.</p>
            </body>
        </html>"#;

        let text = extract(DocumentFormat::Html, html).unwrap();
        assert_eq!(text, "Heading Visible paragraph.");
        assert!(!text.contains("secret"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn csv_rows_are_serialized_in_order() {
        let csv = b"name,age\nalice,30\nbob,25\n";
        let text = extract(DocumentFormat::Csv, csv).unwrap();
        assert_eq!(text, "name | age\nalice | 30\nbob | 25\n");
    }

    #[test]
    fn semicolon_delimiter_is_sniffed() {
        let csv = b"name;age;city\nalice;30;lima\n";
        let text = extract(DocumentFormat::Csv, csv).unwrap();
        assert!(text.starts_with("name | age | city\n"));
    }

    #[test]
    fn delimiterless_single_column_csv_still_parses() {
        let csv = b"alpha\nbeta\ngamma\n";
        let text = extract(DocumentFormat::Csv, csv).unwrap();
        assert_eq!(text, "alpha\nbeta\ngamma\n");
    }

    #[test]
    fn latin1_csv_is_decoded_via_fallback() {
        // "café,1\n" with 0xE9 (Latin-1 é), invalid as UTF-8
        let csv = [0x63, 0x61, 0x66, 0xE9, 0x2C, 0x31, 0x0A];
        let text = extract(DocumentFormat::Csv, &csv).unwrap();
        assert_eq!(text, "café | 1\n");
    }

    #[test]
    fn corrupt_pdf_is_an_extraction_error() {
        let err = extract(DocumentFormat::Pdf, b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn corrupt_workbook_is_an_extraction_error() {
        let err = extract(DocumentFormat::Xlsx, b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn sniffer_prefers_the_most_frequent_candidate() {
        assert_eq!(sniff_delimiter("a,b,c;d"), b',');
        assert_eq!(sniff_delimiter("a;b;c,d"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("no delimiters here"), b';');
    }
}
