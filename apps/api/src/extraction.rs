//! Resume text extraction for uploaded files.
//!
//! Supported: `.txt` (UTF-8, verbatim) and `.docx` (paragraph text followed by
//! table cell text, non-blank only, newline-joined). Matching is on the lowercased
//! filename suffix.

use docx_rs::{DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild, Table};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {filename}. Only .docx and .txt files are supported.")]
    Unsupported { filename: String },

    #[error("File {filename} is not valid UTF-8 text")]
    InvalidUtf8 { filename: String },

    #[error("Failed to read Word document {filename}: {reason}")]
    Docx { filename: String, reason: String },
}

/// The document kinds the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    WordDocument,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".docx") {
            Some(FileKind::WordDocument)
        } else if lower.ends_with(".txt") {
            Some(FileKind::PlainText)
        } else {
            None
        }
    }
}

/// Extracts plain text from an uploaded resume. Pure function of its inputs.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, ExtractError> {
    match FileKind::from_filename(filename) {
        Some(FileKind::PlainText) => String::from_utf8(bytes.to_vec()).map_err(|_| {
            ExtractError::InvalidUtf8 {
                filename: filename.to_string(),
            }
        }),
        Some(FileKind::WordDocument) => {
            let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx {
                filename: filename.to_string(),
                reason: e.to_string(),
            })?;
            Ok(docx_text(&docx))
        }
        None => Err(ExtractError::Unsupported {
            filename: filename.to_string(),
        }),
    }
}

/// Body paragraphs first, then every top-level table cell in row-major order.
fn docx_text(docx: &Docx) -> String {
    let mut lines = Vec::new();
    let mut tables = Vec::new();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                let text = paragraph_text(paragraph);
                if !text.trim().is_empty() {
                    lines.push(text);
                }
            }
            DocumentChild::Table(table) => tables.push(table),
            _ => {}
        }
    }

    for table in tables {
        table_cell_texts(table, &mut lines);
    }

    lines.join("\n")
}

fn table_cell_texts(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = cell;
            // Nested tables inside a cell are not descended into.
            let text = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    docx_rs::TableCellContent::Paragraph(paragraph) => {
                        Some(paragraph_text(paragraph))
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            if !text.trim().is_empty() {
                lines.push(text);
            }
        }
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut buffer = String::new();
    for child in &paragraph.children {
        paragraph_child_text(child, &mut buffer);
    }
    buffer
}

fn paragraph_child_text(child: &ParagraphChild, buffer: &mut String) {
    match child {
        ParagraphChild::Run(run) => run_text(run, buffer),
        ParagraphChild::Hyperlink(link) => {
            for link_child in &link.children {
                paragraph_child_text(link_child, buffer);
            }
        }
        ParagraphChild::Insert(insert) => {
            for insert_child in &insert.children {
                if let docx_rs::InsertChild::Run(run) = insert_child {
                    run_text(run, buffer);
                }
            }
        }
        _ => {}
    }
}

fn run_text(run: &Run, buffer: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => buffer.push_str(&text.text),
            RunChild::Tab(_) => buffer.push('\t'),
            RunChild::Break(_) => buffer.push('\n'),
            _ => {}
        }
    }
}
