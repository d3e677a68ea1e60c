// src/utils/docx.rs

use std::{fmt::Display, fs::File, io::Read, path::Path};

use quick_xml::{Reader, events::Event};

use crate::error::AppError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads a `.docx` file and returns its non-empty paragraphs, trimmed, in order.
/// Line breaks inside a paragraph are kept as `\n`.
///
/// Blocking; async callers go through `spawn_blocking`.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>, AppError> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| read_error(path, e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| read_error(path, e))?
        .read_to_string(&mut xml)
        .map_err(|e| read_error(path, e))?;

    parse_document_xml(&xml).map_err(|reason| read_error(path, reason))
}

/// Joins the non-empty paragraphs with newlines.
pub fn read_text(path: &Path) -> Result<String, AppError> {
    Ok(read_paragraphs(path)?.join("\n"))
}

/// Collects the `w:t` runs of every `w:p` element.
fn parse_document_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn read_error(path: &Path, reason: impl Display) -> AppError {
    AppError::DocumentRead {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
