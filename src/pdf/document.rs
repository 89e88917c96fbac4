//! PDF document wrapper for PDFium

use crate::error::{Error, Result};
use crate::pdf::PageSource;
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::Path;

/// Bind to PDFium (new instance each time - PDFium is not thread-safe)
pub(crate) fn bind_pdfium() -> Result<Pdfium> {
    // Try to bind to a bundled library or fall back to the system library
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// One open PDF document.
///
/// The handle borrows the PDFium instance that loaded it and is dropped when
/// its scope ends, which closes the underlying document. Page text is
/// extracted on demand and never cached.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumDocument<'a> {
    /// Open a PDF from a file path
    pub fn load<P: AsRef<Path>>(pdfium: &'a Pdfium, path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::DocumentNotFound {
                path: path.display().to_string(),
            });
        }

        let mut header = [0u8; 4];
        let mut file = std::fs::File::open(path)?;
        if file.read_exact(&mut header).is_err() || &header != b"%PDF" {
            return Err(Error::InvalidDocument {
                reason: "Not a valid PDF file".to_string(),
            });
        }
        drop(file);

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Pdfium {
                reason: format!("{}", e),
            })?;

        Ok(Self { document })
    }
}

impl PageSource for PdfiumDocument<'_> {
    fn page_count(&self) -> u32 {
        self.document.pages().len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let total = self.page_count();
        if page < 1 || page > total {
            return Err(Error::PageOutOfBounds { page, total });
        }

        let pages = self.document.pages();
        let pdf_page = pages.get((page - 1) as u16).map_err(|e| Error::Pdfium {
            reason: format!("Failed to get page {}: {}", page, e),
        })?;

        extract_reading_order_text(&pdf_page)
    }
}

// Vertical variation tolerated within a single line, in points
const LINE_TOLERANCE: f32 = 5.0;

// Horizontal gap treated as a word boundary, in points
const WORD_GAP: f32 = 10.0;

/// Extract a page's text in reading order.
///
/// PDFium reports glyphs in content-stream order, which need not match the
/// visual order. Glyphs are re-sorted by position: top to bottom, grouped
/// into lines by Y proximity, left to right within each line.
fn extract_reading_order_text(page: &PdfPage) -> Result<String> {
    let text_obj = match page.text() {
        Ok(t) => t,
        Err(_) => return Ok(String::new()),
    };

    let mut glyphs: Vec<(char, f32, f32)> = Vec::new();

    for segment in text_obj.segments().iter() {
        if let Ok(chars) = segment.chars() {
            for char_result in chars.iter() {
                if let Some(c) = char_result.unicode_char() {
                    if let Ok(bounds) = char_result.loose_bounds() {
                        glyphs.push((c, bounds.left().value, bounds.top().value));
                    }
                }
            }
        }
    }

    if glyphs.is_empty() {
        return Ok(String::new());
    }

    // Y descending (top to bottom in PDF coordinates), then X ascending
    glyphs.sort_by(|a, b| {
        b.2.partial_cmp(&a.2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    });

    let lines = group_into_lines(glyphs);

    let mut result = String::new();
    for line in lines {
        render_line(&mut result, line);
        result.push('\n');
    }

    Ok(result.trim_end().to_string())
}

/// Group position-sorted glyphs into lines by Y proximity
fn group_into_lines(glyphs: Vec<(char, f32, f32)>) -> Vec<Vec<(char, f32)>> {
    let mut lines: Vec<Vec<(char, f32)>> = Vec::new();
    let mut current_line: Vec<(char, f32)> = Vec::new();
    let mut current_y: Option<f32> = None;

    for (c, x, y) in glyphs {
        match current_y {
            Some(cur_y) if (cur_y - y).abs() <= LINE_TOLERANCE => {
                current_line.push((c, x));
            }
            _ => {
                if !current_line.is_empty() {
                    lines.push(current_line);
                }
                current_line = vec![(c, x)];
                current_y = Some(y);
            }
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Append one line of glyphs to `result`, inserting spaces at word gaps
fn render_line(result: &mut String, mut line: Vec<(char, f32)>) {
    line.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut prev_x: Option<f32> = None;
    for (c, x) in line {
        if let Some(px) = prev_x {
            if x - px > WORD_GAP && c != ' ' {
                result.push(' ');
            }
        }
        result.push(c);
        prev_x = Some(x);
    }
}
