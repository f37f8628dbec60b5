//! Paragraph layout — wraps each input line into a left-aligned, full-width
//! cell and paginates the resulting rows.
//!
//! Wrapping breaks at the last space that fits; a run with no space wider than
//! the cell is broken between characters. Pure and synchronous: the exporter
//! runs it inside `spawn_blocking`.

use crate::export::font_metrics::{FontMetricTable, PageSetup};
use crate::export::ExportError;

const TAB_EXPANSION: &str = "    ";

/// One rendered row of text. `baseline_mm` is measured from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub baseline_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<LayoutPage>,
    /// One cell per input line, empty lines included.
    pub cell_count: usize,
}

impl DocumentLayout {
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

/// Lays out `text` as one paragraph cell per line.
///
/// Fails on the first character the font cannot encode, reporting its 1-based line.
pub fn layout_document(
    text: &str,
    setup: &PageSetup,
    metrics: &FontMetricTable,
) -> Result<DocumentLayout, ExportError> {
    let max_width = setup.text_width_mm();
    let baseline_offset = 0.5 * setup.line_height_mm + 0.3 * setup.font_size_mm();

    let mut pages = vec![LayoutPage::default()];
    let mut y = setup.margin_mm;
    let mut cell_count = 0usize;

    for (idx, raw_line) in text.split('\n').enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if let Some(character) = line.chars().find(|&c| !metrics.can_encode(c)) {
            return Err(ExportError::UnrepresentableCharacter {
                character,
                line: idx + 1,
            });
        }

        let line = line.replace('\t', TAB_EXPANSION);
        cell_count += 1;

        for row in wrap_line(&line, max_width, metrics, setup.font_size_pt) {
            if y + setup.line_height_mm > setup.page_break_y_mm() {
                pages.push(LayoutPage::default());
                y = setup.margin_mm;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: row,
                    x_mm: setup.text_x_mm(),
                    baseline_mm: y + baseline_offset,
                });
            }
            y += setup.line_height_mm;
        }
    }

    Ok(DocumentLayout { pages, cell_count })
}

/// Splits one line into rows no wider than `max_width_mm`.
///
/// An empty line still yields a single empty row.
pub fn wrap_line(
    line: &str,
    max_width_mm: f32,
    metrics: &FontMetricTable,
    font_size_pt: f32,
) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }

    let mut rows = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;
    let mut last_space: Option<usize> = None;
    let mut width = 0.0_f32;

    while i < chars.len() {
        let c = chars[i];
        if c == ' ' {
            last_space = Some(i);
        }
        width += metrics.char_width_mm(c, font_size_pt);

        if width > max_width_mm {
            match last_space {
                Some(sep) if sep > start => {
                    rows.push(chars[start..sep].iter().collect());
                    start = sep + 1;
                }
                _ => {
                    // Always emit at least one character per row.
                    let end = if i == start { i + 1 } else { i };
                    rows.push(chars[start..end].iter().collect());
                    start = end;
                }
            }
            i = start;
            last_space = None;
            width = 0.0;
            continue;
        }
        i += 1;
    }

    if start < chars.len() {
        rows.push(chars[start..].iter().collect());
    }
    rows
}
