use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::export::font_metrics::PageSetup;
use crate::export::layout::DocumentLayout;
use crate::export::ExportError;

const LAYER_NAME: &str = "Playbook";

/// Renders a laid-out document to PDF bytes using the builtin Helvetica font.
pub fn render_pdf(
    layout: &DocumentLayout,
    setup: &PageSetup,
    title: &str,
) -> Result<Vec<u8>, ExportError> {
    let width = Mm(setup.page_width_mm);
    let height = Mm(setup.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(e.to_string()))?;

    for (idx, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if idx == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            if line.text.is_empty() {
                continue;
            }
            // PDF user space grows upwards from the bottom edge.
            layer.use_text(
                line.text.as_str(),
                setup.font_size_pt,
                Mm(line.x_mm),
                Mm(setup.page_height_mm - line.baseline_mm),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Render(e.to_string()))
}
