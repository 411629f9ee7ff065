/// A4 in PDF points (1/72 inch).
pub const A4: (f32, f32) = (595.2756, 841.8898);

/// Fixed layout of the generated document.
///
/// Positions are absolute page coordinates with the origin at the bottom left,
/// so the cursor moves down by decreasing `y`.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub font_family: String,
    pub bold_font_family: String,
    pub header_font_size: f32,
    pub body_font_size: f32,
    pub left: f32,
    pub top: f32,
    pub line_spacing: f32,
    pub footer_gap: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            page_width: A4.0,
            page_height: A4.1,
            font_family: "Helvetica".to_string(),
            bold_font_family: "Helvetica-Bold".to_string(),
            header_font_size: 16.0,
            body_font_size: 12.0,
            left: 50.0,
            top: 800.0,
            line_spacing: 20.0,
            footer_gap: 10.0,
        }
    }
}
