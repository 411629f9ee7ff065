use crate::core::PdfConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A single line of text at an absolute page position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub weight: FontWeight,
    pub size: f32,
}

/// Top-down line layout with a moving cursor.
///
/// There is no page break handling. Once the cursor passes the bottom margin
/// lines keep getting placed at whatever `y` it reaches, including negative
/// values outside the media box.
pub struct PdfBuilder {
    lines: Vec<TextLine>,
    config: PdfConfig,
    cursor: f32,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    pub fn with_config(config: PdfConfig) -> Self {
        PdfBuilder {
            lines: Vec::new(),
            cursor: config.top,
            config,
        }
    }

    pub fn config(&self) -> &PdfConfig {
        &self.config
    }

    pub fn add_title(&mut self, text: &str) -> &mut Self {
        let size = self.config.header_font_size;
        self.push(text, FontWeight::Bold, size)
    }

    pub fn add_line(&mut self, text: &str) -> &mut Self {
        let size = self.config.body_font_size;
        self.push(text, FontWeight::Regular, size)
    }

    /// Moves the cursor down without drawing anything.
    pub fn add_gap(&mut self, gap: f32) -> &mut Self {
        self.cursor -= gap;
        self
    }

    fn push(&mut self, text: &str, weight: FontWeight, size: f32) -> &mut Self {
        self.lines.push(TextLine {
            text: text.to_string(),
            x: self.config.left,
            y: self.cursor,
            weight,
            size,
        });
        self.cursor -= self.config.line_spacing;
        self
    }

    pub fn build(&self) -> Vec<TextLine> {
        self.lines.clone()
    }
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}
