use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use std::path::{Path, PathBuf};
use tempfile::TempPath;

use super::builder::{FontWeight, PdfBuilder, TextLine};
use crate::core::{DocumentResult, PdfConfig};
use crate::models::{iso_timestamp, InvoiceRequest};

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Renders invoice requests into single-file PDFs in a scratch directory.
pub struct PdfGenerator {
    config: PdfConfig,
    temp_dir: PathBuf,
}

impl PdfGenerator {
    pub fn new(config: PdfConfig, temp_dir: impl Into<PathBuf>) -> Self {
        PdfGenerator {
            config,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn layout(
        &self,
        invoice_id: &str,
        request: &InvoiceRequest,
        generated_at: &DateTime<Utc>,
    ) -> Vec<TextLine> {
        let mut builder = PdfBuilder::with_config(self.config.clone());
        builder
            .add_title(&format!("Invoice: {}", invoice_id))
            .add_line(&format!("Quote ID: {}", request.quote_id))
            .add_line(&format!("Customer: {}", request.customer_name));

        for item in &request.items {
            builder.add_line(&item.line());
        }

        let gap = builder.config().footer_gap;
        builder
            .add_gap(gap)
            .add_line(&format!("Generated: {}", iso_timestamp(generated_at)));

        builder.build()
    }

    /// Writes `{temp_dir}/{invoice_id}.pdf` and hands back its path.
    ///
    /// The file is removed when the returned `TempPath` is dropped. Creation is
    /// exclusive, so a leftover file with the same name fails the render.
    #[tracing::instrument(skip(self, request), fields(items = request.items.len()))]
    pub fn render(&self, invoice_id: &str, request: &InvoiceRequest) -> DocumentResult<TempPath> {
        let scratch = tempfile::Builder::new()
            .prefix(invoice_id)
            .suffix(".pdf")
            .rand_bytes(0)
            .tempfile_in(&self.temp_dir)?
            .into_temp_path();

        let lines = self.layout(invoice_id, request, &Utc::now());
        self.write_pdf(&lines, &format!("Invoice: {}", invoice_id), &scratch)?;

        tracing::debug!(path = %scratch.display(), lines = lines.len(), "PDF written");
        Ok(scratch)
    }

    pub fn write_pdf(&self, lines: &[TextLine], title: &str, path: &Path) -> DocumentResult<()> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.config.font_family.clone(),
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.config.bold_font_family.clone(),
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let content = Content {
            operations: text_operations(lines),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Real(self.config.page_width), Object::Real(self.config.page_height)],
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(win_ansi(title)),
            "Producer" => Object::string_literal("invoice-generator"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        doc.save(path)?;
        Ok(())
    }
}

fn text_operations(lines: &[TextLine]) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(lines.len() * 5);
    for line in lines {
        let font = match line.weight {
            FontWeight::Regular => REGULAR_FONT,
            FontWeight::Bold => BOLD_FONT,
        };
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec![font.into(), Object::Real(line.size)]));
        ops.push(Operation::new(
            "Td",
            vec![Object::Real(line.x), Object::Real(line.y)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(&line.text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Standard Type1 fonts only cover a single-byte encoding; anything beyond
/// Latin-1 becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
        .collect()
}
