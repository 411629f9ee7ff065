pub mod builder;
pub mod generator;

pub use builder::{FontWeight, PdfBuilder, TextLine};
pub use generator::PdfGenerator;
