pub mod document;
pub mod invoice;

pub use document::*;
pub use invoice::*;
