//! Minimal PDF 1.4 document generation.
//!
//! The export engine emits the project narrative as paginated plain text,
//! not as the visual HTML layout. Three pieces cooperate here:
//!
//! - [`text`] turns a project into wrapped, paginated text lines
//! - [`object`] models and serializes the PDF object graph
//! - [`writer`] assembles the final byte buffer with exact xref offsets

pub mod object;
pub mod text;
pub mod writer;

pub use writer::build_pdf;
