// Exporter operations are async for caller composition but contain no
// internal await points
#![allow(clippy::unused_async)]

//! # folio_export
//!
//! Static export engine for portfolio case studies.
//!
//! Takes an in-memory [`Project`] (metadata, ordered layout blocks,
//! embedded assets) and serializes it into three portable artifacts:
//!
//! - a standalone HTML document with inline styles and embedded assets
//! - a ZIP package (`index.html`, `project.json`, `assets/*`) written as
//!   a store-method PKZIP archive, including the CRC-32 engine, entirely
//!   by hand
//! - a minimal PDF 1.4 document with the narrative as paginated text,
//!   object graph and xref table assembled by hand
//!
//! Deliberate simplicity tradeoffs: ZIP entries are stored uncompressed
//! (no DEFLATE), and the PDF uses the standard Helvetica face with no
//! font embedding. Both artifacts open in any standard tool.
//!
//! ## Quick Start
//!
//! ```ignore
//! use folio_export::{Exporter, Project};
//!
//! # async fn example() -> folio_export::Result<()> {
//! let project: Project = serde_json::from_str(include_str!("project.json"))?;
//! let exporter = Exporter::new(project);
//!
//! let html = exporter.export_as_html().await?;
//! let zip = exporter.export_as_zip().await?;
//! let pdf = exporter.export_as_pdf().await?;
//! std::fs::write(&zip.filename, &zip.bytes)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Data model
pub mod blocks;
pub mod project;

// Export pipeline, leaf-first
pub mod crc32;
pub mod html;
pub mod manifest;
pub mod normalize;
pub mod packager;
pub mod pdf;
pub mod zip;

// Orchestration
pub mod export;

// Re-exports
pub use blocks::{BlockContent, BlockSettings, LayoutBlock};
pub use error::{Error, Result};
pub use export::{ExportFile, Exporter};
pub use project::{Asset, Link, Metric, Project};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    /// Sanitize one path component: lowercase, runs of characters outside
    /// `[a-z0-9._-]` collapsed to a single `-`, leading/trailing `-`
    /// trimmed. May return an empty string; callers supply fallbacks.
    pub fn sanitize_component(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut pending_dash = false;
        for c in s.chars().flat_map(|c| c.to_lowercase()) {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-') {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(c);
            } else {
                pending_dash = true;
            }
        }
        out.trim_matches('-').to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_sanitize_passthrough() {
            assert_eq!(sanitize_component("photo_01.final"), "photo_01.final");
        }

        #[test]
        fn test_sanitize_collapses_runs() {
            assert_eq!(sanitize_component("My  Great  Shot"), "my-great-shot");
            assert_eq!(sanitize_component("a/(b)/c"), "a-b-c");
        }

        #[test]
        fn test_sanitize_trims_dashes() {
            assert_eq!(sanitize_component("--hello--"), "hello");
            assert_eq!(sanitize_component("!!!"), "");
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
