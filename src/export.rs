//! Export orchestration.
//!
//! Wires the normalizer, renderer, packager, and writers into the three
//! export operations. Operations are `async` so callers can compose them
//! with busy indicators and future I/O-bound steps, but the work itself
//! is synchronous and runs to completion on the calling task; each call
//! closes over its own project snapshot, so no state is shared between
//! concurrent exports.
//!
//! Failure handling is centralized here: inner components propagate
//! errors with `?` and never recover on their own; this boundary logs the
//! failure and hands it to the caller. A result blob is only constructed
//! after the entire byte buffer is assembled, so no partial artifact is
//! ever returned.

use crate::error::Result;
use crate::html::{render_document, EmbeddedUrls, PackagedUrls};
use crate::manifest::build_manifest;
use crate::normalize::normalize_layout;
use crate::packager::pack_asset_filenames;
use crate::pdf::build_pdf;
use crate::project::Project;
use crate::zip::ZipWriter;
use bytes::Bytes;

/// A finished export artifact, ready to hand to a download or filesystem.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Suggested filename, `{slug}-portfolio.{ext}`
    pub filename: String,
    /// MIME type of the artifact
    pub mime_type: &'static str,
    /// Complete artifact bytes
    pub bytes: Bytes,
}

/// Export operations over one immutable project snapshot.
pub struct Exporter {
    project: Project,
}

impl Exporter {
    /// Take a snapshot of the project to export.
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    /// The snapshot being exported.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Export as a single self-contained HTML document.
    ///
    /// Assets stay embedded as data URLs, so the file works offline with
    /// no sidecar files.
    pub async fn export_as_html(&self) -> Result<ExportFile> {
        self.checked("html", || {
            let blocks = normalize_layout(&self.project);
            let html = render_document(&self.project, &blocks, &EmbeddedUrls);
            Ok(ExportFile {
                filename: format!("{}-portfolio.html", self.project.export_slug()),
                mime_type: "text/html",
                bytes: Bytes::from(html),
            })
        })
    }

    /// Export as a ZIP package: `{slug}/index.html`, `{slug}/project.json`,
    /// and the decoded assets under `{slug}/assets/`.
    pub async fn export_as_zip(&self) -> Result<ExportFile> {
        self.checked("zip", || {
            let slug = self.project.export_slug();
            let blocks = normalize_layout(&self.project);
            let filenames = pack_asset_filenames(&self.project.assets);

            let html = render_document(&self.project, &blocks, &PackagedUrls::new(&filenames));
            let manifest = build_manifest(&self.project, &blocks, &filenames)?;

            let mut archive = ZipWriter::new();
            archive.add(format!("{}/index.html", slug), html.into_bytes())?;
            archive.add(format!("{}/project.json", slug), manifest)?;
            for asset in &self.project.assets {
                let data = asset.bytes()?;
                if let Some(name) = filenames.get(&asset.id) {
                    archive.add(format!("{}/assets/{}", slug, name), data.to_vec())?;
                }
            }

            Ok(ExportFile {
                filename: format!("{}-portfolio.zip", slug),
                mime_type: "application/zip",
                bytes: Bytes::from(archive.finish()),
            })
        })
    }

    /// Export the narrative as a paginated plain-text PDF.
    pub async fn export_as_pdf(&self) -> Result<ExportFile> {
        self.checked("pdf", || {
            let blocks = normalize_layout(&self.project);
            let pdf = build_pdf(&self.project, &blocks)?;
            Ok(ExportFile {
                filename: format!("{}-portfolio.pdf", self.project.export_slug()),
                mime_type: "application/pdf",
                bytes: Bytes::from(pdf),
            })
        })
    }

    /// Run a build step, logging failures at this boundary.
    fn checked(
        &self,
        stage: &str,
        build: impl FnOnce() -> Result<ExportFile>,
    ) -> Result<ExportFile> {
        match build() {
            Ok(file) => {
                log::info!(
                    "exported '{}' as {} ({} bytes)",
                    self.project.export_slug(),
                    file.filename,
                    file.bytes.len()
                );
                Ok(file)
            },
            Err(e) => {
                log::error!("{} export failed for '{}': {}", stage, self.project.export_slug(), e);
                Err(e)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            title: "Foo".to_string(),
            slug: "foo".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_html_export_file() {
        let file = Exporter::new(project()).export_as_html().await.unwrap();
        assert_eq!(file.filename, "foo-portfolio.html");
        assert_eq!(file.mime_type, "text/html");
        let html = String::from_utf8(file.bytes.to_vec()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_zip_export_file() {
        let file = Exporter::new(project()).export_as_zip().await.unwrap();
        assert_eq!(file.filename, "foo-portfolio.zip");
        assert_eq!(file.mime_type, "application/zip");
        // Store-method archives keep entry names verbatim
        let bytes = file.bytes.to_vec();
        assert!(contains(&bytes, b"foo/index.html"));
        assert!(contains(&bytes, b"foo/project.json"));
    }

    #[tokio::test]
    async fn test_pdf_export_file() {
        let file = Exporter::new(project()).export_as_pdf().await.unwrap();
        assert_eq!(file.filename, "foo-portfolio.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF-1.4"));
    }

    #[tokio::test]
    async fn test_unsafe_slug_gets_sanitized_filename() {
        let mut p = project();
        p.slug = "My Project!".to_string();
        let file = Exporter::new(p).export_as_html().await.unwrap();
        assert_eq!(file.filename, "my-project-portfolio.html");
    }

    #[tokio::test]
    async fn test_undecodable_asset_fails_zip_but_not_html() {
        let mut p = project();
        p.assets.push(crate::project::Asset {
            id: "bad".to_string(),
            name: "bad.bin".to_string(),
            mime_type: "application/octet-stream".to_string(),
            data: "not-a-data-url".to_string(),
            ..Default::default()
        });
        let exporter = Exporter::new(p);
        assert!(exporter.export_as_zip().await.is_err());
        // HTML export never decodes asset bytes
        assert!(exporter.export_as_html().await.is_ok());
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }
}
