//! Project data model.
//!
//! A [`Project`] is the complete input contract for the export engine:
//! narrative metadata, an ordered set of layout blocks, and embedded
//! assets. The editor and storage layers that produce these values live
//! outside this crate; everything here is constructed fresh per export
//! call and never mutated afterwards.

use crate::blocks::LayoutBlock;
use crate::error::{Error, Result};
use bytes::Bytes;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Regex for the data-URL prefix: `data:<mime>[;base64],<payload>`
    static ref RE_DATA_URL: Regex =
        Regex::new(r"^data:(?P<mime>[^;,]*)(?P<b64>;base64)?,").unwrap();
}

/// A named external link attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display label
    pub label: String,
    /// Target URL
    pub url: String,
}

/// A single label/value metric (e.g. "Conversion uplift" / "+18%").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric label
    pub label: String,
    /// Metric value, free text
    pub value: String,
}

/// An embedded media asset.
///
/// Raw content arrives as a base64 data URL in `data`; [`Asset::bytes`]
/// decodes it on demand. Assets are referenced from layout blocks by `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Asset {
    /// Stable identifier referenced by layout blocks
    pub id: String,
    /// Original filename as uploaded (may be empty)
    pub name: String,
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Declared size in bytes
    pub size: u64,
    /// Embedded content as a data URL
    pub data: String,
    /// ISO timestamp the asset was added (pass-through metadata)
    pub added_at: Option<String>,
    /// Optional description, used as a default caption
    pub description: Option<String>,
    /// Whether this asset is the designated hero image
    pub is_hero_image: bool,
    /// Optional thumbnail, used as a video poster
    pub thumbnail_url: Option<String>,
}

impl Asset {
    /// Decode the embedded data URL into raw bytes.
    ///
    /// Accepts `data:<mime>;base64,<payload>` (decoded) and plain
    /// `data:<mime>,<payload>` (taken verbatim). Anything else is a
    /// malformed data URL.
    pub fn bytes(&self) -> Result<Bytes> {
        let caps = RE_DATA_URL
            .captures(&self.data)
            .ok_or_else(|| Error::MalformedDataUrl(self.id.clone()))?;
        let payload = &self.data[caps.get(0).map(|m| m.end()).unwrap_or(0)..];
        if caps.name("b64").is_some() {
            use base64::engine::general_purpose::STANDARD;
            use base64::Engine as _;
            Ok(Bytes::from(STANDARD.decode(payload)?))
        } else {
            Ok(Bytes::copy_from_slice(payload.as_bytes()))
        }
    }

    /// Whether the declared MIME type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Whether the declared MIME type is a video type.
    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}

/// A portfolio project: metadata, ordered layout blocks, embedded assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    /// Project title
    pub title: String,
    /// URL-ish identifier; used as the archive root folder and filename stem
    pub slug: String,
    /// Short summary paragraph
    pub summary: String,
    /// Narrative: the problem being solved
    pub problem: String,
    /// Narrative: the solution taken
    pub solution: String,
    /// Narrative: outcomes and impact
    pub outcomes: String,
    /// Project status, e.g. "shipped"
    pub status: Option<String>,
    /// The author's role on the project
    pub role: Option<String>,
    /// Free-text timeframe, e.g. "2024 – 2025"
    pub timeframe: Option<String>,
    /// Topic tags
    pub tags: Vec<String>,
    /// Technologies used
    pub technologies: Vec<String>,
    /// Collaborator names
    pub collaborators: Vec<String>,
    /// External links
    pub links: Vec<Link>,
    /// Outcome metrics
    pub metrics: Vec<Metric>,
    /// Awards and recognition
    pub awards: Vec<String>,
    /// Asset id of the cover image, if designated
    pub cover: Option<String>,
    /// ISO creation timestamp (pass-through metadata)
    pub created_at: Option<String>,
    /// ISO last-update timestamp (pass-through metadata)
    pub updated_at: Option<String>,
    /// Ordered layout blocks (may be empty; the normalizer synthesizes one)
    pub layout: Vec<LayoutBlock>,
    /// Embedded assets
    pub assets: Vec<Asset>,
}

impl Project {
    /// Filesystem-safe filename stem for export artifacts.
    ///
    /// The slug is used verbatim when already safe; otherwise it is
    /// sanitized, falling back to `"project"` when nothing survives.
    pub fn export_slug(&self) -> String {
        let slug = crate::utils::sanitize_component(&self.slug);
        if slug.is_empty() {
            "project".to_string()
        } else {
            slug
        }
    }

    /// Look up an asset by id.
    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }
}
