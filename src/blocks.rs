//! Layout block model.
//!
//! Blocks are the ordered building pieces of a project page. Each block
//! carries shared presentation settings plus a kind-specific content
//! payload, modeled as an enum with payload so rendering can match
//! exhaustively instead of asserting on runtime shapes.

use crate::project::{Link, Metric};
use serde::{Deserialize, Serialize};

/// One block in the project layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBlock {
    /// Stable block identifier
    pub id: String,
    /// Position in the layout; dense `0..n-1` after normalization
    #[serde(default)]
    pub order: u32,
    /// Shared presentation settings
    #[serde(default)]
    pub settings: BlockSettings,
    /// Kind-specific content payload
    #[serde(flatten)]
    pub content: BlockContent,
}

/// Kind-specific block content, tagged by `type` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum BlockContent {
    /// Leading hero section: image, title, subtitle
    Hero(HeroContent),
    /// Free-text section with an optional heading
    Text(TextContent),
    /// Single image with caption
    Image(ImageContent),
    /// Grid of images with captions
    Gallery(GalleryContent),
    /// Embedded video player
    Video(VideoContent),
    /// Label/value metric grid
    Metrics(MetricsContent),
    /// List of external links
    Link(LinkContent),
}

impl BlockContent {
    /// Kind name as used in JSON tags and CSS modifier classes.
    pub fn kind(&self) -> &'static str {
        match self {
            BlockContent::Hero(_) => "hero",
            BlockContent::Text(_) => "text",
            BlockContent::Image(_) => "image",
            BlockContent::Gallery(_) => "gallery",
            BlockContent::Video(_) => "video",
            BlockContent::Metrics(_) => "metrics",
            BlockContent::Link(_) => "link",
        }
    }
}

/// Hero block payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    /// Backing image asset, if any
    pub asset_id: Option<String>,
    /// Headline, typically the project title
    pub title: String,
    /// Supporting line, typically the summary
    pub subtitle: String,
}

/// Text block payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextContent {
    /// Optional section heading
    pub heading: Option<String>,
    /// Body text; newlines split into paragraphs when rendered
    pub text: String,
}

/// Image block payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageContent {
    /// Backing image asset, if any
    pub asset_id: Option<String>,
    /// Caption below the image
    pub caption: String,
}

/// Gallery block payload: an ordered list of image/caption pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryContent {
    /// Gallery items in display order
    pub items: Vec<GalleryItem>,
}

/// One gallery entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Backing image asset
    pub asset_id: String,
    /// Caption for this entry
    #[serde(default)]
    pub caption: String,
}

/// Video block payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoContent {
    /// Backing video asset, if any
    pub asset_id: Option<String>,
    /// Show player controls (default true)
    pub controls: bool,
    /// Start playback automatically
    pub autoplay: bool,
    /// Loop playback
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Start muted
    pub muted: bool,
}

impl Default for VideoContent {
    fn default() -> Self {
        Self {
            asset_id: None,
            controls: true,
            autoplay: false,
            looping: false,
            muted: false,
        }
    }
}

/// Metrics block payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricsContent {
    /// Label/value pairs in display order
    pub items: Vec<Metric>,
}

/// Link block payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkContent {
    /// Links in display order
    pub links: Vec<Link>,
}

/// Shared presentation settings, all defaulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockSettings {
    /// Horizontal span of the block
    pub width: BlockWidth,
    /// Text alignment inside the block
    pub alignment: BlockAlignment,
    /// Vertical padding scale
    pub padding: BlockPadding,
    /// Optional CSS background color value
    pub background: Option<String>,
}

/// Horizontal span of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockWidth {
    /// Edge-to-edge
    Full,
    /// Wider than the text column
    Wide,
    /// Standard text column
    #[default]
    Normal,
    /// Narrow column
    Narrow,
}

impl BlockWidth {
    /// CSS modifier suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockWidth::Full => "full",
            BlockWidth::Wide => "wide",
            BlockWidth::Normal => "normal",
            BlockWidth::Narrow => "narrow",
        }
    }
}

/// Text alignment inside a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockAlignment {
    /// Left-aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right-aligned
    Right,
}

impl BlockAlignment {
    /// CSS modifier suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockAlignment::Left => "left",
            BlockAlignment::Center => "center",
            BlockAlignment::Right => "right",
        }
    }
}

/// Vertical padding scale of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockPadding {
    /// No padding
    None,
    /// Compact
    Small,
    /// Default spacing
    #[default]
    Medium,
    /// Generous spacing
    Large,
}

impl BlockPadding {
    /// CSS modifier suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockPadding::None => "none",
            BlockPadding::Small => "small",
            BlockPadding::Medium => "medium",
            BlockPadding::Large => "large",
        }
    }
}
