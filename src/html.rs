//! HTML rendering of normalized layouts.
//!
//! One pure renderer serves every output mode; the only thing that varies
//! is how an asset becomes a URL, injected through [`AssetUrlResolver`].
//! The standalone export resolves to the asset's embedded data URL, the
//! ZIP export to `assets/<packed filename>`.
//!
//! All free-text fields are HTML-escaped before interpolation; no project
//! field is ever trusted as markup.

use crate::blocks::{BlockContent, LayoutBlock};
use crate::project::{Asset, Project};
use indexmap::IndexMap;

/// Strategy turning an asset into a URL usable from the exported page.
pub trait AssetUrlResolver {
    /// Resolve the asset to a URL, or `None` when it has no usable source.
    fn resolve(&self, asset: &Asset) -> Option<String>;
}

/// Resolver for single-file export: assets stay embedded as data URLs.
pub struct EmbeddedUrls;

impl AssetUrlResolver for EmbeddedUrls {
    fn resolve(&self, asset: &Asset) -> Option<String> {
        if asset.data.is_empty() {
            None
        } else {
            Some(asset.data.clone())
        }
    }
}

/// Resolver for archive export: assets live under `assets/` with their
/// packaged filenames.
pub struct PackagedUrls<'a> {
    filenames: &'a IndexMap<String, String>,
}

impl<'a> PackagedUrls<'a> {
    /// Wrap a packager filename map.
    pub fn new(filenames: &'a IndexMap<String, String>) -> Self {
        Self { filenames }
    }
}

impl AssetUrlResolver for PackagedUrls<'_> {
    fn resolve(&self, asset: &Asset) -> Option<String> {
        self.filenames.get(&asset.id).map(|name| format!("assets/{}", name))
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete standalone HTML document with the stylesheet inlined.
pub fn render_document(
    project: &Project,
    blocks: &[LayoutBlock],
    resolver: &dyn AssetUrlResolver,
) -> String {
    let title = if project.title.trim().is_empty() {
        "Untitled project".to_string()
    } else {
        project.title.clone()
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n\
         <main class=\"portfolio\">\n{}</main>\n</body>\n</html>\n",
        escape_html(&title),
        STYLESHEET,
        render_blocks(project, blocks, resolver)
    )
}

/// Render the block sequence to an HTML fragment.
pub fn render_blocks(
    project: &Project,
    blocks: &[LayoutBlock],
    resolver: &dyn AssetUrlResolver,
) -> String {
    let mut html = String::new();
    for block in blocks {
        html.push_str(&render_block(project, block, resolver));
    }
    html
}

fn render_block(project: &Project, block: &LayoutBlock, resolver: &dyn AssetUrlResolver) -> String {
    let mut inner = String::new();
    match &block.content {
        BlockContent::Hero(hero) => {
            if let Some(url) = resolve_id(project, hero.asset_id.as_deref(), resolver) {
                inner.push_str(&format!(
                    "<img class=\"hero-image\" src=\"{}\" alt=\"{}\">\n",
                    escape_html(&url),
                    escape_html(&hero.title)
                ));
            }
            if !hero.title.is_empty() {
                inner.push_str(&format!("<h1>{}</h1>\n", escape_html(&hero.title)));
            }
            if !hero.subtitle.is_empty() {
                inner.push_str(&format!(
                    "<p class=\"hero-subtitle\">{}</p>\n",
                    escape_html(&hero.subtitle)
                ));
            }
        },
        BlockContent::Text(text) => {
            if let Some(heading) = text.heading.as_deref() {
                if !heading.is_empty() {
                    inner.push_str(&format!("<h2>{}</h2>\n", escape_html(heading)));
                }
            }
            for line in text.text.lines().filter(|l| !l.trim().is_empty()) {
                inner.push_str(&format!("<p>{}</p>\n", escape_html(line)));
            }
        },
        BlockContent::Image(image) => {
            if let Some(url) = resolve_id(project, image.asset_id.as_deref(), resolver) {
                inner.push_str("<figure>\n");
                inner.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">\n",
                    escape_html(&url),
                    escape_html(&image.caption)
                ));
                if !image.caption.is_empty() {
                    inner.push_str(&format!(
                        "<figcaption>{}</figcaption>\n",
                        escape_html(&image.caption)
                    ));
                }
                inner.push_str("</figure>\n");
            }
        },
        BlockContent::Gallery(gallery) => {
            inner.push_str("<div class=\"gallery-grid\">\n");
            for item in &gallery.items {
                // Items without a resolvable URL are skipped, not rendered broken
                let Some(url) = resolve_id(project, Some(&item.asset_id), resolver) else {
                    continue;
                };
                inner.push_str("<figure class=\"gallery-item\">\n");
                inner.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">\n",
                    escape_html(&url),
                    escape_html(&item.caption)
                ));
                if !item.caption.is_empty() {
                    inner.push_str(&format!(
                        "<figcaption>{}</figcaption>\n",
                        escape_html(&item.caption)
                    ));
                }
                inner.push_str("</figure>\n");
            }
            inner.push_str("</div>\n");
        },
        BlockContent::Video(video) => {
            if let Some(url) = resolve_id(project, video.asset_id.as_deref(), resolver) {
                let mut attrs = String::new();
                if video.controls {
                    attrs.push_str(" controls");
                }
                if video.autoplay {
                    attrs.push_str(" autoplay");
                }
                if video.looping {
                    attrs.push_str(" loop");
                }
                if video.muted {
                    attrs.push_str(" muted");
                }
                let poster = video
                    .asset_id
                    .as_deref()
                    .and_then(|id| project.asset(id))
                    .and_then(|a| a.thumbnail_url.clone());
                if let Some(poster) = poster {
                    attrs.push_str(&format!(" poster=\"{}\"", escape_html(&poster)));
                }
                inner.push_str(&format!(
                    "<video src=\"{}\"{}></video>\n",
                    escape_html(&url),
                    attrs
                ));
            }
        },
        BlockContent::Metrics(metrics) => {
            inner.push_str("<dl class=\"metrics\">\n");
            for metric in &metrics.items {
                inner.push_str(&format!(
                    "<div class=\"metric\"><dt>{}</dt><dd>{}</dd></div>\n",
                    escape_html(&metric.label),
                    escape_html(&metric.value)
                ));
            }
            inner.push_str("</dl>\n");
        },
        BlockContent::Link(links) => {
            inner.push_str("<nav class=\"links\">\n");
            for link in &links.links {
                inner.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>\n",
                    escape_html(&link.url),
                    escape_html(&link.label)
                ));
            }
            inner.push_str("</nav>\n");
        },
    }

    let settings = &block.settings;
    let mut attrs = format!(
        "class=\"block block--{} block--{} block--align-{} block--padding-{}\"",
        block.content.kind(),
        settings.width.as_str(),
        settings.alignment.as_str(),
        settings.padding.as_str()
    );
    if let Some(background) = settings.background.as_deref() {
        attrs.push_str(&format!(" style=\"background:{}\"", escape_html(background)));
    }
    format!("<section {}>\n{}</section>\n", attrs, inner)
}

fn resolve_id(
    project: &Project,
    asset_id: Option<&str>,
    resolver: &dyn AssetUrlResolver,
) -> Option<String> {
    let asset = project.asset(asset_id?)?;
    resolver.resolve(asset)
}

/// Constant stylesheet shipped with every export.
///
/// The class names here line up with the modifier classes the renderer
/// emits (`block--<type>`, `block--<width>`, `block--align-<alignment>`,
/// `block--padding-<padding>`); nothing is computed per project.
pub const STYLESHEET: &str = "\
:root { color-scheme: light; }
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif;
  line-height: 1.6;
  color: #1a1a1a;
  background: #ffffff;
}
.portfolio { display: flex; flex-direction: column; }
.block { margin: 0 auto; width: 100%; }
.block--full { max-width: none; }
.block--wide { max-width: 1100px; }
.block--normal { max-width: 760px; }
.block--narrow { max-width: 560px; }
.block--align-left { text-align: left; }
.block--align-center { text-align: center; }
.block--align-right { text-align: right; }
.block--padding-none { padding: 0 1.5rem; }
.block--padding-small { padding: 1rem 1.5rem; }
.block--padding-medium { padding: 2.5rem 1.5rem; }
.block--padding-large { padding: 5rem 1.5rem; }
.block--hero h1 { font-size: 2.5rem; margin: 0.5rem 0 0; }
.block--hero .hero-subtitle { font-size: 1.2rem; color: #555; margin-top: 0.5rem; }
.block--hero .hero-image { width: 100%; height: auto; border-radius: 8px; }
.block--text h2 { font-size: 1.5rem; margin-bottom: 0.5rem; }
.block--text p { margin: 0 0 1rem; }
.block--image img { max-width: 100%; height: auto; border-radius: 8px; }
.block--image figcaption { font-size: 0.85rem; color: #777; margin-top: 0.5rem; }
figure { margin: 0; }
.gallery-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 1rem;
}
.gallery-item img { width: 100%; height: auto; border-radius: 6px; }
.gallery-item figcaption { font-size: 0.85rem; color: #777; margin-top: 0.4rem; }
.block--video video { width: 100%; border-radius: 8px; }
.metrics {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
  gap: 1rem;
  margin: 0;
}
.metric dt { font-size: 0.85rem; text-transform: uppercase; color: #777; }
.metric dd { font-size: 1.6rem; font-weight: 600; margin: 0.25rem 0 0; }
.links { display: flex; flex-wrap: wrap; gap: 0.75rem; }
.links a {
  padding: 0.5rem 1rem;
  border: 1px solid #ddd;
  border-radius: 999px;
  text-decoration: none;
  color: inherit;
}
.links a:hover { border-color: #888; }
";
