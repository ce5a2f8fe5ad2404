//! Layout normalization.
//!
//! Every export starts here: the raw block list is reconciled against the
//! project's asset set, missing layouts are synthesized from the
//! narrative fields, and block order is rewritten to a dense `0..n-1`
//! sequence. Normalization never fails; dangling references are repaired
//! silently (logged at debug level) rather than raised as errors.

use crate::blocks::{
    BlockContent, BlockSettings, GalleryContent, GalleryItem, HeroContent, LayoutBlock,
    LinkContent, MetricsContent, TextContent, VideoContent,
};
use crate::project::{Asset, Project};

/// Normalize a project's layout for export.
///
/// Returns a reconciled block list with dense `order` values. Sorting by
/// `order` and re-deriving indices is idempotent: normalizing an already
/// normalized list returns an identical list.
pub fn normalize_layout(project: &Project) -> Vec<LayoutBlock> {
    let mut blocks = if project.layout.is_empty() {
        log::debug!("project '{}' has no layout, synthesizing default", project.slug);
        default_layout(project)
    } else {
        project.layout.clone()
    };

    reconcile(&mut blocks, project);

    // Stable sort preserves relative order of equal keys, so ties keep
    // their input order before indices are re-derived.
    blocks.sort_by_key(|b| b.order);
    for (i, block) in blocks.iter_mut().enumerate() {
        block.order = i as u32;
    }
    blocks
}

/// Synthesize a default layout from the project's narrative and assets.
fn default_layout(project: &Project) -> Vec<LayoutBlock> {
    let mut blocks = Vec::new();

    let hero_asset = pick_hero_asset(project);
    blocks.push(block(
        "hero-default",
        BlockContent::Hero(HeroContent {
            asset_id: hero_asset.map(|a| a.id.clone()),
            title: project.title.clone(),
            subtitle: project.summary.clone(),
        }),
    ));

    let sections = [
        ("text-problem", "The Problem", &project.problem),
        ("text-solution", "The Solution", &project.solution),
        ("text-outcomes", "Outcomes & Impact", &project.outcomes),
    ];
    for (id, heading, text) in sections {
        if !text.trim().is_empty() {
            blocks.push(block(
                id,
                BlockContent::Text(TextContent {
                    heading: Some(heading.to_string()),
                    text: text.clone(),
                }),
            ));
        }
    }

    let hero_id = hero_asset.map(|a| a.id.as_str());
    let gallery_items: Vec<GalleryItem> = project
        .assets
        .iter()
        .filter(|a| a.is_image() && Some(a.id.as_str()) != hero_id)
        .map(|a| GalleryItem {
            asset_id: a.id.clone(),
            caption: a.description.clone().unwrap_or_default(),
        })
        .collect();
    if !gallery_items.is_empty() {
        blocks.push(block(
            "gallery-default",
            BlockContent::Gallery(GalleryContent {
                items: gallery_items,
            }),
        ));
    }

    if let Some(video) = project.assets.iter().find(|a| a.is_video()) {
        blocks.push(block(
            "video-default",
            BlockContent::Video(VideoContent {
                asset_id: Some(video.id.clone()),
                ..Default::default()
            }),
        ));
    }

    if !project.metrics.is_empty() {
        blocks.push(block(
            "metrics-default",
            BlockContent::Metrics(MetricsContent {
                items: project.metrics.clone(),
            }),
        ));
    }

    if !project.links.is_empty() {
        blocks.push(block(
            "links-default",
            BlockContent::Link(LinkContent {
                links: project.links.clone(),
            }),
        ));
    }

    // A hero over an empty project carries no content at all; replace it
    // with a single placeholder text block instead.
    let only_empty_hero = blocks.len() == 1
        && matches!(
            &blocks[0].content,
            BlockContent::Hero(h) if h.asset_id.is_none()
                && h.title.trim().is_empty()
                && h.subtitle.trim().is_empty()
        );
    if only_empty_hero {
        blocks.clear();
        blocks.push(block(
            "text-placeholder",
            BlockContent::Text(TextContent {
                heading: None,
                text: "No content has been added to this case study yet.".to_string(),
            }),
        ));
    }

    for (i, b) in blocks.iter_mut().enumerate() {
        b.order = i as u32;
    }
    blocks
}

/// Pick the hero image: designated flag first, then the cover reference,
/// then the first image asset.
fn pick_hero_asset(project: &Project) -> Option<&Asset> {
    project
        .assets
        .iter()
        .find(|a| a.is_hero_image && a.is_image())
        .or_else(|| {
            project
                .cover
                .as_deref()
                .and_then(|id| project.assets.iter().find(|a| a.id == id && a.is_image()))
        })
        .or_else(|| project.assets.iter().find(|a| a.is_image()))
}

/// Repair references to assets that no longer exist.
///
/// Hero/image/video references are nulled; gallery items are filtered
/// out, and galleries left with zero items are dropped entirely.
fn reconcile(blocks: &mut Vec<LayoutBlock>, project: &Project) {
    let exists = |id: &str| project.asset(id).is_some();

    blocks.retain_mut(|block| match &mut block.content {
        BlockContent::Hero(h) => {
            null_dangling(&mut h.asset_id, &block.id, &exists);
            true
        },
        BlockContent::Image(img) => {
            null_dangling(&mut img.asset_id, &block.id, &exists);
            true
        },
        BlockContent::Video(v) => {
            null_dangling(&mut v.asset_id, &block.id, &exists);
            true
        },
        BlockContent::Gallery(g) => {
            let before = g.items.len();
            g.items.retain(|item| exists(&item.asset_id));
            if g.items.len() < before {
                log::debug!(
                    "dropped {} dangling gallery item(s) in block '{}'",
                    before - g.items.len(),
                    block.id
                );
            }
            !g.items.is_empty()
        },
        BlockContent::Text(_) | BlockContent::Metrics(_) | BlockContent::Link(_) => true,
    });
}

fn null_dangling(asset_id: &mut Option<String>, block_id: &str, exists: &impl Fn(&str) -> bool) {
    if let Some(id) = asset_id.as_deref() {
        if !exists(id) {
            log::debug!("nulled dangling asset '{}' in block '{}'", id, block_id);
            *asset_id = None;
        }
    }
}

fn block(id: &str, content: BlockContent) -> LayoutBlock {
    LayoutBlock {
        id: id.to_string(),
        order: 0,
        settings: BlockSettings::default(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Link, Metric};

    fn image_asset(id: &str, hero: bool) -> Asset {
        Asset {
            id: id.to_string(),
            name: format!("{}.png", id),
            mime_type: "image/png".to_string(),
            is_hero_image: hero,
            data: "data:image/png;base64,YWJjZA==".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_layout_from_narrative() {
        let project = Project {
            title: "Case".to_string(),
            summary: "Summary".to_string(),
            problem: "A problem".to_string(),
            outcomes: "Shipped it".to_string(),
            assets: vec![image_asset("a1", true), image_asset("a2", false)],
            metrics: vec![Metric {
                label: "Uptime".to_string(),
                value: "99.9%".to_string(),
            }],
            links: vec![Link {
                label: "Site".to_string(),
                url: "https://example.com".to_string(),
            }],
            ..Default::default()
        };
        let blocks = normalize_layout(&project);
        let kinds: Vec<_> = blocks.iter().map(|b| b.content.kind()).collect();
        assert_eq!(kinds, vec!["hero", "text", "text", "gallery", "metrics", "link"]);

        // Hero picks the designated image, gallery gets the rest
        match &blocks[0].content {
            BlockContent::Hero(h) => assert_eq!(h.asset_id.as_deref(), Some("a1")),
            other => panic!("expected hero, got {:?}", other),
        }
        match &blocks[3].content {
            BlockContent::Gallery(g) => {
                assert_eq!(g.items.len(), 1);
                assert_eq!(g.items[0].asset_id, "a2");
            },
            other => panic!("expected gallery, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_project_gets_placeholder() {
        let blocks = normalize_layout(&Project::default());
        assert_eq!(blocks.len(), 1);
        match &blocks[0].content {
            BlockContent::Text(t) => assert!(!t.text.is_empty()),
            other => panic!("expected placeholder text, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_references_are_nulled() {
        let project = Project {
            layout: vec![block(
                "b1",
                BlockContent::Image(crate::blocks::ImageContent {
                    asset_id: Some("missing".to_string()),
                    caption: String::new(),
                }),
            )],
            ..Default::default()
        };
        let blocks = normalize_layout(&project);
        match &blocks[0].content {
            BlockContent::Image(img) => assert!(img.asset_id.is_none()),
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_gallery_with_only_dangling_items_is_dropped() {
        let project = Project {
            layout: vec![
                block(
                    "g1",
                    BlockContent::Gallery(GalleryContent {
                        items: vec![GalleryItem {
                            asset_id: "missing".to_string(),
                            caption: String::new(),
                        }],
                    }),
                ),
                block(
                    "t1",
                    BlockContent::Text(TextContent {
                        heading: None,
                        text: "kept".to_string(),
                    }),
                ),
            ],
            ..Default::default()
        };
        let blocks = normalize_layout(&project);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, "t1");
        assert_eq!(blocks[0].order, 0);
    }

    #[test]
    fn test_order_is_dense_and_stable() {
        let mut b1 = block("b1", BlockContent::Text(TextContent::default()));
        b1.order = 7;
        let mut b2 = block("b2", BlockContent::Text(TextContent::default()));
        b2.order = 7;
        let mut b3 = block("b3", BlockContent::Text(TextContent::default()));
        b3.order = 2;
        let project = Project {
            layout: vec![b1, b2, b3],
            ..Default::default()
        };
        let blocks = normalize_layout(&project);
        let ids: Vec<_> = blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b3", "b1", "b2"]);
        let orders: Vec<_> = blocks.iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let project = Project {
            title: "Case".to_string(),
            problem: "p".to_string(),
            ..Default::default()
        };
        let once = normalize_layout(&project);
        let again = normalize_layout(&Project {
            layout: once.clone(),
            ..project
        });
        let a: Vec<_> = once.iter().map(|b| (b.id.clone(), b.order)).collect();
        let b: Vec<_> = again.iter().map(|b| (b.id.clone(), b.order)).collect();
        assert_eq!(a, b);
    }
}
