//! Manifest sidecar for the ZIP package.
//!
//! `project.json` describes the exported project and maps every asset to
//! its packaged location under `assets/`, so the archive is
//! self-describing and re-importable.

use crate::blocks::LayoutBlock;
use crate::error::Result;
use crate::project::{Link, Metric, Project};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    project: ManifestProject<'a>,
    layout: &'a [LayoutBlock],
    assets: Vec<ManifestAsset<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestProject<'a> {
    title: &'a str,
    slug: &'a str,
    summary: &'a str,
    problem: &'a str,
    solution: &'a str,
    outcomes: &'a str,
    tags: &'a [String],
    technologies: &'a [String],
    status: &'a Option<String>,
    role: &'a Option<String>,
    collaborators: &'a [String],
    timeframe: &'a Option<String>,
    links: &'a [Link],
    metrics: &'a [Metric],
    awards: &'a [String],
    cover: &'a Option<String>,
    created_at: &'a Option<String>,
    updated_at: &'a Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestAsset<'a> {
    id: &'a str,
    name: &'a str,
    mime_type: &'a str,
    size: u64,
    added_at: &'a Option<String>,
    description: &'a Option<String>,
    is_hero_image: bool,
    thumbnail_url: &'a Option<String>,
    /// Packaged location within the archive
    file: String,
}

/// Serialize the `project.json` sidecar.
pub fn build_manifest(
    project: &Project,
    blocks: &[LayoutBlock],
    filenames: &IndexMap<String, String>,
) -> Result<Vec<u8>> {
    let manifest = Manifest {
        project: ManifestProject {
            title: &project.title,
            slug: &project.slug,
            summary: &project.summary,
            problem: &project.problem,
            solution: &project.solution,
            outcomes: &project.outcomes,
            tags: &project.tags,
            technologies: &project.technologies,
            status: &project.status,
            role: &project.role,
            collaborators: &project.collaborators,
            timeframe: &project.timeframe,
            links: &project.links,
            metrics: &project.metrics,
            awards: &project.awards,
            cover: &project.cover,
            created_at: &project.created_at,
            updated_at: &project.updated_at,
        },
        layout: blocks,
        assets: project
            .assets
            .iter()
            .map(|asset| ManifestAsset {
                id: &asset.id,
                name: &asset.name,
                mime_type: &asset.mime_type,
                size: asset.size,
                added_at: &asset.added_at,
                description: &asset.description,
                is_hero_image: asset.is_hero_image,
                thumbnail_url: &asset.thumbnail_url,
                file: format!(
                    "assets/{}",
                    filenames.get(&asset.id).map(String::as_str).unwrap_or_default()
                ),
            })
            .collect(),
    };
    let mut bytes = serde_json::to_vec_pretty(&manifest)?;
    bytes.push(b'\n');
    Ok(bytes)
}
