//! Text layout for the PDF export: line generation, wrapping, pagination.
//!
//! The PDF artifact is a plain-text rendition of the project narrative.
//! This module produces the ordered line list (title, summary, metadata,
//! narrative sections, a layout overview, the asset inventory), wraps it
//! to a fixed measure, and slices it into pages.

use crate::blocks::{BlockContent, LayoutBlock};
use crate::project::Project;

/// Page width in points (A4).
pub const PAGE_WIDTH: f64 = 595.0;
/// Page height in points (A4).
pub const PAGE_HEIGHT: f64 = 842.0;
/// Margin on all four sides, in points.
pub const MARGIN: f64 = 54.0;
/// Line height (leading), in points.
pub const LINE_HEIGHT: f64 = 16.0;
/// Body font size, in points.
pub const FONT_SIZE: f64 = 11.0;
/// Maximum characters per wrapped line.
pub const MAX_LINE_CHARS: usize = 90;

/// Shown when a project produces no text at all; the PDF still gets one page.
pub const PLACEHOLDER_LINE: &str = "This case study has no content yet.";

/// Text lines that fit on one page.
pub fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - 2.0 * MARGIN) / LINE_HEIGHT) as usize
}

/// Greedy word wrap to `max` characters.
///
/// Existing paragraph breaks are preserved as empty lines. A single word
/// longer than `max` is hard-split into chunks of exactly `max`
/// characters (the last chunk may be shorter) instead of overflowing.
pub fn wrap_text(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in paragraph.split_whitespace() {
            for piece in chunk_word(word, max) {
                let piece_len = piece.chars().count();
                if current.is_empty() {
                    current = piece;
                    current_len = piece_len;
                } else if current_len + 1 + piece_len <= max {
                    current.push(' ');
                    current.push_str(&piece);
                    current_len += 1 + piece_len;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current = piece;
                    current_len = piece_len;
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Split an overlong word into `max`-character chunks; shorter words pass
/// through whole.
fn chunk_word(word: &str, max: usize) -> Vec<String> {
    if word.chars().count() <= max {
        return vec![word.to_string()];
    }
    word.chars()
        .collect::<Vec<char>>()
        .chunks(max)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Slice lines into consecutive pages of `per_page` lines.
///
/// Always yields at least one page; empty input becomes a single page
/// holding the placeholder line.
pub fn paginate(lines: &[String], per_page: usize) -> Vec<Vec<String>> {
    if lines.is_empty() {
        return vec![vec![PLACEHOLDER_LINE.to_string()]];
    }
    lines
        .chunks(per_page.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Build the ordered text line list for a project.
///
/// Blank separator lines are collapsed so no two consecutive blanks
/// appear, and leading/trailing blanks are trimmed.
pub fn build_lines(project: &Project, blocks: &[LayoutBlock]) -> Vec<String> {
    fn push_wrapped(lines: &mut Vec<String>, text: &str) {
        lines.extend(wrap_text(text, MAX_LINE_CHARS));
    }

    let mut lines: Vec<String> = Vec::new();

    if !project.title.trim().is_empty() {
        push_wrapped(&mut lines, &project.title);
        lines.push(String::new());
    }
    if !project.summary.trim().is_empty() {
        push_wrapped(&mut lines, &project.summary);
        lines.push(String::new());
    }

    if let Some(status) = project.status.as_deref() {
        lines.push(format!("Status: {}", status));
    }
    if let Some(role) = project.role.as_deref() {
        lines.push(format!("Role: {}", role));
    }
    if !project.tags.is_empty() {
        push_wrapped(&mut lines, &format!("Tags: {}", project.tags.join(", ")));
    }
    if !project.technologies.is_empty() {
        push_wrapped(
            &mut lines,
            &format!("Technologies: {}", project.technologies.join(", ")),
        );
    }
    if let Some(timeframe) = project.timeframe.as_deref() {
        lines.push(format!("Timeframe: {}", timeframe));
    }
    lines.push(String::new());

    if !project.collaborators.is_empty() {
        lines.push("Collaborators:".to_string());
        for name in &project.collaborators {
            lines.push(format!("- {}", name));
        }
        lines.push(String::new());
    }
    if !project.links.is_empty() {
        lines.push("Links:".to_string());
        for link in &project.links {
            push_wrapped(&mut lines, &format!("- {}: {}", link.label, link.url));
        }
        lines.push(String::new());
    }

    let sections = [
        ("The Problem", &project.problem),
        ("The Solution", &project.solution),
        ("Outcomes & Impact", &project.outcomes),
    ];
    for (heading, body) in sections {
        if !body.trim().is_empty() {
            lines.push(heading.to_string());
            push_wrapped(&mut lines, body);
            lines.push(String::new());
        }
    }

    if !project.metrics.is_empty() {
        lines.push("Metrics:".to_string());
        for metric in &project.metrics {
            lines.push(format!("- {}: {}", metric.label, metric.value));
        }
        lines.push(String::new());
    }
    if !project.awards.is_empty() {
        lines.push("Awards:".to_string());
        for award in &project.awards {
            lines.push(format!("- {}", award));
        }
        lines.push(String::new());
    }

    if !blocks.is_empty() {
        lines.push("Layout Overview:".to_string());
        for (i, block) in blocks.iter().enumerate() {
            push_wrapped(&mut lines, &format!("{}. {}", i + 1, block_summary(project, block)));
        }
        lines.push(String::new());
    }

    if !project.assets.is_empty() {
        lines.push("Assets:".to_string());
        for asset in &project.assets {
            let name = if asset.name.is_empty() { &asset.id } else { &asset.name };
            push_wrapped(
                &mut lines,
                &format!("- {} ({}, {} bytes)", name, asset.mime_type, asset.size),
            );
        }
    }

    collapse_blanks(lines)
}

/// One-line summary of a block for the layout overview.
fn block_summary(project: &Project, block: &LayoutBlock) -> String {
    let asset_name = |id: Option<&str>| -> Option<String> {
        let asset = project.asset(id?)?;
        Some(if asset.name.is_empty() {
            asset.id.clone()
        } else {
            asset.name.clone()
        })
    };
    match &block.content {
        BlockContent::Hero(h) => match asset_name(h.asset_id.as_deref()) {
            Some(name) => format!("Hero: {} (image: {})", h.title, name),
            None => format!("Hero: {}", h.title),
        },
        BlockContent::Text(t) => match t.heading.as_deref() {
            Some(heading) if !heading.is_empty() => format!("Text: {}", heading),
            _ => {
                let preview: String = t.text.chars().take(60).collect();
                format!("Text: {}", preview)
            },
        },
        BlockContent::Image(img) => {
            let subject = if !img.caption.is_empty() {
                img.caption.clone()
            } else {
                asset_name(img.asset_id.as_deref()).unwrap_or_default()
            };
            format!("Image: {}", subject)
        },
        BlockContent::Gallery(g) => {
            let names: Vec<String> = g
                .items
                .iter()
                .filter_map(|item| asset_name(Some(&item.asset_id)))
                .collect();
            format!("Gallery: {} item(s) ({})", g.items.len(), names.join(", "))
        },
        BlockContent::Video(v) => match asset_name(v.asset_id.as_deref()) {
            Some(name) => format!("Video: {}", name),
            None => "Video".to_string(),
        },
        BlockContent::Metrics(m) => format!("Metrics: {} entr(ies)", m.items.len()),
        BlockContent::Link(l) => format!("Links: {} link(s)", l.links.len()),
    }
}

/// Collapse runs of blank lines and trim blank lines at both ends.
fn collapse_blanks(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let blank = line.trim().is_empty();
        if blank && out.last().map(|l: &String| l.trim().is_empty()).unwrap_or(true) {
            continue;
        }
        out.push(if blank { String::new() } else { line });
    }
    while out.last().map(|l| l.trim().is_empty()).unwrap_or(false) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockSettings, TextContent};
    use crate::project::Metric;
    use proptest::prelude::*;

    #[test]
    fn test_lines_per_page_geometry() {
        // floor((842 - 108) / 16)
        assert_eq!(lines_per_page(), 45);
    }

    #[test]
    fn test_wrap_short_text_unchanged() {
        assert_eq!(wrap_text("hello world", 90), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_respects_max_length() {
        let text = "one two three four five six seven eight nine ten";
        for line in wrap_text(text, 12) {
            assert!(line.chars().count() <= 12, "line too long: {:?}", line);
        }
    }

    #[test]
    fn test_wrap_preserves_paragraph_breaks() {
        let lines = wrap_text("first\n\nsecond", 90);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn test_overlong_word_is_chunked() {
        let word = "a".repeat(25);
        let lines = wrap_text(&word, 10);
        assert_eq!(lines, vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]);
    }

    #[test]
    fn test_paginate_counts() {
        let lines: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
        let pages = paginate(&lines, 45);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 45);
        assert_eq!(pages[2].len(), 10);
        // Concatenating pages reproduces the original list
        let rejoined: Vec<String> = pages.into_iter().flatten().collect();
        assert_eq!(rejoined, lines);
    }

    #[test]
    fn test_paginate_empty_gets_placeholder_page() {
        let pages = paginate(&[], 45);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], vec![PLACEHOLDER_LINE.to_string()]);
    }

    #[test]
    fn test_build_lines_sections_and_collapse() {
        let project = Project {
            title: "Case Study".to_string(),
            summary: "A short summary.".to_string(),
            problem: "Things were slow.".to_string(),
            metrics: vec![Metric {
                label: "p95".to_string(),
                value: "120ms".to_string(),
            }],
            ..Default::default()
        };
        let blocks = vec![LayoutBlock {
            id: "t1".to_string(),
            order: 0,
            settings: BlockSettings::default(),
            content: crate::blocks::BlockContent::Text(TextContent {
                heading: Some("The Problem".to_string()),
                text: "Things were slow.".to_string(),
            }),
        }];
        let lines = build_lines(&project, &blocks);

        assert_eq!(lines[0], "Case Study");
        assert!(lines.contains(&"The Problem".to_string()));
        assert!(lines.contains(&"- p95: 120ms".to_string()));
        assert!(lines.contains(&"Layout Overview:".to_string()));
        assert!(lines.contains(&"1. Text: The Problem".to_string()));

        // No leading/trailing blanks, no double blanks
        assert!(!lines.first().unwrap().is_empty());
        assert!(!lines.last().unwrap().is_empty());
        for pair in lines.windows(2) {
            assert!(!(pair[0].is_empty() && pair[1].is_empty()));
        }
    }

    #[test]
    fn test_build_lines_empty_project() {
        let lines = build_lines(&Project::default(), &[]);
        assert!(lines.is_empty());
    }

    proptest! {
        #[test]
        fn prop_wrap_never_exceeds_max_for_spaced_text(
            words in proptest::collection::vec("[a-z]{1,8}", 0..64),
            max in 10usize..120
        ) {
            let text = words.join(" ");
            for line in wrap_text(&text, max) {
                prop_assert!(line.chars().count() <= max);
            }
        }

        #[test]
        fn prop_pagination_roundtrip(
            lines in proptest::collection::vec("[a-z ]{0,20}", 1..200),
            per_page in 1usize..50
        ) {
            let lines: Vec<String> = lines;
            let pages = paginate(&lines, per_page);
            prop_assert_eq!(pages.len(), lines.len().div_ceil(per_page));
            let rejoined: Vec<String> = pages.into_iter().flatten().collect();
            prop_assert_eq!(rejoined, lines);
        }
    }
}
