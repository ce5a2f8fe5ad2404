//! PDF document assembly.
//!
//! Builds the fixed object graph the export needs: one shared Helvetica
//! font, one Page plus Contents stream per text page, a Pages node, the
//! Catalog, and an Info dictionary. Objects are written in ascending id
//! order while their byte offsets are recorded against the output buffer,
//! then the xref table, trailer, and `startxref` close the file. Every
//! xref offset must match the byte where its object starts exactly, or
//! conformant readers reject the file.

use super::object::{self, Object};
use super::text;
use crate::blocks::LayoutBlock;
use crate::error::Result;
use crate::project::Project;
use bytes::Bytes;
use std::io::Write;

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;
const FONT_ID: u32 = 3;
const INFO_ID: u32 = 4;
/// Page objects start here; each page takes two ids (page, contents).
const FIRST_PAGE_ID: u32 = 5;

/// Build the complete PDF byte buffer for a normalized project.
pub fn build_pdf(project: &Project, blocks: &[LayoutBlock]) -> Result<Vec<u8>> {
    let lines = text::build_lines(project, blocks);
    let pages = text::paginate(&lines, text::lines_per_page());
    log::debug!("pdf: {} line(s) across {} page(s)", lines.len(), pages.len());

    let mut objects: Vec<(u32, Object)> = Vec::with_capacity(4 + pages.len() * 2);

    objects.push((
        CATALOG_ID,
        Object::dict(vec![
            ("Type", Object::name("Catalog")),
            ("Pages", Object::Reference(PAGES_ID)),
        ]),
    ));

    let kids: Vec<Object> = (0..pages.len())
        .map(|i| Object::Reference(FIRST_PAGE_ID + 2 * i as u32))
        .collect();
    objects.push((
        PAGES_ID,
        Object::dict(vec![
            ("Type", Object::name("Pages")),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(pages.len() as i64)),
        ]),
    ));

    objects.push((
        FONT_ID,
        Object::dict(vec![
            ("Type", Object::name("Font")),
            ("Subtype", Object::name("Type1")),
            ("BaseFont", Object::name("Helvetica")),
        ]),
    ));

    let title = if project.title.trim().is_empty() {
        "Untitled project".to_string()
    } else {
        project.title.clone()
    };
    objects.push((
        INFO_ID,
        Object::dict(vec![
            ("Title", Object::string(&title)),
            (
                "Producer",
                Object::string(&format!("{} {}", crate::NAME, crate::VERSION)),
            ),
        ]),
    ));

    for (i, page_lines) in pages.iter().enumerate() {
        let page_id = FIRST_PAGE_ID + 2 * i as u32;
        let contents_id = page_id + 1;

        objects.push((
            page_id,
            Object::dict(vec![
                ("Type", Object::name("Page")),
                ("Parent", Object::Reference(PAGES_ID)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(text::PAGE_WIDTH as i64),
                        Object::Integer(text::PAGE_HEIGHT as i64),
                    ]),
                ),
                (
                    "Resources",
                    Object::dict(vec![(
                        "Font",
                        Object::dict(vec![("F1", Object::Reference(FONT_ID))]),
                    )]),
                ),
                ("Contents", Object::Reference(contents_id)),
            ]),
        ));
        objects.push((
            contents_id,
            Object::Stream {
                dict: Default::default(),
                data: Bytes::from(content_stream(page_lines)),
            },
        ));
    }

    serialize_document(&objects)
}

/// Build the text-showing operator sequence for one page of lines.
fn content_stream(lines: &[String]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"BT\n");
    out.extend_from_slice(format!("/F1 {} Tf\n", text::FONT_SIZE).as_bytes());
    out.extend_from_slice(format!("{} TL\n", text::LINE_HEIGHT).as_bytes());
    out.extend_from_slice(
        format!("{} {} Td\n", text::MARGIN, text::PAGE_HEIGHT - text::MARGIN).as_bytes(),
    );
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.extend_from_slice(b"T*\n");
        }
        object::write_string(&mut out, line.as_bytes());
        out.extend_from_slice(b" Tj\n");
    }
    out.extend_from_slice(b"ET");
    out
}

/// Write header, body, xref, and trailer, recording exact byte offsets.
fn serialize_document(objects: &[(u32, Object)]) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    writeln!(out, "%PDF-1.4")?;
    // Binary marker so transports treat the file as binary
    out.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

    let mut offsets: Vec<usize> = Vec::with_capacity(objects.len());
    for (id, obj) in objects {
        offsets.push(out.len());
        out.extend_from_slice(&obj.serialize_indirect(*id));
    }

    let xref_start = out.len();
    let size = objects.len() + 1;
    writeln!(out, "xref")?;
    writeln!(out, "0 {}", size)?;
    writeln!(out, "0000000000 65535 f ")?;
    for offset in &offsets {
        writeln!(out, "{:010} 00000 n ", offset)?;
    }

    let trailer = Object::dict(vec![
        ("Size", Object::Integer(size as i64)),
        ("Root", Object::Reference(CATALOG_ID)),
        ("Info", Object::Reference(INFO_ID)),
    ]);
    writeln!(out, "trailer")?;
    out.extend_from_slice(&trailer.serialize());
    writeln!(out)?;
    writeln!(out, "startxref")?;
    writeln!(out, "{}", xref_start)?;
    write!(out, "%%EOF")?;
    Ok(out)
}
