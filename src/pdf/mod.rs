use std::collections::BTreeSet;

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::fonts::FontSet;
use crate::model::{Document, DrawOp, Page};

const RULE_WIDTH: f32 = 0.5;

/// Glyphs layout draws on its own: bullets, list numbers and fixed labels.
const LAYOUT_CHARS: &str =
    "\u{2022}0123456789. :LinkedIn Profile GitHub Profile Portfolio Link Business Problem Technology Stack";

/// Every char that may be drawn for `text`, for font subsetting.
pub(crate) fn used_chars(text: &str) -> BTreeSet<char> {
    text.chars()
        .chain(LAYOUT_CHARS.chars())
        .filter(|c| !c.is_control())
        .collect()
}

pub(crate) fn render(doc: &Document, fonts: &FontSet) -> Vec<u8> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();

    let font_refs = fonts.write(&mut pdf, &mut alloc);
    let t_fonts = t0.elapsed();

    let n = doc.pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    let mut link_count = 0usize;
    for (i, page) in doc.pages.iter().enumerate() {
        let annot_refs: Vec<Ref> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::LinkRect { x, y, w, h, url } => {
                    let annot_ref = alloc();
                    let rect = Rect::new(*x, page.height - (y + h), x + w, page.height - y);
                    let mut annot = pdf.annotation(annot_ref);
                    annot
                        .subtype(AnnotationType::Link)
                        .rect(rect)
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(ActionType::Uri)
                        .uri(Str(url.as_bytes()));
                    Some(annot_ref)
                }
                _ => None,
            })
            .collect();
        link_count += annot_refs.len();

        let compressed = page_content(page, fonts);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);

        let mut page_writer = pdf.page(page_ids[i]);
        page_writer
            .media_box(Rect::new(0.0, 0.0, page.width, page.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        if !annot_refs.is_empty() {
            page_writer.annotations(annot_refs.iter().copied());
        }
        let mut resources = page_writer.resources();
        let mut font_dict = resources.fonts();
        for (style, font_ref) in &font_refs {
            font_dict.pair(Name(FontSet::resource_name(*style).as_bytes()), *font_ref);
        }
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    log::info!(
        "Render phases: font_embed={:.1}ms, pages={:.1}ms ({} pages, {} links)",
        t_fonts.as_secs_f64() * 1000.0,
        (t0.elapsed() - t_fonts).as_secs_f64() * 1000.0,
        n,
        link_count,
    );

    pdf.finish()
}

/// Flate-compressed content stream for one page. Layout works top-down, PDF
/// bottom-up, so every y is flipped against the page height.
fn page_content(page: &Page, fonts: &FontSet) -> Vec<u8> {
    let mut content = Content::new();
    let flip = |y: f32| page.height - y;

    for op in &page.ops {
        match op {
            DrawOp::Rule {
                x1,
                y1,
                x2,
                y2,
                gray,
            } => {
                content.save_state();
                content.set_line_width(RULE_WIDTH);
                content.set_stroke_gray(*gray as f32 / 255.0);
                content.move_to(*x1, flip(*y1));
                content.line_to(*x2, flip(*y2));
                content.stroke();
                content.restore_state();
            }
            DrawOp::TextRun {
                text,
                style,
                size,
                x,
                y,
                color,
            } => {
                let [r, g, b] = color.unwrap_or([0, 0, 0]);
                content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
                content
                    .begin_text()
                    .set_font(Name(FontSet::resource_name(*style).as_bytes()), *size)
                    .next_line(*x, flip(*y))
                    .show(Str(&fonts.entry(*style).encode(text)))
                    .end_text();
            }
            DrawOp::LinkRect { .. } => {}
        }
    }

    let raw = content.finish();
    miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6)
}
