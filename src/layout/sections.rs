use crate::markup::classify::strip_bold_markers;
use crate::markup::{BUSINESS_PROBLEM, TECHNOLOGY_STACK};
use crate::model::{
    BusinessProblem, CertificationItem, EducationRow, EntryRecord, Font, ProjectItem,
    SectionBody, SectionRecord,
};

use super::LayoutContext;
use super::inline::{TextMeasure, split_hanging, split_to_size, wrap};
use super::links::{parse_link_pair, place_link};

const BULLET: &str = "\u{2022}";
const BULLET_OFFSET: f32 = 2.0;

const HEADING_GAP: f32 = 0.5; // before a heading, in line heights
const HEADING_ADVANCE: f32 = 1.2;
const BLOCK_GAP: f32 = 0.2; // after job headers, problem lines, titles, education rows
const ENTRY_GAP: f32 = 0.5; // after a Technology Stack line

const COMPANY_SHARE: f32 = 0.7;
const DATES_SHARE: f32 = 0.3;
const COLUMN_GUTTER: f32 = 5.0;

pub(super) fn render_section(ctx: &mut LayoutContext<'_>, section: &SectionRecord) {
    log::debug!(
        "Section {:?} ({:?}): {} lines",
        section.heading,
        section.kind,
        section.raw_lines.len()
    );
    if !section.heading.is_empty() {
        let lead = lead_height(ctx, &section.body);
        heading(ctx, &section.heading, lead);
    }

    let left = ctx.left();
    let width = ctx.text_width();
    match &section.body {
        SectionBody::Paragraphs(lines) => {
            for line in lines {
                place_formatted(ctx, line, left, width, None);
            }
        }
        SectionBody::Experience(entries) => {
            for entry in entries {
                render_entry(ctx, entry);
            }
        }
        SectionBody::Projects(items) => {
            for item in items {
                render_project(ctx, item);
            }
        }
        SectionBody::Education(rows) => {
            for row in rows {
                render_education_row(ctx, row);
            }
        }
        SectionBody::Certifications(items) => {
            for (i, item) in items.iter().enumerate() {
                render_certification(ctx, i + 1, item);
            }
        }
        SectionBody::List(items) => {
            for item in items {
                place_bullet(ctx, item, false);
            }
        }
    }
}

/// Bold heading, kept on the same page as the first `lead` points of its body.
fn heading(ctx: &mut LayoutContext<'_>, text: &str, lead: f32) {
    let lh = ctx.line_height();
    ctx.pager.gap(lh * HEADING_GAP);
    ctx.pager.reserve(lh * HEADING_ADVANCE + lead);
    let font = Font::bold(ctx.config.body_size);
    let left = ctx.left();
    ctx.pager.text(text, left, font, None);
    ctx.pager.advance(lh * HEADING_ADVANCE);
}

/// Height of the first block of `body` that is placed as one unit.
fn lead_height(ctx: &LayoutContext<'_>, body: &SectionBody) -> f32 {
    let lh = ctx.line_height();
    let rows = match body {
        SectionBody::Experience(entries) => entries
            .first()
            .map(|entry| {
                let role = strip_bold_markers(&entry.role_line);
                JobHeaderLines::new(ctx, &entry.header.company, entry.header.dates.as_deref(), &role)
                    .rows()
            })
            .unwrap_or(1),
        SectionBody::Education(rows) => rows
            .first()
            .and_then(|row| education_columns(ctx, row))
            .map(|columns| column_rows(&columns))
            .unwrap_or(1),
        SectionBody::Projects(items) => items
            .first()
            .and_then(|item| item.title.as_ref())
            .map(|title| title_lines(ctx, title).len() + 1)
            .unwrap_or(1),
        _ => 1,
    };
    rows.max(1) as f32 * lh
}

/// Markup text wrapped into a column, with an optional marker (bullet glyph or
/// list number) beside the first line.
fn place_formatted(
    ctx: &mut LayoutContext<'_>,
    text: &str,
    x: f32,
    width: f32,
    marker: Option<(&str, f32)>,
) {
    let font = ctx.body_font();
    for (i, line) in wrap(text, font, width, ctx.measure).iter().enumerate() {
        ctx.pager.ensure_line();
        if i == 0
            && let Some((glyph, marker_x)) = marker
        {
            ctx.pager.text(glyph, marker_x, font, None);
        }
        for seg in &line.segments {
            ctx.pager
                .text(&seg.text, x + seg.x, font.with_style(seg.style), None);
        }
        ctx.pager.newline();
    }
}

/// Single-style text wrapped into a column, one flowing line at a time.
fn place_plain(ctx: &mut LayoutContext<'_>, text: &str, x: f32, width: f32, font: Font) {
    for line in split_to_size(text, font, width, ctx.measure) {
        ctx.pager.place_line(&line, x, font);
    }
}

fn place_bullet(ctx: &mut LayoutContext<'_>, text: &str, link_aware: bool) {
    let left = ctx.left();
    let indent = ctx.config.bullet_indent;
    let width = ctx.text_width() - indent;
    let marker = Some((BULLET, left + BULLET_OFFSET));

    if link_aware && let Some(link) = parse_link_pair(text) {
        let label = strip_bold_markers(&link.label);
        place_link(ctx, &label, &link.url, left + indent, width, marker);
        return;
    }
    place_formatted(ctx, text, left + indent, width, marker);
}

/// Bold `label` followed on the same row by wrapped text; later lines return
/// to the column start. The whole block is kept together.
fn place_labeled(ctx: &mut LayoutContext<'_>, label: &str, text: &str) {
    let text = strip_bold_markers(text);
    if text.trim().is_empty() {
        return;
    }
    let font = ctx.body_font();
    let bold = Font::bold(ctx.config.body_size);
    let left = ctx.left();
    let width = ctx.text_width();
    let label_width = ctx.measure.measure(label, bold) + ctx.measure.measure(" ", font);

    let lines = split_hanging(&text, font, width - label_width, width, ctx.measure);
    let height = lines.len() as f32 * ctx.line_height();
    ctx.pager.reserve(height);

    ctx.pager.text(label, left, bold, None);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            ctx.pager.text(line, left + label_width, font, None);
            ctx.pager.newline();
        } else {
            ctx.pager.place_line(line, left, font);
        }
    }
}

fn render_entry(ctx: &mut LayoutContext<'_>, entry: &EntryRecord) {
    let lh = ctx.line_height();
    let left = ctx.left();
    let width = ctx.text_width();

    let role = strip_bold_markers(&entry.role_line);
    if !entry.header.company.is_empty() || !role.trim().is_empty() {
        job_header(ctx, &entry.header.company, entry.header.dates.as_deref(), &role);
        ctx.pager.gap(lh * BLOCK_GAP);
    }

    if let Some(problem) = &entry.business_problem {
        match problem {
            BusinessProblem::Statement(text) => place_labeled(ctx, BUSINESS_PROBLEM, text),
            BusinessProblem::Unlabeled(text) => {
                let font = ctx.body_font();
                place_plain(ctx, &strip_bold_markers(text), left, width, font)
            }
        }
        ctx.pager.gap(lh * BLOCK_GAP);
    }

    for line in &entry.accomplishments {
        place_bullet(ctx, line, true);
    }

    if let Some(stack) = &entry.tech_stack_line {
        place_labeled(ctx, TECHNOLOGY_STACK, stack);
        ctx.pager.gap(lh * ENTRY_GAP);
    }

    if !entry.trailing_unparsed.is_empty() {
        log::debug!(
            "{} unparsed lines after entry {:?}",
            entry.trailing_unparsed.len(),
            entry.header.company
        );
        ctx.pager.gap(lh * BLOCK_GAP);
        for line in &entry.trailing_unparsed {
            place_formatted(ctx, line, left, width, None);
        }
    }
}

/// Company and right-aligned dates on the first rows, role below.
struct JobHeaderLines {
    company: Vec<String>,
    dates: Vec<String>,
    role: Vec<String>,
}

impl JobHeaderLines {
    fn new(ctx: &LayoutContext<'_>, company: &str, dates: Option<&str>, role: &str) -> Self {
        let bold = Font::bold(ctx.config.body_size);
        let width = ctx.text_width();
        Self {
            company: split_to_size(
                company,
                bold,
                width * COMPANY_SHARE - COLUMN_GUTTER,
                ctx.measure,
            ),
            dates: split_to_size(
                dates.unwrap_or_default(),
                bold,
                width * DATES_SHARE - COLUMN_GUTTER,
                ctx.measure,
            ),
            role: split_to_size(role, bold, width, ctx.measure),
        }
    }

    fn header_rows(&self) -> usize {
        self.company.len().max(self.dates.len())
    }

    fn rows(&self) -> usize {
        self.header_rows() + self.role.len()
    }
}

/// Job header reserved as one block.
fn job_header(ctx: &mut LayoutContext<'_>, company: &str, dates: Option<&str>, role: &str) {
    let bold = Font::bold(ctx.config.body_size);
    let left = ctx.left();
    let right = ctx.right();
    let lines = JobHeaderLines::new(ctx, company, dates, role);

    let height = lines.rows() as f32 * ctx.line_height();
    ctx.pager.reserve(height);

    for j in 0..lines.header_rows() {
        if let Some(line) = lines.company.get(j) {
            ctx.pager.text(line, left, bold, None);
        }
        if let Some(line) = lines.dates.get(j) {
            let w = ctx.measure.measure(line, bold);
            ctx.pager.text(line, right - w, bold, None);
        }
        ctx.pager.newline();
    }
    for line in &lines.role {
        ctx.pager.place_line(line, left, bold);
    }
}

fn render_project(ctx: &mut LayoutContext<'_>, item: &ProjectItem) {
    let lh = ctx.line_height();
    if let Some(title) = &item.title {
        let bold = Font::bold(ctx.config.body_size);
        let left = ctx.left();
        let lines = title_lines(ctx, title);
        // keep the title with its first bullet
        ctx.pager.reserve((lines.len() + 1) as f32 * lh);
        for line in &lines {
            ctx.pager.place_line(line, left, bold);
        }
        ctx.pager.gap(lh * BLOCK_GAP);
    }
    for bullet in &item.bullets {
        place_bullet(ctx, bullet, true);
    }
}

fn title_lines(ctx: &LayoutContext<'_>, title: &str) -> Vec<String> {
    split_to_size(title, Font::bold(ctx.config.body_size), ctx.text_width(), ctx.measure)
}

/// Wrapped institution, degree and years; `None` for a malformed row.
fn education_columns(ctx: &LayoutContext<'_>, row: &EducationRow) -> Option<[Vec<String>; 3]> {
    let EducationRow::Columns {
        institution,
        degree,
        years,
    } = row
    else {
        return None;
    };
    let font = ctx.body_font();
    let column = ctx.text_width() / 3.0;
    Some([institution, degree, years].map(|t| split_to_size(t, font, column, ctx.measure)))
}

fn column_rows(columns: &[Vec<String>; 3]) -> usize {
    columns.iter().map(Vec::len).max().unwrap_or(0)
}

/// Institution, degree and years as left, centred and right-aligned columns.
fn render_education_row(ctx: &mut LayoutContext<'_>, row: &EducationRow) {
    let font = ctx.body_font();
    let lh = ctx.line_height();
    let left = ctx.left();
    let right = ctx.right();

    let Some(columns) = education_columns(ctx, row) else {
        if let EducationRow::Plain(text) = row {
            let width = ctx.text_width();
            place_plain(ctx, text, left, width, font);
        }
        return;
    };

    let center = ctx.config.geometry.width / 2.0;
    let rows = column_rows(&columns);
    ctx.pager.reserve(rows as f32 * lh);

    let top = ctx.pager.y();
    for j in 0..rows {
        let y = top + j as f32 * lh;
        if let Some(line) = columns[0].get(j) {
            ctx.pager.text_at(line, left, y, font, None);
        }
        if let Some(line) = columns[1].get(j) {
            let w = ctx.measure.measure(line, font);
            ctx.pager.text_at(line, center - w / 2.0, y, font, None);
        }
        if let Some(line) = columns[2].get(j) {
            let w = ctx.measure.measure(line, font);
            ctx.pager.text_at(line, right - w, y, font, None);
        }
    }
    ctx.pager.advance(rows as f32 * lh);
    ctx.pager.gap(lh * BLOCK_GAP);
}

fn render_certification(ctx: &mut LayoutContext<'_>, number: usize, item: &CertificationItem) {
    let left = ctx.left();
    let indent = ctx.config.number_indent;
    let width = ctx.text_width() - indent;
    let label = format!("{number}.");
    let marker = Some((label.as_str(), left));

    match &item.url {
        Some(url) => place_link(ctx, &item.label, url, left + indent, width, marker),
        None => {
            let font = ctx.body_font();
            for (i, line) in split_to_size(&item.label, font, width, ctx.measure)
                .iter()
                .enumerate()
            {
                ctx.pager.ensure_line();
                if i == 0 {
                    ctx.pager.text(&label, left, font, None);
                }
                ctx.pager.text(line, left + indent, font, None);
                ctx.pager.newline();
            }
        }
    }
}
