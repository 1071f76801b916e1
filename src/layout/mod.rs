mod applicant;
pub mod inline;
pub mod links;
pub mod paginate;
mod sections;

use std::time::Instant;

use crate::model::{Document, Font, PageGeometry, Resume};

pub use inline::{Segment, Span, TextMeasure, WrappedLine, split_bold, split_hanging, split_to_size, wrap};
pub use paginate::{Cursor, Paginator};

/// Sizes, spacing and colours for the laid-out resume. The default is the A4
/// layout the generator's resumes were designed for.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub geometry: PageGeometry,
    pub body_size: f32,
    pub name_size: f32,
    pub contact_size: f32,
    /// Line height as a multiple of `body_size`.
    pub line_height_factor: f32,
    /// Offset of bullet text from the column start.
    pub bullet_indent: f32,
    /// Offset of numbered-list text from the column start.
    pub number_indent: f32,
    pub link_color: [u8; 3],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            body_size: 12.0,
            name_size: 16.0,
            contact_size: 11.0,
            line_height_factor: 1.15 * 0.95,
            bullet_indent: 15.0,
            number_indent: 20.0,
            link_color: [25, 118, 210],
        }
    }
}

impl LayoutConfig {
    pub fn line_height(&self) -> f32 {
        self.body_size * self.line_height_factor
    }
}

/// State threaded through every renderer for one layout run.
pub(crate) struct LayoutContext<'a> {
    pub(crate) config: &'a LayoutConfig,
    pub(crate) measure: &'a dyn TextMeasure,
    pub(crate) pager: Paginator,
}

impl<'a> LayoutContext<'a> {
    fn new(config: &'a LayoutConfig, measure: &'a dyn TextMeasure) -> Self {
        Self {
            config,
            measure,
            pager: Paginator::new(config.geometry, config.line_height()),
        }
    }

    pub(crate) fn body_font(&self) -> Font {
        Font::regular(self.config.body_size)
    }

    pub(crate) fn left(&self) -> f32 {
        self.config.geometry.content_left()
    }

    pub(crate) fn right(&self) -> f32 {
        self.config.geometry.content_right()
    }

    pub(crate) fn text_width(&self) -> f32 {
        self.config.geometry.text_width()
    }

    pub(crate) fn line_height(&self) -> f32 {
        self.pager.line_height()
    }
}

pub fn layout_resume(resume: &Resume, config: &LayoutConfig, measure: &dyn TextMeasure) -> Document {
    let t0 = Instant::now();
    let mut ctx = LayoutContext::new(config, measure);

    if resume.header.name.is_some() {
        applicant::render(&mut ctx, &resume.header);
    }
    for section in &resume.sections {
        sections::render_section(&mut ctx, section);
    }

    let doc = ctx.pager.finish();
    log::info!(
        "Layout: {} sections -> {} pages in {:.1}ms",
        resume.sections.len(),
        doc.pages.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    doc
}
