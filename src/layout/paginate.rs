use crate::model::{Document, DrawOp, Font, Page, PageGeometry};

/// Position of the next baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

/// Vertical flow of placed content across pages.
///
/// Every placement goes through one of two checks: [`Paginator::ensure_line`]
/// for a single line of flowing text, or [`Paginator::reserve`] for a block
/// that must not be split. Both break to a fresh page when the content would
/// pass the bottom boundary.
pub struct Paginator {
    geometry: PageGeometry,
    line_height: f32,
    pages: Vec<Page>,
    y: f32,
}

impl Paginator {
    pub fn new(geometry: PageGeometry, line_height: f32) -> Self {
        let mut pager = Self {
            geometry,
            line_height,
            pages: Vec::new(),
            y: geometry.content_top(),
        };
        pager.push_page();
        pager
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn cursor(&self) -> Cursor {
        Cursor {
            page: self.pages.len() - 1,
            y: self.y,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.geometry.content_bottom()
    }

    pub fn at_page_top(&self) -> bool {
        self.y <= self.geometry.content_top()
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.bottom()
    }

    /// Keep a block of `height` together. Returns whether it fit where the
    /// cursor was; otherwise the page has been broken first. A block taller
    /// than a page is placed from the top of a fresh page and may overflow.
    pub fn reserve(&mut self, height: f32) -> bool {
        if self.fits(height) {
            return true;
        }
        if !self.at_page_top() {
            self.break_page();
        }
        false
    }

    pub fn ensure_line(&mut self) {
        self.reserve(self.line_height);
    }

    pub fn break_page(&mut self) {
        self.push_page();
        self.y = self.geometry.content_top();
        log::debug!("Page break -> page {}", self.pages.len());
    }

    fn push_page(&mut self) {
        let g = &self.geometry;
        let b = g.border();
        let (left, top, right, bottom) = (b.x, b.y, b.x + b.width, b.y + b.height);
        let edge = |x1, y1, x2, y2| DrawOp::Rule {
            x1,
            y1,
            x2,
            y2,
            gray: 0,
        };
        self.pages.push(Page {
            width: g.width,
            height: g.height,
            margin: g.content_margin(),
            border: b,
            ops: vec![
                edge(left, top, right, top),
                edge(right, top, right, bottom),
                edge(right, bottom, left, bottom),
                edge(left, bottom, left, top),
            ],
        });
    }

    fn ops(&mut self) -> &mut Vec<DrawOp> {
        let idx = self.pages.len() - 1;
        &mut self.pages[idx].ops
    }

    /// Draw at the current baseline without moving the cursor.
    pub fn text(&mut self, text: &str, x: f32, font: Font, color: Option<[u8; 3]>) {
        let y = self.y;
        self.text_at(text, x, y, font, color);
    }

    pub fn text_at(&mut self, text: &str, x: f32, y: f32, font: Font, color: Option<[u8; 3]>) {
        if text.trim().is_empty() {
            return;
        }
        self.ops().push(DrawOp::TextRun {
            text: text.to_string(),
            style: font.style,
            size: font.size,
            x,
            y,
            color,
        });
    }

    /// One line of flowing text. Returns the cursor after the line.
    pub fn place_line(&mut self, text: &str, x: f32, font: Font) -> f32 {
        self.ensure_line();
        self.text(text, x, font, None);
        self.newline();
        self.y
    }

    pub fn newline(&mut self) {
        self.advance(self.line_height);
    }

    /// Move down by `dy`, never past the bottom boundary.
    pub fn advance(&mut self, dy: f32) {
        self.y = (self.y + dy).min(self.bottom());
    }

    /// Vertical whitespace between blocks; dropped at the top of a page.
    pub fn gap(&mut self, dy: f32) {
        if !self.at_page_top() {
            self.advance(dy);
        }
    }

    pub fn rule(&mut self, x1: f32, x2: f32, gray: u8) {
        let y = self.y;
        self.ops().push(DrawOp::Rule {
            x1,
            y1: y,
            x2,
            y2: y,
            gray,
        });
    }

    /// Clickable area over text drawn at `baseline`, sized for `height`-point
    /// lettering.
    pub fn link_at(&mut self, x: f32, baseline: f32, width: f32, height: f32, url: &str) {
        self.ops().push(DrawOp::LinkRect {
            x,
            y: baseline - height * 5.0 / 6.0,
            w: width,
            h: height,
            url: url.to_string(),
        });
    }

    pub fn finish(self) -> Document {
        Document { pages: self.pages }
    }
}
