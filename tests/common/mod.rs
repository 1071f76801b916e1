#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use std::{fs, io};

use resume_pdf::LayoutConfig;
use resume_pdf::model::{Document, DrawOp, Font, FontStyle};

/// Every char is half an em wide, whatever the weight.
pub fn fixed_width(text: &str, font: Font) -> f32 {
    text.chars().count() as f32 * font.size * 0.5
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture readable")
}

pub fn layout(text: &str) -> Document {
    layout_with(text, &LayoutConfig::default())
}

pub fn layout_with(text: &str, config: &LayoutConfig) -> Document {
    resume_pdf::layout_resume(&resume_pdf::parse(text), config, &fixed_width)
}

/// Scratch directory under the system temp dir, unique per call.
pub fn scratch_dir(tag: &str) -> io::Result<PathBuf> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let dir = std::env::temp_dir().join(format!(
        "resume-pdf-{tag}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run<'a> {
    pub page: usize,
    pub text: &'a str,
    pub style: FontStyle,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub color: Option<[u8; 3]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link<'a> {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub url: &'a str,
}

pub fn text_runs(doc: &Document) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    for (page, p) in doc.pages.iter().enumerate() {
        for op in &p.ops {
            if let DrawOp::TextRun {
                text,
                style,
                size,
                x,
                y,
                color,
            } = op
            {
                runs.push(Run {
                    page,
                    text,
                    style: *style,
                    size: *size,
                    x: *x,
                    y: *y,
                    color: *color,
                });
            }
        }
    }
    runs
}

pub fn links(doc: &Document) -> Vec<Link<'_>> {
    doc.links()
        .filter_map(|(page, op)| match op {
            DrawOp::LinkRect { x, y, w, h, url } => Some(Link {
                page,
                x: *x,
                y: *y,
                w: *w,
                h: *h,
                url,
            }),
            _ => None,
        })
        .collect()
}

/// First run whose trimmed text equals `text`.
pub fn find_run<'a>(runs: &'a [Run<'a>], text: &str) -> &'a Run<'a> {
    runs.iter()
        .find(|r| r.text.trim() == text)
        .unwrap_or_else(|| panic!("no text run {text:?}"))
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}
