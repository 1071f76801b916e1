pub mod layout;
pub mod markup;
pub mod model;

mod error;
mod fonts;
mod pdf;

pub use error::Error;
pub use fonts::{DEFAULT_FAMILY, FONTS_ENV, FontConfig};
pub use layout::{LayoutConfig, TextMeasure, layout_resume};
pub use markup::{parse, suggested_filename};

use std::path::Path;
use std::time::Instant;

use fonts::FontSet;
use model::Document;

/// Read a resume text file, rejecting input that is not UTF-8.
pub fn read_resume_text(path: &Path) -> Result<String, Error> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|e| Error::InvalidText(format!("{}: {e}", path.display())))
}

/// Parse and lay out `text`, measuring with the faces `font_config` resolves to.
pub fn layout_text(text: &str, config: &LayoutConfig, font_config: &FontConfig) -> Document {
    let fonts = FontSet::load(font_config, &pdf::used_chars(text));
    layout_resume(&parse(text), config, &fonts)
}

/// Render generated resume text to PDF bytes.
pub fn render_resume(
    text: &str,
    config: &LayoutConfig,
    font_config: &FontConfig,
) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();

    let fonts = FontSet::load(font_config, &pdf::used_chars(text));
    let t_fonts = t0.elapsed();

    let resume = parse(text);
    let doc = layout_resume(&resume, config, &fonts);
    let t_layout = t0.elapsed();

    let bytes = pdf::render(&doc, &fonts);
    log::info!(
        "Timing: fonts={:.1}ms, layout={:.1}ms, render={:.1}ms ({} pages)",
        t_fonts.as_secs_f64() * 1000.0,
        (t_layout - t_fonts).as_secs_f64() * 1000.0,
        (t0.elapsed() - t_layout).as_secs_f64() * 1000.0,
        doc.pages.len(),
    );
    Ok(bytes)
}

pub fn convert_text_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    convert_text_to_pdf_with(input, output, &LayoutConfig::default(), &FontConfig::default())
}

pub fn convert_text_to_pdf_with(
    input: &Path,
    output: &Path,
    config: &LayoutConfig,
    font_config: &FontConfig,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let text = read_resume_text(input)?;
    let t_read = t0.elapsed();

    let bytes = render_resume(&text, config, font_config)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: read={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_read.as_secs_f64() * 1000.0,
        (t_render - t_read).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
