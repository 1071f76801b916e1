use super::LayoutContext;
use super::inline::{TextMeasure, split_to_size};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkPair {
    pub label: String,
    /// Absolute target; `www.` hosts are given an `https://` scheme.
    pub url: String,
}

/// A line of exactly two `|`-separated parts whose second part is a web
/// address.
pub fn parse_link_pair(line: &str) -> Option<LinkPair> {
    let mut parts = line.split('|').map(str::trim);
    let (label, target) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(LinkPair {
        label: label.to_string(),
        url: normalize_url(target)?,
    })
}

pub fn normalize_url(target: &str) -> Option<String> {
    let lower = target.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(target.to_string())
    } else if lower.starts_with("www.") {
        Some(format!("https://{target}"))
    } else {
        None
    }
}

/// Profile addresses from the header block are often written without a scheme.
pub fn absolute_url(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}

pub fn mailto(address: &str) -> String {
    format!("mailto:{address}")
}

/// Place a wrapped link label at `x` in a column of `width`. Only the first
/// wrapped line carries a link rectangle. `marker` is drawn beside the first
/// line (a bullet glyph or list number) at its own x.
pub(crate) fn place_link(
    ctx: &mut LayoutContext<'_>,
    label: &str,
    url: &str,
    x: f32,
    width: f32,
    marker: Option<(&str, f32)>,
) {
    let font = ctx.body_font();
    let label = if label.trim().is_empty() { url } else { label };
    let color = Some(ctx.config.link_color);

    for (i, line) in split_to_size(label, font, width, ctx.measure)
        .iter()
        .enumerate()
    {
        ctx.pager.ensure_line();
        if i == 0 {
            if let Some((glyph, marker_x)) = marker {
                ctx.pager.text(glyph, marker_x, font, None);
            }
            ctx.pager.text(line, x, font, color);
            let baseline = ctx.pager.y();
            let w = ctx.measure.measure(line, font);
            ctx.pager.link_at(x, baseline, w, font.size, url);
        } else {
            ctx.pager.text(line, x, font, color);
        }
        ctx.pager.newline();
    }
}
