use crate::markup::classify::BOLD_DELIMITER;
use crate::model::{Font, FontStyle};

/// Width of `text` set in `font`, in points.
pub trait TextMeasure {
    fn measure(&self, text: &str, font: Font) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, Font) -> f32,
{
    fn measure(&self, text: &str, font: Font) -> f32 {
        self(text, font)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub style: FontStyle,
}

/// Split a line on paired `**` delimiters. Text between the first and second
/// delimiter is bold, between the second and third plain, and so on. An
/// unpaired trailing delimiter is kept as literal text.
pub fn split_bold(line: &str) -> Vec<Span<'_>> {
    let mut toggles = line.matches(BOLD_DELIMITER).count() / 2 * 2;
    let mut spans = Vec::new();
    let mut style = FontStyle::Normal;
    let mut rest = line;

    while toggles > 0 {
        let Some(idx) = rest.find(BOLD_DELIMITER) else {
            break;
        };
        if idx > 0 {
            spans.push(Span {
                text: &rest[..idx],
                style,
            });
        }
        rest = &rest[idx + BOLD_DELIMITER.len()..];
        style = FontStyle::from_bold(!style.is_bold());
        toggles -= 1;
    }
    if !rest.is_empty() {
        spans.push(Span { text: rest, style });
    }
    spans
}

/// Whitespace runs and words, in order, so that joining them gives back `text`.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let ws = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != ws)
            .map_or(rest.len(), |(i, _)| i);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub text: String,
    pub style: FontStyle,
    /// Offset from the column start.
    pub x: f32,
    pub width: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WrappedLine {
    pub segments: Vec<Segment>,
    pub width: f32,
}

impl WrappedLine {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn has_ink(&self) -> bool {
        self.segments.iter().any(|s| !s.text.trim().is_empty())
    }

    fn push(&mut self, token: &str, style: FontStyle, width: f32) {
        match self.segments.last_mut() {
            Some(seg) if seg.style == style => {
                seg.text.push_str(token);
                seg.width += width;
            }
            _ => self.segments.push(Segment {
                text: token.to_string(),
                style,
                x: self.width,
                width,
            }),
        }
        self.width += width;
    }
}

/// Greedily wrap a line of markup into a column. Whitespace never starts a new
/// line; a word wider than the column is placed alone (forced overflow).
pub fn wrap(
    line: &str,
    font: Font,
    column_width: f32,
    measure: &dyn TextMeasure,
) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut current = WrappedLine::default();

    for span in split_bold(line) {
        let span_font = font.with_style(span.style);
        for token in tokens(span.text) {
            let width = measure.measure(token, span_font);
            let is_word = !token.trim().is_empty();
            if is_word && current.has_ink() && current.width + width > column_width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(token, span.style, width);
        }
    }
    if !current.segments.is_empty() {
        lines.push(current);
    }
    lines
}

/// Plain wrapping with whitespace collapsed to single spaces.
pub fn split_to_size(text: &str, font: Font, width: f32, measure: &dyn TextMeasure) -> Vec<String> {
    split_hanging(text, font, width, width, measure)
}

/// Like [`split_to_size`], with a narrower first line for text that follows a
/// label on the same row.
pub fn split_hanging(
    text: &str,
    font: Font,
    first_width: f32,
    width: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let limit = if lines.is_empty() { first_width } else { width };
        let candidate = format!("{current} {word}");
        if measure.measure(&candidate, font) > limit {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_keep_whitespace_runs() {
        let toks: Vec<&str> = tokens("  a  bc d ").collect();
        assert_eq!(toks, ["  ", "a", "  ", "bc", " ", "d", " "]);
    }

    #[test]
    fn unpaired_delimiter_stays_literal() {
        let spans = split_bold("**Lead** engineer **x");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].style, FontStyle::Bold);
        assert_eq!(spans[1].text, " engineer **x");
        assert_eq!(spans[1].style, FontStyle::Normal);
    }
}
