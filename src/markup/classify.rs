pub const BOLD_DELIMITER: &str = "**";

const BULLET_GLYPHS: [char; 3] = ['•', '-', '*'];

/// Headings the generator is instructed to emit. Anything else that looks like
/// a heading is still accepted by the uppercase heuristic.
pub const KNOWN_HEADINGS: &[&str] = &[
    "PROFESSIONAL SUMMARY",
    "TOOLS & TECHNOLOGIES",
    "PROFESSIONAL EXPERIENCE",
    "PROJECTS",
    "VOLUNTEER EXPERIENCE",
    "VOLUNTEERING",
    "EDUCATION",
    "CERTIFICATIONS",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading,
    /// `**Title**`; `title` is the text between the outer delimiters.
    BoldTitle { title: &'a str },
    PipeRow { fields: Vec<&'a str> },
    KeyValue { key: &'a str, value: &'a str },
    /// Bullet glyph stripped, leading whitespace trimmed.
    Bulleted { text: &'a str },
    Plain,
}

type Rule = for<'a> fn(&'a str) -> Option<LineKind<'a>>;

pub const RULES: [(&str, Rule); 5] = [
    ("heading", heading),
    ("bold-title", bold_title),
    ("pipe-row", pipe_row),
    ("key-value", key_value),
    ("bulleted", bulleted),
];

/// Rules are tried in the order of [`RULES`]; the first match wins and
/// [`LineKind::Plain`] catches the rest.
pub fn classify(line: &str) -> LineKind<'_> {
    RULES
        .iter()
        .find_map(|(_, rule)| rule(line))
        .unwrap_or(LineKind::Plain)
}

pub fn is_heading(line: &str) -> bool {
    if KNOWN_HEADINGS.contains(&line) {
        return true;
    }
    let len = line.chars().count();
    (3..50).contains(&len)
        && line
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace() || c == '&')
}

/// True when the line carries a web address (`http://`, `https://`, `www.`).
pub fn has_url(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.contains("http://") || lower.contains("https://") || lower.contains("www.")
}

/// Remove leading bullet glyphs and whitespace, stopping at a `**` delimiter.
pub fn strip_bullet(line: &str) -> &str {
    let mut rest = line.trim_start();
    while !rest.starts_with(BOLD_DELIMITER) {
        match rest.strip_prefix(BULLET_GLYPHS) {
            Some(r) => rest = r.trim_start(),
            None => break,
        }
    }
    rest
}

/// Drop every bold delimiter, for text that is drawn in a single style.
pub fn strip_bold_markers(text: &str) -> String {
    text.replace(BOLD_DELIMITER, "")
}

fn heading(line: &str) -> Option<LineKind<'_>> {
    is_heading(line).then_some(LineKind::Heading)
}

fn bold_title(line: &str) -> Option<LineKind<'_>> {
    if line.len() <= BOLD_DELIMITER.len() * 2 {
        return None;
    }
    let title = line
        .strip_prefix(BOLD_DELIMITER)?
        .strip_suffix(BOLD_DELIMITER)?;
    Some(LineKind::BoldTitle {
        title: title.trim(),
    })
}

fn pipe_row(line: &str) -> Option<LineKind<'_>> {
    if !line.contains('|') || has_url(line) {
        return None;
    }
    Some(LineKind::PipeRow {
        fields: line.split('|').map(str::trim).collect(),
    })
}

fn key_value(line: &str) -> Option<LineKind<'_>> {
    let (key, value) = line.split_once(':')?;
    Some(LineKind::KeyValue {
        key: key.trim(),
        value: value.trim(),
    })
}

fn bulleted(line: &str) -> Option<LineKind<'_>> {
    if line.starts_with(BOLD_DELIMITER) {
        return None;
    }
    let rest = line.strip_prefix(BULLET_GLYPHS)?;
    Some(LineKind::Bulleted {
        text: rest.trim_start(),
    })
}
