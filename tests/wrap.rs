mod common;

use common::fixed_width;
use resume_pdf::layout::{split_bold, split_hanging, split_to_size, wrap};
use resume_pdf::model::{Font, FontStyle};

const LINES: &[&str] = &[
    "Platform engineer with **eight years** of experience building reliable infrastructure.",
    "**Languages:** Rust, Go, Python, TypeScript",
    "Cut deployment lead time from **four weeks** to **two days** by building a pipeline.",
    "Spaces   are    preserved   between words",
    "**entirely bold line that wraps across several narrow columns**",
    "Trailing unpaired delimiter ** stays literal",
];

/// Each char of `line` paired with the style it should be drawn in.
fn styled_chars(line: &str) -> Vec<(char, FontStyle)> {
    split_bold(line)
        .iter()
        .flat_map(|span| span.text.chars().map(move |c| (c, span.style)))
        .collect()
}

#[test]
fn wrapping_reproduces_text_and_bold_parity() {
    let font = Font::regular(12.0);
    for line in LINES {
        for width in [60.0, 120.0, 250.0, 536.0] {
            let wrapped = wrap(line, font, width, &fixed_width);
            let rebuilt: Vec<(char, FontStyle)> = wrapped
                .iter()
                .flat_map(|l| l.segments.iter())
                .flat_map(|seg| seg.text.chars().map(move |c| (c, seg.style)))
                .collect();
            assert_eq!(rebuilt, styled_chars(line), "{line:?} at width {width}");
        }
    }
}

#[test]
fn paired_delimiters_are_removed() {
    let font = Font::regular(12.0);
    let line = LINES[2];
    let text: String = wrap(line, font, 536.0, &fixed_width)
        .iter()
        .map(|l| l.text())
        .collect();
    assert_eq!(text, line.replace("**", ""));
}

#[test]
fn lines_stay_within_column_unless_single_word() {
    let font = Font::regular(12.0);
    for line in LINES {
        for width in [60.0, 120.0, 250.0] {
            for wl in wrap(line, font, width, &fixed_width) {
                let text = wl.text();
                let ink = text.trim_end();
                assert!(
                    fixed_width(ink, font) <= width || ink.split_whitespace().count() == 1,
                    "{ink:?} overflows {width}"
                );
            }
        }
    }
}

#[test]
fn segments_are_positioned_by_measured_width() {
    let font = Font::regular(12.0);
    let wrapped = wrap("**Bold** then plain", font, 536.0, &fixed_width);
    assert_eq!(wrapped.len(), 1);
    let segs = &wrapped[0].segments;
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].text, "Bold");
    assert_eq!(segs[0].style, FontStyle::Bold);
    assert_eq!(segs[1].text, " then plain");
    assert_eq!(segs[1].x, 24.0);
    assert_eq!(wrapped[0].width, 15.0 * 6.0);
}

#[test]
fn overlong_word_is_forced_onto_its_own_line() {
    let font = Font::regular(12.0);
    let wrapped = wrap("a Supercalifragilisticexpialidocious b", font, 50.0, &fixed_width);
    let texts: Vec<String> = wrapped.iter().map(|l| l.text()).collect();
    assert_eq!(texts, ["a ", "Supercalifragilisticexpialidocious ", "b"]);
    assert!(wrapped[1].width > 50.0);
}

#[test]
fn plain_splitting_collapses_whitespace() {
    let font = Font::regular(12.0);
    assert_eq!(split_to_size("a   b", font, 100.0, &fixed_width), ["a b"]);
    assert!(split_to_size("   ", font, 100.0, &fixed_width).is_empty());
    assert_eq!(
        split_to_size("Supercalifragilisticexpialidocious", font, 30.0, &fixed_width),
        ["Supercalifragilisticexpialidocious"]
    );
}

#[test]
fn hanging_split_uses_narrow_first_line() {
    let font = Font::regular(12.0);
    assert_eq!(
        split_hanging("one two three four five", font, 30.0, 60.0, &fixed_width),
        ["one", "two three", "four five"]
    );
}
