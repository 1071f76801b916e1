use crate::model::{BusinessProblem, EntryRecord, JobHeader};

use super::classify::{BOLD_DELIMITER, LineKind, classify, strip_bold_markers, strip_bullet};

pub const BUSINESS_PROBLEM: &str = "Business Problem:";
pub const TECHNOLOGY_STACK: &str = "Technology Stack:";

const DATE_WORDS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "to", "-", "–", "—", "present", "current",
];

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    /// Nothing consumed yet: the first line is always a job header.
    Start,
    Problem,
    Accomplishments,
    /// A `Technology Stack:` line closed the last entry.
    Closed,
}

/// Group the lines of an experience section into one record per job.
pub fn build_entries(lines: &[String]) -> Vec<EntryRecord> {
    let mut entries: Vec<EntryRecord> = Vec::new();
    let mut state = State::Start;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].as_str();
        i += 1;

        if let Some(stack) = labeled(line, TECHNOLOGY_STACK) {
            let stack = non_empty(strip_bold_markers(stack));
            match entries.last_mut() {
                Some(entry) if state != State::Closed => entry.tech_stack_line = stack,
                Some(entry) => entry.trailing_unparsed.push(line.to_string()),
                None => entries.push(EntryRecord {
                    tech_stack_line: stack,
                    ..Default::default()
                }),
            }
            state = State::Closed;
            continue;
        }

        let opens_entry = match state {
            State::Start => labeled(line, BUSINESS_PROBLEM).is_none(),
            State::Closed => {
                !is_bulleted(line)
                    && (header_from_pipe(line).is_some()
                        || split_trailing_dates(line)
                            .and_then(|h| h.dates)
                            .is_some_and(|d| is_date_range(&d)))
            }
            State::Accomplishments => is_dated_pipe_header(line),
            State::Problem => false,
        };

        if opens_entry {
            if state == State::Accomplishments {
                log::debug!("Entry closed without {TECHNOLOGY_STACK} line");
            }
            let role_line = match lines.get(i) {
                Some(next)
                    if labeled(next, BUSINESS_PROBLEM).is_none()
                        && labeled(next, TECHNOLOGY_STACK).is_none() =>
                {
                    i += 1;
                    next.clone()
                }
                _ => String::new(),
            };
            entries.push(EntryRecord {
                company_line: line.to_string(),
                header: parse_job_header(&strip_bold_markers(line)),
                role_line,
                ..Default::default()
            });
            state = State::Problem;
            continue;
        }

        // A section that opens with its problem line gets a headerless entry.
        if entries.is_empty() {
            entries.push(EntryRecord::default());
            state = State::Problem;
        }
        let Some(entry) = entries.last_mut() else {
            continue;
        };
        match state {
            State::Problem => {
                entry.business_problem = Some(match labeled(line, BUSINESS_PROBLEM) {
                    Some(rest) => BusinessProblem::Statement(rest.to_string()),
                    None => BusinessProblem::Unlabeled(strip_bullet(line).to_string()),
                });
                state = State::Accomplishments;
            }
            State::Accomplishments => {
                let text = strip_bullet(line);
                if !text.is_empty() {
                    entry.accomplishments.push(text.to_string());
                }
            }
            State::Closed => entry.trailing_unparsed.push(line.to_string()),
            State::Start => {}
        }
    }

    entries
}

/// Company and dates of a job header row. Pipe rows split on their last
/// field; other rows are scanned for a trailing date phrase; failing both the
/// whole row is the company.
pub fn parse_job_header(line: &str) -> JobHeader {
    if let Some(header) = header_from_pipe(line) {
        return header;
    }
    if let Some(header) = split_trailing_dates(line) {
        return header;
    }
    let company = match classify(line) {
        LineKind::PipeRow { fields } => fields
            .into_iter()
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => line.trim().to_string(),
    };
    JobHeader {
        company,
        dates: None,
    }
}

fn header_from_pipe(line: &str) -> Option<JobHeader> {
    let LineKind::PipeRow { fields } = classify(line) else {
        return None;
    };
    let fields: Vec<&str> = fields.into_iter().filter(|f| !f.is_empty()).collect();
    let (dates, company) = fields.split_last()?;
    if company.is_empty() {
        return None;
    }
    Some(JobHeader {
        company: company.join(", "),
        dates: Some(dates.to_string()),
    })
}

/// A pipe row that is unmistakably the next job: not bulleted, and its last
/// field reads as a date window.
fn is_dated_pipe_header(line: &str) -> bool {
    if is_bulleted(line) {
        return false;
    }
    header_from_pipe(line)
        .and_then(|h| h.dates)
        .is_some_and(|d| is_date_window(&d))
}

fn is_bulleted(line: &str) -> bool {
    strip_bullet(line).len() != line.trim_start().len()
}

/// Recover `Company, City  Jan 2020 to Present` as company + dates by scanning
/// tokens from the right while they belong to the date vocabulary.
pub fn split_trailing_dates(line: &str) -> Option<JobHeader> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let start = words
        .iter()
        .rposition(|w| !is_date_token(w))
        .map_or(0, |p| p + 1);
    if start == 0 || start == words.len() {
        return None;
    }

    let dates = words[start..].join(" ");
    if !is_date_window(&dates) {
        return None;
    }
    let company = words[..start].join(" ");
    let company = company.strip_suffix(',').unwrap_or(&company).trim().to_string();
    Some(JobHeader {
        company,
        dates: Some(dates),
    })
}

fn is_date_token(word: &str) -> bool {
    let w: String = word
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect::<String>()
        .to_lowercase();
    if w.is_empty() {
        return false;
    }
    DATE_WORDS.contains(&w.as_str()) || (w.len() == 4 && w.chars().all(|c| c.is_ascii_digit()))
}

/// A date phrase must name a year or an open end.
fn is_date_window(text: &str) -> bool {
    let lower = text.to_lowercase();
    let has_year = lower
        .as_bytes()
        .windows(4)
        .any(|w| w.iter().all(u8::is_ascii_digit));
    has_year || lower.contains("present") || lower.contains("current")
}

/// A span of time rather than a single date: a range connector or an open end.
fn is_date_range(text: &str) -> bool {
    text.split_whitespace().any(|w| {
        matches!(
            w.to_lowercase().trim_matches(|c| c == '.' || c == ','),
            "to" | "-" | "–" | "—" | "present" | "current"
        )
    })
}

/// Text after `label`, tolerating a bullet glyph and bold markers around the label.
fn labeled<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = strip_bullet(line).trim_start_matches(BOLD_DELIMITER);
    let rest = rest.strip_prefix(label)?;
    Some(rest.trim_start_matches(BOLD_DELIMITER).trim())
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
