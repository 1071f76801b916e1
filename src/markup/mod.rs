pub mod classify;
mod entries;
mod header;

use crate::layout::links::parse_link_pair;
use crate::model::{
    CertificationItem, EducationRow, ProjectItem, Resume, SectionBody, SectionKind, SectionRecord,
};

use classify::{LineKind, classify, strip_bold_markers, strip_bullet};

pub use entries::{
    BUSINESS_PROBLEM, TECHNOLOGY_STACK, build_entries, parse_job_header, split_trailing_dates,
};
pub use header::{DEFAULT_FILENAME, RESUME_START, split_header, suggested_filename};

pub fn parse(text: &str) -> Resume {
    let (header, body) = split_header(text);
    let sections = build_sections(body);
    log::debug!(
        "Parsed {} sections (header name present: {})",
        sections.len(),
        header.name.is_some()
    );
    Resume { header, sections }
}

/// Group body lines under the heading that precedes them. Lines above the
/// first heading become an untitled section of plain paragraphs.
pub fn build_sections(body: &str) -> Vec<SectionRecord> {
    let mut sections = Vec::new();
    let mut heading: Option<String> = None;
    let mut lines: Vec<String> = Vec::new();

    for raw in body.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if classify(line) == LineKind::Heading {
            if heading.is_some() || !lines.is_empty() {
                sections.push(section_record(
                    heading.take().unwrap_or_default(),
                    std::mem::take(&mut lines),
                ));
            }
            heading = Some(line.to_string());
        } else {
            lines.push(line.to_string());
        }
    }
    if heading.is_some() || !lines.is_empty() {
        sections.push(section_record(heading.unwrap_or_default(), lines));
    }
    sections
}

pub fn section_kind(heading: &str) -> SectionKind {
    match heading {
        "PROFESSIONAL SUMMARY" | "SUMMARY" => SectionKind::Summary,
        "TOOLS & TECHNOLOGIES" | "SKILLS" | "TECHNICAL SKILLS" => SectionKind::Skills,
        "PROFESSIONAL EXPERIENCE" | "EXPERIENCE" | "WORK EXPERIENCE" => SectionKind::Experience,
        "PROJECTS" | "VOLUNTEER EXPERIENCE" | "VOLUNTEERING" => SectionKind::ProjectsOrVolunteering,
        "EDUCATION" => SectionKind::Education,
        "CERTIFICATIONS" => SectionKind::Certifications,
        other => SectionKind::Other(other.to_string()),
    }
}

fn section_record(heading: String, raw_lines: Vec<String>) -> SectionRecord {
    let (kind, body) = if heading.is_empty() {
        (
            SectionKind::Other(String::new()),
            SectionBody::Paragraphs(raw_lines.clone()),
        )
    } else {
        let kind = section_kind(&heading);
        let body = section_body(&kind, &raw_lines);
        (kind, body)
    };
    SectionRecord {
        heading,
        kind,
        raw_lines,
        body,
    }
}

fn section_body(kind: &SectionKind, lines: &[String]) -> SectionBody {
    match kind {
        SectionKind::Summary | SectionKind::Skills => SectionBody::Paragraphs(lines.to_vec()),
        SectionKind::Experience => SectionBody::Experience(build_entries(lines)),
        SectionKind::ProjectsOrVolunteering => SectionBody::Projects(project_items(lines)),
        SectionKind::Education => {
            SectionBody::Education(lines.iter().map(|l| education_row(l)).collect())
        }
        SectionKind::Certifications => SectionBody::Certifications(
            lines.iter().filter_map(|l| certification_item(l)).collect(),
        ),
        SectionKind::Other(_) => SectionBody::List(
            lines
                .iter()
                .map(|l| strip_bullet(l))
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    }
}

fn project_items(lines: &[String]) -> Vec<ProjectItem> {
    let mut items: Vec<ProjectItem> = Vec::new();
    for line in lines {
        if let LineKind::BoldTitle { title } = classify(line) {
            items.push(ProjectItem {
                title: Some(strip_bold_markers(title)),
                bullets: Vec::new(),
            });
            continue;
        }
        let text = strip_bullet(line);
        if text.is_empty() {
            continue;
        }
        match items.last_mut() {
            Some(item) => item.bullets.push(text.to_string()),
            None => items.push(ProjectItem {
                title: None,
                bullets: vec![text.to_string()],
            }),
        }
    }
    items
}

pub fn education_row(line: &str) -> EducationRow {
    let cleaned = strip_bold_markers(strip_bullet(line));
    let fields: Vec<&str> = cleaned.split('|').map(str::trim).collect();
    match fields.as_slice() {
        [institution, degree, years] => EducationRow::Columns {
            institution: institution.to_string(),
            degree: degree.to_string(),
            years: years.to_string(),
        },
        _ => EducationRow::Plain(cleaned.trim().to_string()),
    }
}

pub fn certification_item(line: &str) -> Option<CertificationItem> {
    let cleaned = strip_bold_markers(strip_bullet(line));
    if cleaned.trim().is_empty() {
        return None;
    }
    Some(match parse_link_pair(&cleaned) {
        Some(link) => CertificationItem {
            label: link.label,
            url: Some(link.url),
        },
        None => CertificationItem {
            label: cleaned.trim().to_string(),
            url: None,
        },
    })
}
