use crate::model::ResumeHeader;

pub const RESUME_START: &str = "---RESUME_START---";

pub const DEFAULT_FILENAME: &str = "Tailored-Resume.pdf";

/// Values the generator writes when it could not extract a field.
const PLACEHOLDERS: [&str; 3] = ["not found", "empty string", "n/a"];

/// Split the `KEY: value` block above the sentinel from the resume body.
/// Without a sentinel the whole input is body and every field is absent.
pub fn split_header(text: &str) -> (ResumeHeader, &str) {
    let Some(idx) = text.find(RESUME_START) else {
        return (ResumeHeader::default(), text);
    };
    let body = text[idx + RESUME_START.len()..].trim_start();

    let mut header = ResumeHeader::default();
    for line in text[..idx].lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "APPLICANT_NAME" => &mut header.name,
            "APPLICANT_PHONE" => &mut header.phone,
            "APPLICANT_EMAIL" => &mut header.email,
            "APPLICANT_LOCATION" => &mut header.location,
            "APPLICANT_LINKEDIN" => &mut header.linkedin,
            "APPLICANT_GITHUB" => &mut header.github,
            "APPLICANT_PORTFOLIO" => &mut header.portfolio,
            "APPLICANT_ROLE" => &mut header.role,
            "TARGET_COMPANY" => &mut header.company,
            _ => continue,
        };
        // first occurrence wins
        if slot.is_none() {
            *slot = field_value(value);
        }
    }
    (header, body)
}

fn field_value(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty()
        || PLACEHOLDERS
            .iter()
            .any(|p| value.eq_ignore_ascii_case(p))
    {
        return None;
    }
    Some(value.to_string())
}

/// `Name_Role_Company.pdf`, built from whichever of the three fields exist.
pub fn suggested_filename(header: &ResumeHeader) -> String {
    let company = header
        .company
        .as_deref()
        .filter(|c| !c.eq_ignore_ascii_case("target company"));
    let parts: Vec<String> = [header.name.as_deref(), header.role.as_deref(), company]
        .into_iter()
        .flatten()
        .map(sanitize_filename_part)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{}.pdf", parts.join("_"))
    }
}

fn sanitize_filename_part(part: &str) -> String {
    let kept: String = part
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '?' | '%' | '*' | ':' | '|' | '"' | '<' | '>'))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}
