use resume_pdf::markup::classify::{LineKind, RULES, classify, has_url, is_heading, strip_bullet};

#[test]
fn known_and_uppercase_headings() {
    assert_eq!(classify("PROFESSIONAL EXPERIENCE"), LineKind::Heading);
    assert_eq!(classify("TOOLS & TECHNOLOGIES"), LineKind::Heading);
    assert_eq!(classify("LANGUAGES"), LineKind::Heading);
    assert!(is_heading("A & B"));

    // too short, digits, punctuation or lowercase
    assert!(!is_heading("AB"));
    assert!(!is_heading("AWARDS 2024"));
    assert!(!is_heading("SKILLS:"));
    assert!(!is_heading("Education"));
    assert!(!is_heading(&"A".repeat(50)));
}

#[test]
fn rules_run_in_a_fixed_order() {
    let names: Vec<&str> = RULES.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, ["heading", "bold-title", "pipe-row", "key-value", "bulleted"]);
}

#[test]
fn each_line_gets_one_kind() {
    assert_eq!(
        classify("**Open Source Rate Limiter**"),
        LineKind::BoldTitle {
            title: "Open Source Rate Limiter"
        }
    );
    assert_eq!(
        classify("Globex | Jan 2021 - Present"),
        LineKind::PipeRow {
            fields: vec!["Globex", "Jan 2021 - Present"]
        }
    );
    assert_eq!(
        classify("Business Problem: Slow deploys"),
        LineKind::KeyValue {
            key: "Business Problem",
            value: "Slow deploys"
        }
    );
    assert_eq!(
        classify("•  Shipped the thing"),
        LineKind::Bulleted {
            text: "Shipped the thing"
        }
    );
    assert_eq!(
        classify("- Shipped the thing"),
        LineKind::Bulleted {
            text: "Shipped the thing"
        }
    );
    assert_eq!(classify("Just a sentence."), LineKind::Plain);
}

#[test]
fn bold_prefix_is_not_a_bullet() {
    assert_eq!(classify("**Lead** engineer for payments"), LineKind::Plain);
    assert_eq!(classify("****"), LineKind::Plain);
}

#[test]
fn pipe_with_url_is_not_a_row() {
    let kind = classify("Case study | https://example.com/x");
    assert!(!matches!(kind, LineKind::PipeRow { .. }));
    assert!(has_url("see WWW.Example.com"));
    assert!(has_url("HTTP://example.com"));
    assert!(!has_url("example.com"));
}

#[test]
fn bullets_are_stripped_up_to_bold_markup() {
    assert_eq!(strip_bullet("• - item"), "item");
    assert_eq!(strip_bullet("  *   item"), "item");
    assert_eq!(strip_bullet("* **Bold** item"), "**Bold** item");
    assert_eq!(strip_bullet("plain"), "plain");
}
