mod common;

use common::{approx, find_run, fixed_width, links, text_runs};
use resume_pdf::LayoutConfig;
use resume_pdf::model::{DrawOp, Font, FontStyle, PageGeometry};

const LINK_BLUE: Option<[u8; 3]> = Some([25, 118, 210]);

fn fixture_doc() -> resume_pdf::model::Document {
    common::layout(&common::load_fixture("sample_resume.txt"))
}

#[test]
fn link_bullet_gets_a_rect_over_its_first_line() {
    let doc = fixture_doc();
    let runs = text_runs(&doc);
    let geometry = PageGeometry::a4();
    let label = find_run(&runs, "Led migration to AWS");
    assert_eq!(label.color, LINK_BLUE);
    assert!(approx(label.x, geometry.content_left() + 15.0));

    let link = links(&doc)
        .into_iter()
        .find(|l| l.url == "https://example.com/case-study")
        .expect("link rect for the case study");
    assert_eq!(link.page, label.page);
    assert!(approx(link.x, label.x));
    assert!(approx(link.y, label.y - 10.0));
    assert!(approx(link.h, 12.0));
    assert!(approx(
        link.w,
        fixed_width("Led migration to AWS", Font::regular(12.0))
    ));

    let bullet = runs
        .iter()
        .filter(|r| r.text == "\u{2022}" && approx(r.y, label.y))
        .count();
    assert_eq!(bullet, 1);
}

#[test]
fn fixture_link_inventory() {
    let doc = fixture_doc();
    let mut urls: Vec<&str> = links(&doc).iter().map(|l| l.url).collect();
    urls.sort();
    assert_eq!(
        urls,
        [
            "https://aws.amazon.com/certification/",
            "https://example.com/case-study",
            "https://janedoe.dev",
            "https://linkedin.com/in/janedoe",
            "https://www.example.org/limiter",
            "mailto:jane.doe@example.com",
        ]
    );
}

#[test]
fn applicant_header_layout() {
    let doc = fixture_doc();
    let runs = text_runs(&doc);
    let geometry = PageGeometry::a4();

    let name = find_run(&runs, "Jane Doe");
    assert_eq!(name.style, FontStyle::Bold);
    assert_eq!(name.size, 16.0);
    assert!(approx(name.y, geometry.content_top()));

    let role = find_run(&runs, "Senior Platform Engineer");
    assert!(approx(role.y - name.y, 18.0));
    assert_eq!(role.size, 11.0);

    let linkedin = find_run(&runs, "LinkedIn Profile");
    assert_eq!(linkedin.color, LINK_BLUE);
    let width = fixed_width("LinkedIn Profile", Font::regular(11.0));
    assert!(approx(linkedin.x + width, geometry.content_right()));

    let phone = find_run(&runs, "(555) 010-2030");
    assert_eq!(phone.color, None);
    assert!(runs.iter().all(|r| r.text != "GitHub Profile"));

    let divider = doc.pages[0]
        .ops
        .iter()
        .any(|op| matches!(op, DrawOp::Rule { gray: 150, .. }));
    assert!(divider);
}

#[test]
fn education_row_is_three_aligned_columns() {
    let doc = fixture_doc();
    let runs = text_runs(&doc);
    let geometry = PageGeometry::a4();
    let font = Font::regular(12.0);

    let institution = find_run(&runs, "University of Texas at Austin");
    let degree = find_run(&runs, "B.S. Computer Science");
    let years = find_run(&runs, "2013 - 2017");

    assert!(approx(institution.y, degree.y) && approx(degree.y, years.y));
    assert!(approx(institution.x, geometry.content_left()));
    let degree_center = degree.x + fixed_width(degree.text, font) / 2.0;
    assert!(approx(degree_center, geometry.width / 2.0));
    assert!(approx(
        years.x + fixed_width(years.text, font),
        geometry.content_right()
    ));
}

#[test]
fn certifications_are_numbered_per_item() {
    let doc = fixture_doc();
    let runs = text_runs(&doc);
    let left = PageGeometry::a4().content_left();

    let first = find_run(&runs, "AWS Certified Solutions Architect");
    let second = find_run(&runs, "Certified Kubernetes Administrator");
    assert_eq!(first.color, LINK_BLUE);
    assert_eq!(second.color, None);
    assert!(approx(first.x, left + 20.0) && approx(second.x, left + 20.0));

    let one = find_run(&runs, "1.");
    let two = find_run(&runs, "2.");
    assert!(approx(one.x, left) && approx(one.y, first.y));
    assert!(approx(two.x, left) && approx(two.y, second.y));
}

#[test]
fn experience_header_and_labels() {
    let doc = fixture_doc();
    let runs = text_runs(&doc);
    let geometry = PageGeometry::a4();

    let company = find_run(&runs, "Globex Corporation");
    let dates = find_run(&runs, "Jan 2021 - Present");
    assert_eq!(company.style, FontStyle::Bold);
    assert!(approx(company.y, dates.y));
    let bold = Font::bold(12.0);
    assert!(approx(
        dates.x + fixed_width(dates.text, bold),
        geometry.content_right()
    ));

    let label = runs
        .iter()
        .find(|r| r.text == "Business Problem:" && r.y > company.y)
        .expect("problem label");
    assert_eq!(label.style, FontStyle::Bold);
    let hanging = runs
        .iter()
        .find(|r| approx(r.y, label.y) && r.text.starts_with("Release"))
        .expect("problem text on the label row");
    assert!(hanging.x > label.x);

    let stack = find_run(&runs, "Technology Stack:");
    assert_eq!(stack.style, FontStyle::Bold);
}

#[test]
fn bold_runs_in_summary() {
    let doc = fixture_doc();
    let runs = text_runs(&doc);
    let bold = find_run(&runs, "eight years");
    assert_eq!(bold.style, FontStyle::Bold);
    let before = runs
        .iter()
        .find(|r| r.text.starts_with("Platform engineer with"))
        .expect("summary opening");
    assert_eq!(before.style, FontStyle::Normal);
    assert!(approx(before.y, bold.y));
    assert!(bold.x > before.x);
}

#[test]
fn generic_sections_do_not_detect_links() {
    let doc = common::layout("AWARDS\n- Hackathon winner | https://example.com/hack");
    assert!(links(&doc).is_empty());
    let runs = text_runs(&doc);
    assert!(runs.iter().any(|r| r.text.contains("https://example.com/hack")));
}

#[test]
fn eight_accomplishments_get_eight_bullets() {
    let mut text = String::from(
        "PROFESSIONAL EXPERIENCE\nAcme Corp | 2019 - Present\nPrincipal Engineer\nBusiness Problem: Too slow.\n",
    );
    for i in 1..=8 {
        text.push_str(&format!("• Accomplishment number {i}\n"));
    }
    text.push_str("Technology Stack: Rust\n");
    let doc = common::layout(&text);
    let runs = text_runs(&doc);
    assert_eq!(runs.iter().filter(|r| r.text == "\u{2022}").count(), 8);
    let first = find_run(&runs, "Accomplishment number 1");
    let last = find_run(&runs, "Accomplishment number 8");
    assert!(approx(
        last.y - first.y,
        7.0 * LayoutConfig::default().line_height()
    ));
}

#[test]
fn overlong_word_is_drawn_not_dropped() {
    let config = LayoutConfig {
        geometry: PageGeometry {
            width: 150.0,
            ..PageGeometry::a4()
        },
        ..LayoutConfig::default()
    };
    let doc = common::layout_with("SUMMARY\nSupercalifragilisticexpialidocious is long", &config);
    let runs = text_runs(&doc);
    let word = find_run(&runs, "Supercalifragilisticexpialidocious");
    assert!(approx(word.x, config.geometry.content_left()));
    assert!(fixed_width(word.text.trim(), Font::regular(12.0)) > config.geometry.text_width());
    let rest = find_run(&runs, "is long");
    assert!(rest.y > word.y);
}

#[test]
fn trailing_lines_are_still_drawn() {
    let doc = common::layout(
        "PROFESSIONAL EXPERIENCE\nAcme | 2020 - 2021\nDev\nBusiness Problem: X.\n• Y\nTechnology Stack: Go\nLoose remark",
    );
    let runs = text_runs(&doc);
    let stack = find_run(&runs, "Go");
    let remark = find_run(&runs, "Loose remark");
    assert!(remark.y > stack.y);
}

#[test]
fn layout_is_deterministic() {
    let text = common::load_fixture("sample_resume.txt");
    assert_eq!(common::layout(&text), common::layout(&text));
}

#[test]
fn wrapped_link_label_is_clickable_on_its_first_line_only() {
    let label = "Built an open source rate limiter used by several payment teams to absorb \
                 traffic spikes without dropping legitimate customer requests during sales";
    let doc = common::layout(&format!(
        "PROJECTS\n**Rate Limiter**\n- {label} | https://example.com/p"
    ));
    let runs = text_runs(&doc);
    let blue: Vec<_> = runs.iter().filter(|r| r.color == LINK_BLUE).collect();
    assert!(blue.len() >= 2, "label should wrap, got {} lines", blue.len());
    let rebuilt: Vec<&str> = blue.iter().map(|r| r.text).collect();
    assert_eq!(rebuilt.join(" "), label);

    let links = links(&doc);
    assert_eq!(links.len(), 1);
    let first = blue[0];
    assert!(approx(links[0].x, first.x));
    assert!(approx(links[0].y, first.y - 10.0));
    assert!(approx(
        links[0].w,
        fixed_width(first.text, Font::regular(12.0))
    ));
    assert!(blue[1..].iter().all(|r| r.y > first.y));
}
